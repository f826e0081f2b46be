//! Parser benchmarks.
//!
//! Run with: `cargo bench --package scriptc-parse`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scriptc_parse::parse;

fn parse_source(source: &str) {
    let tokens = scriptc_lex::tokenize(source).expect("source should lex");
    parse(tokens).expect("source should parse");
}

fn bench(c: &mut Criterion, group_name: &str, bench_name: &str, source: &str) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function(bench_name, |b| b.iter(|| parse_source(black_box(source))));
    group.finish();
}

fn bench_let_statement(c: &mut Criterion) {
    bench(c, "parser_simple", "let_statement", "let x: number = 42;");
}

fn bench_functions(c: &mut Criterion) {
    let source = r#"
        function main(): void {
          let x: number = 42;
          let y: number = x + 1;
          console.log(y);
        }

        function fib(n: number): number {
          if (n <= 1) {
            return n;
          }
          return fib(n - 1) + fib(n - 2);
        }
    "#;
    bench(c, "parser_functions", "functions", source);
}

fn bench_interfaces_and_classes(c: &mut Criterion) {
    let source = r#"
        interface Point {
          x: number;
          y: number;
        }

        class Rectangle {
          origin: Point;
          width: number;
          height: number;

          constructor(origin: Point, width: number, height: number) {
            this.origin = origin;
            this.width = width;
            this.height = height;
          }

          area(): number {
            return this.width * this.height;
          }
        }
    "#;
    bench(c, "parser_interfaces_classes", "interfaces_classes", source);
}

fn bench_enums(c: &mut Criterion) {
    let source = r#"
        enum Color {
          Red,
          Green,
          Blue,
        }

        const enum Flag {
          A = 1,
          B = 2,
        }

        enum Direction {
          Up = "UP",
          Down = "DOWN",
        }
    "#;
    bench(c, "parser_enums", "enums", source);
}

fn bench_control_flow(c: &mut Criterion) {
    let source = r#"
        function process(n: number): number {
          if (n < 0) {
            return -1;
          } else if (n === 0) {
            return 0;
          } else {
            switch (n) {
              case 1:
                return 1;
              case 2:
                return 2;
              default: {
                let sum: number = 0;
                let i: number = 0;
                while (i < n) {
                  sum = sum + i;
                  i++;
                }
                return sum;
              }
            }
          }
        }
    "#;
    bench(c, "parser_control_flow", "control_flow", source);
}

fn bench_generics_and_templates(c: &mut Criterion) {
    let source = r#"
        interface Box<T> {
          value: T;
        }

        function identity<T>(x: T): T {
          return x;
        }

        type Extracted<T> = T extends Box<infer U> ? U : never;

        let label = `box holding ${identity(42)} of ${typeof 42}`;
    "#;
    bench(c, "parser_generics_templates", "generics_templates", source);
}

criterion_group!(
    benches,
    bench_let_statement,
    bench_functions,
    bench_interfaces_and_classes,
    bench_enums,
    bench_control_flow,
    bench_generics_and_templates,
);
criterion_main!(benches);
