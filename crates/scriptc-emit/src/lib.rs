//! scriptc-emit - type-erasing printer (§4.4).
//!
//! `emit(program) -> output text`. A single recursive walk over the syntax
//! tree that reproduces runtime syntax verbatim and erases type-only
//! surface: type annotations, return-type annotations, `implements`
//! clauses, type arguments, generic parameters, type assertions,
//! `as`-expressions, and non-null assertions all disappear, while the
//! expression they decorate is kept. Interface and type-alias declarations
//! become a single comment line; enumerated declarations lower to the
//! runtime object-literal pattern described below. Deterministic, no side
//! effects — the same tree always prints the same text.
//!
//! Grounded on the general shape of a recursive AST-to-string serializer
//! — an indentation-tracked `Write`-based visitor over one statement per
//! line — and on `scriptc_util::diagnostic`'s existing `Write`-based
//! builder pattern for threading a sink through a recursive print.

use scriptc_parse::ast::*;
use scriptc_util::Symbol;
use std::fmt::Write as _;

/// Two-space indentation, one statement per line, matching the source
/// dialect's own block formatting.
struct Emitter {
    out: String,
    indent: usize,
}

/// Prints `program` as compiled output text (§4.4).
pub fn emit(program: &Program) -> String {
    let mut emitter = Emitter { out: String::new(), indent: 0 };
    emitter.print_statements(&program.statements);
    emitter.out
}

impl Emitter {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn print_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.write_indent();
            self.print_stmt(stmt);
            self.out.push('\n');
        }
    }

    /// Prints `{ ... }` with each statement on its own indented line.
    fn emit_block(&mut self, block: &Block) {
        self.out.push_str("{\n");
        self.indent += 1;
        self.print_statements(&block.statements);
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    /// A loop/if body that may or may not already be a `{ ... }` block in
    /// the source — structural braces are retained either way (§4.4).
    fn print_body_block(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.emit_block(&b.block),
            other => {
                self.out.push_str("{\n");
                self.indent += 1;
                self.write_indent();
                self.print_stmt(other);
                self.out.push('\n');
                self.indent -= 1;
                self.write_indent();
                self.out.push('}');
            }
        }
    }

    fn print_decorators(&mut self, decorators: &[Expr]) {
        for dec in decorators {
            self.out.push('@');
            self.print_expr(dec);
            self.out.push('\n');
            self.write_indent();
        }
    }

    // -- statements -----------------------------------------------------

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Variable(v) => self.print_variable(v),
            Stmt::Function(f) => self.print_function(f),
            Stmt::Interface(i) => {
                write!(self.out, "// interface {} removed", i.name).unwrap();
            }
            Stmt::TypeAlias(t) => {
                write!(self.out, "// type {} removed", t.name).unwrap();
            }
            Stmt::Class(c) => self.print_class(c),
            Stmt::Enum(e) => self.print_enum(e),
            Stmt::Return(r) => {
                self.out.push_str("return");
                if let Some(value) = &r.value {
                    self.out.push(' ');
                    self.print_expr(value);
                }
                self.out.push(';');
            }
            Stmt::If(s) => self.print_if(s),
            Stmt::While(s) => {
                self.out.push_str("while (");
                self.print_expr(&s.condition);
                self.out.push_str(") ");
                self.print_body_block(&s.body);
            }
            Stmt::DoWhile(s) => {
                self.out.push_str("do ");
                self.print_body_block(&s.body);
                self.out.push_str(" while (");
                self.print_expr(&s.condition);
                self.out.push_str(");");
            }
            Stmt::For(s) => self.print_for(s),
            Stmt::ForIn(s) => {
                write!(self.out, "for ({} {} in ", var_kind_str(s.kind), s.name).unwrap();
                self.print_expr(&s.object);
                self.out.push_str(") ");
                self.print_body_block(&s.body);
            }
            Stmt::ForOf(s) => {
                write!(self.out, "for ({} {} of ", var_kind_str(s.kind), s.name).unwrap();
                self.print_expr(&s.iterable);
                self.out.push_str(") ");
                self.print_body_block(&s.body);
            }
            Stmt::Switch(s) => self.print_switch(s),
            Stmt::Break(_) => self.out.push_str("break;"),
            Stmt::Continue(_) => self.out.push_str("continue;"),
            Stmt::Throw(s) => {
                self.out.push_str("throw ");
                self.print_expr(&s.value);
                self.out.push(';');
            }
            Stmt::Try(s) => self.print_try(s),
            Stmt::Expression(s) => {
                self.print_expr(&s.expr);
                self.out.push(';');
            }
            Stmt::Block(b) => self.emit_block(&b.block),
            Stmt::Import(i) => self.print_import(i),
            Stmt::Export(e) => self.print_export(e),
            Stmt::Empty { .. } => {}
        }
    }

    fn print_variable(&mut self, v: &VariableStmt) {
        write!(self.out, "{} {}", var_kind_str(v.kind), v.name).unwrap();
        if let Some(init) = &v.initializer {
            self.out.push_str(" = ");
            self.print_expr(init);
        }
        self.out.push(';');
    }

    fn print_function(&mut self, f: &FunctionStmt) {
        self.print_decorators(&f.decorators);
        if f.is_async {
            self.out.push_str("async ");
        }
        write!(self.out, "function {}(", f.name).unwrap();
        self.print_params(&f.params);
        self.out.push(')');
        match &f.body {
            Some(body) => {
                self.out.push(' ');
                self.emit_block(body);
            }
            None => self.out.push(';'),
        }
    }

    fn print_params(&mut self, params: &[Param]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if param.rest {
                self.out.push_str("...");
            }
            write!(self.out, "{}", param.name).unwrap();
            if let Some(default) = &param.default {
                self.out.push_str(" = ");
                self.print_expr(default);
            }
        }
    }

    fn print_class(&mut self, c: &ClassStmt) {
        self.print_decorators(&c.decorators);
        if c.is_abstract {
            self.out.push_str("abstract ");
        }
        write!(self.out, "class {}", c.name).unwrap();
        if let Some(super_name) = c.superclass.as_ref().and_then(type_ref_name) {
            write!(self.out, " extends {}", super_name).unwrap();
        }
        // `implements` is type-only surface (§4.4) and is stripped.
        self.out.push_str(" {\n");
        self.indent += 1;
        for member in &c.members {
            self.write_indent();
            self.print_class_member(member);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    fn print_class_member(&mut self, m: &ClassMember) {
        self.print_decorators(&m.decorators);
        if m.is_static {
            self.out.push_str("static ");
        }
        match m.kind {
            MemberKind::Field => {
                write!(self.out, "{}", m.name).unwrap();
                if let Some(value) = &m.value {
                    self.out.push_str(" = ");
                    self.print_expr(value);
                }
                self.out.push(';');
            }
            MemberKind::Method => match &m.body {
                None => {
                    write!(self.out, "// abstract {}(", m.name).unwrap();
                    self.print_params(&m.params);
                    self.out.push(')');
                }
                Some(body) => {
                    write!(self.out, "{}(", m.name).unwrap();
                    self.print_params(&m.params);
                    self.out.push_str(") ");
                    self.emit_block(body);
                }
            },
        }
    }

    /// Enumerated declarations lower to a runtime IIFE that assigns each
    /// member, with the two-way numeric mapping (§4.4).
    fn print_enum(&mut self, e: &EnumStmt) {
        if e.is_const {
            write!(self.out, "// const enum {} - inlined", e.name).unwrap();
            return;
        }
        write!(self.out, "var {};\n", e.name).unwrap();
        self.write_indent();
        write!(self.out, "(function ({}) {{\n", e.name).unwrap();
        self.indent += 1;
        let mut next_numeric = 0.0_f64;
        for member in &e.members {
            self.write_indent();
            self.print_enum_member(e.name, member, &mut next_numeric);
            self.out.push('\n');
        }
        self.indent -= 1;
        self.write_indent();
        write!(self.out, "}})({} || ({} = {{}}));", e.name, e.name).unwrap();
    }

    fn print_enum_member(&mut self, enum_name: Symbol, member: &EnumMember, next_numeric: &mut f64) {
        match &member.initializer {
            EnumInitializer::None => {
                let value = *next_numeric;
                *next_numeric += 1.0;
                write!(
                    self.out,
                    "{0}[{0}[\"{1}\"] = {2}] = \"{1}\";",
                    enum_name,
                    member.name,
                    format_number(value)
                )
                .unwrap();
            }
            EnumInitializer::Number(n) => {
                *next_numeric = n + 1.0;
                write!(
                    self.out,
                    "{0}[{0}[\"{1}\"] = {2}] = \"{1}\";",
                    enum_name,
                    member.name,
                    format_number(*n)
                )
                .unwrap();
            }
            EnumInitializer::String(s) => {
                write!(self.out, "{0}[\"{1}\"] = \"{2}\";", enum_name, member.name, escape_string(s)).unwrap();
            }
            EnumInitializer::Expr(expr) => {
                write!(self.out, "{0}[{0}[\"{1}\"] = ", enum_name, member.name).unwrap();
                self.print_expr(expr);
                write!(self.out, "] = \"{1}\";", enum_name, member.name).unwrap();
                *next_numeric += 1.0;
            }
        }
    }

    /// `else if` chains are rendered inline (`} else if (...) {`) rather
    /// than as a nested block, by recursing directly into the else
    /// branch's own `if` instead of wrapping it in a fresh block (§4.4).
    fn print_if(&mut self, s: &IfStmt) {
        self.out.push_str("if (");
        self.print_expr(&s.condition);
        self.out.push_str(") ");
        self.print_body_block(&s.then_branch);
        if let Some(else_branch) = &s.else_branch {
            self.out.push_str(" else ");
            match else_branch.as_ref() {
                Stmt::If(inner) => self.print_if(inner),
                other => self.print_body_block(other),
            }
        }
    }

    fn print_for(&mut self, s: &ForStmt) {
        self.out.push_str("for (");
        match s.init.as_ref() {
            ForInit::Variable(v) => {
                self.print_variable(v);
                self.out.push(' ');
            }
            ForInit::Expression(e) => {
                self.print_expr(e);
                self.out.push_str("; ");
            }
            ForInit::None => self.out.push_str("; "),
        }
        if let Some(condition) = &s.condition {
            self.print_expr(condition);
        }
        self.out.push_str("; ");
        if let Some(update) = &s.update {
            self.print_expr(update);
        }
        self.out.push_str(") ");
        self.print_body_block(&s.body);
    }

    fn print_switch(&mut self, s: &SwitchStmt) {
        self.out.push_str("switch (");
        self.print_expr(&s.discriminant);
        self.out.push_str(") {\n");
        self.indent += 1;
        for case in &s.cases {
            self.write_indent();
            match &case.test {
                Some(test) => {
                    self.out.push_str("case ");
                    self.print_expr(test);
                    self.out.push(':');
                }
                None => self.out.push_str("default:"),
            }
            self.out.push('\n');
            self.indent += 1;
            self.print_statements(&case.consequent);
            self.indent -= 1;
        }
        self.indent -= 1;
        self.write_indent();
        self.out.push('}');
    }

    fn print_try(&mut self, s: &TryStmt) {
        self.out.push_str("try ");
        self.emit_block(&s.block);
        if let Some(handler) = &s.handler {
            self.out.push_str(" catch ");
            if let Some(param) = handler.param {
                write!(self.out, "({}) ", param).unwrap();
            }
            self.emit_block(&handler.body);
        }
        if let Some(finalizer) = &s.finalizer {
            self.out.push_str(" finally ");
            self.emit_block(finalizer);
        }
    }

    fn print_import(&mut self, i: &ImportStmt) {
        self.out.push_str("import ");
        let mut clauses = Vec::new();
        if let Some(default) = i.default {
            clauses.push(default.to_string());
        }
        if !i.specifiers.is_empty() {
            clauses.push(format!("{{ {} }}", specifiers_to_string(&i.specifiers)));
        }
        self.out.push_str(&clauses.join(", "));
        write!(self.out, " from \"{}\";", i.source).unwrap();
    }

    fn print_export(&mut self, e: &ExportStmt) {
        match e {
            ExportStmt::Declaration { decl, .. } => {
                self.out.push_str("export ");
                self.print_stmt(decl);
            }
            ExportStmt::Named { specifiers, .. } => {
                write!(self.out, "export {{ {} }};", specifiers_to_string(specifiers)).unwrap();
            }
            ExportStmt::Default { value, .. } => {
                self.out.push_str("export default ");
                self.print_expr(value);
                self.out.push(';');
            }
        }
    }

    // -- expressions ------------------------------------------------------

    /// Operator precedence is respected only via placement, matching the
    /// source; explicit `parenthesized` nodes are the only source of
    /// re-parenthesization (§4.4).
    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { value, .. } => self.print_literal(value),
            Expr::Identifier { name, .. } => write!(self.out, "{}", name).unwrap(),
            Expr::This { .. } => self.out.push_str("this"),
            Expr::Super { .. } => self.out.push_str("super"),
            Expr::Binary { op, left, right, .. } => {
                self.print_expr(left);
                write!(self.out, " {} ", binop_str(*op)).unwrap();
                self.print_expr(right);
            }
            Expr::Logical { op, left, right, .. } => {
                self.print_expr(left);
                write!(self.out, " {} ", logical_op_str(*op)).unwrap();
                self.print_expr(right);
            }
            Expr::Unary { op, operand, .. } => self.print_unary(*op, operand),
            Expr::Update { op, operand, prefix, .. } => {
                let symbol = if matches!(op, UpdateOp::Increment) { "++" } else { "--" };
                if *prefix {
                    self.out.push_str(symbol);
                    self.print_expr(operand);
                } else {
                    self.print_expr(operand);
                    self.out.push_str(symbol);
                }
            }
            Expr::Call { callee, args, optional, .. } => {
                self.print_expr(callee);
                if *optional {
                    self.out.push_str("?.");
                }
                self.out.push('(');
                self.print_args(args);
                self.out.push(')');
            }
            Expr::Member { object, property, optional, .. } => {
                self.print_expr(object);
                self.out.push_str(if *optional { "?." } else { "." });
                write!(self.out, "{}", property).unwrap();
            }
            Expr::ComputedMember { object, property, optional, .. } => {
                self.print_expr(object);
                if *optional {
                    self.out.push_str("?.");
                }
                self.out.push('[');
                self.print_expr(property);
                self.out.push(']');
            }
            Expr::ObjectLiteral { properties, .. } => self.print_object_literal(properties),
            Expr::ArrayLiteral { elements, .. } => {
                self.out.push('[');
                self.print_args(elements);
                self.out.push(']');
            }
            Expr::Arrow { params, body, is_async, .. } => {
                if *is_async {
                    self.out.push_str("async ");
                }
                self.out.push('(');
                self.print_params(params);
                self.out.push_str(") => ");
                match body {
                    ArrowBody::Expr(e) => self.print_expr(e),
                    ArrowBody::Block(b) => self.emit_block(b),
                }
            }
            Expr::FunctionExpr { name, params, body, is_async, .. } => {
                if *is_async {
                    self.out.push_str("async ");
                }
                self.out.push_str("function");
                if let Some(name) = name {
                    write!(self.out, " {}", name).unwrap();
                }
                self.out.push('(');
                self.print_params(params);
                self.out.push_str(") ");
                self.emit_block(body);
            }
            Expr::Conditional { condition, then_branch, else_branch, .. } => {
                self.print_expr(condition);
                self.out.push_str(" ? ");
                self.print_expr(then_branch);
                self.out.push_str(" : ");
                self.print_expr(else_branch);
            }
            Expr::Assignment { op, target, value, .. } => {
                self.print_expr(target);
                write!(self.out, " {} ", assign_op_str(*op)).unwrap();
                self.print_expr(value);
            }
            Expr::New { callee, args, .. } => {
                self.out.push_str("new ");
                self.print_expr(callee);
                self.out.push('(');
                self.print_args(args);
                self.out.push(')');
            }
            Expr::Spread { argument, .. } => {
                self.out.push_str("...");
                self.print_expr(argument);
            }
            Expr::Yield { argument, delegate, .. } => {
                self.out.push_str("yield");
                if *delegate {
                    self.out.push('*');
                }
                if let Some(arg) = argument {
                    self.out.push(' ');
                    self.print_expr(arg);
                }
            }
            Expr::TemplateLiteral { quasis, expressions, .. } => self.print_template(quasis, expressions),
            Expr::TaggedTemplate { tag, quasis, expressions, .. } => {
                self.print_expr(tag);
                self.print_template(quasis, expressions);
            }
            // Type-only surface: the expression value is kept, the
            // annotation/assertion is erased (§4.4).
            Expr::TypeAssertion { expr, .. } => self.print_expr(expr),
            Expr::As { expr, .. } => self.print_expr(expr),
            Expr::NonNull { expr, .. } => self.print_expr(expr),
            Expr::ClassExpr { class, .. } => self.print_class(class),
            Expr::Parenthesized { expr, .. } => {
                self.out.push('(');
                self.print_expr(expr);
                self.out.push(')');
            }
        }
    }

    fn print_unary(&mut self, op: UnOp, operand: &Expr) {
        match op {
            UnOp::Neg => {
                self.out.push('-');
                self.print_expr(operand);
            }
            UnOp::Pos => {
                self.out.push('+');
                self.print_expr(operand);
            }
            UnOp::Not => {
                self.out.push('!');
                self.print_expr(operand);
            }
            UnOp::BitNot => {
                self.out.push('~');
                self.print_expr(operand);
            }
            UnOp::Typeof => {
                self.out.push_str("typeof ");
                self.print_expr(operand);
            }
            UnOp::Delete => {
                self.out.push_str("delete ");
                self.print_expr(operand);
            }
            UnOp::Await => {
                self.out.push_str("await ");
                self.print_expr(operand);
            }
        }
    }

    fn print_args(&mut self, args: &[Expr]) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.print_expr(arg);
        }
    }

    fn print_object_literal(&mut self, properties: &[ObjectProperty]) {
        if properties.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{ ");
        for (i, prop) in properties.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if prop.computed {
                write!(self.out, "[{}]: ", prop.key).unwrap();
            } else {
                write!(self.out, "{}: ", prop.key).unwrap();
            }
            self.print_expr(&prop.value);
        }
        self.out.push_str(" }");
    }

    fn print_template(&mut self, quasis: &[String], expressions: &[Expr]) {
        self.out.push('`');
        for (i, quasi) in quasis.iter().enumerate() {
            self.out.push_str(quasi);
            if let Some(expr) = expressions.get(i) {
                self.out.push_str("${");
                self.print_expr(expr);
                self.out.push('}');
            }
        }
        self.out.push('`');
    }

    fn print_literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Number(n) => self.out.push_str(&format_number(*n)),
            Literal::String(s) => write!(self.out, "\"{}\"", escape_string(s)).unwrap(),
            Literal::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Literal::Null => self.out.push_str("null"),
            Literal::Undefined => self.out.push_str("undefined"),
        }
    }
}

fn var_kind_str(kind: VarKind) -> &'static str {
    match kind {
        VarKind::Let => "let",
        VarKind::Const => "const",
        VarKind::Var => "var",
    }
}

fn binop_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Pow => "**",
        BinOp::Eq => "==",
        BinOp::StrictEq => "===",
        BinOp::NotEq => "!=",
        BinOp::StrictNotEq => "!==",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::LtEq => "<=",
        BinOp::GtEq => ">=",
        BinOp::Shl => "<<",
        BinOp::Shr => ">>",
        BinOp::Shru => ">>>",
        BinOp::BitAnd => "&",
        BinOp::BitOr => "|",
        BinOp::BitXor => "^",
        BinOp::Instanceof => "instanceof",
        BinOp::In => "in",
    }
}

fn logical_op_str(op: LogicalOp) -> &'static str {
    match op {
        LogicalOp::And => "&&",
        LogicalOp::Or => "||",
        LogicalOp::Nullish => "??",
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
        AssignOp::ModAssign => "%=",
    }
}

fn type_ref_name(te: &TypeExpr) -> Option<Symbol> {
    match te {
        TypeExpr::Reference { name, .. } => Some(*name),
        _ => None,
    }
}

fn specifiers_to_string(specifiers: &[ImportSpecifier]) -> String {
    specifiers
        .iter()
        .map(|s| if s.imported == s.local { s.imported.to_string() } else { format!("{} as {}", s.imported, s.local) })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Integral values print without a trailing `.0`, matching the target
/// dialect's own number-literal formatting.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}
