//! scriptc - command-line entry point (§6, external collaborator).
//!
//! `scriptc <input> [output] [--skip-type-check|-s] [-o <file>]`. Reads
//! `input`, calls `scriptc_driver::compile`, writes the compiled text on
//! success or prints `format_errors` on failure. Default output path
//! replaces a trailing `.ts` with `.js`.

use anyhow::Context;
use clap::Parser;
use scriptc_driver::{compile, format_errors, CompileOptions, DriverError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scriptc", version, about = "Compiles the source dialect to the target dialect")]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Output file path (defaults to `input` with a trailing `.ts` replaced
    /// by `.js`)
    output: Option<PathBuf>,

    /// Skip the type-checking stage
    #[arg(short = 's', long = "skip-type-check")]
    skip_type_check: bool,

    /// Explicit output file path (overrides the positional `output`)
    #[arg(short = 'o')]
    out_flag: Option<PathBuf>,
}

fn default_output_path(input: &std::path::Path) -> PathBuf {
    match input.to_str() {
        Some(s) if s.ends_with(".ts") => PathBuf::from(format!("{}js", &s[..s.len() - 2])),
        _ => input.with_extension("js"),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.input)
        .map_err(|source| DriverError::ReadSource { path: cli.input.clone(), source })
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let result = compile(
        &source,
        CompileOptions { skip_type_check: cli.skip_type_check, ..Default::default() },
    );

    if !result.success {
        eprint!("{}", format_errors(&result.errors, Some(&source)));
        return Ok(ExitCode::FAILURE);
    }

    let output_path = cli.out_flag.or(cli.output).unwrap_or_else(|| default_output_path(&cli.input));
    let output = result.output.expect("success implies output");

    std::fs::write(&output_path, output)
        .map_err(|source| DriverError::WriteOutput { path: output_path.clone(), source })
        .with_context(|| format!("writing {}", output_path.display()))?;

    Ok(ExitCode::SUCCESS)
}
