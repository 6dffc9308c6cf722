//! Flagless pipeline runner.
//!
//! Runs all four export stages from the current directory. There is
//! deliberately no argument surface: the data layout is fixed so that
//! output files are diffable drop-in replacements run over run. Any
//! failure prints `Error: <message>` and exits non-zero.

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = albarrage::pipeline::run(Path::new(".")) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
