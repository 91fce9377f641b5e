//! Command handlers for the `gvc` CLI.
//!
//! Each submodule implements one command. Shared helpers live here.

pub mod build;
mod check;
mod targets;

use crate::CompilationResult;

pub use build::{build_file, parse_build_options, BuildOptions, EmitType, OptionError};
pub use check::check_file;
pub use targets::list_targets;

/// Read a source file, with the path in the error text.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))
}

pub(crate) fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

/// Report a failed compilation with its error codes, then exit.
pub(crate) fn fail(result: &CompilationResult) -> ! {
    if result.diagnostics.is_empty() {
        eprintln!("error: {}", result.error_message);
    }
    for diagnostic in &result.diagnostics {
        eprintln!("{diagnostic}");
    }
    std::process::exit(1);
}
