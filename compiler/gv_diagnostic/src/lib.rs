//! Diagnostics and the compile error taxonomy.
//!
//! Every failure that leaves a pipeline stage is a [`CompileError`]. Stage
//! crates keep their own narrow error types (`ParseError`, `LowerError`,
//! `EncodeError`) and convert into `CompileError` at the orchestrator
//! boundary, which is the only place failures are caught.
//!
//! # Error Codes
//!
//! Codes are grouped by phase so they can be searched for:
//! - `E0xxx`: source (lexer/parser)
//! - `E1xxx`: capability enforcement
//! - `E2xxx`: pipeline stages (target selection, lowering, encoding, I/O)
//! - `E9xxx`: internal compiler errors

mod diagnostic;
mod error;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{CompileError, CompileResult};
pub use error_code::ErrorCode;
