//! GameVM compiler driver.
//!
//! Wires the stage crates into one pipeline and exposes it to the `gvc`
//! binary:
//!
//! - [`pipeline`]: stage traits and their default implementations
//! - [`Compiler`]: the orchestrator (`compile`, `compile_file`, `check`)
//! - [`config`]: `gamevm.json` project files
//! - [`commands`]: CLI command handlers
//!
//! # Example
//!
//! ```no_run
//! use gvc::{CompileOptions, Compiler, TargetArch};
//!
//! let compiler = Compiler::for_target(TargetArch::Atari2600)?;
//! let result = compiler.compile("begin COLUBK := $0E end.", ".pas", &CompileOptions::default());
//! assert!(result.success);
//! assert_eq!(result.code.len(), 4096);
//! # Ok::<(), gvc::CompileError>(())
//! ```

pub mod commands;
mod compiler;
pub mod config;
pub mod pipeline;
mod tracing_setup;

pub use compiler::{Artifacts, CompilationResult, Compiler, Stages};
pub use config::{ConfigError, ProjectConfig};
pub use gv_diagnostic::{CompileError, CompileResult, Diagnostic, ErrorCode, Severity};
pub use gv_ir::{
    CapabilityTier, CompileOptions, DispatchStrategy, Enforcement, OptLevel, TargetArch,
};
pub use tracing_setup::init_tracing;
