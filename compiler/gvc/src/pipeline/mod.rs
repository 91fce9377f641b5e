//! Stage contracts.
//!
//! Each stage of the pipeline is a trait object handed to
//! [`Compiler::new`](crate::Compiler::new):
//!
//! ```text
//! Frontend ─parse→ HLIR ─to_mid_level→ MLIR ─MidOptimizer→ MLIR
//!   ─MidToLow→ LLIR ─LowOptimizer→ LLIR ─LowToFinal→ Final
//!   ─FinalOptimizer→ Final ─CodeGenerator→ bytes
//! ```
//!
//! All stages are `Send + Sync` and take their input by reference, so one
//! [`Compiler`](crate::Compiler) can serve concurrent compilations.
//! [`defaults`] holds the Pascal / 6502 implementations.

pub mod defaults;

use gv_diagnostic::CompileResult;
use gv_ir::{CodeGenOptions, FinalProgram, HlProgram, LlProgram, MlProgram, OptLevel};
use gv_parse::ParseError;

/// Source language frontend.
pub trait Frontend: Send + Sync {
    /// Accepted file extensions, with leading dot.
    fn extensions(&self) -> &[&str];

    fn parse(&self, source: &str) -> Result<HlProgram, ParseError>;

    fn to_mid_level(&self, program: &HlProgram) -> MlProgram;

    /// Whether `extension` (with or without dot, any case) is accepted.
    fn accepts(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.');
        self.extensions()
            .iter()
            .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

pub trait MidOptimizer: Send + Sync {
    fn optimize(&self, program: &MlProgram, level: OptLevel) -> MlProgram;
}

pub trait LowOptimizer: Send + Sync {
    fn optimize(&self, program: &LlProgram, level: OptLevel) -> LlProgram;
}

pub trait FinalOptimizer: Send + Sync {
    fn optimize(&self, program: &FinalProgram, level: OptLevel) -> FinalProgram;
}

/// Target lowering: symbolic MLIR to register/address LLIR.
pub trait MidToLow: Send + Sync {
    fn transform(&self, program: &MlProgram) -> CompileResult<LlProgram>;
}

/// Instruction selection: LLIR to assembly lines.
pub trait LowToFinal: Send + Sync {
    fn transform(
        &self,
        program: &LlProgram,
        options: &CodeGenOptions,
    ) -> CompileResult<FinalProgram>;
}

/// Final program to the target's binary image.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, program: &FinalProgram, options: &CodeGenOptions) -> CompileResult<Vec<u8>>;
}
