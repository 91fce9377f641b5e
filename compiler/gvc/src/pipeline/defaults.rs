//! Default stage implementations: Pascal frontend, the `gv_opt` passes, and
//! the 6502 / Atari 2600 backend.

use gv_diagnostic::{CompileError, CompileResult, ErrorCode};
use gv_ir::{
    CodeGenOptions, FinalProgram, HlProgram, LlProgram, MlProgram, OptLevel, TargetArch,
};
use gv_m6502::Atari2600;
use gv_parse::ParseError;

use super::{
    CodeGenerator, FinalOptimizer, Frontend, LowOptimizer, LowToFinal, MidOptimizer, MidToLow,
};

#[derive(Copy, Clone, Debug, Default)]
pub struct PascalFrontend;

impl Frontend for PascalFrontend {
    fn extensions(&self) -> &[&str] {
        gv_parse::EXTENSIONS
    }

    fn parse(&self, source: &str) -> Result<HlProgram, ParseError> {
        gv_parse::parse(source)
    }

    fn to_mid_level(&self, program: &HlProgram) -> MlProgram {
        gv_lower::lower_program(program)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultMidOptimizer;

impl MidOptimizer for DefaultMidOptimizer {
    fn optimize(&self, program: &MlProgram, level: OptLevel) -> MlProgram {
        gv_opt::optimize_mid(program, level)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultLowOptimizer;

impl LowOptimizer for DefaultLowOptimizer {
    fn optimize(&self, program: &LlProgram, level: OptLevel) -> LlProgram {
        gv_opt::optimize_low(program, level)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultFinalOptimizer;

impl FinalOptimizer for DefaultFinalOptimizer {
    fn optimize(&self, program: &FinalProgram, level: OptLevel) -> FinalProgram {
        gv_opt::optimize_final(program, level)
    }
}

/// Zero-page allocation and `load`/`store` selection.
#[derive(Copy, Clone, Debug, Default)]
pub struct M6502Lowering;

impl MidToLow for M6502Lowering {
    fn transform(&self, program: &MlProgram) -> CompileResult<LlProgram> {
        Ok(gv_m6502::lower_program(program)?)
    }
}

/// LLIR stream to 6502 mnemonics.
#[derive(Copy, Clone, Debug, Default)]
pub struct M6502Emitter;

impl LowToFinal for M6502Emitter {
    fn transform(
        &self,
        program: &LlProgram,
        options: &CodeGenOptions,
    ) -> CompileResult<FinalProgram> {
        Ok(gv_m6502::emit_program(program, options))
    }
}

/// Mnemonics to a 4 KiB Atari 2600 cartridge image.
#[derive(Copy, Clone, Debug, Default)]
pub struct Atari2600RomGenerator;

impl CodeGenerator for Atari2600RomGenerator {
    fn generate(&self, program: &FinalProgram, options: &CodeGenOptions) -> CompileResult<Vec<u8>> {
        if options.target != Atari2600::TARGET {
            return Err(unsupported_target(options.target));
        }
        Ok(gv_m6502::generate_rom(program)?)
    }
}

pub(crate) fn unsupported_target(target: TargetArch) -> CompileError {
    CompileError::pipeline(
        ErrorCode::E2001,
        "Unsupported target",
        format!("no backend for '{target}' (available: {})", Atari2600::TARGET),
    )
}
