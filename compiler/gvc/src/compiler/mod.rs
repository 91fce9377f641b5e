//! Compilation orchestrator.
//!
//! [`Compiler`] sequences the stages in [`Stages`] and is the single
//! failure boundary of a compilation:
//!
//! 1. extension check (frontend must accept the file extension)
//! 2. parse → HLIR
//! 3. capability validation against the backend's profile
//! 4. HLIR → MLIR → (mid opt) → LLIR → (low opt) → Final → (final opt)
//! 5. code generation
//!
//! Every stage error becomes a failed [`CompilationResult`] carrying the
//! error's message and diagnostics. A panic inside any stage is caught and
//! reported as `Compilation failed: <message>`. Nothing else is returned on
//! failure except any warnings collected so far.

mod result;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use gv_capability::{check_request, validate, CapabilityProvider};
use gv_diagnostic::{CompileError, CompileResult, Diagnostic, ErrorCode};
use gv_ir::{
    CapabilityProfile, CompileOptions, Enforcement, FinalProgram, HlProgram, LlProgram,
    MlProgram, TargetArch,
};
use gv_m6502::Atari2600;
use tracing::{debug, warn};

use crate::pipeline::defaults::{
    unsupported_target, Atari2600RomGenerator, DefaultFinalOptimizer, DefaultLowOptimizer,
    DefaultMidOptimizer, M6502Emitter, M6502Lowering, PascalFrontend,
};
use crate::pipeline::{
    CodeGenerator, FinalOptimizer, Frontend, LowOptimizer, LowToFinal, MidOptimizer, MidToLow,
};

pub use result::CompilationResult;

/// The components a [`Compiler`] runs.
pub struct Stages {
    pub frontend: Box<dyn Frontend>,
    pub mid_optimizer: Box<dyn MidOptimizer>,
    pub low_optimizer: Box<dyn LowOptimizer>,
    pub final_optimizer: Box<dyn FinalOptimizer>,
    pub mid_to_low: Box<dyn MidToLow>,
    pub low_to_final: Box<dyn LowToFinal>,
    pub code_generator: Box<dyn CodeGenerator>,
    pub capabilities: Box<dyn CapabilityProvider>,
}

impl Stages {
    /// Pascal frontend, default optimizers, Atari 2600 backend.
    pub fn atari2600() -> Self {
        Stages {
            frontend: Box::new(PascalFrontend),
            mid_optimizer: Box::new(DefaultMidOptimizer),
            low_optimizer: Box::new(DefaultLowOptimizer),
            final_optimizer: Box::new(DefaultFinalOptimizer),
            mid_to_low: Box::new(M6502Lowering),
            low_to_final: Box::new(M6502Emitter),
            code_generator: Box::new(Atari2600RomGenerator),
            capabilities: Box::new(Atari2600),
        }
    }
}

/// Every intermediate product of a successful compilation.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub hlir: HlProgram,
    pub mlir: MlProgram,
    pub llir: LlProgram,
    pub final_ir: FinalProgram,
    /// Empty from [`Compiler::build_ir`].
    pub code: Vec<u8>,
    pub warnings: Vec<String>,
}

pub struct Compiler {
    stages: Stages,
}

impl Compiler {
    pub fn new(stages: Stages) -> Self {
        Compiler { stages }
    }

    /// Compiler wired with the default stages for `target`.
    pub fn for_target(target: TargetArch) -> CompileResult<Self> {
        match target {
            TargetArch::Atari2600 => Ok(Compiler::new(Stages::atari2600())),
            other => Err(unsupported_target(other)),
        }
    }

    pub fn capability_profile(&self) -> CapabilityProfile {
        self.stages.capabilities.capability_profile()
    }

    pub fn frontend(&self) -> &dyn Frontend {
        self.stages.frontend.as_ref()
    }

    /// Compile in-memory source. `extension` selects the frontend
    /// (`.pas`).
    pub fn compile(
        &self,
        source: &str,
        extension: &str,
        options: &CompileOptions,
    ) -> CompilationResult {
        self.compile_named(source, "", extension, options)
    }

    /// Compile in-memory source recorded as `source_file` in the IR and
    /// the result.
    pub fn compile_named(
        &self,
        source: &str,
        source_file: &str,
        extension: &str,
        options: &CompileOptions,
    ) -> CompilationResult {
        let mut warnings = Vec::new();
        let outcome = catch_stage_panics(|| {
            self.build(source, source_file, extension, options, &mut warnings)
        });
        match outcome {
            Ok(artifacts) => {
                CompilationResult::success(artifacts.code, source_file, options, warnings)
            }
            Err(err) => CompilationResult::failure(&err, source_file, options, warnings),
        }
    }

    /// Read `path` and compile it, using its extension to pick the
    /// frontend.
    pub fn compile_file(
        &self,
        path: impl AsRef<Path>,
        options: &CompileOptions,
    ) -> CompilationResult {
        let path = path.as_ref();
        let source_file = path.display().to_string();
        match read_source(path) {
            Ok(source) => self.compile_named(&source, &source_file, &extension_of(path), options),
            Err(err) => CompilationResult::failure(&err, &source_file, options, Vec::new()),
        }
    }

    /// Front end and capability validation only.
    pub fn check(
        &self,
        source: &str,
        source_file: &str,
        extension: &str,
        options: &CompileOptions,
    ) -> CompilationResult {
        let mut warnings = Vec::new();
        let outcome = catch_stage_panics(|| {
            let program = self.parse(source, source_file, extension)?;
            self.validate_capabilities(&program, options, &mut warnings)
        });
        match outcome {
            Ok(()) => CompilationResult::success(Vec::new(), source_file, options, warnings),
            Err(err) => CompilationResult::failure(&err, source_file, options, warnings),
        }
    }

    /// Run the whole pipeline, keeping every intermediate program.
    ///
    /// Unlike [`compile`](Self::compile) this does not catch panics.
    /// Advisory-mode warnings are pushed to `warnings` as they are found,
    /// so they survive a later failure.
    pub fn build(
        &self,
        source: &str,
        source_file: &str,
        extension: &str,
        options: &CompileOptions,
        warnings: &mut Vec<String>,
    ) -> CompileResult<Artifacts> {
        let mut artifacts = self.build_ir(source, source_file, extension, options, warnings)?;
        artifacts.code = self
            .stages
            .code_generator
            .generate(&artifacts.final_ir, &options.codegen())?;
        debug!(bytes = artifacts.code.len(), "code generated");
        Ok(artifacts)
    }

    /// [`build`](Self::build) without code generation; `code` is left
    /// empty. Used for IR listings of programs the encoder cannot handle.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(file = source_file, target = %options.target, opt = %options.effective_opt_level())
    )]
    pub fn build_ir(
        &self,
        source: &str,
        source_file: &str,
        extension: &str,
        options: &CompileOptions,
        warnings: &mut Vec<String>,
    ) -> CompileResult<Artifacts> {
        let hlir = self.parse(source, source_file, extension)?;
        self.validate_capabilities(&hlir, options, warnings)?;

        let level = options.effective_opt_level();
        let codegen = options.codegen();

        let mut mlir = self.stages.frontend.to_mid_level(&hlir);
        if options.optimize {
            mlir = self.stages.mid_optimizer.optimize(&mlir, level);
        }

        let mut llir = self.stages.mid_to_low.transform(&mlir)?;
        if options.optimize {
            llir = self.stages.low_optimizer.optimize(&llir, level);
        }

        let mut final_ir = self.stages.low_to_final.transform(&llir, &codegen)?;
        if options.optimize {
            final_ir = self.stages.final_optimizer.optimize(&final_ir, level);
        }
        debug!(lines = final_ir.lines.len(), "final IR ready");

        Ok(Artifacts {
            hlir,
            mlir,
            llir,
            final_ir,
            code: Vec::new(),
            warnings: warnings.clone(),
        })
    }

    fn parse(&self, source: &str, source_file: &str, extension: &str) -> CompileResult<HlProgram> {
        let frontend = self.stages.frontend.as_ref();
        if !frontend.accepts(extension) {
            return Err(CompileError::pipeline(
                ErrorCode::E2002,
                "Unsupported source",
                format!(
                    "no frontend for extension '{extension}' (expected one of: {})",
                    frontend.extensions().join(", ")
                ),
            ));
        }
        let mut program = frontend.parse(source)?;
        program.source_file = source_file.to_string();
        Ok(program)
    }

    /// Check the backend against the request, then the program against the
    /// backend.
    ///
    /// Request violations are `E1002`, program violations `E1001`.
    fn validate_capabilities(
        &self,
        program: &HlProgram,
        options: &CompileOptions,
        warnings: &mut Vec<String>,
    ) -> CompileResult<()> {
        let profile = self.stages.capabilities.capability_profile();
        let granted = self.stages.capabilities.supported_extensions();

        let report = match options.enforcement {
            Enforcement::Strict => Diagnostic::error,
            Enforcement::Advisory => Diagnostic::warning,
        };
        let backend_note = format!("{} provides {}", options.target, profile.base);
        let mut violations: Vec<Diagnostic> = check_request(options, &profile)
            .into_iter()
            .map(|message| report(ErrorCode::E1002).with_message(message))
            .collect();
        violations.extend(validate(program, profile.base, &granted).into_iter().map(|message| {
            report(ErrorCode::E1001)
                .with_message(message)
                .with_note(backend_note.clone())
        }));
        if violations.is_empty() {
            return Ok(());
        }

        match options.enforcement {
            Enforcement::Strict => Err(CompileError::CapabilityViolation { violations }),
            Enforcement::Advisory => {
                for violation in violations {
                    warn!(
                        code = %violation.code,
                        message = %violation.message,
                        "capability violation (advisory)"
                    );
                    warnings.push(violation.message);
                }
                Ok(())
            }
        }
    }
}

fn read_source(path: &Path) -> CompileResult<String> {
    std::fs::read_to_string(path).map_err(|e| CompileError::SourceRead {
        reason: e.to_string(),
    })
}

/// `.ext` of `path`, or empty.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Run `f`, turning a panic into [`CompileError::Unexpected`].
fn catch_stage_panics<T>(f: impl FnOnce() -> CompileResult<T>) -> CompileResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(CompileError::unexpected(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
