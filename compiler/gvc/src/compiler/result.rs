use gv_diagnostic::{CompileError, Diagnostic};
use gv_ir::{CapabilityTier, CompileOptions, TargetArch};

/// Uniform outcome of one compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationResult {
    pub success: bool,
    /// Target image; empty on failure.
    pub code: Vec<u8>,
    /// Empty on success.
    pub error_message: String,
    pub source_file: String,
    pub target: TargetArch,
    /// Tier the compilation was requested at.
    pub tier: CapabilityTier,
    /// Advisory-mode capability violations.
    pub warnings: Vec<String>,
    /// The failure with its error codes and notes; empty on success.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationResult {
    pub(super) fn success(
        code: Vec<u8>,
        source_file: &str,
        options: &CompileOptions,
        warnings: Vec<String>,
    ) -> Self {
        CompilationResult {
            success: true,
            code,
            error_message: String::new(),
            source_file: source_file.to_string(),
            target: options.target,
            tier: options.tier,
            warnings,
            diagnostics: Vec::new(),
        }
    }

    pub(super) fn failure(
        error: &CompileError,
        source_file: &str,
        options: &CompileOptions,
        warnings: Vec<String>,
    ) -> Self {
        tracing::debug!(code = %error.code(), %error, "compilation failed");
        CompilationResult {
            success: false,
            code: Vec::new(),
            error_message: error.to_string(),
            source_file: source_file.to_string(),
            target: options.target,
            tier: options.tier,
            warnings,
            diagnostics: error.to_diagnostics(),
        }
    }
}
