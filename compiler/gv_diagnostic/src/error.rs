use thiserror::Error;

use crate::{Diagnostic, ErrorCode};

/// Every way a compilation can fail.
///
/// The `Display` text is what ends up in a failed compilation result's
/// error message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("{}", join_messages(.diagnostics))]
    Parse { diagnostics: Vec<Diagnostic> },

    /// Request violations carry `E1002`, program violations `E1001`.
    #[error("Backend capability violations: {}", join_messages(.violations))]
    CapabilityViolation { violations: Vec<Diagnostic> },

    #[error("{stage}: {reason}")]
    Pipeline {
        code: ErrorCode,
        stage: &'static str,
        reason: String,
    },

    #[error("Failed to read source file: {reason}")]
    SourceRead { reason: String },

    #[error("Compilation failed: {message}")]
    Unexpected { message: String },
}

/// Result type alias for compilation stages.
pub type CompileResult<T> = Result<T, CompileError>;

fn join_messages(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CompileError {
    pub fn pipeline(code: ErrorCode, stage: &'static str, reason: impl Into<String>) -> Self {
        CompileError::Pipeline {
            code,
            stage,
            reason: reason.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        CompileError::Unexpected {
            message: message.into(),
        }
    }

    /// Searchable code for this failure. Parse and capability errors report
    /// the code of their first diagnostic.
    pub fn code(&self) -> ErrorCode {
        match self {
            CompileError::Parse { diagnostics } => diagnostics
                .first()
                .map_or(ErrorCode::E0101, |d| d.code),
            CompileError::CapabilityViolation { violations } => violations
                .first()
                .map_or(ErrorCode::E1001, |d| d.code),
            CompileError::Pipeline { code, .. } => *code,
            CompileError::SourceRead { .. } => ErrorCode::E2005,
            CompileError::Unexpected { .. } => ErrorCode::E9001,
        }
    }

    /// The failure as diagnostics, for rendering with codes and spans.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Parse { diagnostics } => diagnostics.clone(),
            CompileError::CapabilityViolation { violations } => violations.clone(),
            other => vec![Diagnostic::error(other.code()).with_message(other.to_string())],
        }
    }
}

impl From<Diagnostic> for CompileError {
    fn from(diagnostic: Diagnostic) -> Self {
        CompileError::Parse {
            diagnostics: vec![diagnostic],
        }
    }
}
