//! Parse error type.

use std::fmt;

use gv_diagnostic::{CompileError, Diagnostic, ErrorCode};
use gv_ir::Span;

/// A lexing or parsing failure with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// One-based line of `span.start`.
    pub line: u32,
    /// One-based column of `span.start`.
    pub column: u32,
}

impl ParseError {
    /// Build an error, resolving line/column against `source`.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span, source: &str) -> Self {
        let (line, column) = span.line_col(source);
        ParseError {
            code,
            message: message.into(),
            span,
            line,
            column,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.to_string())
            .with_span(self.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse {
            diagnostics: vec![err.to_diagnostic()],
        }
    }
}
