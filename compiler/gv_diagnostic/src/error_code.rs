use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Source errors
/// - E1xxx: Capability errors
/// - E2xxx: Pipeline errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Source Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Unterminated string literal or comment
    E0002,
    /// Invalid number literal
    E0003,
    /// Unexpected token
    E0101,
    /// Expected expression
    E0102,
    /// Expected identifier
    E0103,
    /// Malformed `requires` clause
    E0104,

    // Capability Errors (E1xxx)
    /// Program uses a capability the backend does not grant
    E1001,
    /// Requested profile or extension exceeds the backend
    E1002,

    // Pipeline Errors (E2xxx)
    /// Unsupported target architecture
    E2001,
    /// Unsupported source file extension
    E2002,
    /// Target lowering failed (e.g. zero-page RAM exhausted)
    E2003,
    /// Instruction encoding failed
    E2004,
    /// Source file could not be read
    E2005,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E0101").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E0103 => "E0103",
            ErrorCode::E0104 => "E0104",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
