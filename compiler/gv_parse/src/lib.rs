//! Pascal-subset frontend.
//!
//! Turns source text into [`HlProgram`]:
//!
//! ```text
//! source → lex (logos) → tokens → recursive descent → HLIR
//! ```
//!
//! # Language
//!
//! ```text
//! program Name;
//! const LIMIT = 10; BG = $0E;
//! var x, y: byte;
//! procedure Flash; requires L3 via Ext.Math.Fast;
//! begin COLUBK := BG end;
//! begin
//!   x := 5 + 3;
//!   if x > 0 then y := 1 else y := 2;
//!   while x < LIMIT do begin x := x + 1; Flash end
//! end.
//! ```
//!
//! - Keywords are case-insensitive; identifiers keep their spelling.
//! - Comments: `{ … }`, `(* … *)`, `// …`.
//! - Literals: decimal, `$hex`, `true`/`false`, `'string'` (`''` escapes a
//!   quote).
//! - `var` sections are accepted and ignored: storage is allocated on first
//!   assignment by the backend.
//! - The main block becomes function `main`; the single module is named
//!   after the program (`main` if the header is omitted).
//!
//! Parsing stops at the first error.

mod error;
mod parser;
mod token;

use gv_ir::HlProgram;

pub use error::ParseError;
pub use token::{lex, Token, TokenKind};

/// File extensions (with leading dot) this frontend accepts.
pub const EXTENSIONS: &[&str] = &[".pas", ".pp"];

/// Whether `extension` (with or without leading dot, any case) is Pascal.
pub fn accepts_extension(extension: &str) -> bool {
    let ext = extension.trim_start_matches('.');
    EXTENSIONS
        .iter()
        .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// Parse a complete program.
///
/// `source_file` on the result is left empty; callers that know the file
/// name fill it in.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<HlProgram, ParseError> {
    let tokens = lex(source)?;
    parser::Parser::new(source, tokens).parse_program()
}
