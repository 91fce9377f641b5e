//! Tokenizer.
//!
//! A logos-generated [`RawToken`] scanner recognizes the lexical shapes;
//! [`lex`] then cooks them into [`TokenKind`]: keywords are resolved
//! case-insensitively from identifiers, numbers are range-checked, string
//! quotes are unescaped, and comments are dropped.

use std::fmt;

use gv_diagnostic::ErrorCode;
use gv_ir::Span;
use logos::Logos;

use crate::error::ParseError;

/// Whether a comment found its closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentEnd {
    Closed,
    Unterminated,
}

/// Consume a block comment body up to and including `close`.
///
/// Without a closing delimiter the rest of the input is consumed.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>, close: &str) -> CommentEnd {
    let rest = lex.remainder();
    match rest.find(close) {
        Some(offset) => {
            lex.bump(offset + close.len());
            CommentEnd::Closed
        }
        None => {
            lex.bump(rest.len());
            CommentEnd::Unterminated
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[token("{", |lex| block_comment(lex, "}"))]
    #[token("(*", |lex| block_comment(lex, "*)"))]
    #[regex(r"//[^\n]*", |_| CommentEnd::Closed)]
    Comment(CommentEnd),

    #[regex(r"'([^'\n]|'')*'")]
    Str,

    #[regex(r"'([^'\n]|'')*")]
    UnterminatedStr,

    #[regex(r"[0-9]+")]
    Decimal,

    #[regex(r"\$[0-9A-Fa-f]+")]
    Hex,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[token(":=")]
    Assign,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
}

/// Cooked token kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Str(String),

    // Keywords
    Program,
    Const,
    Var,
    Procedure,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Requires,
    Via,
    Div,
    Mod,
    And,
    Or,
    True,
    False,

    // Punctuation and operators
    Assign,
    Semi,
    Colon,
    Comma,
    Dot,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    Eof,
}

impl TokenKind {
    fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "program" => TokenKind::Program,
            "const" => TokenKind::Const,
            "var" => TokenKind::Var,
            "procedure" => TokenKind::Procedure,
            "begin" => TokenKind::Begin,
            "end" => TokenKind::End,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "do" => TokenKind::Do,
            "requires" => TokenKind::Requires,
            "via" => TokenKind::Via,
            "div" => TokenKind::Div,
            "mod" => TokenKind::Mod,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether both kinds are the same variant, ignoring payloads.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident(name) => return write!(f, "identifier `{name}`"),
            TokenKind::Int(value) => return write!(f, "number `{value}`"),
            TokenKind::Str(value) => return write!(f, "string '{value}'"),
            TokenKind::Program => "program",
            TokenKind::Const => "const",
            TokenKind::Var => "var",
            TokenKind::Procedure => "procedure",
            TokenKind::Begin => "begin",
            TokenKind::End => "end",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Requires => "requires",
            TokenKind::Via => "via",
            TokenKind::Div => "div",
            TokenKind::Mod => "mod",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Assign => ":=",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "<>",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Eof => return f.write_str("end of file"),
        };
        write!(f, "`{text}`")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize `source`, ending with a single [`TokenKind::Eof`].
///
/// Stops at the first malformed token.
#[tracing::instrument(level = "trace", skip_all)]
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        let error = |code, message: String| ParseError::new(code, message, span, source);

        let kind = match result {
            Ok(RawToken::Comment(CommentEnd::Closed)) => continue,
            Ok(RawToken::Comment(CommentEnd::Unterminated)) => {
                return Err(error(ErrorCode::E0002, "unterminated comment".to_string()));
            }
            Ok(RawToken::UnterminatedStr) => {
                return Err(error(ErrorCode::E0002, "unterminated string".to_string()));
            }
            Ok(RawToken::Str) => {
                let inner = &slice[1..slice.len() - 1];
                TokenKind::Str(inner.replace("''", "'"))
            }
            Ok(RawToken::Decimal) => match slice.parse::<i64>() {
                Ok(value) => TokenKind::Int(value),
                Err(_) => {
                    return Err(error(
                        ErrorCode::E0003,
                        format!("number `{slice}` is out of range"),
                    ));
                }
            },
            Ok(RawToken::Hex) => match i64::from_str_radix(&slice[1..], 16) {
                Ok(value) => TokenKind::Int(value),
                Err(_) => {
                    return Err(error(
                        ErrorCode::E0003,
                        format!("number `{slice}` is out of range"),
                    ));
                }
            },
            Ok(RawToken::Word) => {
                TokenKind::keyword(slice).unwrap_or_else(|| TokenKind::Ident(slice.to_string()))
            }
            Ok(RawToken::Assign) => TokenKind::Assign,
            Ok(RawToken::Semi) => TokenKind::Semi,
            Ok(RawToken::Colon) => TokenKind::Colon,
            Ok(RawToken::Comma) => TokenKind::Comma,
            Ok(RawToken::Dot) => TokenKind::Dot,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::Plus) => TokenKind::Plus,
            Ok(RawToken::Minus) => TokenKind::Minus,
            Ok(RawToken::Star) => TokenKind::Star,
            Ok(RawToken::Slash) => TokenKind::Slash,
            Ok(RawToken::Eq) => TokenKind::Eq,
            Ok(RawToken::NotEq) => TokenKind::NotEq,
            Ok(RawToken::Lt) => TokenKind::Lt,
            Ok(RawToken::LtEq) => TokenKind::LtEq,
            Ok(RawToken::Gt) => TokenKind::Gt,
            Ok(RawToken::GtEq) => TokenKind::GtEq,
            Err(()) => {
                if slice.starts_with('$') {
                    return Err(error(
                        ErrorCode::E0003,
                        "expected hex digits after `$`".to_string(),
                    ));
                }
                return Err(error(
                    ErrorCode::E0001,
                    format!("unexpected character `{slice}`"),
                ));
            }
        };
        tokens.push(Token { kind, span });
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
    });
    tracing::trace!(count = tokens.len(), "lexed");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .unwrap_or_else(|e| panic!("lex failed: {e}"))
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("BEGIN End wHiLe Counter"),
            vec![
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::While,
                TokenKind::Ident("Counter".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers_and_strings() {
        assert_eq!(
            kinds("42 $0E $ff 'it''s'"),
            vec![
                TokenKind::Int(42),
                TokenKind::Int(14),
                TokenKind::Int(255),
                TokenKind::Str("it's".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("x { note } (* block\n comment *) := // tail\n 1"),
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Assign,
                TokenKind::Int(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn block_comments_stop_at_first_close() {
        assert_eq!(
            kinds("(* a * b ** c *) x (**) { } y (*)*)"),
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Ident("y".to_string()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("(a * b)"),
            vec![
                TokenKind::LParen,
                TokenKind::Ident("a".to_string()),
                TokenKind::Star,
                TokenKind::Ident("b".to_string()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_operators_win_over_prefixes() {
        assert_eq!(
            kinds("<= <> >= < : ="),
            vec![
                TokenKind::LtEq,
                TokenKind::NotEq,
                TokenKind::GtEq,
                TokenKind::Lt,
                TokenKind::Colon,
                TokenKind::Eq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_cover_token_text() {
        let tokens = lex("a := 10").unwrap_or_else(|e| panic!("lex failed: {e}"));
        assert_eq!(tokens[1].span, Span::new(2, 4));
        assert_eq!(tokens[2].span, Span::new(5, 7));
        assert_eq!(tokens[3].span, Span::new(7, 7));
    }

    #[test]
    fn malformed_input_reports_codes() {
        let Err(err) = lex("x := 'open") else {
            panic!("expected unterminated string error");
        };
        assert_eq!(err.code, ErrorCode::E0002);

        let Err(err) = lex("{ never closed") else {
            panic!("expected unterminated comment error");
        };
        assert_eq!(err.code, ErrorCode::E0002);
        assert_eq!(err.message, "unterminated comment");

        let Err(err) = lex("x := 1 (* open") else {
            panic!("expected unterminated comment error");
        };
        assert_eq!(err.code, ErrorCode::E0002);
        assert_eq!(err.span.start, 7);

        let Err(err) = lex("x := 99999999999999999999") else {
            panic!("expected overflow error");
        };
        assert_eq!(err.code, ErrorCode::E0003);

        let Err(err) = lex("x := 1;\n  y # 2") else {
            panic!("expected bad character error");
        };
        assert_eq!(err.code, ErrorCode::E0001);
        assert_eq!((err.line, err.column), (2, 5));
        assert_eq!(err.message, "unexpected character `#`");
    }
}
