//! Recursive descent parser over the cooked token stream.
//!
//! # Grammar
//!
//! ```text
//! program    = [ "program" IDENT ";" ] { decl } block "." ;
//! decl       = "const" { IDENT "=" constant ";" }
//!            | "var" { IDENT { "," IDENT } ":" IDENT ";" }
//!            | "procedure" IDENT [ "(" ")" ] ";" [ requires ] block ";" ;
//! requires   = "requires" path [ "via" path ] ";" ;
//! path       = IDENT { "." IDENT } ;
//! block      = "begin" stmts "end" ;
//! ```
//!
//! Statements live in [`stmt`], expressions in [`expr`].

mod expr;
mod stmt;

use gv_diagnostic::ErrorCode;
use gv_ir::{
    CapabilityTier, HlConstant, HlFunction, HlModule, HlProgram, Literal, Span,
};

use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Function name given to the program's main block.
pub const MAIN_FUNCTION: &str = "main";

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

// Cursor

impl<'src> Parser<'src> {
    /// `tokens` must end with [`TokenKind::Eof`], as [`lex`](crate::lex)
    /// guarantees.
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn peek_kind(&self) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + 1).min(last)].kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        self.error_here(
            ErrorCode::E0101,
            format!("expected {kind}, found {}", self.current_kind()),
        )
    }

    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            let span = self.advance().span;
            Ok((name, span))
        } else {
            Err(self.error_here(
                ErrorCode::E0103,
                format!("expected identifier, found {}", self.current_kind()),
            ))
        }
    }

    fn error_here(&self, code: ErrorCode, message: String) -> ParseError {
        ParseError::new(code, message, self.current_span(), self.source)
    }
}

// Program structure

impl Parser<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> Result<HlProgram, ParseError> {
        let module_name = if self.eat(&TokenKind::Program) {
            let (name, _) = self.expect_ident()?;
            self.expect(&TokenKind::Semi)?;
            name
        } else {
            MAIN_FUNCTION.to_string()
        };

        let mut constants = Vec::new();
        let mut functions = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::Const => {
                    self.advance();
                    self.parse_const_section(&mut constants)?;
                }
                TokenKind::Var => {
                    self.advance();
                    self.parse_var_section()?;
                }
                TokenKind::Procedure => {
                    self.advance();
                    functions.push(self.parse_procedure()?);
                }
                _ => break,
            }
        }

        let body = self.parse_block()?;
        self.expect(&TokenKind::Dot)?;
        if !self.check(&TokenKind::Eof) {
            return Err(self.error_here(
                ErrorCode::E0101,
                format!("expected end of file, found {}", self.current_kind()),
            ));
        }
        functions.push(HlFunction::new(MAIN_FUNCTION, body));

        tracing::debug!(
            module = %module_name,
            functions = functions.len(),
            constants = constants.len(),
            "parsed program"
        );
        Ok(HlProgram {
            source_file: String::new(),
            constants,
            modules: vec![HlModule {
                name: module_name,
                functions,
            }],
        })
    }

    /// `IDENT "=" constant ";"` entries after `const`.
    fn parse_const_section(&mut self, out: &mut Vec<HlConstant>) -> Result<(), ParseError> {
        // At least one entry.
        loop {
            let (name, _) = self.expect_ident()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_constant_value()?;
            self.expect(&TokenKind::Semi)?;
            out.push(HlConstant { name, value });
            if !matches!(self.current_kind(), TokenKind::Ident(_)) {
                return Ok(());
            }
        }
    }

    fn parse_constant_value(&mut self) -> Result<Literal, ParseError> {
        let negative = self.eat(&TokenKind::Minus);
        let literal = match self.current_kind().clone() {
            TokenKind::Int(value) => Literal::Int(if negative { -value } else { value }),
            TokenKind::True if !negative => Literal::Bool(true),
            TokenKind::False if !negative => Literal::Bool(false),
            TokenKind::Str(value) if !negative => Literal::Str(value),
            other => {
                return Err(self.error_here(
                    ErrorCode::E0102,
                    format!("expected constant value, found {other}"),
                ));
            }
        };
        self.advance();
        Ok(literal)
    }

    /// `IDENT { "," IDENT } ":" IDENT ";"` entries after `var`. Declared
    /// names and types are not recorded.
    fn parse_var_section(&mut self) -> Result<(), ParseError> {
        loop {
            self.expect_ident()?;
            while self.eat(&TokenKind::Comma) {
                self.expect_ident()?;
            }
            self.expect(&TokenKind::Colon)?;
            self.expect_ident()?;
            self.expect(&TokenKind::Semi)?;
            if !matches!(self.current_kind(), TokenKind::Ident(_)) {
                return Ok(());
            }
        }
    }

    fn parse_procedure(&mut self) -> Result<HlFunction, ParseError> {
        let (name, _) = self.expect_ident()?;
        if self.eat(&TokenKind::LParen) {
            self.expect(&TokenKind::RParen)?;
        }
        self.expect(&TokenKind::Semi)?;

        let mut function = HlFunction::new(name, Vec::new());
        if self.eat(&TokenKind::Requires) {
            let (tier, extension) = self.parse_requires()?;
            function = function.requires(tier, extension.as_deref());
            self.expect(&TokenKind::Semi)?;
        }

        function.body = self.parse_block()?;
        self.expect(&TokenKind::Semi)?;
        tracing::trace!(
            name = %function.name,
            tier = %function.required_tier,
            "parsed procedure"
        );
        Ok(function)
    }

    /// `path [ "via" path ]` after `requires`.
    fn parse_requires(&mut self) -> Result<(CapabilityTier, Option<String>), ParseError> {
        let start = self.current_span();
        let tier_path = self.parse_path()?;
        let tier = tier_path.parse::<CapabilityTier>().map_err(|_| {
            ParseError::new(
                ErrorCode::E0104,
                format!("unknown capability tier `{tier_path}`"),
                start,
                self.source,
            )
        })?;

        let extension = if self.eat(&TokenKind::Via) {
            Some(self.parse_path()?)
        } else {
            None
        };
        Ok((tier, extension))
    }

    /// Dotted identifier path such as `Ext.Math.Fast`.
    fn parse_path(&mut self) -> Result<String, ParseError> {
        let (mut path, _) = self.expect_ident()?;
        while self.check(&TokenKind::Dot) && matches!(self.peek_kind(), TokenKind::Ident(_)) {
            self.advance();
            let (segment, _) = self.expect_ident()?;
            path.push('.');
            path.push_str(&segment);
        }
        Ok(path)
    }
}
