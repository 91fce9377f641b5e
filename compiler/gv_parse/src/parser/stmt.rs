//! Statements.
//!
//! ```text
//! stmts  = stmt { ";" stmt } ;
//! stmt   = IDENT ":=" expr
//!        | IDENT [ "(" [ expr { "," expr } ] ")" ]
//!        | block
//!        | "if" expr "then" stmt [ "else" stmt ]
//!        | "while" expr "do" stmt
//!        | (* empty *) ;
//! ```
//!
//! A `begin … end` used as an `if`/`while` branch is flattened into the
//! branch body; anywhere else it stays a [`Stmt::Block`].

use gv_diagnostic::ErrorCode;
use gv_ir::{Expr, Stmt};
use gv_stack::ensure_sufficient_stack;

use super::Parser;
use crate::error::ParseError;
use crate::token::TokenKind;

impl Parser<'_> {
    /// `"begin" stmts "end"`.
    pub(super) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::Begin)?;
        let body = self.parse_stmts()?;
        self.expect(&TokenKind::End)?;
        Ok(body)
    }

    fn parse_stmts(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        if let Some(stmt) = self.parse_stmt()? {
            stmts.push(stmt);
        }
        while self.eat(&TokenKind::Semi) {
            if let Some(stmt) = self.parse_stmt()? {
                stmts.push(stmt);
            }
        }
        Ok(stmts)
    }

    /// One statement, or `None` for the empty statement.
    fn parse_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<Option<Stmt>, ParseError> {
        let stmt = match self.current_kind() {
            TokenKind::Ident(_) => self.parse_simple_stmt()?,
            TokenKind::Begin => Stmt::Block(self.parse_block()?),
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Semi | TokenKind::End | TokenKind::Else => return Ok(None),
            other => {
                return Err(self.error_here(
                    ErrorCode::E0101,
                    format!("expected statement, found {other}"),
                ));
            }
        };
        Ok(Some(stmt))
    }

    /// Assignment or procedure call, both starting with an identifier.
    fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let (name, _) = self.expect_ident()?;
        if self.eat(&TokenKind::Assign) {
            let value = self.parse_expr()?;
            return Ok(Stmt::assign(name, value));
        }
        let args = if self.check(&TokenKind::LParen) {
            self.parse_call_args()?
        } else {
            Vec::new()
        };
        Ok(Stmt::Expr(Expr::call(name, args)))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect(&TokenKind::If)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Then)?;
        let then_branch = self.parse_branch()?;
        let else_branch = if self.eat(&TokenKind::Else) {
            Some(self.parse_branch()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_branch()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_branch(&mut self) -> Result<Vec<Stmt>, ParseError> {
        Ok(match self.parse_stmt()? {
            Some(Stmt::Block(body)) => body,
            Some(stmt) => vec![stmt],
            None => Vec::new(),
        })
    }
}
