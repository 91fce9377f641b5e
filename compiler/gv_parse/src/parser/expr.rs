//! Expressions, Pascal precedence (lowest first):
//!
//! | Level | Operators | Associativity |
//! |---|---|---|
//! | relational | `= <> < <= > >=` | none |
//! | additive | `+ - or` | left |
//! | multiplicative | `* / div mod and` | left |
//! | factor | literals, names, calls, `( )`, unary `-` | |
//!
//! Unary minus on a number literal folds into the literal; on anything
//! else it becomes `(0 - x)`.

use gv_diagnostic::ErrorCode;
use gv_ir::{BinaryOp, Expr, Literal};
use gv_stack::ensure_sufficient_stack;

use super::Parser;
use crate::error::ParseError;
use crate::token::TokenKind;

fn relational_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn additive_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Or => Some(BinaryOp::Or),
        _ => None,
    }
}

fn multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Div => Some(BinaryOp::IntDiv),
        TokenKind::Mod => Some(BinaryOp::Mod),
        TokenKind::And => Some(BinaryOp::And),
        _ => None,
    }
}

impl Parser<'_> {
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_relational())
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;
        match relational_op(self.current_kind()) {
            Some(op) => {
                self.advance();
                let right = self.parse_additive()?;
                Ok(Expr::binary(op, left, right))
            }
            None => Ok(left),
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = additive_op(self.current_kind()) {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        while let Some(op) = multiplicative_op(self.current_kind()) {
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_factor_inner())
    }

    fn parse_factor_inner(&mut self) -> Result<Expr, ParseError> {
        let expr = match self.current_kind().clone() {
            TokenKind::Int(value) => {
                self.advance();
                Expr::int(value)
            }
            TokenKind::Str(value) => {
                self.advance();
                Expr::Literal(Literal::Str(value))
            }
            TokenKind::True => {
                self.advance();
                Expr::Literal(Literal::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Expr::Literal(Literal::Bool(false))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    Expr::call(name, args)
                } else {
                    Expr::Ident(name)
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                inner
            }
            TokenKind::Minus => {
                self.advance();
                match self.parse_factor()? {
                    Expr::Literal(Literal::Int(value)) => Expr::int(-value),
                    operand => Expr::binary(BinaryOp::Sub, Expr::int(0), operand),
                }
            }
            other => {
                return Err(self.error_here(
                    ErrorCode::E0102,
                    format!("expected expression, found {other}"),
                ));
            }
        };
        Ok(expr)
    }

    /// `"(" [ expr { "," expr } ] ")"`.
    pub(super) fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }
}
