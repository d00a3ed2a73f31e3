//! Expression parsing.
//!
//! One method per precedence level. Each level parses its left operand at
//! the next-higher level and, if it finds one of its operators, recurses
//! into itself for the right operand.

use tremolo_ir::{BinaryOp, Node, TokenKind, UnaryOp, VarDef};
use tremolo_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

const EQUALITY_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::NotEq),
];

const RELATIONAL_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::GtEq, BinaryOp::GtEq),
];

const ADDITIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];

const MULTIPLICATIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];

impl Parser<'_> {
    /// Parse an expression (the `equality` level).
    pub(crate) fn parse_expr(&mut self) -> Result<Node, ParseError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| {
            let lhs = self.parse_relational()?;
            match self.match_binary_op(EQUALITY_OPS) {
                Some(op) => Ok(Node::binary(op, lhs, self.parse_equality()?)),
                None => Ok(lhs),
            }
        })
    }

    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| {
            let lhs = self.parse_add()?;
            match self.match_binary_op(RELATIONAL_OPS) {
                Some(op) => Ok(Node::binary(op, lhs, self.parse_relational()?)),
                None => Ok(lhs),
            }
        })
    }

    fn parse_add(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| {
            let lhs = self.parse_mul()?;
            match self.match_binary_op(ADDITIVE_OPS) {
                Some(op) => Ok(Node::binary(op, lhs, self.parse_add()?)),
                None => Ok(lhs),
            }
        })
    }

    fn parse_mul(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| {
            let lhs = self.parse_unary()?;
            match self.match_binary_op(MULTIPLICATIVE_OPS) {
                Some(op) => Ok(Node::binary(op, lhs, self.parse_mul()?)),
                None => Ok(lhs),
            }
        })
    }

    /// `!unary`, `+term`, `-term` or a bare term.
    ///
    /// Sign operators bind a term only, so `--1` is rejected while `!!x`
    /// is accepted.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            Some(TokenKind::Bang) => {
                self.cursor.advance();
                Ok(Node::unary(UnaryOp::Not, self.parse_unary()?))
            }
            Some(TokenKind::Plus) => {
                self.cursor.advance();
                Ok(Node::unary(UnaryOp::Plus, self.parse_term()?))
            }
            Some(TokenKind::Minus) => {
                self.cursor.advance();
                Ok(Node::unary(UnaryOp::Minus, self.parse_term()?))
            }
            _ => self.parse_term(),
        })
    }

    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.cursor.current() else {
            return Err(self.cursor.unexpected("expression"));
        };

        match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                token
                    .lexeme
                    .parse::<i64>()
                    .map(Node::Number)
                    .map_err(|_| ParseError::NumberOutOfRange {
                        lexeme: token.lexeme.clone(),
                        span: token.span,
                    })
            }
            TokenKind::DQuote => {
                self.cursor.advance();
                let body = self.cursor.expect(TokenKind::String)?;
                self.cursor.expect(TokenKind::DQuote)?;
                Ok(Node::Str(body.lexeme.clone()))
            }
            TokenKind::True => {
                self.cursor.advance();
                Ok(Node::Boolean(true))
            }
            TokenKind::False => {
                self.cursor.advance();
                Ok(Node::Boolean(false))
            }
            TokenKind::Ident => {
                self.cursor.advance();
                if self.cursor.consume(TokenKind::LParen).is_some() {
                    let args = self.parse_args()?;
                    self.cursor.expect(TokenKind::RParen)?;
                    Ok(Node::call(token.lexeme.as_str(), args))
                } else {
                    Ok(Node::VarRef(token.lexeme.clone()))
                }
            }
            TokenKind::Func => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::LParen)?;
                let params = self.parse_params()?;
                self.cursor.expect(TokenKind::RParen)?;
                let body = self.parse_block()?;
                Ok(Node::function(params, body))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// Comma-separated parameter names, possibly none.
    fn parse_params(&mut self) -> Result<Vec<VarDef>, ParseError> {
        let mut params = Vec::new();
        if let Some(first) = self.cursor.consume(TokenKind::Ident) {
            params.push(VarDef::new(first.lexeme.as_str()));
            while self.cursor.consume(TokenKind::Comma).is_some() {
                let next = self.cursor.expect(TokenKind::Ident)?;
                params.push(VarDef::new(next.lexeme.as_str()));
            }
        }
        Ok(params)
    }

    /// Comma-separated expressions, possibly none.
    ///
    /// The list is empty when the current token cannot start an
    /// expression (`)`, `}`, `;`, end of input, ...).
    pub(crate) fn parse_args(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut args = Vec::new();
        if self
            .cursor
            .current_kind()
            .is_some_and(TokenKind::starts_expression)
        {
            args.push(self.parse_expr()?);
            while self.cursor.consume(TokenKind::Comma).is_some() {
                args.push(self.parse_expr()?);
            }
        }
        Ok(args)
    }

    /// Consume the current token if it is one of `ops`' operators.
    fn match_binary_op(&mut self, ops: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let kind = self.cursor.current_kind()?;
        let (_, op) = ops.iter().find(|(k, _)| *k == kind)?;
        self.cursor.advance();
        Some(*op)
    }
}
