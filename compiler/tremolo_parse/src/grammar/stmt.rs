//! Statement parsing.

use tremolo_ir::{Block, Node, Program, TokenKind};
use tremolo_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole input.
    ///
    /// Statements must be separated by `;` or a line break. Runs of `;`
    /// are empty statements and are dropped.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_empty_statements();
            if self.cursor.is_at_end() {
                break;
            }
            stmts.push(self.parse_stmt()?);
            if self.cursor.is_at_end() {
                break;
            }
            if self.cursor.consume(TokenKind::Semicolon).is_none() && !self.cursor.at_line_break()
            {
                return Err(self.cursor.unexpected("`;` or newline"));
            }
        }
        Ok(Program::new(stmts))
    }

    /// `{ stmt* }`. Separators inside a block are optional.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.cursor.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            self.skip_empty_statements();
            if self.cursor.consume(TokenKind::RBrace).is_some() {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected(TokenKind::RBrace.display_name()));
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok(Block::new(stmts))
    }

    fn skip_empty_statements(&mut self) {
        while self.cursor.consume(TokenKind::Semicolon).is_some() {}
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            Some(TokenKind::Let) => self.parse_let(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::Return) => self.parse_return(),
            _ => self.parse_expr(),
        })
    }

    /// `let name = value`
    fn parse_let(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(TokenKind::Let)?;
        let name = self.cursor.expect(TokenKind::Ident)?;
        self.cursor.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Node::assign(name.lexeme.as_str(), value))
    }

    /// `if cond { ... } else { ... }`
    fn parse_if(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_block = if self.cursor.consume(TokenKind::Else).is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Node::If {
            cond: Box::new(cond),
            then_block,
            else_block,
        })
    }

    /// `return args`. The argument list may be empty.
    fn parse_return(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(TokenKind::Return)?;
        let args = self.parse_args()?;
        Ok(Node::Return { args })
    }
}
