//! Token cursor for navigating the token stream.
//!
//! Trivia is invisible to the grammar: the cursor always rests on a
//! significant token (or past the end). It remembers whether it stepped
//! over a newline to get there, which is how the statement-level grammar
//! tells `1\n2` (two statements) from `1 2` (an error).

use tremolo_ir::{Token, TokenKind};

use crate::ParseError;

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// A newline sits between the previous significant token and `pos`.
    line_break: bool,
}

impl<'a> Cursor<'a> {
    /// Create a cursor resting on the first significant token.
    pub fn new(tokens: &'a [Token]) -> Self {
        let mut cursor = Cursor {
            tokens,
            pos: 0,
            line_break: false,
        };
        cursor.skip_trivia();
        cursor
    }

    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Whether one or more newlines precede the current token.
    #[inline]
    pub fn at_line_break(&self) -> bool {
        self.line_break
    }

    /// Step past the current token and any trivia after it.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        self.pos += 1;
        self.skip_trivia();
        Some(token)
    }

    /// Advance only if the current token has the given kind.
    pub fn consume(&mut self, kind: TokenKind) -> Option<&'a Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        self.consume(kind)
            .ok_or_else(|| self.unexpected(kind.display_name()))
    }

    /// Error describing the current token as not being `expected`.
    #[cold]
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                expected,
                found: token.kind,
                span: token.span,
            },
            None => ParseError::UnexpectedEof { expected },
        }
    }

    fn skip_trivia(&mut self) {
        self.line_break = false;
        while let Some(token) = self.tokens.get(self.pos) {
            match token.kind {
                TokenKind::Newline => self.line_break = true,
                TokenKind::Whitespace => {}
                _ => break,
            }
            self.pos += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use tremolo_ir::Span;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::default())
    }

    #[test]
    fn test_cursor_skips_leading_trivia() {
        let tokens = vec![
            tok(TokenKind::Whitespace, " "),
            tok(TokenKind::Number, "1"),
        ];
        let cursor = Cursor::new(&tokens);
        assert!(cursor.check(TokenKind::Number));
    }

    #[test]
    fn test_cursor_tracks_line_breaks() {
        let tokens = vec![
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Whitespace, " "),
            tok(TokenKind::Newline, "\n"),
            tok(TokenKind::Number, "2"),
            tok(TokenKind::Whitespace, " "),
            tok(TokenKind::Number, "3"),
        ];
        let mut cursor = Cursor::new(&tokens);
        assert!(cursor.advance().is_some());
        assert!(cursor.at_line_break());
        assert!(cursor.advance().is_some());
        assert!(!cursor.at_line_break());
        assert_eq!(cursor.advance().map(|t| t.lexeme.as_str()), Some("3"));
        assert!(cursor.is_at_end());
        assert!(cursor.advance().is_none());
    }

    #[test]
    fn test_cursor_expect_reports_found_kind() {
        let tokens = vec![tok(TokenKind::Comma, ",")];
        let mut cursor = Cursor::new(&tokens);
        let err = cursor.expect(TokenKind::RParen).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "`)`",
                found: TokenKind::Comma,
                span: Span::default(),
            }
        );
    }

    #[test]
    fn test_cursor_expect_at_end() {
        let mut cursor = Cursor::new(&[]);
        assert_eq!(
            cursor.expect(TokenKind::RBrace),
            Err(ParseError::UnexpectedEof { expected: "`}`" })
        );
    }
}
