//! Token types produced by the lexer.

use std::fmt;

use crate::Span;

/// Kind of a lexical token.
///
/// The token sequence keeps trivia (`Whitespace`, `Newline`) so the parser
/// can tell where a statement ends on a line break.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    /// Raw text between a pair of `"` tokens.
    String,
    Ident,

    // Keywords
    Let,
    If,
    Else,
    Func,
    Return,
    True,
    False,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    /// `"`
    DQuote,

    // Trivia
    Whitespace,
    Newline,
}

impl TokenKind {
    /// Whether the parser skips this token during lookahead.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }

    /// Whether a token of this kind can begin an expression.
    ///
    /// Used to decide if an argument list is empty, e.g. after `return`.
    pub const fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::DQuote
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ident
                | TokenKind::Func
                | TokenKind::LParen
                | TokenKind::Bang
                | TokenKind::Plus
                | TokenKind::Minus
        )
    }

    /// Human-readable description used in parse errors.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Func => "`func`",
            TokenKind::Return => "`return`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::Assign => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::DQuote => "`\"`",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: its kind, the exact source text it covers, and where.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} {}", self.kind, self.lexeme, self.span)
    }
}
