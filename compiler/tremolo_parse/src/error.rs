//! Parse error types.
//!
//! Parsing stops at the first error; there is no recovery.

use thiserror::Error;
use tremolo_ir::{Span, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token that the grammar does not allow here.
    #[error("parse error: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    /// The input ended while a construct was still open.
    #[error("parse error: expected {expected}, found end of input")]
    UnexpectedEof { expected: &'static str },

    #[error("parse error: number literal `{lexeme}` does not fit in 64 bits at {span}")]
    NumberOutOfRange { lexeme: String, span: Span },
}

impl ParseError {
    /// Source location of the offending token, if there was one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::UnexpectedToken { span, .. } | ParseError::NumberOutOfRange { span, .. } => {
                Some(*span)
            }
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}
