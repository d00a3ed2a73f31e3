//! Lexical errors.
//!
//! Only produced in [`LexMode::Strict`](crate::LexMode::Strict); the
//! lenient mode drops unrecognized input instead.

use thiserror::Error;
use tremolo_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("lex error: unrecognized character {ch:?} at {span}")]
    UnrecognizedChar { ch: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedChar { span, .. } => *span,
        }
    }
}
