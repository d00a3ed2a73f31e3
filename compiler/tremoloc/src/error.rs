//! Errors surfaced by the driver.

use std::path::PathBuf;

use thiserror::Error;
use tremolo_eval::EvalError;
use tremolo_lexer::LexError;
use tremolo_parse::ParseError;

/// Any failure between reading the source and producing a value.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit status for this failure: 2 for I/O, 1 otherwise.
    pub fn exit_status(&self) -> i32 {
        match self {
            Error::Io { .. } => 2,
            Error::Lex(_) | Error::Parse(_) | Error::Eval(_) => 1,
        }
    }
}
