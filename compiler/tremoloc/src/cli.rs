//! Command-line argument handling.
//!
//! ```text
//! tremolo [--strict] [--emit=value|tokens|ast] [--max-depth=N] [FILE]
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tremolo_lexer::LexMode;

use crate::{Emit, Options};

pub const USAGE: &str = "\
Usage: tremolo [options] [FILE]

Runs FILE, or standard input when no file is given. The exit status is
the program's final integer value modulo 256.

Options:
  --strict              Reject characters that start no token
  --emit=<kind>         value (default), tokens or ast
  --max-depth=<n>       Maximum nested function calls (default: 10000)
  -h, --help            Show this message

Set RUST_LOG (e.g. RUST_LOG=tremolo_eval=trace) to enable logging.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid value for --emit: `{0}` (expected value, tokens or ast)")]
    InvalidEmit(String),

    #[error("invalid value for --max-depth: `{0}`")]
    InvalidDepth(String),

    #[error("unexpected argument `{0}`: only one file can be run")]
    ExtraFile(String),
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Run { options: Options, file: Option<PathBuf> },
}

impl FromStr for Emit {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(Emit::Value),
            "tokens" => Ok(Emit::Tokens),
            "ast" => Ok(Emit::Ast),
            _ => Err(UsageError::InvalidEmit(s.to_string())),
        }
    }
}

/// Parse arguments, program name excluded.
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut options = Options::default();
    let mut file: Option<PathBuf> = None;

    for arg in args {
        let arg: String = arg.into();
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        } else if arg == "--strict" {
            options.lex_mode = LexMode::Strict;
        } else if let Some(kind) = arg.strip_prefix("--emit=") {
            options.emit = kind.parse()?;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_depth = depth
                .parse()
                .map_err(|_| UsageError::InvalidDepth(depth.to_string()))?;
        } else if arg.starts_with('-') && arg != "-" {
            return Err(UsageError::UnknownOption(arg));
        } else if file.is_some() {
            return Err(UsageError::ExtraFile(arg));
        } else if arg != "-" {
            file = Some(PathBuf::from(arg));
        }
    }

    Ok(Command::Run { options, file })
}
