//! Tremolo driver.
//!
//! Wires the pipeline together: source text → `tremolo_lexer` →
//! `tremolo_parse` → `tremolo_eval`. The `tremolo` binary is a thin shell
//! over these functions.

pub mod cli;
mod error;

use std::io::Read;
use std::path::Path;
use std::sync::Once;

use tremolo_eval::{
    stdout_handler, Interpreter, SharedPrintHandler, Value, DEFAULT_MAX_DEPTH,
};
use tremolo_ir::{Program, Token};
use tremolo_lexer::LexMode;

pub use error::Error;

/// What the driver prints instead of running the program.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    /// Run the program; its value becomes the exit status.
    #[default]
    Value,
    /// Print the significant tokens, one per line.
    Tokens,
    /// Print the syntax tree as an S-expression.
    Ast,
}

/// Driver configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub lex_mode: LexMode,
    pub emit: Emit,
    /// Maximum nested closure calls.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            lex_mode: LexMode::default(),
            emit: Emit::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Tokenize `source`, dropping trivia.
pub fn lex_source(source: &str, mode: LexMode) -> Result<Vec<Token>, Error> {
    let tokens = tremolo_lexer::tokenize_with(source, mode)?;
    Ok(tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect())
}

pub fn parse_source(source: &str, mode: LexMode) -> Result<Program, Error> {
    let tokens = tremolo_lexer::tokenize_with(source, mode)?;
    Ok(tremolo_parse::parse(&tokens)?)
}

/// Run `source` with `puts` writing to stdout.
pub fn eval_source(source: &str, options: &Options) -> Result<Value, Error> {
    eval_source_with(source, options, stdout_handler())
}

/// Run `source` with `puts` writing to `print_handler`.
pub fn eval_source_with(
    source: &str,
    options: &Options,
    print_handler: SharedPrintHandler,
) -> Result<Value, Error> {
    let program = parse_source(source, options.lex_mode)?;
    let mut interpreter = Interpreter::builder()
        .print_handler(print_handler)
        .max_depth(options.max_depth)
        .build();
    Ok(interpreter.eval_program(&program)?)
}

/// Read the program from `path`, or from stdin when there is none.
pub fn read_source(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|source| Error::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(source)
        }
    }
}

/// Exit status for a program's final value.
///
/// Integers are reduced modulo 256 (so `-1` gives 255); anything else
/// gives 0.
pub fn exit_code(value: &Value) -> i32 {
    // rem_euclid(256) is always in 0..256.
    value
        .as_int()
        .map_or(0, |n| i32::try_from(n.rem_euclid(256)).unwrap_or_default())
}

static TRACING_INIT: Once = Once::new();

/// Install the `tracing` subscriber if `RUST_LOG` is set.
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
