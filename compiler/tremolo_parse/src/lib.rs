//! Tremolo Parse - recursive-descent parser.
//!
//! Turns the lexer's token sequence into a [`Program`]. The grammar, from
//! lowest to highest precedence:
//!
//! ```text
//! program    := stmt (sep stmt)*            sep = ";" | newline
//! stmt       := "let" ident "=" equality
//!             | "if" equality block ("else" block)?
//!             | "return" args
//!             | equality
//! block      := "{" (stmt sep?)* "}"
//! equality   := relational (("==" | "!=") equality)?
//! relational := add (("<" | "<=" | ">" | ">=") relational)?
//! add        := mul (("+" | "-") add)?
//! mul        := unary (("*" | "/" | "%") mul)?
//! unary      := "!" unary | ("+" | "-")? term
//! term       := number | "\"" string "\"" | "true" | "false"
//!             | ident ("(" args ")")? | "func" "(" params ")" block
//!             | "(" equality ")"
//! ```
//!
//! Every binary level recurses into itself for its right operand, so all
//! binary operators associate to the right: `8 - 4 - 2` is `8 - (4 - 2)`.
//! Existing programs rely on this.

mod cursor;
mod error;
mod grammar;

use tremolo_ir::{Program, Token};

pub use cursor::Cursor;
pub use error::ParseError;

/// Parser state: a cursor over one token sequence.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }
}

/// Parse a whole token sequence into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    tracing::debug!(stmts = program.stmts.len(), "parsed program");
    Ok(program)
}
