//! Lexer for Tremolo using logos.
//!
//! Produces the flat token sequence consumed by `tremolo_parse`. Trivia
//! (whitespace and newlines) is kept in the output: the parser needs
//! newlines to find statement boundaries.
//!
//! String literals come out as three tokens (opening quote, raw body,
//! closing quote). There is no escape processing.

mod convert;
mod lex_error;
mod raw_token;

use std::convert::Infallible;

use logos::Logos;
use tracing::debug;
use tremolo_ir::{Span, Token, TokenKind};

use crate::convert::convert_token;
use crate::raw_token::RawToken;

pub use lex_error::LexError;

/// How the lexer treats characters that start no token.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LexMode {
    /// Drop them and keep scanning.
    #[default]
    Lenient,
    /// Fail on the first one.
    Strict,
}

/// Tokenize source text, skipping unrecognized characters.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    let skip = |text: &str, span: Span| {
        debug!(?span, text, "skipping unrecognized input");
        Ok::<(), Infallible>(())
    };
    match scan(source, skip) {
        Ok(tokens) => tokens,
        Err(never) => match never {},
    }
}

/// Tokenize source text, failing on the first unrecognized character.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_strict(source: &str) -> Result<Vec<Token>, LexError> {
    scan(source, |text, span| match text.chars().next() {
        Some(ch) => Err(LexError::UnrecognizedChar { ch, span }),
        None => Ok(()),
    })
}

/// Tokenize with an explicit [`LexMode`].
pub fn tokenize_with(source: &str, mode: LexMode) -> Result<Vec<Token>, LexError> {
    match mode {
        LexMode::Lenient => Ok(tokenize(source)),
        LexMode::Strict => tokenize_strict(source),
    }
}

/// Run the scanner.
///
/// Input that starts no token is handed to `reject`; scanning stops at
/// the first `Err` it returns.
fn scan<E>(
    source: &str,
    mut reject: impl FnMut(&str, Span) -> Result<(), E>,
) -> Result<Vec<Token>, E> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::with_capacity(source.len() / 2 + 1);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::from_range(range.clone());
        match result {
            Ok(RawToken::DQuote) => {
                tokens.push(Token::new(TokenKind::DQuote, "\"", span));
                // Without a closing quote the `"` stands alone and scanning
                // resumes right after it.
                if let Some(len) = lexer.remainder().find('"') {
                    let body_start = range.end;
                    let body_end = body_start + len;
                    tokens.push(Token::new(
                        TokenKind::String,
                        &source[body_start..body_end],
                        Span::from_range(body_start..body_end),
                    ));
                    tokens.push(Token::new(
                        TokenKind::DQuote,
                        "\"",
                        Span::from_range(body_end..body_end + 1),
                    ));
                    lexer.bump(len + 1);
                }
            }
            Ok(raw) => {
                tokens.push(Token::new(convert_token(raw), lexer.slice(), span));
            }
            Err(()) => reject(lexer.slice(), span)?,
        }
    }

    Ok(tokens)
}
