//! Tremolo IR - tokens and syntax tree.
//!
//! This crate holds the data shared by every stage of the interpreter:
//! - [`Span`] for source locations
//! - [`Token`] and [`TokenKind`] for lexer output
//! - [`Node`] and friends for parser output

pub mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, Block, FunctionLit, Node, Program, SharedFunction, UnaryOp, VarDef};
pub use span::Span;
pub use token::{Token, TokenKind};
