//! Grammar productions, split by level.
//!
//! - `stmt.rs`: program, block and statement forms
//! - `expr.rs`: the binary precedence chain, unary operators and terms

mod expr;
mod stmt;
