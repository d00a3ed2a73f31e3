//! Runtime errors and control signals.
//!
//! Evaluation returns `Result<Value, ControlAction>`. A `ControlAction` is
//! either a real error or a `return` unwinding to its call boundary.
//! Errors are built through the `#[cold]` factory functions at the bottom
//! of this module rather than by naming `EvalErrorKind` variants directly.

use std::fmt;

use thiserror::Error;
use tremolo_ir::BinaryOp;

use crate::Value;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("cannot apply `{op}` to {left} and {right}")]
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },
}

/// One user-function frame active when an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
}

/// Snapshot of the call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

/// Frames shown by `Display` before the rest are summarized.
const SHOWN_FRAMES: usize = 16;

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        EvalBacktrace { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().take(SHOWN_FRAMES).enumerate() {
            writeln!(f, "  {i}: {}", frame.name)?;
        }
        if self.frames.len() > SHOWN_FRAMES {
            writeln!(f, "  ... {} more", self.frames.len() - SHOWN_FRAMES)?;
        }
        Ok(())
    }
}

/// A runtime error with the call stack it was raised under.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Set once, by the innermost call the error escapes from.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

/// Why evaluation of a node stopped early.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// `return` unwinding to the nearest call or program boundary.
    Return(Value),
    Error(EvalError),
}

impl ControlAction {
    /// Absorb a `return` into its value, leaving errors as they are.
    ///
    /// Used at call and program boundaries.
    pub fn catch_return(self) -> Result<Value, EvalError> {
        match self {
            ControlAction::Return(value) => Ok(value),
            ControlAction::Error(err) => Err(err),
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

/// Result of evaluating a program.
pub type EvalResult = Result<Value, EvalError>;

// Access

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

// Types

/// A single operand had the wrong type (`if` condition, unary operand).
#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { op, left, right })
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Calls

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

#[cfg(test)]
mod tests;
