//! Tremolo Eval - tree-walking evaluator.
//!
//! Runs a parsed [`Program`](tremolo_ir::Program) against a chain of
//! lexical scopes. Values are dynamically typed; functions are closures
//! over the scope they were created in.
//!
//! ```text
//! let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
//! let value = interp.eval_program(&program)?;
//! ```

mod builtins;
mod diagnostics;
mod environment;
mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use builtins::Builtin;
pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_DEPTH};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, recursion_limit_exceeded,
    type_mismatch, undefined_function, undefined_variable, BacktraceFrame, ControlAction,
    EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use interpreter::{EvalOutcome, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{Closure, Value};
