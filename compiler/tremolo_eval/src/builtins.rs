//! Builtin functions.
//!
//! Builtins are consulted only after the callee name failed to resolve to
//! a closure, so user bindings shadow them.

use crate::print_handler::PrintHandlerImpl;
use crate::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// Writes each argument's text on its own line. With no arguments,
    /// writes an empty line.
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Puts => "puts",
        }
    }

    /// Run the builtin on already-evaluated arguments.
    pub fn call(self, args: &[Value], out: &PrintHandlerImpl) -> Value {
        match self {
            Builtin::Puts => {
                if args.is_empty() {
                    out.println("");
                }
                for arg in args {
                    out.println(&arg.to_string());
                }
                Value::Unit
            }
        }
    }
}
