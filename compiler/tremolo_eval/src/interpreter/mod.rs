//! The tree-walking interpreter.
//!
//! [`Interpreter::eval`] is one exhaustive match over [`Node`]. It returns
//! `Err(ControlAction::Return(..))` to unwind a `return` and
//! `Err(ControlAction::Error(..))` for runtime errors; closure calls and
//! whole programs turn the former back into a value.

mod builder;

use std::rc::Rc;

use tracing::trace;
use tremolo_ir::{Block, Node, Program};
use tremolo_stack::ensure_sufficient_stack;

use crate::builtins::Builtin;
use crate::diagnostics::{CallFrame, CallStack};
use crate::errors::{type_mismatch, undefined_function, ControlAction, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::print_handler::SharedPrintHandler;
use crate::{Closure, Environment, Value};

pub use builder::InterpreterBuilder;

/// Result of evaluating one node.
pub type EvalOutcome = Result<Value, ControlAction>;

/// Name of the special form that tests whether a variable is bound.
const DEFINED: &str = "defined";

pub struct Interpreter {
    /// Root scope; programs run directly in it.
    env: Environment,
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
}

impl Interpreter {
    /// An interpreter writing to stdout with the default depth limit.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// The root scope. Bindings made by one program are visible to the next.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run a program in the root scope.
    ///
    /// A `return` outside any function ends the program with its value.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        let env = self.env.clone();
        let result = self
            .eval_stmts(&program.stmts, &env)
            .or_else(ControlAction::catch_return);
        tracing::debug!(ok = result.is_ok(), "program finished");
        result
    }

    /// Evaluate one node in `env`.
    pub fn eval(&mut self, node: &Node, env: &Environment) -> EvalOutcome {
        trace!(node = node.tag(), "eval");
        ensure_sufficient_stack(|| match node {
            Node::Number(n) => Ok(Value::Int(*n)),
            Node::Boolean(b) => Ok(Value::Bool(*b)),
            Node::Str(s) => Ok(Value::Str(s.clone())),
            Node::VarRef(name) => Ok(env.get(name)?),
            Node::Assign { target, value } => {
                let value = self.eval(value, env)?;
                env.set(&target.name, value.clone());
                Ok(value)
            }
            Node::Unary { op, operand } => {
                let operand = self.eval(operand, env)?;
                Ok(evaluate_unary(&operand, *op)?)
            }
            Node::Binary { op, lhs, rhs } => {
                let lhs = self.eval(lhs, env)?;
                let rhs = self.eval(rhs, env)?;
                Ok(evaluate_binary(&lhs, &rhs, *op)?)
            }
            Node::Block(block) => self.eval_block(block, env),
            Node::Program(program) => match self.eval_stmts(&program.stmts, env) {
                Err(ControlAction::Return(value)) => Ok(value),
                other => other,
            },
            Node::If {
                cond,
                then_block,
                else_block,
            } => {
                let cond = self.eval(cond, env)?;
                match (cond.as_bool(), else_block) {
                    (Some(true), _) => self.eval_block(then_block, env),
                    (Some(false), Some(block)) => self.eval_block(block, env),
                    (Some(false), None) => Ok(Value::Unit),
                    (None, _) => Err(type_mismatch("boolean", cond.type_name()).into()),
                }
            }
            Node::Function(func) => Ok(Value::Closure(Closure::new(
                Rc::clone(func),
                env.clone(),
            ))),
            Node::Call { callee, args } => self.eval_call(callee, args, env),
            Node::Return { args } => {
                let values = self.eval_args(args, env)?;
                let value = values.into_iter().next().unwrap_or(Value::Unit);
                Err(ControlAction::Return(value))
            }
        })
    }

    /// Evaluate a block in a fresh child scope of `env`.
    fn eval_block(&mut self, block: &Block, env: &Environment) -> EvalOutcome {
        self.eval_stmts(&block.stmts, &env.spawn())
    }

    /// Evaluate statements in order; the last one's value, or `Unit`.
    fn eval_stmts(&mut self, stmts: &[Node], env: &Environment) -> EvalOutcome {
        let mut last = Value::Unit;
        for stmt in stmts {
            last = self.eval(stmt, env)?;
        }
        Ok(last)
    }

    fn eval_args(&mut self, args: &[Node], env: &Environment) -> Result<Vec<Value>, ControlAction> {
        args.iter().map(|arg| self.eval(arg, env)).collect()
    }

    /// Resolve and invoke `callee`.
    ///
    /// A closure bound to the name wins, then the `defined` form, then the
    /// builtins.
    fn eval_call(&mut self, callee: &str, args: &[Node], env: &Environment) -> EvalOutcome {
        if let Some(Value::Closure(closure)) = env.lookup(callee) {
            let args = self.eval_args(args, env)?;
            return self.call_closure(callee, &closure, args);
        }
        if callee == DEFINED {
            return Ok(Value::Bool(is_defined(args, env)));
        }
        if let Some(builtin) = Builtin::lookup(callee) {
            let args = self.eval_args(args, env)?;
            trace!(builtin = builtin.name(), args = args.len(), "builtin call");
            return Ok(builtin.call(&args, &self.print_handler));
        }
        Err(undefined_function(callee).into())
    }

    /// Invoke a closure with already-evaluated arguments.
    ///
    /// Parameters are bound positionally in a new scope under the captured
    /// environment. Missing arguments bind `Unit`; extra ones are dropped.
    pub fn call_closure(&mut self, name: &str, closure: &Closure, args: Vec<Value>) -> EvalOutcome {
        if let Err(err) = self.call_stack.push(CallFrame::new(name)) {
            return Err(self.call_stack.attach_backtrace(err).into());
        }
        trace!(callee = name, depth = self.call_stack.depth(), "call");

        let scope = closure.env.spawn();
        let mut args = args.into_iter();
        for param in closure.func.param_names() {
            scope.define(param, args.next().unwrap_or(Value::Unit));
        }

        let result = match self.eval_stmts(&closure.func.body.stmts, &scope) {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => {
                Err(ControlAction::Error(self.call_stack.attach_backtrace(err)))
            }
        };
        self.call_stack.pop();
        trace!(callee = name, ok = result.is_ok(), "return");
        result
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// `defined(x)`: whether the sole argument is a bare name bound in `env`.
///
/// The argument is never evaluated. Anything other than exactly one bare
/// name yields `false`.
fn is_defined(args: &[Node], env: &Environment) -> bool {
    match args {
        [Node::VarRef(name)] => env.contains(name),
        _ => false,
    }
}

#[cfg(test)]
mod tests;
