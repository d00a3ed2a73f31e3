//! Runtime values.

use std::fmt;

use tremolo_ir::SharedFunction;

use crate::Environment;

/// A value produced by evaluation.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Closure(Closure),
    /// Result of statements with nothing to yield: empty blocks, `puts`,
    /// an `if` whose branch was not taken, a bare `return`.
    Unit,
}

impl Value {
    /// Name of the value's type, as shown in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Closure(_) => "function",
            Value::Unit => "unit",
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Structural equality for scalars. Values of different types are never
/// equal, and neither are two closures (not even a closure and itself).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Unit, Value::Unit) => true,
            _ => false,
        }
    }
}

/// Textual form, as written by `puts`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Closure(closure) => write!(f, "{closure}"),
            Value::Unit => f.write_str("()"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Closure(closure) => write!(f, "Closure({closure})"),
            Value::Unit => f.write_str("Unit"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// A function literal paired with the environment it was evaluated in.
///
/// The captured environment is the defining scope, not the caller's.
/// A closure stored into the very scope it captured forms an `Rc` cycle
/// and is never freed; environments live for the whole run anyway.
#[derive(Clone)]
pub struct Closure {
    pub func: SharedFunction,
    pub env: Environment,
}

impl Closure {
    pub fn new(func: SharedFunction, env: Environment) -> Self {
        Closure { func, env }
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.func.param_names().collect();
        write!(f, "<func({})>", params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tremolo_ir::{Block, FunctionLit, VarDef};

    fn closure(params: &[&str]) -> Closure {
        let func = FunctionLit::new(
            params.iter().map(|p| VarDef::new(*p)).collect(),
            Block::default(),
        );
        Closure::new(Rc::new(func), Environment::new())
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::Int(-12).to_string(), "-12");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("raw \\n text").to_string(), "raw \\n text");
        assert_eq!(Value::Unit.to_string(), "()");
        assert_eq!(Value::Closure(closure(&["a", "b"])).to_string(), "<func(a, b)>");
        assert_eq!(Value::Closure(closure(&[])).to_string(), "<func()>");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(0).type_name(), "integer");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::from("").type_name(), "string");
        assert_eq!(Value::Closure(closure(&["x"])).type_name(), "function");
        assert_eq!(Value::Unit.type_name(), "unit");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::Int(3), Value::Int(3));
        assert_ne!(Value::Int(3), Value::Int(4));
        assert_eq!(Value::from("a"), Value::from("a"));
        assert_eq!(Value::Unit, Value::Unit);
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::from("1"), Value::Int(1));
    }

    #[test]
    fn test_closures_never_equal() {
        let c = closure(&["x"]);
        let a = Value::Closure(c.clone());
        let b = Value::Closure(c.clone());
        assert!(a != b);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Unit.as_bool(), None);
    }
}
