//! Operator semantics.
//!
//! Arithmetic is checked: overflow is an error, never a wrap. Division
//! rounds toward negative infinity and the remainder takes the divisor's
//! sign, so `a == (a / b) * b + a % b` holds for every non-zero `b`.

use tremolo_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, type_mismatch, EvalError,
};
use crate::Value;

type OpResult = Result<Value, EvalError>;

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> OpResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Floored division. `None` on overflow (`i64::MIN / -1`).
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder of floored division; never overflows.
fn floor_mod(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        r + b
    } else {
        r
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(floor_div(a, b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Int(floor_mod(a, b)))
            }
        }
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
    }
}

/// Apply a binary operator to two evaluated operands.
///
/// `==` and `!=` accept any pair of values; everything else needs two
/// integers.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> OpResult {
    match (left, right, op) {
        (_, _, BinaryOp::Eq) => Ok(Value::Bool(left == right)),
        (_, _, BinaryOp::NotEq) => Ok(Value::Bool(left != right)),
        (Value::Int(a), Value::Int(b), _) => eval_int_binary(*a, *b, op),
        _ => Err(binary_type_mismatch(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Apply a unary operator.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> OpResult {
    match (op, operand) {
        (UnaryOp::Plus, Value::Int(n)) => Ok(Value::Int(*n)),
        (UnaryOp::Minus, Value::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Plus | UnaryOp::Minus, other) => Err(type_mismatch("integer", other.type_name())),
        (UnaryOp::Not, other) => Err(type_mismatch("boolean", other.type_name())),
    }
}
