#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::*;
use crate::errors::{EvalError, EvalErrorKind};
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;
use tremolo_ir::BinaryOp;

fn program(source: &str) -> Program {
    tremolo_parse::parse(&tremolo_lexer::tokenize(source)).unwrap()
}

fn run_with(interp: &mut Interpreter, source: &str) -> EvalResult {
    interp.eval_program(&program(source))
}

fn run(source: &str) -> EvalResult {
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    run_with(&mut interp, source)
}

fn run_ok(source: &str) -> Value {
    run(source).unwrap()
}

fn run_err(source: &str) -> EvalError {
    run(source).unwrap_err()
}

#[test]
fn test_literals() {
    assert_eq!(run_ok("42"), Value::Int(42));
    assert_eq!(run_ok("true"), Value::Bool(true));
    assert_eq!(run_ok(r#""hi""#), Value::from("hi"));
    assert_eq!(run_ok(""), Value::Unit);
}

#[test]
fn test_right_associative_arithmetic() {
    assert_eq!(run_ok("10 - 4 - 3"), Value::Int(9));
    assert_eq!(run_ok("100 / 10 / 5"), Value::Int(50));
}

#[test]
fn test_assign_yields_value() {
    assert_eq!(run_ok("let x = 5"), Value::Int(5));
    assert_eq!(run_ok("let x = 5; x * 2"), Value::Int(10));
}

#[test]
fn test_block_scope_does_not_leak() {
    assert!(matches!(
        run_err("if true { let inner = 1 }; inner").kind,
        EvalErrorKind::UndefinedVariable { .. }
    ));
    assert_eq!(
        run_ok("let outer = 1; if true { let outer = 2 }; outer"),
        Value::Int(2)
    );
}

#[test]
fn test_if_without_else_yields_unit() {
    assert_eq!(run_ok("if false { 1 }"), Value::Unit);
    assert_eq!(run_ok("if true { }"), Value::Unit);
}

#[test]
fn test_if_condition_must_be_boolean() {
    assert_eq!(
        run_err("if 1 { 2 }").kind,
        EvalErrorKind::TypeMismatch {
            expected: "boolean",
            got: "integer",
        }
    );
}

#[test]
fn test_closure_captures_defining_scope() {
    let source = "
        let make = func() { let secret = 7; func() { secret } }
        let get = make()
        let secret = 0
        get()
    ";
    assert_eq!(run_ok(source), Value::Int(7));
}

#[test]
fn test_closure_sees_later_writes() {
    assert_eq!(
        run_ok("let n = 1; let f = func() { n }; let n = 2; f()"),
        Value::Int(2)
    );
}

#[test]
fn test_params_shadow_outer_names() {
    assert_eq!(
        run_ok("let x = 1; let f = func(x) { let x = x + 10; x }; f(5) + x"),
        Value::Int(16)
    );
}

#[test]
fn test_argument_count_mismatch() {
    assert_eq!(
        run_ok("let f = func(a, b) { b }; f(1)"),
        Value::Unit
    );
    assert_eq!(run_ok("let f = func(a) { a }; f(1, 2, 3)"), Value::Int(1));
}

#[test]
fn test_extra_arguments_are_evaluated() {
    let out = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(out.clone()).build();
    let value = run_with(&mut interp, "let f = func() { 1 }; f(puts(\"side\"))").unwrap();
    assert_eq!(value, Value::Int(1));
    assert_eq!(out.get_output(), "side\n");
}

#[test]
fn test_recursion() {
    let source = "
        let fact = func(n) { if n <= 1 { 1 } else { n * fact(n - 1) } }
        fact(10)
    ";
    assert_eq!(run_ok(source), Value::Int(3_628_800));
}

#[test]
fn test_return_unwinds_nested_blocks() {
    let source = "
        let f = func(n) {
            if n > 0 { if true { return 10 } }
            20
        }
        f(1) + f(0)
    ";
    assert_eq!(run_ok(source), Value::Int(30));
}

#[test]
fn test_return_only_exits_innermost_call() {
    let source = "
        let inner = func() { return 1; 99 }
        let outer = func() { inner() + 1 }
        outer()
    ";
    assert_eq!(run_ok(source), Value::Int(2));
}

#[test]
fn test_return_values() {
    assert_eq!(run_ok("let f = func() { return }; f()"), Value::Unit);
    assert_eq!(run_ok("let f = func() { return 1, 2 }; f()"), Value::Int(1));
    assert_eq!(run_ok("return 5; 6"), Value::Int(5));
}

#[test]
fn test_return_arguments_all_evaluated() {
    let out = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(out.clone()).build();
    let value = run_with(&mut interp, "return 1, puts(2)").unwrap();
    assert_eq!(value, Value::Int(1));
    assert_eq!(out.get_output(), "2\n");
}

#[test]
fn test_defined_form() {
    assert_eq!(run_ok("let x = 1; defined(x)"), Value::Bool(true));
    assert_eq!(run_ok("defined(x)"), Value::Bool(false));
    assert_eq!(run_ok("defined(1)"), Value::Bool(false));
    assert_eq!(run_ok("defined()"), Value::Bool(false));
    assert_eq!(run_ok("let a = 1; let b = 2; defined(a, b)"), Value::Bool(false));
    // The argument is not evaluated.
    assert_eq!(run_ok("defined(missing(1))"), Value::Bool(false));
}

#[test]
fn test_closure_shadows_builtins() {
    assert_eq!(run_ok("let puts = func(x) { x * 2 }; puts(4)"), Value::Int(8));
    assert_eq!(run_ok("let defined = func(x) { 5 }; defined(1)"), Value::Int(5));
}

#[test]
fn test_puts_output() {
    let out = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(out.clone()).build();
    let value = run_with(
        &mut interp,
        r#"let f = func(a, b) { a }; puts(1, "two", true, f, puts)"#,
    );
    // `puts` as an argument is an unbound variable.
    assert!(value.is_err());
    out.clear();

    let value = run_with(&mut interp, r#"puts(1, "two", true, f, 1 == 1)"#).unwrap();
    assert_eq!(value, Value::Unit);
    assert_eq!(out.get_output(), "1\ntwo\ntrue\n<func(a, b)>\ntrue\n");
}

#[test]
fn test_bindings_persist_across_programs() {
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    run_with(&mut interp, "let total = 40").unwrap();
    assert_eq!(run_with(&mut interp, "total + 2").unwrap(), Value::Int(42));
    assert_eq!(interp.env().lookup("total"), Some(Value::Int(40)));
}

#[test]
fn test_undefined_function() {
    assert_eq!(
        run_err("nope(1)").kind,
        EvalErrorKind::UndefinedFunction {
            name: "nope".to_string()
        }
    );
    // A bound non-closure is not callable.
    assert_eq!(
        run_err("let n = 1; n()").kind,
        EvalErrorKind::UndefinedFunction {
            name: "n".to_string()
        }
    );
}

#[test]
fn test_runtime_errors() {
    assert_eq!(run_err("1 / 0").kind, EvalErrorKind::DivisionByZero);
    assert_eq!(run_err("1 % 0").kind, EvalErrorKind::DivisionByZero);
    assert_eq!(
        run_err("9223372036854775807 + 1").kind,
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert_eq!(
        run_err(r#"1 + "a""#).kind,
        EvalErrorKind::BinaryTypeMismatch {
            op: BinaryOp::Add,
            left: "integer",
            right: "string",
        }
    );
    assert_eq!(run_err("!1").to_string(), "type mismatch: expected boolean, got integer");
}

#[test]
fn test_equality_across_types() {
    assert_eq!(run_ok(r#"1 == "1""#), Value::Bool(false));
    assert_eq!(run_ok(r#""a" == "a""#), Value::Bool(true));
    assert_eq!(run_ok("let f = func() { 1 }; f == f"), Value::Bool(false));
    assert_eq!(
        run_ok("let a = func() { }; let b = func() { return }; a() == b()"),
        Value::Bool(true)
    );
}

#[test]
fn test_error_backtrace() {
    let source = "
        let inner = func() { 1 / 0 }
        let outer = func() { inner() }
        outer()
    ";
    let err = run_err(source);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let names: Vec<String> = err
        .backtrace
        .unwrap()
        .frames()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn test_top_level_error_has_no_backtrace() {
    assert_eq!(run_err("missing").backtrace, None);
}

#[test]
fn test_call_depth_limit() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_depth(50)
        .build();
    let err = run_with(&mut interp, "let f = func(n) { f(n + 1) }; f(0)").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.backtrace.unwrap().frames().len(), 50);

    // The stack unwinds fully; the interpreter stays usable.
    assert_eq!(
        run_with(&mut interp, "let g = func(n) { if n == 0 { 0 } else { g(n - 1) } }; g(40)")
            .unwrap(),
        Value::Int(0)
    );
}

#[test]
fn test_deep_recursion_within_default_limit() {
    let source = "
        let count = func(n) { if n == 0 { 0 } else { 1 + count(n - 1) } }
        count(5000)
    ";
    assert_eq!(run_ok(source), Value::Int(5000));
}

#[test]
fn test_eval_nested_program_node_absorbs_return() {
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    let node = Node::Program(program("return 3; 4"));
    let env = interp.env().clone();
    assert_eq!(interp.eval(&node, &env).unwrap(), Value::Int(3));
}

#[test]
fn test_call_closure_directly() {
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    run_with(&mut interp, "let add = func(a, b) { a + b }").unwrap();
    let Some(Value::Closure(add)) = interp.env().lookup("add") else {
        panic!("add should be a closure");
    };
    let sum = interp
        .call_closure("add", &add, vec![Value::Int(2), Value::Int(3)])
        .unwrap();
    assert_eq!(sum, Value::Int(5));
}
