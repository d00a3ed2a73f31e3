use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_messages() {
    assert_eq!(undefined_variable("x").to_string(), "undefined variable: x");
    assert_eq!(undefined_function("f").to_string(), "undefined function: f");
    assert_eq!(
        type_mismatch("boolean", "integer").to_string(),
        "type mismatch: expected boolean, got integer"
    );
    assert_eq!(
        binary_type_mismatch(BinaryOp::Add, "integer", "string").to_string(),
        "cannot apply `+` to integer and string"
    );
    assert_eq!(division_by_zero().to_string(), "division by zero");
    assert_eq!(
        integer_overflow("multiplication").to_string(),
        "integer overflow in multiplication"
    );
    assert_eq!(
        recursion_limit_exceeded(100).to_string(),
        "maximum call depth exceeded (limit: 100)"
    );
}

#[test]
fn test_factories_start_without_backtrace() {
    assert_eq!(division_by_zero().backtrace, None);
}

#[test]
fn test_with_backtrace() {
    let trace = EvalBacktrace::new(vec![BacktraceFrame {
        name: "inner".to_string(),
    }]);
    let err = division_by_zero().with_backtrace(trace.clone());
    assert_eq!(err.backtrace, Some(trace));
    // The message is the kind alone.
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn test_backtrace_display() {
    let trace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "inner".to_string(),
        },
        BacktraceFrame {
            name: "outer".to_string(),
        },
    ]);
    assert_eq!(trace.frames().len(), 2);
    assert_eq!(
        trace.to_string(),
        "stack backtrace:\n  0: inner\n  1: outer\n"
    );
    assert_eq!(EvalBacktrace::default().to_string(), "");
}

#[test]
fn test_backtrace_display_truncates() {
    let frames = (0..20)
        .map(|i| BacktraceFrame {
            name: format!("f{i}"),
        })
        .collect();
    let text = EvalBacktrace::new(frames).to_string();
    assert!(text.contains("  15: f15\n"));
    assert!(!text.contains("f16"));
    assert!(text.ends_with("  ... 4 more\n"));
}

#[test]
fn test_control_action_from_error() {
    let action: ControlAction = division_by_zero().into();
    assert!(matches!(action, ControlAction::Error(_)));
    assert_eq!(
        action.catch_return().map_err(|e| e.kind),
        Err(EvalErrorKind::DivisionByZero)
    );
}

#[test]
fn test_control_action_catch_return() {
    let action = ControlAction::Return(Value::Int(42));
    assert_eq!(action.catch_return(), Ok(Value::Int(42)));
}
