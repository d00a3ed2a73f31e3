//! Live call stack of user-function calls.
//!
//! Each closure call pushes a frame and pops it on the way out. The depth
//! limit is checked on push, and error sites snapshot the frames into an
//! [`EvalBacktrace`].

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// Call depth allowed when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Name the closure was called through.
    pub name: String,
}

impl CallFrame {
    pub fn new(name: impl Into<String>) -> Self {
        CallFrame { name: name.into() }
    }
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, or fail with `StackOverflow` if the stack is full.
    ///
    /// On failure nothing is pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Snapshot of the current frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach the current backtrace unless `err` already carries one.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if err.backtrace.is_some() || self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::{division_by_zero, EvalErrorKind};

    #[test]
    fn push_pop_tracks_depth() {
        let mut stack = CallStack::new(4);
        assert_eq!(stack.depth(), 0);
        stack.push(CallFrame::new("a")).unwrap();
        stack.push(CallFrame::new("b")).unwrap();
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_past_limit_fails() {
        let mut stack = CallStack::new(2);
        stack.push(CallFrame::new("a")).unwrap();
        stack.push(CallFrame::new("a")).unwrap();
        let err = stack.push(CallFrame::new("a")).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn capture_is_innermost_first() {
        let mut stack = CallStack::default();
        stack.push(CallFrame::new("outer")).unwrap();
        stack.push(CallFrame::new("inner")).unwrap();
        let trace = stack.capture();
        let names: Vec<&str> = trace.frames().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["inner", "outer"]);
    }

    #[test]
    fn attach_backtrace_keeps_first() {
        let mut stack = CallStack::default();
        let bare = stack.attach_backtrace(division_by_zero());
        assert!(bare.backtrace.is_none());

        stack.push(CallFrame::new("inner")).unwrap();
        let err = stack.attach_backtrace(division_by_zero());
        stack.pop();
        stack.push(CallFrame::new("other")).unwrap();
        let err = stack.attach_backtrace(err);
        assert_eq!(err.backtrace.unwrap().frames()[0].name, "inner");
    }
}
