//! Stack growth for the recursive-descent parser and the tree walker.
//!
//! Both stages recurse once per nesting level of the input, so a program
//! like `((((...))))` or a deeply recursive user function can exhaust the
//! native stack long before the interpreter's own call-depth limit
//! trips. Every recursive entry point wraps its body in
//! [`ensure_sufficient_stack`], which allocates a fresh stack segment
//! when the current one runs low.
//!
//! On `wasm32` there is no `stacker`; the wrapper calls straight through.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
