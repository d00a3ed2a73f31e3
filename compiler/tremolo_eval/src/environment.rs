//! Lexical environments.
//!
//! An [`Environment`] is a handle on one scope in a parent-linked chain.
//! Handles are cheap to clone and share their scope, so a closure that
//! captured a scope sees later writes to it, and a scope lives as long as
//! any closure or child scope still refers to it.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{undefined_variable, EvalError};
use crate::Value;

/// A single-threaded, shared, mutable scope cell.
///
/// Every scope allocation goes through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Look up a name in this scope only.
    #[inline]
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    #[inline]
    pub fn has_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

/// Handle on a scope chain.
#[derive(Clone)]
pub struct Environment {
    scope: LocalScope<Scope>,
}

impl Environment {
    /// A fresh root scope with no bindings.
    pub fn new() -> Self {
        Environment {
            scope: LocalScope::new(Scope::default()),
        }
    }

    /// A new, empty scope whose parent is this one.
    #[must_use]
    pub fn spawn(&self) -> Environment {
        Environment {
            scope: LocalScope::new(Scope::with_parent(self.scope.clone())),
        }
    }

    /// Whether `name` is bound anywhere in the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.owner_of(name).is_some()
    }

    /// Value bound to `name` in the nearest scope defining it.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let owner = self.owner_of(name)?;
        let scope = owner.borrow();
        scope.get_local(name).cloned()
    }

    /// Like [`lookup`](Self::lookup), but unbound names are an error.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    /// Assign `name`.
    ///
    /// Overwrites the binding in the scope that owns it; if no scope in
    /// the chain does, creates it in this (innermost) scope.
    pub fn set(&self, name: &str, value: Value) {
        let target = self.owner_of(name).unwrap_or_else(|| self.scope.clone());
        target.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    ///
    /// Used for parameters, which always belong to the call's own scope.
    pub fn define(&self, name: &str, value: Value) {
        self.scope
            .borrow_mut()
            .bindings
            .insert(name.to_string(), value);
    }

    /// Number of scopes from here to the root, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.scope.borrow().parent.clone();
        while let Some(scope) = current {
            depth += 1;
            current = scope.borrow().parent.clone();
        }
        depth
    }

    /// The nearest scope, walking outward, that binds `name`.
    fn owner_of(&self, name: &str) -> Option<LocalScope<Scope>> {
        let mut current = Some(self.scope.clone());
        while let Some(scope) = current {
            if scope.borrow().has_local(name) {
                return Some(scope);
            }
            current = scope.borrow().parent.clone();
        }
        None
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

/// Shows only this scope's names; values may hold closures that lead
/// back to the same scope.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.scope.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
