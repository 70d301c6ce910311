//! Session state for the calculator evaluator.
//!
//! The [`Environment`] owns the engine [`Context`] (every `Element` produced
//! during a session is only meaningful relative to this one context), the
//! user's variable bindings, and the last computed result (for `%`/ditto).

use std::collections::HashMap;

use ca_core::context::Context;

use crate::eval::Value;

/// The evaluator's runtime environment.
///
/// Created once at REPL/script start and persists across statements.
pub struct Environment {
    /// The engine context every `Element` in this session is relative to.
    pub ctx: Context,
    /// User-defined variables (name -> value).
    pub variables: HashMap<String, Value>,
    /// Last computed result (for `%`/ditto reference).
    pub last_result: Option<Value>,
}

impl Environment {
    /// Create a new environment with a fresh context and default options.
    pub fn new() -> Self {
        Self {
            ctx: Context::new(),
            variables: HashMap::new(),
            last_result: None,
        }
    }

    /// Store a variable binding.
    pub fn set_var(&mut self, name: &str, val: Value) {
        self.variables.insert(name.to_string(), val);
    }

    /// Look up a variable by name.
    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Clear all variable bindings and the last result, keeping the context
    /// (and its options) intact.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.last_result = None;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
