//! REPL helper for the interactive calculator shell.
//!
//! Provides [`ReplHelper`] which implements rustyline's `Helper` composite
//! trait: tab completion (functions with auto-paren, session commands at line
//! start, user-defined variables), bracket-counting multi-line validation,
//! and no-op highlighter/hinter.

use rustyline::completion::{Completer, Pair};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper, Highlighter, Hinter};

// ---------------------------------------------------------------------------
// ReplHelper
// ---------------------------------------------------------------------------

/// Line-editing helper with tab completion and bracket validation.
///
/// - **Functions:** All canonical function names auto-complete with `(`.
/// - **Commands:** `help`, `quit`, `exit`, `clear`, `set` complete at line start.
/// - **Variables:** User-defined names synced after each eval via
///   [`update_var_names`](ReplHelper::update_var_names).
/// - **Validator:** Counts `(` / `[` depth; returns `Incomplete` when positive.
#[derive(Helper, Highlighter, Hinter)]
pub struct ReplHelper {
    // NOTE: Completer and Validator are manually implemented below.
    // Highlighter and Hinter use derive (no-op defaults).
    /// Canonical function names (static, from eval.rs's dispatch table).
    function_names: Vec<&'static str>,
    /// Bare named constants (complete without trailing paren).
    constant_names: Vec<&'static str>,
    /// Session command names for completion.
    command_names: Vec<&'static str>,
    /// User-defined variable names (updated after each eval).
    var_names: Vec<String>,
}

impl ReplHelper {
    /// Create a new helper with all canonical function names and commands.
    pub fn new() -> Self {
        Self {
            function_names: Self::canonical_function_names(),
            constant_names: vec!["pi", "e", "i"],
            command_names: vec!["help", "quit", "exit", "clear", "set"],
            var_names: Vec::new(),
        }
    }

    /// Update the set of user-defined variable names for tab completion.
    ///
    /// Called after each successful eval in the main REPL loop.
    pub fn update_var_names(&mut self, var_names: Vec<String>) {
        self.var_names = var_names;
    }

    /// Canonical function names -- must match eval.rs's `eval_call` dispatch.
    fn canonical_function_names() -> Vec<&'static str> {
        vec![
            "sqrt", "exp", "log", "ln", "sin", "cos", "gamma",
            "erf", "erfc", "erfi", "ellipticK", "ellipticE", "conjugate",
        ]
    }

    /// Core completion logic (separated from rustyline types for testability).
    ///
    /// Returns `(word_start, candidates)` where each candidate is
    /// `(display, replacement)`.
    fn complete_inner(&self, line: &str, pos: usize) -> (usize, Vec<(String, String)>) {
        // Find the word start: scan backwards for non-alphanumeric/underscore.
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = &line[start..pos];

        if prefix.is_empty() {
            return (start, vec![]);
        }

        // Check if next char is already '(' (avoid double-paren).
        let has_paren_after = line.get(pos..pos + 1) == Some("(");

        let mut candidates = Vec::new();

        // Complete function names (with auto-paren).
        for &name in &self.function_names {
            if name.starts_with(prefix) {
                let replacement = if has_paren_after {
                    name.to_string()
                } else {
                    format!("{}(", name)
                };
                candidates.push((name.to_string(), replacement));
            }
        }

        // Complete bare constants (without auto-paren).
        for &name in &self.constant_names {
            if name.starts_with(prefix) {
                candidates.push((name.to_string(), name.to_string()));
            }
        }

        // Complete session commands (only at start of line, no paren).
        if start == 0 {
            for &cmd in &self.command_names {
                if cmd.starts_with(prefix) {
                    candidates.push((cmd.to_string(), cmd.to_string()));
                }
            }
        }

        // Complete user-defined variable names (no paren).
        for var_name in &self.var_names {
            if var_name.starts_with(prefix) {
                candidates.push((var_name.clone(), var_name.clone()));
            }
        }

        (start, candidates)
    }

    /// Core bracket-counting logic (separated for testability).
    ///
    /// Returns `true` if the input has unclosed `(`/`[` brackets, ignoring
    /// anything inside a string literal or a `#` comment.
    fn is_incomplete(input: &str) -> bool {
        let mut bracket_depth: i32 = 0;
        let mut in_string = false;
        let mut in_comment = false;

        for ch in input.chars() {
            if in_comment {
                if ch == '\n' {
                    in_comment = false;
                }
                continue;
            }
            if in_string {
                if ch == '"' {
                    in_string = false;
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '#' => in_comment = true,
                '(' | '[' => bracket_depth += 1,
                ')' | ']' => bracket_depth -= 1,
                _ => {}
            }
        }

        bracket_depth > 0
    }
}

impl Default for ReplHelper {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Completer
// ---------------------------------------------------------------------------

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.complete_inner(line, pos);
        let pairs = candidates
            .into_iter()
            .map(|(display, replacement)| Pair { display, replacement })
            .collect();
        Ok((start, pairs))
    }
}

// ---------------------------------------------------------------------------
// Validator (bracket-counting multi-line)
// ---------------------------------------------------------------------------

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        if Self::is_incomplete(ctx.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicate_function_names() {
        let names = ReplHelper::canonical_function_names();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len(), "duplicate function names found");
    }

    #[test]
    fn complete_sq_returns_sqrt_with_paren() {
        let h = ReplHelper::new();
        let (start, pairs) = h.complete_inner("sq", 2);
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "sqrt");
        assert_eq!(pairs[0].1, "sqrt(");
    }

    #[test]
    fn complete_e_includes_constant_and_function() {
        let h = ReplHelper::new();
        let (_, pairs) = h.complete_inner("e", 1);
        let displays: Vec<&str> = pairs.iter().map(|p| p.0.as_str()).collect();
        assert!(displays.contains(&"e"), "constant 'e' missing");
        assert!(displays.contains(&"erf"), "function 'erf' missing");
        assert!(displays.contains(&"exp"), "function 'exp' missing");
    }

    #[test]
    fn complete_q_at_start_includes_commands() {
        let h = ReplHelper::new();
        let (_, pairs) = h.complete_inner("q", 1);
        let displays: Vec<&str> = pairs.iter().map(|p| p.0.as_str()).collect();
        assert!(displays.contains(&"quit"), "quit command missing");
    }

    #[test]
    fn complete_q_mid_line_excludes_commands() {
        let h = ReplHelper::new();
        // "f(q" -- cursor is at position 3, word starts at position 2 (after '(')
        let (start, pairs) = h.complete_inner("f(q", 3);
        assert_eq!(start, 2);
        let displays: Vec<&str> = pairs.iter().map(|p| p.0.as_str()).collect();
        assert!(!displays.contains(&"quit"), "quit should not appear mid-line");
    }

    #[test]
    fn complete_variable_after_update() {
        let mut h = ReplHelper::new();
        h.update_var_names(vec!["foo".to_string(), "fbar".to_string()]);
        let (_, pairs) = h.complete_inner("fo", 2);
        let displays: Vec<&str> = pairs.iter().map(|p| p.0.as_str()).collect();
        assert!(displays.contains(&"foo"), "variable 'foo' should appear");
        let foo_pair = pairs.iter().find(|p| p.0 == "foo").unwrap();
        assert_eq!(foo_pair.1, "foo"); // no paren for variables
    }

    #[test]
    fn complete_has_paren_after_no_double() {
        let h = ReplHelper::new();
        // User typed "sqrt(" but cursor is right before the '('
        let (_, pairs) = h.complete_inner("sqrt(", 4);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "sqrt");
        assert_eq!(pairs[0].1, "sqrt"); // no extra '('
    }

    #[test]
    fn complete_empty_prefix_returns_nothing() {
        let h = ReplHelper::new();
        let (_, pairs) = h.complete_inner("", 0);
        assert!(pairs.is_empty());
    }

    #[test]
    fn validator_balanced_parens_valid() {
        assert!(!ReplHelper::is_incomplete("sqrt(1, 2)"));
    }

    #[test]
    fn validator_unclosed_paren_incomplete() {
        assert!(ReplHelper::is_incomplete("sqrt(1, 2"));
    }

    #[test]
    fn validator_nested_balanced_valid() {
        assert!(!ReplHelper::is_incomplete("sqrt(1) + gamma(2)"));
    }

    #[test]
    fn validator_empty_input_valid() {
        assert!(!ReplHelper::is_incomplete(""));
    }

    #[test]
    fn validator_bracket_incomplete() {
        assert!(ReplHelper::is_incomplete("f([1, 2"));
    }

    #[test]
    fn validator_keyword_in_comment_ignored() {
        assert!(!ReplHelper::is_incomplete("# (unclosed"));
    }

    #[test]
    fn validator_paren_in_string_ignored() {
        assert!(!ReplHelper::is_incomplete("\"(unclosed\""));
    }
}
