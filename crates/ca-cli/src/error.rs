//! Error types for the calculator's parser.
//!
//! Provides [`ParseError`] with caret-style error rendering for clear
//! user-facing diagnostics.

use crate::token::Span;
use std::fmt;

/// A parse error with source location.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error description.
    pub message: String,
    /// Byte-offset span where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Render this error with a caret pointing to the error location.
    ///
    /// Produces output like:
    /// ```text
    /// parse error at column 5: unexpected token
    ///   gamma(x, 10
    ///       ^
    /// ```
    ///
    /// Column is 1-indexed (derived from `span.start` byte offset, which
    /// equals the column for ASCII input).
    pub fn render(&self, source: &str) -> String {
        let col = self.span.start;
        let col_display = col + 1; // 1-indexed for human display
        let spaces = " ".repeat(col + 2); // 2 for "  " prefix
        format!(
            "parse error at column {}: {}\n  {}\n{}^",
            col_display, self.message, source, spaces
        )
    }

    /// Render for a script file: shows filename:line:col prefix with caret.
    ///
    /// For multiline sources, extracts just the offending line and computes
    /// the column within that line.
    pub fn render_for_file(&self, source: &str, filename: &str) -> String {
        let (line, col) = byte_offset_to_line_col(source, self.span.start);
        let source_line = source.lines().nth(line - 1).unwrap_or("");
        let spaces = " ".repeat(col - 1 + 2); // 2 for "  " prefix
        format!(
            "{}:{}:{}: parse error: {}\n  {}\n{}^",
            filename, line, col, self.message, source_line, spaces
        )
    }
}

/// Convert a byte offset to 1-indexed (line, col).
pub fn byte_offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at byte {}: {}",
            self.span.start, self.message
        )
    }
}

impl std::error::Error for ParseError {}
