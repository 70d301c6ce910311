//! AST types for the calculator parser.
//!
//! Represents syntax (what the user typed), not semantics (mathematical
//! structure). The evaluator converts AstNode into ca-core `Element` values
//! against the session's `Context`.

/// Binary operator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Exponentiation (`^`).
    Pow,
}

/// An AST node representing a parsed expression.
///
/// Note: AstNode does not carry span information. Parse errors are reported
/// from the parser's current position. If needed later, a `Spanned<T>` wrapper
/// can be added.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Small integer literal (fits in i64).
    Integer(i64),
    /// Large integer literal (decimal string, evaluator converts to QInt).
    BigInteger(String),
    /// The `infinity` keyword (evaluates to `Element::UnsignedInfinity`).
    Infinity,
    /// `%` reference to last result.
    LastResult,
    /// Variable reference by name.
    Variable(String),
    /// Binary operation: `lhs op rhs`.
    BinOp {
        op: BinOp,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
    },
    /// Unary negation: `-expr`.
    Neg(Box<AstNode>),
    /// Function call: `name(arg1, arg2, ...)`.
    FuncCall {
        name: String,
        args: Vec<AstNode>,
    },
    /// List literal: `[expr1, expr2, ...]`.
    List(Vec<AstNode>),
    /// Variable assignment: `name := value`.
    Assign {
        name: String,
        value: Box<AstNode>,
    },
}

/// Statement terminator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `;` -- print result.
    Semi,
    /// `:` -- suppress output.
    Colon,
    /// No explicit terminator (end of input).
    Implicit,
}

/// A parsed statement: an expression with a terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// The expression node.
    pub node: AstNode,
    /// How this statement was terminated.
    pub terminator: Terminator,
}
