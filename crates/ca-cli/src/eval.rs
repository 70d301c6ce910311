//! Evaluator core for the calculator REPL.
//!
//! Walks [`AstNode`] trees, manages the variable [`Environment`], and
//! dispatches function calls to `ca_core::functions`/`ca_core::arith`.

use std::fmt;

use ca_core::context::Context;
use ca_core::element::Element;
use ca_core::field::QQ;
use ca_core::number::{QInt, QRat};
use ca_core::poly::QRatPoly;
use ca_core::{arith, functions};

use crate::ast::{AstNode, BinOp};
use crate::environment::Environment;

/// A runtime value: either a single element of the engine, or a list of
/// values (the calculator's only aggregate type; it has no element-level
/// representation in `ca_core`, so lists live purely on the CLI side).
#[derive(Clone, Debug)]
pub enum Value {
    Element(Element),
    List(Vec<Value>),
}

impl Value {
    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Element(_) => "number",
            Value::List(_) => "list",
        }
    }

    fn as_element(&self) -> Result<&Element, EvalError> {
        match self {
            Value::Element(e) => Ok(e),
            Value::List(_) => Err(EvalError::NotAnElement),
        }
    }
}

/// Evaluation failure: anything that isn't a total `Element` operation
/// (unknown names, wrong arity, malformed literals).
#[derive(Debug, Clone)]
pub enum EvalError {
    UnknownVariable(String),
    UnknownFunction(String),
    ArityMismatch { name: String, expected: &'static str, got: usize },
    InvalidInteger(String),
    NotAnElement,
    /// A panic was caught while evaluating a statement (see [`eval_stmt_safe`]).
    Panic(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownVariable(name) => write!(f, "unknown variable '{}'", name),
            EvalError::UnknownFunction(name) => write!(f, "unknown function '{}'", name),
            EvalError::ArityMismatch { name, expected, got } => {
                write!(f, "'{}' expects {} argument(s), got {}", name, expected, got)
            }
            EvalError::InvalidInteger(s) => write!(f, "invalid integer literal '{}'", s),
            EvalError::NotAnElement => write!(f, "expected a number, found a list"),
            EvalError::Panic(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

fn big_integer(s: &str) -> Result<Element, EvalError> {
    let n: rug::Integer = s.parse().map_err(|_| EvalError::InvalidInteger(s.to_string()))?;
    Ok(Element::rational(QQ, QRat::from(QInt::from(n))))
}

/// The imaginary unit, `i`: the generator of `ca_core`'s preinstalled `QQ_I`
/// field (fixed up in `Context::new` from the `x^2+1` algebraic atom).
fn imaginary_unit(ctx: &Context) -> Element {
    Element::number_field(ctx.qq_i(), QRatPoly::from_vec(vec![QRat::zero(), QRat::one()]))
}

fn apply_binop(ctx: &mut Context, op: BinOp, lhs: &Element, rhs: &Element) -> Element {
    match op {
        BinOp::Add => arith::add(ctx, lhs, rhs),
        BinOp::Sub => arith::sub(ctx, lhs, rhs),
        BinOp::Mul => arith::mul(ctx, lhs, rhs),
        BinOp::Div => arith::div(ctx, lhs, rhs),
        BinOp::Pow => power(ctx, lhs, rhs),
    }
}

/// `base ^ exp`. An integer exponent uses exact repeated multiplication
/// (`arith::pow_u32`/`inv`, matching the engine's own `pow_u32` contract);
/// any other exponent falls back to the `exp(log(base) * exp)` identity,
/// the same general-exponent rule FLINT's `ca_pow` falls back to.
fn power(ctx: &mut Context, base: &Element, exp: &Element) -> Element {
    if let Ok(n) = arith::to_integer(exp) {
        if let Some(k) = n.to_i64() {
            return if k >= 0 {
                match u32::try_from(k) {
                    Ok(k) => arith::pow_u32(ctx, base, k),
                    Err(_) => Element::Unknown,
                }
            } else {
                match u32::try_from(-k) {
                    Ok(k) => {
                        let powered = arith::pow_u32(ctx, base, k);
                        arith::inv(ctx, &powered)
                    }
                    Err(_) => Element::Unknown,
                }
            };
        }
        return Element::Unknown;
    }
    let l = functions::log(ctx, base);
    let product = arith::mul(ctx, &l, exp);
    functions::exp(ctx, &product)
}

/// Look up a bare identifier as a named constant when it isn't a bound
/// variable: `pi`, `e`, and `i` are available without parentheses.
fn named_constant(ctx: &mut Context, name: &str) -> Option<Element> {
    match name {
        "pi" => Some(functions::pi(ctx)),
        "e" => Some(functions::e(ctx)),
        "i" => Some(imaginary_unit(ctx)),
        _ => None,
    }
}

fn eval_call(env: &mut Environment, name: &str, args: &[AstNode]) -> Result<Value, EvalError> {
    // Nullary named constants also work as `pi()`/`e()`/`i()`.
    if args.is_empty() {
        if let Some(c) = named_constant(&mut env.ctx, name) {
            return Ok(Value::Element(c));
        }
    }

    let arity_one = |name: &str, args: &[AstNode]| -> Result<&AstNode, EvalError> {
        match args {
            [only] => Ok(only),
            _ => Err(EvalError::ArityMismatch { name: name.to_string(), expected: "1", got: args.len() }),
        }
    };

    macro_rules! unary {
        ($f:path) => {{
            let arg = arity_one(name, args)?;
            let v = eval_node(env, arg)?;
            let e = v.as_element()?;
            Ok(Value::Element($f(&mut env.ctx, e)))
        }};
    }

    match name {
        "sqrt" => unary!(functions::sqrt),
        "exp" => unary!(functions::exp),
        "log" | "ln" => unary!(functions::log),
        "sin" => unary!(functions::sin),
        "cos" => unary!(functions::cos),
        "gamma" => unary!(functions::gamma),
        "erf" => unary!(functions::erf),
        "erfc" => unary!(functions::erfc),
        "erfi" => unary!(functions::erfi),
        "ellipticK" | "elliptic_k" => unary!(functions::elliptic_k),
        "ellipticE" | "elliptic_e" => unary!(functions::elliptic_e),
        "conjugate" | "conj" => unary!(functions::conjugate),
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

/// Evaluate a single AST node to a [`Value`] against the given environment.
pub fn eval_node(env: &mut Environment, node: &AstNode) -> Result<Value, EvalError> {
    match node {
        AstNode::Integer(n) => Ok(Value::Element(Element::rational(QQ, QRat::from(QInt::from(*n))))),
        AstNode::BigInteger(s) => Ok(Value::Element(big_integer(s)?)),
        AstNode::Infinity => Ok(Value::Element(Element::UnsignedInfinity)),
        AstNode::LastResult => Ok(env.last_result.clone().unwrap_or(Value::Element(Element::rational(QQ, QRat::zero())))),
        AstNode::Variable(name) => {
            if let Some(v) = env.get_var(name) {
                Ok(v.clone())
            } else if let Some(c) = named_constant(&mut env.ctx, name) {
                Ok(Value::Element(c))
            } else {
                Err(EvalError::UnknownVariable(name.clone()))
            }
        }
        AstNode::BinOp { op, lhs, rhs } => {
            let l = eval_node(env, lhs)?;
            let r = eval_node(env, rhs)?;
            let result = apply_binop(&mut env.ctx, *op, l.as_element()?, r.as_element()?);
            Ok(Value::Element(result))
        }
        AstNode::Neg(inner) => {
            let v = eval_node(env, inner)?;
            Ok(Value::Element(arith::neg(v.as_element()?)))
        }
        AstNode::FuncCall { name, args } => eval_call(env, name, args),
        AstNode::List(items) => {
            let values = items.iter().map(|item| eval_node(env, item)).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(values))
        }
        AstNode::Assign { name, value } => {
            let v = eval_node(env, value)?;
            env.set_var(name, v.clone());
            Ok(v)
        }
    }
}

/// Evaluate a statement, updating `%`/ditto, and returning the value to
/// display if the statement's terminator calls for output.
pub fn eval_stmt(env: &mut Environment, stmt: &crate::ast::Stmt) -> Result<Option<Value>, EvalError> {
    let value = eval_node(env, &stmt.node)?;
    env.last_result = Some(value.clone());
    match stmt.terminator {
        crate::ast::Terminator::Colon => Ok(None),
        _ => Ok(Some(value)),
    }
}

/// Evaluate a statement, catching any panic raised inside `ca_core` so a
/// single malformed expression can never bring down the REPL loop.
pub fn eval_stmt_safe(stmt: &crate::ast::Stmt, env: &mut Environment) -> Result<Option<Value>, EvalError> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| eval_stmt(env, stmt))) {
        Ok(result) => result,
        Err(payload) => Err(EvalError::Panic(panic_message(&payload))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
