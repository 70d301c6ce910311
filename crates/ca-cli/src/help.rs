//! Help system for the calculator REPL.
//!
//! Provides two public functions:
//! - [`general_help`]: grouped listing of all functions + session commands.
//! - [`function_help`]: per-function signature, description, and example.

// ---------------------------------------------------------------------------
// General help
// ---------------------------------------------------------------------------

/// Return the general help text: all functions grouped by category plus a
/// Commands section at the bottom.
pub fn general_help() -> String {
    String::from(
        "\
ca Functions
============

Constants (bare, no parentheses needed):
  pi    - the circle constant, as an exact transcendental
  e     - Euler's number, as an exact transcendental
  i     - the imaginary unit, sqrt(-1)

Algebraic:
  sqrt(x)   - principal square root

Exponential & logarithmic:
  exp(x)       - e^x
  log(x), ln(x) - principal natural logarithm

Trigonometric:
  sin(x)
  cos(x)

Special functions:
  gamma(x)        - the gamma function, Gamma(x)
  erf(x)          - the error function
  erfc(x)         - the complementary error function, 1 - erf(x)
  erfi(x)         - the imaginary error function, -i*erf(i*x)
  ellipticK(x)    - the complete elliptic integral of the first kind
  ellipticE(x)    - the complete elliptic integral of the second kind

Other:
  conjugate(x), conj(x)  - complex conjugate

Commands:
  help [function]   - show this help or help for a specific function
  set precision N   - set the working-precision ceiling (bits) for numeric
                       disambiguation when exactness can't be decided
  clear             - reset all variables and the last result (%)
  quit / exit       - exit the REPL (also Ctrl-D)",
    )
}

// ---------------------------------------------------------------------------
// Per-function help
// ---------------------------------------------------------------------------

/// A single help entry for a function.
struct FuncHelp {
    /// Function name (must match the evaluator's dispatch name exactly).
    name: &'static str,
    /// Signature including parameter names.
    signature: &'static str,
    /// Description (1-3 sentences).
    description: &'static str,
    /// Example input line.
    example: &'static str,
    /// Expected output.
    example_output: &'static str,
}

/// All function help entries.
const FUNC_HELP: &[FuncHelp] = &[
    FuncHelp {
        name: "pi",
        signature: "pi  (also callable as pi())",
        description: "The circle constant, represented exactly as a transcendental generator -- \
not truncated to a fixed number of digits.",
        example: "ca> pi",
        example_output: "~3.1415926536",
    },
    FuncHelp {
        name: "e",
        signature: "e  (also callable as e())",
        description: "Euler's number, represented exactly as a transcendental generator.",
        example: "ca> e",
        example_output: "~2.7182818285",
    },
    FuncHelp {
        name: "i",
        signature: "i  (also callable as i())",
        description: "The imaginary unit, a root of x^2 + 1. Unlike pi/e this is algebraic, so \
arithmetic with it stays exact.",
        example: "ca> i^2",
        example_output: "-1",
    },
    FuncHelp {
        name: "sqrt",
        signature: "sqrt(x)",
        description: "Principal square root of x. Exact when x is a perfect square (or the \
square of an already-exact algebraic number); otherwise introduces a new \
algebraic extension of degree 2.",
        example: "ca> sqrt(2)",
        example_output: "1.4142135624 (root of a degree-2 polynomial)",
    },
    FuncHelp {
        name: "exp",
        signature: "exp(x)",
        description: "The exponential function e^x.",
        example: "ca> exp(0)",
        example_output: "1",
    },
    FuncHelp {
        name: "log",
        signature: "log(x)",
        description: "Principal natural logarithm of x. Aliased as ln.",
        example: "ca> log(1)",
        example_output: "0",
    },
    FuncHelp {
        name: "sin",
        signature: "sin(x)",
        description: "Sine of x, x in radians.",
        example: "ca> sin(0)",
        example_output: "0",
    },
    FuncHelp {
        name: "cos",
        signature: "cos(x)",
        description: "Cosine of x, x in radians.",
        example: "ca> cos(0)",
        example_output: "1",
    },
    FuncHelp {
        name: "gamma",
        signature: "gamma(x)",
        description: "The gamma function Gamma(x), the analytic continuation of the factorial \
(Gamma(n+1) = n! for nonnegative integers n).",
        example: "ca> gamma(5)",
        example_output: "24",
    },
    FuncHelp {
        name: "erf",
        signature: "erf(x)",
        description: "The error function, erf(x) = (2/sqrt(pi)) * integral(exp(-t^2), t=0..x).",
        example: "ca> erf(0)",
        example_output: "0",
    },
    FuncHelp {
        name: "erfc",
        signature: "erfc(x)",
        description: "The complementary error function, erfc(x) = 1 - erf(x).",
        example: "ca> erfc(0)",
        example_output: "1",
    },
    FuncHelp {
        name: "erfi",
        signature: "erfi(x)",
        description: "The imaginary error function, erfi(x) = -i*erf(i*x).",
        example: "ca> erfi(0)",
        example_output: "0",
    },
    FuncHelp {
        name: "ellipticK",
        signature: "ellipticK(m)",
        description: "The complete elliptic integral of the first kind, K(m), parameterized by \
the parameter m (not the modulus k).",
        example: "ca> ellipticK(0)",
        example_output: "~1.5707963268",
    },
    FuncHelp {
        name: "ellipticE",
        signature: "ellipticE(m)",
        description: "The complete elliptic integral of the second kind, E(m), parameterized by \
the parameter m (not the modulus k).",
        example: "ca> ellipticE(0)",
        example_output: "~1.5707963268",
    },
    FuncHelp {
        name: "conjugate",
        signature: "conjugate(x)",
        description: "Complex conjugate of x. Aliased as conj.",
        example: "ca> conjugate(i)",
        example_output: "-i",
    },
];

/// Return per-function help for the given name, or `None` if unrecognized.
///
/// `log`/`ln` and `conjugate`/`conj` both resolve to the same entry.
pub fn function_help(name: &str) -> Option<String> {
    let canonical = match name {
        "ln" => "log",
        "conj" => "conjugate",
        "elliptic_k" => "ellipticK",
        "elliptic_e" => "ellipticE",
        other => other,
    };
    FUNC_HELP.iter().find(|h| h.name == canonical).map(|h| {
        format!(
            "{}\n\n  {}\n\n  Example:\n    {}\n    {}",
            h.signature, h.description, h.example, h.example_output
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
