//! Typed failure modes for partial coercions.
//!
//! Arithmetic and predicates in this crate are total (see [`crate::element`]):
//! they always return a value, possibly a special one. The only operations
//! that can fail in the ordinary sense are coercions out of the engine's
//! representation into a narrower one (`to_rational`, `to_integer`,
//! `to_algebraic`). Those return `Option` at the call site for ergonomics,
//! but the reason for `None` is preserved here for callers -- like the CLI --
//! that want to report it.

use thiserror::Error;

/// Why a coercion out of the engine's representation failed.
///
/// None of these are bugs: they mean the declared precision/degree ceiling
/// was not enough to decide, not that the engine is broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("value is not rational")]
    NotRational,
    #[error("value is not an integer")]
    NotInteger,
    #[error("value is not algebraic over the rationals")]
    NotAlgebraic,
    #[error("exceeded algebraic degree ceiling of {limit} while coercing")]
    DegreeLimitExceeded { limit: u32 },
    #[error("exceeded precision ceiling of {limit} bits while disambiguating")]
    PrecisionLimitExceeded { limit: u32 },
    #[error("operand is a special value ({0}) and has no algebraic/rational coercion")]
    SpecialValue(&'static str),
}
