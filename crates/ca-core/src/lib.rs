//! Exact computable real and complex numbers: a field of values closed
//! under arithmetic and a fixed set of special functions, where every
//! element carries enough structure (a minimal polynomial, or a generator
//! tuple plus an ideal of relations) to decide equality, sign, and
//! algebraicity exactly whenever the configured precision/degree ceilings
//! allow it.

pub mod arith;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod extension;
pub mod field;
pub mod functions;
pub mod ideal;
pub mod interval;
pub mod merge;
pub mod mpoly;
pub mod number;
pub mod poly;
pub mod qqbar;

// Re-export key types at crate root for convenience.
pub use config::{MonomialOrder, Options, TrigForm};
pub use context::Context;
pub use element::{Element, Payload};
pub use error::CoercionError;
pub use extension::{ConstantCode, Extension, ExtensionCache, ExtensionId, FunctionCode};
pub use field::{Field, FieldCache, FieldId, QQ, QQ_I};
pub use number::{QInt, QRat};
pub use poly::{Factorization, QRatPoly, QRatRationalFunc, factor_over_q, poly_gcd, poly_resultant, poly_xgcd};
pub use qqbar::QQBar;
