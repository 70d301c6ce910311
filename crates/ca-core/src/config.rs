//! Context-wide options bounding the decision procedures.
//!
//! Every ceiling here turns an otherwise-unbounded symbolic or numeric search
//! into a decidable (if sometimes `UNKNOWN`) procedure. None of these are
//! "correctness" knobs: raising them can only turn an `UNKNOWN` into a
//! `TRUE`/`FALSE`, never change a `TRUE` into a `FALSE` or vice versa.

use serde::{Deserialize, Serialize};

/// The trig/exponential form preferred when a function result can be written
/// several equivalent ways.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrigForm {
    Exponential,
    SineCosine,
    Tangent,
}

/// Ordering used for the ambient multivariate polynomial ring.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MonomialOrder {
    Lex,
    DegLex,
}

/// Bounded knobs controlling precision, degree, and search ceilings.
///
/// Loadable from / savable to a TOML profile via [`Options::from_toml_str`] /
/// [`Options::to_toml_string`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Bit-precision ceiling for the interval oracle's `is_zero` escalation loop.
    pub prec_limit: u32,
    /// Starting precision for the interval oracle before any escalation.
    pub low_prec: u32,
    /// Maximum minimal-polynomial degree accepted when coercing to an algebraic number.
    pub qqbar_deg_limit: u32,
    /// Maximum bit size of integers trial-divided when factoring a discriminant.
    pub smooth_limit: u32,
    /// Working precision used by LLL-style relation detection (unused by any
    /// rule currently implemented; carried for forward compatibility with the
    /// ambient options record shape).
    pub lll_prec: u32,
    /// Maximum exponent unrolled by repeated squaring for integer `pow`.
    pub pow_limit: u32,
    /// Maximum number of generators tolerated before ideal reduction gives up
    /// and reports `UNKNOWN` rather than continuing.
    pub groebner_length_limit: u32,
    /// Maximum term count tolerated in a single ideal polynomial during reduction.
    pub groebner_poly_length_limit: u32,
    /// Maximum coefficient bit size tolerated in a single ideal polynomial during reduction.
    pub groebner_poly_bits_limit: u32,
    /// Maximum number of terms expanded by Vieta-style symmetric function identities.
    pub vieta_limit: u32,
    /// Half-width of the integer shift range accepted by the Gamma-shift ideal rule.
    pub gamma_shift_limit: i64,
    /// Whether ideal reduction is allowed to run at all (disabling it forces
    /// every non-trivial `is_zero` through the interval oracle only).
    pub use_groebner: bool,
    /// Monomial order for the ambient polynomial ring.
    pub mpoly_ord: MonomialOrder,
    /// Preferred rewritten form for trigonometric results.
    pub trig_form: TrigForm,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            prec_limit: 4096,
            low_prec: 64,
            qqbar_deg_limit: 64,
            smooth_limit: 32,
            lll_prec: 256,
            pow_limit: 65536,
            groebner_length_limit: 100,
            groebner_poly_length_limit: 1000,
            groebner_poly_bits_limit: 10000,
            vieta_limit: 100,
            gamma_shift_limit: 10,
            use_groebner: true,
            mpoly_ord: MonomialOrder::Lex,
            trig_form: TrigForm::Exponential,
        }
    }
}

impl Options {
    /// Load an options profile from a TOML document, falling back to
    /// [`Default`] for any field the document omits.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize the current options to a TOML document.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("Options always serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roundtrips_through_toml() {
        let opts = Options::default();
        let s = opts.to_toml_string();
        let back = Options::from_toml_str(&s).unwrap();
        assert_eq!(back.prec_limit, opts.prec_limit);
        assert_eq!(back.gamma_shift_limit, opts.gamma_shift_limit);
    }

    #[test]
    fn partial_profile_falls_back_to_defaults() {
        let opts = Options::from_toml_str("prec_limit = 8192\n").unwrap();
        assert_eq!(opts.prec_limit, 8192);
        assert_eq!(opts.low_prec, Options::default().low_prec);
    }
}
