//! Dense univariate polynomial over QRat (arbitrary-precision rationals).
//!
//! `QRatPoly` stores coefficients in ascending degree order as a `Vec<QRat>`.
//! Invariant: the vector is either empty (zero polynomial) or the last element is nonzero.

pub mod arithmetic;
pub mod cyclotomic;
pub mod factor;
pub mod gcd;
pub mod ratfunc;

pub use factor::{Factorization, factor_over_q};
pub use gcd::{poly_gcd, poly_resultant, poly_xgcd};
pub use ratfunc::QRatRationalFunc;

use crate::number::QRat;
use std::cmp::Ordering;
use std::fmt;

/// A dense univariate polynomial with `QRat` coefficients.
///
/// Coefficients are stored in ascending degree order: `coeffs[i]` is the
/// coefficient of x^i. The representation is canonical: the vector is empty
/// for the zero polynomial, and the last element is always nonzero otherwise.
#[derive(Clone, Debug)]
pub struct QRatPoly {
    coeffs: Vec<QRat>,
}

impl QRatPoly {
    // ---- Private helpers ----

    /// Strip trailing zero coefficients to maintain the canonical invariant.
    fn normalize(&mut self) {
        while self
            .coeffs
            .last()
            .map_or(false, |c| c.0.cmp0() == Ordering::Equal)
        {
            self.coeffs.pop();
        }
    }

    // ---- Constructors ----

    /// The zero polynomial.
    pub fn zero() -> Self {
        QRatPoly { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        QRatPoly {
            coeffs: vec![QRat::one()],
        }
    }

    /// A constant polynomial. Returns zero polynomial if `c` is zero.
    pub fn constant(c: QRat) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            QRatPoly { coeffs: vec![c] }
        }
    }

    /// The indeterminate x (i.e., 0 + 1*x).
    pub fn x() -> Self {
        QRatPoly {
            coeffs: vec![QRat::zero(), QRat::one()],
        }
    }

    /// The monomial c * x^deg. Returns zero polynomial if `c` is zero.
    pub fn monomial(c: QRat, deg: usize) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![QRat::zero(); deg + 1];
        coeffs[deg] = c;
        QRatPoly { coeffs }
    }

    /// The linear polynomial a + b*x.
    pub fn linear(a: QRat, b: QRat) -> Self {
        Self::from_vec(vec![a, b])
    }

    /// Construct from a vector of coefficients (ascending degree order).
    /// Trailing zeros are stripped.
    pub fn from_vec(coeffs: Vec<QRat>) -> Self {
        let mut p = QRatPoly { coeffs };
        p.normalize();
        p
    }

    /// Convenience constructor from i64 coefficients (ascending degree order).
    pub fn from_i64_coeffs(coeffs: &[i64]) -> Self {
        let v: Vec<QRat> = coeffs.iter().map(|&c| QRat::from((c, 1i64))).collect();
        Self::from_vec(v)
    }

    // ---- Queries ----

    /// Degree of the polynomial, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Leading coefficient, or `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<QRat> {
        self.coeffs.last().cloned()
    }

    /// Coefficient of x^i. Returns zero if `i` is beyond the polynomial's degree.
    pub fn coeff(&self, i: usize) -> QRat {
        self.coeffs.get(i).cloned().unwrap_or_else(QRat::zero)
    }

    /// True if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// True if this is a constant polynomial (including zero).
    pub fn is_constant(&self) -> bool {
        self.degree().map_or(true, |d| d == 0)
    }

    /// True if this is the constant polynomial 1.
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == QRat::one()
    }

    /// Public read-only access to the coefficient slice.
    pub fn coeffs(&self) -> &[QRat] {
        &self.coeffs
    }

    // ---- Content / Primitive Part / Monic ----

    /// Content of the polynomial: gcd(numerators) / lcm(denominators).
    ///
    /// For the zero polynomial, returns zero.
    pub fn content(&self) -> QRat {
        if self.coeffs.is_empty() {
            return QRat::zero();
        }

        let mut numer_gcd = rug::Integer::from(0);
        let mut denom_lcm = rug::Integer::from(1);

        for c in &self.coeffs {
            let n = c.0.numer().clone().abs();
            let d = c.0.denom().clone();
            numer_gcd = numer_gcd.gcd(&n);
            denom_lcm = denom_lcm.lcm(&d);
        }

        QRat(rug::Rational::from((numer_gcd, denom_lcm)))
    }

    /// Primitive part: self / content. Returns zero for the zero polynomial.
    pub fn primitive_part(&self) -> QRatPoly {
        let cont = self.content();
        if cont.is_zero() {
            return Self::zero();
        }
        self.scalar_div(&cont)
    }

    /// Make monic: divide all coefficients by the leading coefficient.
    /// Returns zero for the zero polynomial.
    pub fn make_monic(&self) -> QRatPoly {
        match self.leading_coeff() {
            None => Self::zero(),
            Some(lc) => self.scalar_div(&lc),
        }
    }

    // ---- Scalar operations (used by content/primitive_part/make_monic) ----

    /// Multiply every coefficient by a scalar.
    pub fn scalar_mul(&self, c: &QRat) -> QRatPoly {
        if c.is_zero() {
            return Self::zero();
        }
        let coeffs: Vec<QRat> = self.coeffs.iter().map(|ci| ci * c).collect();
        QRatPoly::from_vec(coeffs)
    }

    /// Divide every coefficient by a scalar. Panics if `c` is zero.
    pub fn scalar_div(&self, c: &QRat) -> QRatPoly {
        assert!(!c.is_zero(), "QRatPoly::scalar_div: division by zero");
        let coeffs: Vec<QRat> = self.coeffs.iter().map(|ci| ci / c).collect();
        QRatPoly::from_vec(coeffs)
    }

    // ---- Evaluation ----

    /// Evaluate the polynomial at `x` using Horner's method.
    pub fn eval(&self, x: &QRat) -> QRat {
        let mut result = QRat::zero();
        for c in self.coeffs.iter().rev() {
            result = &(&result * x) + c;
        }
        result
    }
}

// ---- PartialEq / Eq ----

impl PartialEq for QRatPoly {
    fn eq(&self, other: &Self) -> bool {
        if self.coeffs.len() != other.coeffs.len() {
            return false;
        }
        self.coeffs
            .iter()
            .zip(other.coeffs.iter())
            .all(|(a, b)| a == b)
    }
}

impl Eq for QRatPoly {}

// ---- Display ----

impl fmt::Display for QRatPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        // Print from highest degree down
        for i in (0..self.coeffs.len()).rev() {
            let c = &self.coeffs[i];
            if c.is_zero() {
                continue;
            }

            let is_negative = c.0.cmp0() == Ordering::Less;
            let abs_c = QRat(rug::Rational::from(c.0.clone().abs()));
            let is_unit = abs_c == QRat::one();

            if first {
                if is_negative {
                    write!(f, "-")?;
                }
                first = false;
            } else if is_negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }

            match i {
                0 => {
                    // Constant term: always print the coefficient
                    write!(f, "{}", abs_c)?;
                }
                1 => {
                    // x^1: print "x" or "cx"
                    if !is_unit {
                        write!(f, "{}*", abs_c)?;
                    }
                    write!(f, "x")?;
                }
                _ => {
                    // x^k for k >= 2
                    if !is_unit {
                        write!(f, "{}*", abs_c)?;
                    }
                    write!(f, "x^{}", i)?;
                }
            }
        }

        Ok(())
    }
}


// ---- Integration tests verifying Phase 13 success criteria ----
