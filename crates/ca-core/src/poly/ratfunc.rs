//! Rational function p(x)/q(x) over QRat with auto-simplification.
//!
//! `QRatRationalFunc` maintains invariants: gcd(numer, denom) = 1,
//! denom is monic, and denom is nonzero. These invariants enable
//! direct equality comparison of normalized forms.

use super::gcd::poly_gcd;
use super::QRatPoly;
use crate::number::QRat;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Rational function p(x)/q(x) in lowest terms with monic denominator.
///
/// Invariants:
///   1. gcd(numer, denom) = 1
///   2. denom is monic (leading coefficient = 1)
///   3. denom is nonzero
#[derive(Clone, Debug)]
pub struct QRatRationalFunc {
    pub numer: QRatPoly,
    pub denom: QRatPoly,
}

impl QRatRationalFunc {
    /// Construct a rational function, enforcing all invariants:
    /// 1. Panics if denom is zero.
    /// 2. If numer is zero, returns 0/1.
    /// 3. Divides out GCD to reduce to lowest terms.
    /// 4. Makes denominator monic.
    pub fn new(numer: QRatPoly, denom: QRatPoly) -> Self {
        assert!(
            !denom.is_zero(),
            "Rational function denominator cannot be zero"
        );

        if numer.is_zero() {
            return Self {
                numer: QRatPoly::zero(),
                denom: QRatPoly::one(),
            };
        }

        // Compute GCD and reduce
        let g = poly_gcd(&numer, &denom);
        let n = numer.exact_div(&g);
        let d = denom.exact_div(&g);

        // Make denominator monic
        let lc = d.leading_coeff().unwrap();
        if lc == QRat::one() {
            Self { numer: n, denom: d }
        } else {
            Self {
                numer: n.scalar_div(&lc),
                denom: d.scalar_div(&lc),
            }
        }
    }

    /// Create a rational function from a polynomial: p/1.
    pub fn from_poly(p: QRatPoly) -> Self {
        Self {
            numer: p,
            denom: QRatPoly::one(),
        }
    }

    /// Create a constant rational function: c/1.
    pub fn from_qrat(c: QRat) -> Self {
        Self {
            numer: QRatPoly::constant(c),
            denom: QRatPoly::one(),
        }
    }

    /// The zero rational function: 0/1.
    pub fn zero() -> Self {
        Self {
            numer: QRatPoly::zero(),
            denom: QRatPoly::one(),
        }
    }

    /// The identity rational function: 1/1.
    pub fn one() -> Self {
        Self {
            numer: QRatPoly::one(),
            denom: QRatPoly::one(),
        }
    }

    // ---- Arithmetic ----

    /// Add two rational functions: a/b + c/d = (a*d + b*c) / (b*d).
    pub fn rf_add(&self, other: &Self) -> Self {
        let numer = &(&self.numer * &other.denom) + &(&self.denom * &other.numer);
        let denom = &self.denom * &other.denom;
        Self::new(numer, denom)
    }

    /// Subtract two rational functions: a/b - c/d = (a*d - b*c) / (b*d).
    pub fn rf_sub(&self, other: &Self) -> Self {
        let numer = &(&self.numer * &other.denom) - &(&self.denom * &other.numer);
        let denom = &self.denom * &other.denom;
        Self::new(numer, denom)
    }

    /// Multiply two rational functions with cross-cancellation optimization.
    ///
    /// Instead of multiplying then reducing, cross-cancel first:
    /// (a/b) * (c/d) with g1 = gcd(a,d), g2 = gcd(c,b)
    /// = (a/g1 * c/g2) / (b/g2 * d/g1)
    pub fn rf_mul(&self, other: &Self) -> Self {
        let g1 = poly_gcd(&self.numer, &other.denom);
        let g2 = poly_gcd(&other.numer, &self.denom);
        let n1 = self.numer.exact_div(&g1);
        let d2 = other.denom.exact_div(&g1);
        let n2 = other.numer.exact_div(&g2);
        let d1 = self.denom.exact_div(&g2);
        Self::new(&n1 * &n2, &d1 * &d2)
    }

    /// Divide two rational functions: (a/b) / (c/d) = (a*d) / (b*c).
    ///
    /// Panics if other is zero.
    pub fn rf_div(&self, other: &Self) -> Self {
        assert!(
            !other.is_zero(),
            "Rational function division by zero"
        );
        Self::new(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        )
    }

    /// Negate a rational function: -(a/b) = (-a)/b.
    ///
    /// No need for `new()` since negation preserves coprimality and monicity.
    pub fn rf_neg(&self) -> Self {
        Self {
            numer: -self.numer.clone(),
            denom: self.denom.clone(),
        }
    }

    // ---- Queries ----

    /// True if this rational function is zero (numer is zero).
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// True if this is a polynomial (denominator is 1).
    pub fn is_polynomial(&self) -> bool {
        self.denom.is_one()
    }

    /// Evaluate the rational function at x.
    ///
    /// Returns `None` if denom(x) = 0 (pole).
    pub fn eval(&self, x: &QRat) -> Option<QRat> {
        let d_val = self.denom.eval(x);
        if d_val.is_zero() {
            return None;
        }
        let n_val = self.numer.eval(x);
        Some(&n_val / &d_val)
    }

}

// ---- PartialEq / Eq ----
// Valid because both sides are in canonical form (lowest terms, monic denom).

impl PartialEq for QRatRationalFunc {
    fn eq(&self, other: &Self) -> bool {
        self.numer == other.numer && self.denom == other.denom
    }
}

impl Eq for QRatRationalFunc {}

// ---- Display ----

impl fmt::Display for QRatRationalFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "({}) / ({})", self.numer, self.denom)
        }
    }
}

// ---- std::ops trait implementations ----

// Add: &ref + &ref
impl Add<&QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn add(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_add(rhs)
    }
}

impl Add for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn add(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_add(&rhs)
    }
}

impl Add<&QRatRationalFunc> for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn add(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_add(rhs)
    }
}

impl Add<QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn add(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_add(&rhs)
    }
}

// Sub: &ref - &ref
impl Sub<&QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn sub(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_sub(rhs)
    }
}

impl Sub for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn sub(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_sub(&rhs)
    }
}

impl Sub<&QRatRationalFunc> for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn sub(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_sub(rhs)
    }
}

impl Sub<QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn sub(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_sub(&rhs)
    }
}

// Mul: &ref * &ref
impl Mul<&QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn mul(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_mul(rhs)
    }
}

impl Mul for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn mul(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_mul(&rhs)
    }
}

impl Mul<&QRatRationalFunc> for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn mul(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_mul(rhs)
    }
}

impl Mul<QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn mul(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_mul(&rhs)
    }
}

// Div: &ref / &ref
impl Div<&QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn div(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_div(rhs)
    }
}

impl Div for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn div(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_div(&rhs)
    }
}

impl Div<&QRatRationalFunc> for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn div(self, rhs: &QRatRationalFunc) -> QRatRationalFunc {
        self.rf_div(rhs)
    }
}

impl Div<QRatRationalFunc> for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn div(self, rhs: QRatRationalFunc) -> QRatRationalFunc {
        self.rf_div(&rhs)
    }
}

// Neg
impl Neg for &QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn neg(self) -> QRatRationalFunc {
        self.rf_neg()
    }
}

impl Neg for QRatRationalFunc {
    type Output = QRatRationalFunc;
    fn neg(self) -> QRatRationalFunc {
        (&self).rf_neg()
    }
}
