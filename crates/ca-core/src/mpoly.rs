//! Sparse multivariate polynomials over `QRat`, the ambient ring each
//! [`crate::field::Field`] reduces its `MultiField` payloads in.
//!
//! Generalizes `crate::poly::QRatPoly` (dense, univariate) to many
//! generators, using the same canonical-representation discipline: terms are
//! kept sorted in descending lexicographic order on the exponent vector and
//! zero coefficients are always stripped, so that `==` on two `MPoly`s is a
//! meaningful structural comparison once both have been reduced.
//!
//! There is no Groebner-basis completion here: `reduce_mod` divides by the
//! stored ideal generators as-is, exactly as the ideal builder (§4.5) leaves
//! them, which matches the "no separate Gröbner completion is performed at
//! build time" rule.

use crate::interval::ComplexBall;
use crate::number::QRat;
use crate::poly::QRatPoly;
use crate::qqbar::QQBar;
use smallvec::SmallVec;

pub type Exponent = SmallVec<[u32; 4]>;

#[derive(Clone, Debug)]
pub struct MPoly {
    nvars: usize,
    /// Sorted descending by exponent vector (lex, most-significant variable
    /// first); no two terms share an exponent vector; no zero coefficients.
    terms: Vec<(Exponent, QRat)>,
}

fn exp_cmp(a: &Exponent, b: &Exponent) -> std::cmp::Ordering {
    a.cmp(b)
}

fn exp_add(a: &Exponent, b: &Exponent) -> Exponent {
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

fn exp_divides(a: &Exponent, b: &Exponent) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x <= y)
}

fn exp_sub(a: &Exponent, b: &Exponent) -> Exponent {
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

impl MPoly {
    fn normalize(mut terms: Vec<(Exponent, QRat)>) -> Vec<(Exponent, QRat)> {
        terms.sort_by(|a, b| exp_cmp(&b.0, &a.0));
        let mut out: Vec<(Exponent, QRat)> = Vec::with_capacity(terms.len());
        for (e, c) in terms {
            if let Some(last) = out.last_mut() {
                if last.0 == e {
                    last.1 = &last.1 + &c;
                    continue;
                }
            }
            out.push((e, c));
        }
        out.retain(|(_, c)| !c.is_zero());
        out
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    pub fn zero(nvars: usize) -> Self {
        MPoly { nvars, terms: Vec::new() }
    }

    pub fn one(nvars: usize) -> Self {
        Self::constant(nvars, QRat::one())
    }

    pub fn constant(nvars: usize, c: QRat) -> Self {
        if c.is_zero() {
            return Self::zero(nvars);
        }
        MPoly { nvars, terms: vec![(Exponent::from_elem(0, nvars), c)] }
    }

    pub fn gen(nvars: usize, i: usize) -> Self {
        assert!(i < nvars, "generator index out of range");
        let mut e = Exponent::from_elem(0, nvars);
        e[i] = 1;
        MPoly { nvars, terms: vec![(e, QRat::one())] }
    }

    pub fn monomial(nvars: usize, exp: Exponent, c: QRat) -> Self {
        if c.is_zero() {
            return Self::zero(nvars);
        }
        MPoly { nvars, terms: vec![(exp, c)] }
    }

    /// Promote a univariate `QRatPoly` in one designated generator to the
    /// ambient `n`-variable ring, all other exponents zero.
    pub fn from_univariate_gen(nvars: usize, var: usize, poly: &QRatPoly) -> Self {
        assert!(var < nvars);
        let mut terms = Vec::new();
        for (deg, c) in poly.coeffs().iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let mut e = Exponent::from_elem(0, nvars);
            e[var] = deg as u32;
            terms.push((e, c.clone()));
        }
        MPoly { nvars, terms: Self::normalize(terms) }
    }

    /// Collapse a single-variable `MPoly` down to a dense `QRatPoly`. Panics
    /// if this polynomial has more than one generator.
    pub fn to_univariate(&self) -> QRatPoly {
        assert!(self.nvars <= 1, "to_univariate called on a multivariate MPoly");
        let degree = self.terms.iter().map(|(e, _)| e.first().copied().unwrap_or(0)).max().unwrap_or(0);
        let mut coeffs = vec![QRat::zero(); degree as usize + 1];
        for (e, c) in &self.terms {
            let d = e.first().copied().unwrap_or(0) as usize;
            coeffs[d] = c.clone();
        }
        QRatPoly::from_vec(coeffs)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1
            && self.terms[0].1 == QRat::one()
            && self.terms[0].0.iter().all(|&e| e == 0)
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty() || (self.terms.len() == 1 && self.terms[0].0.iter().all(|&e| e == 0))
    }

    pub fn as_constant(&self) -> Option<QRat> {
        if self.terms.is_empty() {
            return Some(QRat::zero());
        }
        if self.is_constant() {
            return Some(self.terms[0].1.clone());
        }
        None
    }

    pub fn leading_term(&self) -> Option<&(Exponent, QRat)> {
        self.terms.first()
    }

    pub fn terms(&self) -> &[(Exponent, QRat)] {
        &self.terms
    }

    pub fn neg(&self) -> Self {
        MPoly { nvars: self.nvars, terms: self.terms.iter().map(|(e, c)| (e.clone(), -c.clone())).collect() }
    }

    pub fn scalar_mul(&self, c: &QRat) -> Self {
        if c.is_zero() {
            return Self::zero(self.nvars);
        }
        MPoly { nvars: self.nvars, terms: self.terms.iter().map(|(e, t)| (e.clone(), t * c)).collect() }
    }

    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.nvars, other.nvars);
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        MPoly { nvars: self.nvars, terms: Self::normalize(terms) }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.nvars, other.nvars);
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for (ea, ca) in &self.terms {
            for (eb, cb) in &other.terms {
                terms.push((exp_add(ea, eb), ca * cb));
            }
        }
        MPoly { nvars: self.nvars, terms: Self::normalize(terms) }
    }

    pub fn pow_u32(&self, exp: u32) -> Self {
        let mut result = Self::one(self.nvars);
        for _ in 0..exp {
            result = result.mul(self);
        }
        result
    }

    pub fn mul_gen(&self, i: usize) -> Self {
        self.mul(&Self::gen(self.nvars, i))
    }

    /// Substitute generator `i` with `subst[i]` for every `i`, returning the
    /// result in the substitutions' shared variable count (`dst_nvars`).
    pub fn compose_gen(&self, substs: &[MPoly], dst_nvars: usize) -> Self {
        assert_eq!(substs.len(), self.nvars);
        let mut result = MPoly::zero(dst_nvars);
        for (exp, coeff) in &self.terms {
            let mut term = MPoly::constant(dst_nvars, coeff.clone());
            for (var, &e) in exp.iter().enumerate() {
                if e > 0 {
                    term = term.mul(&substs[var].pow_u32(e));
                }
            }
            result = result.add(&term);
        }
        result
    }

    pub fn eval_interval(&self, vals: &[ComplexBall]) -> ComplexBall {
        assert_eq!(vals.len(), self.nvars);
        let prec = vals.first().map_or(128, |v| v.re.lo.prec());
        let mut acc = ComplexBall::zero(prec);
        for (exp, coeff) in &self.terms {
            let mut term = ComplexBall::from_real(crate::interval::RealBall::exact(prec, &coeff.0));
            for (var, &e) in exp.iter().enumerate() {
                if e > 0 {
                    term = term.mul(&vals[var].pow_u32(e));
                }
            }
            acc = acc.add(&term);
        }
        acc
    }

    pub fn eval_algebraic(&self, vals: &[QQBar]) -> QQBar {
        assert_eq!(vals.len(), self.nvars);
        let mut acc = QQBar::zero();
        for (exp, coeff) in &self.terms {
            let mut term = QQBar::from_rational(coeff);
            for (var, &e) in exp.iter().enumerate() {
                for _ in 0..e {
                    term = term.mul(&vals[var]);
                }
            }
            acc = acc.add(&term);
        }
        acc
    }

    /// Reduce modulo a list of ideal generators by repeated leading-term
    /// division; no Groebner completion, as the generators stand.
    pub fn reduce_mod(&self, ideal: &[MPoly]) -> Self {
        let mut p = self.clone();
        loop {
            if p.is_zero() {
                return p;
            }
            let (lt_exp, lt_coeff) = p.leading_term().unwrap().clone();
            let mut reduced = false;
            for g in ideal {
                if g.is_zero() {
                    continue;
                }
                let (g_exp, g_coeff) = g.leading_term().unwrap();
                if exp_divides(g_exp, &lt_exp) {
                    let diff = exp_sub(&lt_exp, g_exp);
                    let factor_coeff = &lt_coeff / g_coeff;
                    let factor = MPoly::monomial(p.nvars, diff, factor_coeff);
                    p = p.sub(&factor.mul(g));
                    reduced = true;
                    break;
                }
            }
            if !reduced {
                return p;
            }
        }
    }
}

impl PartialEq for MPoly {
    fn eq(&self, other: &Self) -> bool {
        self.nvars == other.nvars && self.terms == other.terms
    }
}

impl Eq for MPoly {}

/// A rational function `numer/denom` over the ambient `MPoly` ring.
///
/// Unlike `QRatRationalFunc`, this does not keep `numer`/`denom` coprime --
/// general multivariate gcd is out of scope here (see `DESIGN.md`) -- it
/// only normalizes the denominator to have leading coefficient 1, which is
/// enough for the zero/one fast paths `Element` needs. Genuine cancellation
/// happens downstream, during ideal reduction.
#[derive(Clone, Debug)]
pub struct MPolyFrac {
    pub numer: MPoly,
    pub denom: MPoly,
}

impl MPolyFrac {
    pub fn new(numer: MPoly, denom: MPoly) -> Self {
        assert!(!denom.is_zero(), "MPolyFrac denominator cannot be zero");
        if numer.is_zero() {
            return Self { numer: MPoly::zero(denom.nvars), denom: MPoly::one(denom.nvars) };
        }
        let lc = denom.leading_term().unwrap().1.clone();
        if lc == QRat::one() {
            Self { numer, denom }
        } else {
            Self { numer: numer.scalar_mul(&(&QRat::one() / &lc)), denom: denom.scalar_mul(&(&QRat::one() / &lc)) }
        }
    }

    pub fn from_poly(p: MPoly) -> Self {
        let nvars = p.nvars;
        Self { numer: p, denom: MPoly::one(nvars) }
    }

    pub fn from_qrat(nvars: usize, c: QRat) -> Self {
        Self::from_poly(MPoly::constant(nvars, c))
    }

    pub fn zero(nvars: usize) -> Self {
        Self { numer: MPoly::zero(nvars), denom: MPoly::one(nvars) }
    }

    pub fn one(nvars: usize) -> Self {
        Self { numer: MPoly::one(nvars), denom: MPoly::one(nvars) }
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_polynomial(&self) -> bool {
        self.denom.is_one()
    }

    pub fn add(&self, other: &Self) -> Self {
        let numer = self.numer.mul(&other.denom).add(&self.denom.mul(&other.numer));
        let denom = self.denom.mul(&other.denom);
        Self::new(numer, denom)
    }

    pub fn sub(&self, other: &Self) -> Self {
        let numer = self.numer.mul(&other.denom).sub(&self.denom.mul(&other.numer));
        let denom = self.denom.mul(&other.denom);
        Self::new(numer, denom)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::new(self.numer.mul(&other.numer), self.denom.mul(&other.denom))
    }

    pub fn div(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "MPolyFrac division by zero");
        Self::new(self.numer.mul(&other.denom), self.denom.mul(&other.numer))
    }

    pub fn neg(&self) -> Self {
        Self { numer: self.numer.neg(), denom: self.denom.clone() }
    }

    pub fn compose_gen(&self, substs: &[MPoly], dst_nvars: usize) -> Self {
        Self::new(
            self.numer.compose_gen(substs, dst_nvars),
            self.denom.compose_gen(substs, dst_nvars),
        )
    }

    pub fn reduce_mod(&self, ideal: &[MPoly]) -> Self {
        Self::new(self.numer.reduce_mod(ideal), self.denom.reduce_mod(ideal))
    }

    pub fn eval_interval(&self, vals: &[ComplexBall]) -> Option<ComplexBall> {
        let d = self.denom.eval_interval(vals);
        if d.excludes_zero() {
            Some(self.numer.eval_interval(vals).div(&d)?)
        } else {
            None
        }
    }
}
