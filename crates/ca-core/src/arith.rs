//! Element arithmetic, predicates, and coercions (§4.6-4.7).
//!
//! Arithmetic (`add`/`sub`/`mul`/`div`/`neg`/`pow`) is total: every operand
//! pair produces *some* `Element`, falling back to `Unknown`/`Undefined`/an
//! infinity tag rather than ever erroring, per the extended-complex-numbers
//! convention FLINT's `ca_add`/`ca_div` etc. follow. Predicates
//! (`is_zero`/`is_one`/`equals`/...) are three-valued in spirit but surface
//! as a plain `bool` here, since this layer treats "can't decide" the same
//! as "false" once the configured precision/degree ceilings are exhausted --
//! exactly the policy §4.6 specifies for a bounded decision procedure.
//! Coercions (`to_rational`/`to_integer`/`to_algebraic`) are the only
//! fallible operations, returning `Result<_, CoercionError>`.

use crate::context::Context;
use crate::element::{Element, Payload};
use crate::error::CoercionError;
use crate::extension::ExtensionKind;
use crate::field::{Field, QQ};
use crate::merge::merge_fields;
use crate::mpoly::MPolyFrac;
use crate::number::QRat;
use crate::poly::QRatPoly;
use crate::qqbar::QQBar;

fn reduce_number_field(ctx: &Context, field: crate::field::FieldId, p: &QRatPoly) -> QRatPoly {
    if let Field::NumberField(ext_id) = ctx.fields().get(field) {
        if let crate::extension::ExtensionKind::AlgebraicAtom(root) = ctx.extensions().get(*ext_id).kind() {
            let (_, rem) = p.div_rem(root.minpoly());
            return rem;
        }
    }
    p.clone()
}

fn reduce_multi_field(ctx: &Context, field: crate::field::FieldId, f: &MPolyFrac) -> MPolyFrac {
    let ideal = ctx.fields().get(field).ideal();
    if ideal.is_empty() {
        f.clone()
    } else {
        f.reduce_mod(ideal)
    }
}

fn reduce_payload(ctx: &Context, field: crate::field::FieldId, payload: Payload) -> Payload {
    match payload {
        Payload::Rational(q) => Payload::Rational(q),
        Payload::NumberField(p) => Payload::NumberField(reduce_number_field(ctx, field, &p)),
        Payload::MultiField(f) => Payload::MultiField(reduce_multi_field(ctx, field, &f)),
    }
}

/// Combine two regular-element payloads (already sharing a field) via the
/// given per-shape operations.
fn combine(
    ctx: &Context,
    field: crate::field::FieldId,
    pa: &Payload,
    pb: &Payload,
    on_q: impl Fn(&QRat, &QRat) -> QRat,
    on_poly: impl Fn(&QRatPoly, &QRatPoly) -> QRatPoly,
    on_frac: impl Fn(&MPolyFrac, &MPolyFrac) -> MPolyFrac,
) -> Payload {
    let raw = match (pa, pb) {
        (Payload::Rational(a), Payload::Rational(b)) => Payload::Rational(on_q(a, b)),
        (Payload::NumberField(a), Payload::NumberField(b)) => Payload::NumberField(on_poly(a, b)),
        (Payload::MultiField(a), Payload::MultiField(b)) => Payload::MultiField(on_frac(a, b)),
        _ => unreachable!("merge_fields guarantees matching payload shapes"),
    };
    reduce_payload(ctx, field, raw)
}

/// `Undefined` absorbs everything; otherwise special values combine by the
/// extended-complex-plane convention (finite + infinite -> infinite, etc).
/// Returns `Some` if either operand is special and the result is therefore
/// determined without consulting field arithmetic.
fn special_add(x: &Element, y: &Element) -> Option<Element> {
    match (x, y) {
        (Element::Undefined, _) | (_, Element::Undefined) => Some(Element::Undefined),
        (Element::UnsignedInfinity, Element::UnsignedInfinity) => Some(Element::Undefined),
        (Element::UnsignedInfinity, Element::Regular { .. }) | (Element::Regular { .. }, Element::UnsignedInfinity) => {
            Some(Element::UnsignedInfinity)
        }
        (Element::SignedInfinity(d), Element::Regular { .. }) => Some(Element::SignedInfinity(d.clone())),
        (Element::Regular { .. }, Element::SignedInfinity(d)) => Some(Element::SignedInfinity(d.clone())),
        (Element::SignedInfinity(a), Element::SignedInfinity(b)) => {
            if a == b {
                Some(Element::SignedInfinity(a.clone()))
            } else {
                Some(Element::Undefined)
            }
        }
        (Element::Unknown, _) | (_, Element::Unknown) => Some(Element::Unknown),
        (Element::UnsignedInfinity, Element::SignedInfinity(_)) | (Element::SignedInfinity(_), Element::UnsignedInfinity) => {
            Some(Element::Undefined)
        }
        _ => None,
    }
}

pub fn add(ctx: &mut Context, x: &Element, y: &Element) -> Element {
    if let Some(special) = special_add(x, y) {
        return special;
    }
    let (lx, ly) = merge_fields(ctx, x, y);
    let field = lx.field_id().unwrap();
    let payload = combine(
        ctx,
        field,
        lx.payload().unwrap(),
        ly.payload().unwrap(),
        |a, b| a + b,
        |a, b| a + b,
        |a, b| a.add(b),
    );
    Element::Regular { field, payload }
}

pub fn neg(x: &Element) -> Element {
    match x {
        Element::Regular { field, payload } => {
            let p = match payload {
                Payload::Rational(q) => Payload::Rational(-q.clone()),
                Payload::NumberField(p) => Payload::NumberField(-p.clone()),
                Payload::MultiField(f) => Payload::MultiField(f.neg()),
            };
            Element::Regular { field: *field, payload: p }
        }
        Element::SignedInfinity(d) => Element::SignedInfinity(Box::new(neg(d))),
        other => other.clone(),
    }
}

pub fn sub(ctx: &mut Context, x: &Element, y: &Element) -> Element {
    add(ctx, x, &neg(y))
}

/// Purely structural zero check with no `Context`: used only to resolve
/// infinity-times-zero in `special_mul`, where the operand multiplying an
/// infinity is always already a reduced `Regular` payload and the question
/// is exact-shape, not "could this be zero after more work" -- the full
/// oracle-consulting `is_zero` isn't needed (or available, since special
/// values short-circuit before a `Context` would normally be threaded in).
fn structural_is_zero(x: &Element) -> bool {
    matches!(x, Element::Regular { payload, .. } if payload.is_zero())
}

fn special_mul(x: &Element, y: &Element) -> Option<Element> {
    match (x, y) {
        (Element::Undefined, _) | (_, Element::Undefined) => Some(Element::Undefined),
        (Element::Unknown, _) | (_, Element::Unknown) => Some(Element::Unknown),
        (Element::UnsignedInfinity, other) | (other, Element::UnsignedInfinity) => {
            if structural_is_zero(other) {
                Some(Element::Undefined)
            } else {
                Some(Element::UnsignedInfinity)
            }
        }
        (Element::SignedInfinity(_), Element::SignedInfinity(_)) => Some(Element::UnsignedInfinity),
        (Element::SignedInfinity(d), other) | (other, Element::SignedInfinity(d)) => {
            if structural_is_zero(other) {
                Some(Element::Undefined)
            } else {
                Some(Element::SignedInfinity(d.clone()))
            }
        }
        _ => None,
    }
}

pub fn mul(ctx: &mut Context, x: &Element, y: &Element) -> Element {
    if let Some(special) = special_mul(x, y) {
        return special;
    }
    let (lx, ly) = merge_fields(ctx, x, y);
    let field = lx.field_id().unwrap();
    let payload = combine(
        ctx,
        field,
        lx.payload().unwrap(),
        ly.payload().unwrap(),
        |a, b| a * b,
        |a, b| a * b,
        |a, b| a.mul(b),
    );
    Element::Regular { field, payload }
}

/// Invert `p` modulo the field's defining minimal polynomial via extended
/// Euclid (`poly_xgcd`): the minimal polynomial is irreducible and `p` is
/// nonzero with degree below it, so `gcd(minpoly, p)` is a nonzero constant
/// `g`, and the Bezout coefficient of `p` divided by `g` is `p`'s exact
/// inverse mod the minimal polynomial. Returns `None` only if `field` isn't
/// actually a single-generator algebraic-atom field (shouldn't happen for a
/// well-formed `NumberField` payload, but this layer never errors).
fn number_field_inverse(ctx: &Context, field: crate::field::FieldId, p: &QRatPoly) -> Option<QRatPoly> {
    let Field::NumberField(ext_id) = ctx.fields().get(field) else { return None };
    let ExtensionKind::AlgebraicAtom(root) = ctx.extensions().get(*ext_id).kind() else { return None };
    let minpoly = root.minpoly();
    let (g, _s, t) = crate::poly::poly_xgcd(minpoly, p);
    if !g.is_constant() || g.is_zero() {
        return None;
    }
    let scale = &QRat::one() / &g.coeff(0);
    let (_, inv_poly) = t.scalar_mul(&scale).div_rem(minpoly);
    Some(inv_poly)
}

pub fn inv(ctx: &Context, x: &Element) -> Element {
    match x {
        Element::Regular { field, payload } => {
            if payload.is_zero() {
                return Element::UnsignedInfinity;
            }
            match payload {
                Payload::Rational(q) => Element::Regular { field: *field, payload: Payload::Rational(&QRat::one() / q) },
                Payload::NumberField(p) => match number_field_inverse(ctx, *field, p) {
                    Some(inv_poly) => Element::Regular { field: *field, payload: Payload::NumberField(inv_poly) },
                    None => Element::Unknown,
                },
                Payload::MultiField(f) => {
                    // 1/(n/d) = d/n, exact in the rational-function field;
                    // the caller's subsequent `reduce_mod` folds in whatever
                    // the ambient ideal implies beyond that.
                    Element::Regular {
                        field: *field,
                        payload: Payload::MultiField(MPolyFrac::new(f.denom.clone(), f.numer.clone())),
                    }
                }
            }
        }
        Element::UnsignedInfinity => Element::rational(QQ, QRat::zero()),
        Element::SignedInfinity(_) => Element::rational(QQ, QRat::zero()),
        Element::Unknown => Element::Unknown,
        Element::Undefined => Element::Undefined,
    }
}

pub fn div(ctx: &mut Context, x: &Element, y: &Element) -> Element {
    if !matches!(y, Element::Unknown | Element::Undefined) && is_zero(ctx, y) {
        if is_zero(ctx, x) {
            return Element::Undefined;
        }
        return Element::UnsignedInfinity;
    }
    let y_inv = inv(ctx, y);
    mul(ctx, x, &y_inv)
}

/// Exponentiation by repeated squaring (§4.6), bounded by
/// `Options::pow_limit`: an exponent past the limit gives up with `Unknown`
/// rather than unrolling an unbounded multiply chain.
pub fn pow_u32(ctx: &mut Context, x: &Element, exp: u32) -> Element {
    if exp == 0 {
        return Element::rational(QQ, QRat::one());
    }
    if exp > ctx.options().pow_limit {
        return Element::Unknown;
    }
    let mut base = x.clone();
    let mut e = exp;
    let mut acc: Option<Element> = None;
    while e > 0 {
        if e & 1 == 1 {
            acc = Some(match acc {
                Some(prev) => mul(ctx, &prev, &base),
                None => base.clone(),
            });
        }
        e >>= 1;
        if e > 0 {
            base = mul(ctx, &base, &base);
        }
    }
    acc.unwrap_or_else(|| Element::rational(QQ, QRat::one()))
}

/// Exact algebraic-closure proof of zero (§4.6 step 2, ahead of the interval
/// oracle): when every generator backing `x`'s field is itself an algebraic
/// atom, `QQBar`'s own arithmetic (`combine`, via companion matrices and
/// characteristic polynomials) evaluates `x` to a genuine algebraic number,
/// not an approximation, so its equality to zero is decidable outright.
/// Returns `None` when some generator isn't algebraic (a constant or a
/// function call), leaving the question to the interval oracle.
fn exact_algebraic_zero(ctx: &Context, x: &Element) -> Option<bool> {
    let Element::Regular { field, payload } = x else { return None };
    match payload {
        Payload::Rational(_) => None,
        Payload::NumberField(_) => to_algebraic(ctx, x).ok().map(|a| a.same_value(&QQBar::zero())),
        Payload::MultiField(f) => {
            let gens = ctx.fields().get(*field).generators();
            let mut roots = Vec::with_capacity(gens.len());
            for &g in gens {
                match ctx.extensions().get(g).kind() {
                    ExtensionKind::AlgebraicAtom(root) => roots.push(root.clone()),
                    _ => return None,
                }
            }
            Some(f.numer.eval_algebraic(&roots).same_value(&QQBar::zero()))
        }
    }
}

/// Escalating-precision disproof (§4.6 step 3-4): widen the interval
/// oracle's working precision up to `Options::prec_limit`, stopping the
/// moment the enclosure excludes zero. Never loops past the limit, and
/// never itself reports a value *is* zero -- only that it provably isn't.
fn oracle_excludes_zero(ctx: &Context, x: &Element) -> bool {
    let opts = ctx.options();
    let mut prec = opts.low_prec.max(2);
    let limit = opts.prec_limit.max(prec);
    loop {
        if x.enclosure(ctx, prec).excludes_zero() {
            return true;
        }
        if prec >= limit {
            return false;
        }
        prec = prec.saturating_mul(2).min(limit);
    }
}

/// Three-valued zero decision (§4.6): structural reduction, then exact
/// algebraic-closure evaluation, then escalating interval disproof.
/// `None` means every method exhausted its budget without a verdict.
fn decide_zero(ctx: &Context, x: &Element) -> Option<bool> {
    match x {
        Element::Regular { payload, .. } => {
            if payload.is_zero() {
                return Some(true);
            }
            if let Some(decided) = exact_algebraic_zero(ctx, x) {
                return Some(decided);
            }
            if oracle_excludes_zero(ctx, x) {
                return Some(false);
            }
            None
        }
        _ => Some(false),
    }
}

/// `is_zero` surfaces `decide_zero` as a plain `bool`, treating `UNKNOWN`
/// the same as `false` once every decision method has run out of budget --
/// the policy §4.6 specifies for callers that need a definite answer.
pub fn is_zero(ctx: &Context, x: &Element) -> bool {
    decide_zero(ctx, x).unwrap_or(false)
}

pub fn is_one(x: &Element) -> bool {
    match x {
        Element::Regular { payload: Payload::Rational(q), .. } => *q == QRat::one(),
        Element::Regular { payload: Payload::NumberField(p), .. } => p.is_one(),
        Element::Regular { payload: Payload::MultiField(f), .. } => f.is_polynomial() && f.numer.is_one(),
        _ => false,
    }
}

pub fn equals(ctx: &mut Context, x: &Element, y: &Element) -> bool {
    let diff = sub(ctx, x, y);
    is_zero(ctx, &diff)
}

pub fn is_algebraic(x: &Element) -> bool {
    !matches!(x, Element::Unknown | Element::Undefined | Element::UnsignedInfinity | Element::SignedInfinity(_))
}

pub fn to_rational(x: &Element) -> Result<QRat, CoercionError> {
    match x {
        Element::Regular { payload: Payload::Rational(q), .. } => Ok(q.clone()),
        Element::Regular { payload: Payload::NumberField(p), .. } => {
            if p.is_zero() {
                Ok(QRat::zero())
            } else if p.degree() == Some(0) {
                Ok(p.coeff(0))
            } else {
                Err(CoercionError::NotRational)
            }
        }
        Element::Regular { payload: Payload::MultiField(f), .. } => {
            if f.is_polynomial() && f.numer.is_constant() {
                f.numer.as_constant().ok_or(CoercionError::NotRational)
            } else {
                Err(CoercionError::NotRational)
            }
        }
        Element::Unknown => Err(CoercionError::SpecialValue("Unknown")),
        Element::Undefined => Err(CoercionError::SpecialValue("Undefined")),
        Element::UnsignedInfinity => Err(CoercionError::SpecialValue("UnsignedInfinity")),
        Element::SignedInfinity(_) => Err(CoercionError::SpecialValue("SignedInfinity")),
    }
}

pub fn to_integer(x: &Element) -> Result<rug::Integer, CoercionError> {
    let q = to_rational(x)?;
    if *q.denom() == rug::Integer::from(1) {
        Ok(q.numer().clone())
    } else {
        Err(CoercionError::NotInteger)
    }
}

/// Coerce to a closed algebraic number. Only the `Rational` and
/// single-generator `NumberField` shapes (where the generator is itself an
/// algebraic atom) have a direct representation; `MultiField` elements
/// coerce only when they reduce to a rational constant, matching the scope
/// `QQBar`'s arithmetic layer covers (§4.9).
pub fn to_algebraic(ctx: &Context, x: &Element) -> Result<QQBar, CoercionError> {
    match x {
        Element::Regular { field, payload: Payload::Rational(q) } => {
            let _ = field;
            Ok(QQBar::from_rational(q))
        }
        Element::Regular { field, payload: Payload::NumberField(p) } => {
            if let Field::NumberField(ext_id) = ctx.fields().get(*field) {
                if let crate::extension::ExtensionKind::AlgebraicAtom(root) = ctx.extensions().get(*ext_id).kind() {
                    if p.degree().map(|d| d == 0).unwrap_or(true) {
                        return Ok(QQBar::from_rational(&p.coeffs().first().cloned().unwrap_or_else(QRat::zero)));
                    }
                    if root.degree() as u32 > ctx.options().qqbar_deg_limit {
                        return Err(CoercionError::DegreeLimitExceeded { limit: ctx.options().qqbar_deg_limit });
                    }
                    return Ok(p.coeffs().iter().enumerate().fold(QQBar::zero(), |acc, (i, c)| {
                        let mut term = QQBar::from_rational(c);
                        for _ in 0..i {
                            term = term.mul(root);
                        }
                        acc.add(&term)
                    }));
                }
            }
            Err(CoercionError::NotAlgebraic)
        }
        Element::Regular { payload: Payload::MultiField(f), .. } => {
            if f.is_polynomial() && f.numer.is_constant() {
                Ok(QQBar::from_rational(&f.numer.as_constant().unwrap()))
            } else {
                Err(CoercionError::NotAlgebraic)
            }
        }
        _ => Err(CoercionError::NotAlgebraic),
    }
}
