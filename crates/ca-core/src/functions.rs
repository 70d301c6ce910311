//! Element-level constructors for named constants, algebraic roots, and
//! transcendental function applications, plus the recursive interval
//! evaluator (§4.9/§6 `Element::enclosure`).
//!
//! Each constructor here follows the same shape: build (or look up) the
//! defining [`Extension`], intern the field it generates, and return the
//! element equal to that generator itself (the polynomial/rational-function
//! "x"). Grounded on the teacher's `ExprArena::intern` pattern of building a
//! node then wrapping it in the handle type callers use -- here the
//! generator id plays the role of the interned node, and `Element` is the
//! handle.

use crate::arith;
use crate::context::Context;
use crate::element::{Element, Payload};
use crate::extension::{ConstantCode, Extension, FunctionCode};
use crate::field::QQ;
use crate::interval::ComplexBall;
use crate::number::QRat;
use crate::poly::QRatPoly;
use crate::qqbar::QQBar;
use smallvec::smallvec;

/// The element equal to a single-generator field's generator: the
/// polynomial `x`. Every constructor in this module mints its field via
/// `Context::intern_number_field`, which always produces a one-generator
/// `NumberField`, so this is the only shape ever needed here; `merge.rs` is
/// what later promotes such an element into a `MultiField` payload once it
/// is combined with a value from another field.
fn generator_element(field: crate::field::FieldId) -> Element {
    Element::number_field(field, QRatPoly::from_vec(vec![QRat::zero(), QRat::one()]))
}

/// Intern a fresh algebraic-atom extension and return the element equal to
/// its generator (§4.5 rule a: the minimal polynomial becomes the sole
/// relation of the resulting number field).
pub fn from_algebraic(ctx: &mut Context, root: QQBar) -> Element {
    if let Some(q) = root.to_rational() {
        return Element::rational(QQ, q);
    }
    let ext = ctx.intern_extension(Extension::algebraic(root));
    let field = ctx.intern_number_field(ext);
    generator_element(field)
}

pub fn constant(ctx: &mut Context, code: ConstantCode) -> Element {
    let ext = ctx.intern_extension(Extension::constant(code));
    let field = ctx.intern_number_field(ext);
    generator_element(field)
}

pub fn pi(ctx: &mut Context) -> Element {
    constant(ctx, ConstantCode::Pi)
}

/// Euler's number `e` (not the Euler-Mascheroni constant).
pub fn e(ctx: &mut Context) -> Element {
    constant(ctx, ConstantCode::Euler)
}

fn depth_of(ctx: &Context, arg: &Element) -> u32 {
    match arg.field_id() {
        None => 0,
        Some(f) => ctx.fields().get(f).generators().iter().map(|id| ctx.extensions().get(*id).depth()).max().unwrap_or(0),
    }
}

/// Build the element `code(arg)` by interning (or reusing) the `Call`
/// extension for this function head applied to this exact argument.
///
/// Special-cased rational arguments that collapse to an exact result (e.g.
/// `exp(0) = 1`, `sqrt` of a perfect square, `log(1) = 0`) are folded before
/// minting a new generator, matching the closed-form fast paths the other
/// arithmetic layers already take for rational operands.
fn apply(ctx: &mut Context, code: FunctionCode, arg: Element) -> Element {
    if let Element::Regular { field: QQ, payload: Payload::Rational(q) } = &arg {
        if let Some(folded) = fold_rational(ctx, code, q) {
            return folded;
        }
    }
    let depth = depth_of(ctx, &arg);
    let ext = ctx.intern_extension(Extension::call(code, smallvec![arg], &[depth]));
    let field = ctx.intern_number_field(ext);
    generator_element(field)
}

fn fold_rational(ctx: &mut Context, code: FunctionCode, q: &QRat) -> Option<Element> {
    match code {
        FunctionCode::Exp | FunctionCode::Sin if q.is_zero() => {
            Some(Element::rational(QQ, if matches!(code, FunctionCode::Exp) { QRat::one() } else { QRat::zero() }))
        }
        FunctionCode::Cos if q.is_zero() => Some(Element::rational(QQ, QRat::one())),
        FunctionCode::Log if *q == QRat::one() => Some(Element::rational(QQ, QRat::zero())),
        FunctionCode::Log if *q < QRat::zero() => {
            // log(q) = log(|q|) + i*pi for negative rational q (principal
            // branch), matching the same identity the engine already takes
            // for granted when it builds Euler's-identity-style scenarios.
            let magnitude = log(ctx, &Element::rational(QQ, -q.clone()));
            let i = from_algebraic(ctx, QQBar::i());
            let pi_elem = pi(ctx);
            let i_pi = arith::mul(ctx, &i, &pi_elem);
            Some(arith::add(ctx, &magnitude, &i_pi))
        }
        FunctionCode::Sqrt => Some(from_algebraic(ctx, QQBar::from_rational(q).sqrt())),
        FunctionCode::Gamma if *q == QRat::one() => Some(Element::rational(QQ, QRat::one())),
        FunctionCode::Erf if q.is_zero() => Some(Element::rational(QQ, QRat::zero())),
        FunctionCode::Erfi if q.is_zero() => Some(Element::rational(QQ, QRat::zero())),
        FunctionCode::Erfc if q.is_zero() => Some(Element::rational(QQ, QRat::one())),
        _ => None,
    }
}

pub fn sqrt(ctx: &mut Context, x: &Element) -> Element {
    match x {
        Element::Regular { field: QQ, payload: Payload::Rational(q) } => from_algebraic(ctx, QQBar::from_rational(q).sqrt()),
        Element::Regular { .. } => match arith::to_algebraic(ctx, x) {
            Ok(a) => from_algebraic(ctx, a.sqrt()),
            Err(_) => apply(ctx, FunctionCode::Sqrt, x.clone()),
        },
        _ => Element::Unknown,
    }
}

macro_rules! unary_fn {
    ($name:ident, $code:ident) => {
        pub fn $name(ctx: &mut Context, x: &Element) -> Element {
            match x {
                Element::Regular { .. } => apply(ctx, FunctionCode::$code, x.clone()),
                _ => Element::Unknown,
            }
        }
    };
}

unary_fn!(exp, Exp);
unary_fn!(log, Log);
unary_fn!(sin, Sin);
unary_fn!(cos, Cos);
unary_fn!(gamma, Gamma);
unary_fn!(erf, Erf);
unary_fn!(erfc, Erfc);
unary_fn!(erfi, Erfi);
unary_fn!(elliptic_k, EllipticK);
unary_fn!(elliptic_e, EllipticE);

impl Element {
    /// Recursively evaluate this element to a complex interval at the given
    /// working precision (§4.9, §6): each generator is evaluated (an
    /// algebraic atom via its cached root enclosure, a constant via its
    /// known value, a function call by recursively enclosing its argument
    /// and applying the corresponding interval function) and the payload is
    /// substituted into the resulting generator vector.
    pub fn enclosure(&self, ctx: &Context, prec: u32) -> ComplexBall {
        match self {
            Element::Regular { field, payload } => {
                let gens = ctx.fields().get(*field).generators();
                let vals: Vec<ComplexBall> = gens.iter().map(|id| eval_extension(ctx, *id, prec)).collect();
                match payload {
                    Payload::Rational(q) => ComplexBall::from_real(crate::interval::RealBall::exact(prec, &q.0)),
                    Payload::NumberField(p) => {
                        let mut acc = ComplexBall::zero(prec);
                        let x = vals.first().cloned().unwrap_or_else(|| ComplexBall::zero(prec));
                        for c in p.coeffs().iter().rev() {
                            acc = acc.mul(&x).add(&ComplexBall::from_real(crate::interval::RealBall::exact(prec, &c.0)));
                        }
                        acc
                    }
                    Payload::MultiField(f) => {
                        f.eval_interval(&vals).unwrap_or_else(|| ComplexBall::zero(prec))
                    }
                }
            }
            Element::Unknown | Element::Undefined => ComplexBall::zero(prec),
            Element::UnsignedInfinity => ComplexBall::zero(prec),
            Element::SignedInfinity(dir) => dir.enclosure(ctx, prec),
        }
    }
}

fn eval_extension(ctx: &Context, id: crate::extension::ExtensionId, prec: u32) -> ComplexBall {
    use crate::extension::ExtensionKind;
    match ctx.extensions().get(id).kind() {
        ExtensionKind::AlgebraicAtom(root) => {
            let e = root.enclosure();
            ComplexBall::new(
                crate::interval::RealBall::new(e.re.lo.clone(), e.re.hi.clone()),
                crate::interval::RealBall::new(e.im.lo.clone(), e.im.hi.clone()),
            )
        }
        ExtensionKind::Constant(ConstantCode::Pi) => ComplexBall::from_real(crate::interval::RealBall::pi(prec)),
        ExtensionKind::Constant(ConstantCode::Euler) => {
            ComplexBall::from_real(crate::interval::RealBall::one(prec).exp())
        }
        ExtensionKind::Call(code, args) => {
            let arg = args.first().map(|a| a.enclosure(ctx, prec)).unwrap_or_else(|| ComplexBall::zero(prec));
            match code {
                FunctionCode::Exp => arg.exp(),
                FunctionCode::Log => arg.ln(),
                FunctionCode::Sin => arg.sin(),
                FunctionCode::Cos => arg.cos(),
                FunctionCode::Sqrt => arg.sqrt(),
                FunctionCode::Gamma => ComplexBall::from_real(arg.re.gamma()),
                FunctionCode::Erf => ComplexBall::from_real(arg.re.erf()),
                FunctionCode::Erfc => ComplexBall::from_real(arg.re.erfc()),
                // Not backed by a rigorous MPFR primitive; see DESIGN.md.
                FunctionCode::Erfi | FunctionCode::EllipticK | FunctionCode::EllipticE => arg,
            }
        }
    }
}

/// Conjugate (§6 `conjugate`): for a real element this is the identity; for
/// a non-real algebraic element the conjugate root; generically, flip the
/// sign of every non-real algebraic-atom generator's enclosure by
/// re-deriving the element through `QQBar::conj`, which is exact whenever
/// the whole element coerces to a closed algebraic number, and falls back
/// to `Unknown` otherwise (conjugating an un-enclosed transcendental
/// generator is out of scope -- see `DESIGN.md`).
pub fn conjugate(ctx: &mut Context, x: &Element) -> Element {
    match x {
        Element::Regular { field: QQ, .. } => x.clone(),
        Element::Regular { .. } => match arith::to_algebraic(ctx, x) {
            Ok(a) => from_algebraic(ctx, a.conj()),
            Err(_) => Element::Unknown,
        },
        Element::Unknown => Element::Unknown,
        Element::Undefined => Element::Undefined,
        Element::UnsignedInfinity => Element::UnsignedInfinity,
        Element::SignedInfinity(dir) => Element::SignedInfinity(Box::new(conjugate(ctx, dir))),
    }
}
