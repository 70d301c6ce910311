//! Ideal construction for multi-generator fields (§4.5).
//!
//! Given an ordered tuple of generators (extensions), produce the list of
//! polynomial relations among them that the field's elements get reduced
//! modulo. This runs exactly once, when [`crate::field::FieldCache`] interns
//! a fresh generator tuple.
//!
//! No Gröbner basis completion is performed: the rules below emit the
//! relations directly implied by each generator's definition and any
//! algebraic coincidence among generators, and reduction (`MPoly::reduce_mod`)
//! divides by these generators as-is. This matches the scope the spec calls
//! out explicitly for this component.

use crate::element::{Element, Payload};
use crate::extension::{ConstantCode, ExtensionCache, ExtensionId, ExtensionKind, FunctionCode};
use crate::field::FieldCache;
use crate::mpoly::MPoly;
use crate::number::QRat;

/// Build the ideal for the field generated by `exts` (in order). `exts[i]`
/// corresponds to ambient-ring variable `i`. `field_cache` resolves the
/// generator list of whatever field a call-extension's own argument lives
/// in, so that argument can be re-expressed over the ambient variables (see
/// `lift_into_ambient`); `gamma_shift_limit` bounds how large an integer
/// shift rule (c) is willing to unroll (`Options::gamma_shift_limit`).
pub fn build_ideal(exts: &[ExtensionId], ext_cache: &ExtensionCache, field_cache: &FieldCache, gamma_shift_limit: i64) -> Vec<MPoly> {
    let n = exts.len();
    let mut gens = Vec::new();

    // Rule (a): each algebraic atom contributes its minimal polynomial,
    // evaluated at its own variable.
    for (i, &id) in exts.iter().enumerate() {
        if let ExtensionKind::AlgebraicAtom(root) = ext_cache.get(id).kind() {
            gens.push(MPoly::from_univariate_gen(n, i, root.minpoly()));
        }
    }

    // Rule (b): y = Sqrt(x) contributes y^2 - x, whenever x can be
    // re-expressed over the ambient variables.
    gens.extend(sqrt_relations(exts, ext_cache, field_cache, n));

    // Rule (c): Gamma(z + k) = (z)_k * Gamma(z) for an integer shift k
    // bounded by `gamma_shift_limit`, whenever both z's share an argument
    // expressible over the ambient variables.
    gens.extend(gamma_shift_relations(exts, ext_cache, field_cache, n, gamma_shift_limit));

    // Rule (d): structural and cross-family relations among Erf/Erfc/Erfi.
    gens.extend(erf_family_relations(exts, ext_cache, field_cache, n));

    // Rule (e): Legendre's elliptic relation, recognized whenever all four
    // of K(m), K(1-m), E(m), E(1-m), and pi are present among the
    // generators.
    gens.extend(legendre_relations(exts, ext_cache, n));

    gens
}

/// Re-express an element living in some (possibly different) field as a
/// polynomial over the ambient ring `exts` indexes, by mapping each of its
/// own generators to the ambient variable it occupies. Returns `None` when
/// `arg` is a special value, a non-polynomial rational function, or uses a
/// generator not present among `exts` -- in any of these cases no ambient
/// polynomial can represent it, and the caller skips the relation rather
/// than guess at one.
fn lift_into_ambient(arg: &Element, exts: &[ExtensionId], field_cache: &FieldCache, n: usize) -> Option<MPoly> {
    match arg.payload()? {
        Payload::Rational(q) => Some(MPoly::constant(n, q.clone())),
        Payload::NumberField(p) => {
            let gen_id = *field_cache.get(arg.field_id()?).generators().first()?;
            let pos = exts.iter().position(|&id| id == gen_id)?;
            Some(MPoly::from_univariate_gen(n, pos, p))
        }
        Payload::MultiField(f) => {
            if !f.is_polynomial() {
                return None;
            }
            let gens = field_cache.get(arg.field_id()?).generators();
            let mut substs = Vec::with_capacity(gens.len());
            for &g in gens {
                substs.push(MPoly::gen(n, exts.iter().position(|&id| id == g)?));
            }
            Some(f.numer.compose_gen(&substs, n))
        }
    }
}

fn sqrt_relations(exts: &[ExtensionId], ext_cache: &ExtensionCache, field_cache: &FieldCache, n: usize) -> Vec<MPoly> {
    let mut out = Vec::new();
    for (i, &id) in exts.iter().enumerate() {
        if let ExtensionKind::Call(FunctionCode::Sqrt, args) = ext_cache.get(id).kind() {
            if let Some(x) = args.first().and_then(|arg| lift_into_ambient(arg, exts, field_cache, n)) {
                out.push(MPoly::gen(n, i).pow_u32(2).sub(&x));
            }
        }
    }
    out
}

fn gamma_shift_relations(
    exts: &[ExtensionId],
    ext_cache: &ExtensionCache,
    field_cache: &FieldCache,
    n: usize,
    limit: i64,
) -> Vec<MPoly> {
    let mut out = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let (za, zb) = match (ext_cache.get(exts[i]).kind(), ext_cache.get(exts[j]).kind()) {
                (ExtensionKind::Call(FunctionCode::Gamma, a), ExtensionKind::Call(FunctionCode::Gamma, b)) => {
                    match (a.first(), b.first()) {
                        (Some(a), Some(b)) => (a, b),
                        _ => continue,
                    }
                }
                _ => continue,
            };
            let (Some(za_poly), Some(zb_poly)) =
                (lift_into_ambient(za, exts, field_cache, n), lift_into_ambient(zb, exts, field_cache, n))
            else {
                continue;
            };
            let Some(shift_q) = zb_poly.sub(&za_poly).as_constant() else { continue };
            if *shift_q.denom() != rug::Integer::from(1) {
                continue;
            }
            let Some(shift) = shift_q.numer().to_i64() else { continue };
            if shift <= 0 || shift > limit {
                continue;
            }
            // (z)_k = z * (z+1) * ... * (z+k-1)
            let mut rising = MPoly::one(n);
            for m in 0..shift {
                rising = rising.mul(&za_poly.add(&MPoly::constant(n, QRat::from((m, 1i64)))));
            }
            out.push(MPoly::gen(n, j).sub(&rising.mul(&MPoly::gen(n, i))));
        }
    }
    out
}

fn erf_family_relations(exts: &[ExtensionId], ext_cache: &ExtensionCache, field_cache: &FieldCache, n: usize) -> Vec<MPoly> {
    let mut out = Vec::new();
    let i_pos = find_i_atom(exts, ext_cache);

    for i in 0..n {
        for j in 0..n {
            if i >= j {
                continue;
            }
            let (ci, ai) = match erf_family_call(ext_cache, exts[i]) {
                Some(v) => v,
                None => continue,
            };
            let (cj, aj) = match erf_family_call(ext_cache, exts[j]) {
                Some(v) => v,
                None => continue,
            };
            let xi = match ai.first() {
                Some(x) => x,
                None => continue,
            };
            let xj = match aj.first() {
                Some(x) => x,
                None => continue,
            };

            match (ci, cj) {
                // Erfc(z) + Erf(z) - 1 == 0
                (FunctionCode::Erfc, FunctionCode::Erf) if xi == xj => {
                    out.push(MPoly::gen(n, i).add(&MPoly::gen(n, j)).sub(&MPoly::one(n)));
                }
                (FunctionCode::Erf, FunctionCode::Erfc) if xi == xj => {
                    out.push(MPoly::gen(n, j).add(&MPoly::gen(n, i)).sub(&MPoly::one(n)));
                }
                // Odd functions: f(-z) + f(z) == 0.
                (FunctionCode::Erf, FunctionCode::Erf) | (FunctionCode::Erfi, FunctionCode::Erfi)
                    if is_negation(xi, xj, exts, field_cache, n) =>
                {
                    out.push(MPoly::gen(n, i).add(&MPoly::gen(n, j)));
                }
                // Erfc(-z) + Erfc(z) - 2 == 0 (Erfc = 1 - Erf, Erf odd).
                (FunctionCode::Erfc, FunctionCode::Erfc) if is_negation(xi, xj, exts, field_cache, n) => {
                    out.push(MPoly::gen(n, i).add(&MPoly::gen(n, j)).sub(&MPoly::constant(n, QRat::from((2i64, 1i64)))));
                }
                // Erfi(z) = -i*Erf(i*z), i.e. Erf(x)^2 + Erfi(i*x)^2 == 0.
                (FunctionCode::Erf, FunctionCode::Erfi) => {
                    if is_i_times(xj, xi, i_pos, exts, field_cache, n) {
                        out.push(MPoly::gen(n, j).pow_u32(2).add(&MPoly::gen(n, i).pow_u32(2)));
                    }
                }
                (FunctionCode::Erfi, FunctionCode::Erf) => {
                    if is_i_times(xi, xj, i_pos, exts, field_cache, n) {
                        out.push(MPoly::gen(n, i).pow_u32(2).add(&MPoly::gen(n, j).pow_u32(2)));
                    }
                }
                _ => {}
            }
        }
    }
    out
}

fn erf_family_call<'a>(
    ext_cache: &'a ExtensionCache,
    id: ExtensionId,
) -> Option<(FunctionCode, &'a smallvec::SmallVec<[Element; 2]>)> {
    match ext_cache.get(id).kind() {
        ExtensionKind::Call(code @ (FunctionCode::Erf | FunctionCode::Erfc | FunctionCode::Erfi), args) => Some((*code, args)),
        _ => None,
    }
}

fn find_i_atom(exts: &[ExtensionId], ext_cache: &ExtensionCache) -> Option<usize> {
    exts.iter().position(|&id| match ext_cache.get(id).kind() {
        ExtensionKind::AlgebraicAtom(root) => root.is_i(),
        _ => false,
    })
}

fn is_negation(a: &Element, b: &Element, exts: &[ExtensionId], field_cache: &FieldCache, n: usize) -> bool {
    match (lift_into_ambient(a, exts, field_cache, n), lift_into_ambient(b, exts, field_cache, n)) {
        (Some(pa), Some(pb)) => pb == pa.neg(),
        _ => false,
    }
}

/// True when `candidate` structurally equals `i_pos * base` in the ambient
/// ring, for `i_pos` the position of the imaginary-unit generator.
fn is_i_times(candidate: &Element, base: &Element, i_pos: Option<usize>, exts: &[ExtensionId], field_cache: &FieldCache, n: usize) -> bool {
    let Some(i_pos) = i_pos else { return false };
    match (lift_into_ambient(candidate, exts, field_cache, n), lift_into_ambient(base, exts, field_cache, n)) {
        (Some(pc), Some(pb)) => pc == MPoly::gen(n, i_pos).mul(&pb),
        _ => false,
    }
}

fn legendre_relations(exts: &[ExtensionId], ext_cache: &ExtensionCache, n: usize) -> Vec<MPoly> {
    let mut out = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i >= j {
                continue;
            }
            let (za, zb) = match (ext_cache.get(exts[i]).kind(), ext_cache.get(exts[j]).kind()) {
                (ExtensionKind::Call(FunctionCode::EllipticK, a), ExtensionKind::Call(FunctionCode::EllipticK, b)) => (a, b),
                _ => continue,
            };
            if !args_sum_to_one(za, zb) {
                continue;
            }
            let (Some(m), Some(one_minus_m)) = (za.first(), zb.first()) else { continue };
            let Some(ei) = find_call_with_arg(exts, ext_cache, FunctionCode::EllipticE, m) else { continue };
            let Some(ej) = find_call_with_arg(exts, ext_cache, FunctionCode::EllipticE, one_minus_m) else { continue };
            let Some(p) = find_constant(exts, ext_cache, ConstantCode::Pi) else { continue };

            // K(m)*E(1-m) + K(1-m)*E(m) - K(m)*K(1-m) - pi/2 == 0, scaled by
            // 2 to keep every coefficient an integer.
            let two = QRat::from((2i64, 1i64));
            let rel = MPoly::gen(n, i)
                .mul(&MPoly::gen(n, ej))
                .add(&MPoly::gen(n, j).mul(&MPoly::gen(n, ei)))
                .sub(&MPoly::gen(n, i).mul(&MPoly::gen(n, j)))
                .scalar_mul(&two)
                .sub(&MPoly::gen(n, p));
            out.push(rel);
        }
    }
    out
}

fn find_call_with_arg(exts: &[ExtensionId], ext_cache: &ExtensionCache, code: FunctionCode, arg: &Element) -> Option<usize> {
    exts.iter()
        .position(|&id| matches!(ext_cache.get(id).kind(), ExtensionKind::Call(c, a) if *c == code && a.first() == Some(arg)))
}

fn find_constant(exts: &[ExtensionId], ext_cache: &ExtensionCache, code: ConstantCode) -> Option<usize> {
    exts.iter().position(|&id| matches!(ext_cache.get(id).kind(), ExtensionKind::Constant(c) if *c == code))
}

fn args_sum_to_one(a: &smallvec::SmallVec<[Element; 2]>, b: &smallvec::SmallVec<[Element; 2]>) -> bool {
    let ra = a.first().and_then(|e| match e.payload() {
        Some(Payload::Rational(q)) => Some(q.clone()),
        _ => None,
    });
    let rb = b.first().and_then(|e| match e.payload() {
        Some(Payload::Rational(q)) => Some(q.clone()),
        _ => None,
    });
    match (ra, rb) {
        (Some(x), Some(y)) => &x + &y == QRat::one(),
        _ => false,
    }
}
