//! Field merging (§4.4): lifting two elements from possibly-different fields
//! into their join field so that binary arithmetic has a common ring to work
//! in.
//!
//! Grounded on FLINT's `ca_field_merge_fields`/`ca_merge_field_elements`
//! strategy: walk the two (already elimination-ordered) generator lists in
//! lockstep, union them into one ordered list, intern the joined field, and
//! re-express each operand's payload over the joined generator indices via
//! polynomial composition (`MPoly::compose_gen`). No new generators are
//! invented here -- merging only reshuffles and re-homes existing ones.

use crate::context::Context;
use crate::element::{Element, Payload};
use crate::extension::ExtensionId;
use crate::field::{Field, FieldId, QQ};
use crate::mpoly::{MPoly, MPolyFrac};
use crate::number::QRat;
use crate::poly::QRatPoly;

/// Union two elimination-ordered generator lists, returning the merged list
/// together with, for each input list, the index each of its generators
/// landed at in the merged list.
fn union_generators(ctx: &Context, a: &[ExtensionId], b: &[ExtensionId]) -> (Vec<ExtensionId>, Vec<usize>, Vec<usize>) {
    let mut merged: Vec<ExtensionId> = Vec::with_capacity(a.len() + b.len());
    let mut map_a = vec![0usize; a.len()];
    let mut map_b = vec![0usize; b.len()];
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() || j < b.len() {
        if i < a.len() && j < b.len() && a[i] == b[j] {
            map_a[i] = merged.len();
            map_b[j] = merged.len();
            merged.push(a[i]);
            i += 1;
            j += 1;
        } else if j >= b.len()
            || (i < a.len()
                && ctx.extensions().get(a[i]).elimination_cmp(ctx.extensions().get(b[j])) != std::cmp::Ordering::Greater)
        {
            map_a[i] = merged.len();
            merged.push(a[i]);
            i += 1;
        } else {
            map_b[j] = merged.len();
            merged.push(b[j]);
            j += 1;
        }
    }
    (merged, map_a, map_b)
}

fn payload_to_mpoly_frac(payload: &Payload, _old_nvars: usize) -> MPolyFrac {
    match payload {
        Payload::Rational(q) => MPolyFrac::from_qrat(1, q.clone()),
        Payload::NumberField(p) => MPolyFrac::from_poly(MPoly::from_univariate_gen(1, 0, p)),
        Payload::MultiField(f) => f.clone(),
    }
}

fn lift(payload: &Payload, old_field: &Field, var_map: &[usize], dst_nvars: usize) -> Payload {
    let old_nvars = old_field.nvars();
    if old_nvars == 0 {
        let c = match payload {
            Payload::Rational(q) => q.clone(),
            _ => unreachable!("QQ field elements always carry a Rational payload"),
        };
        return if dst_nvars <= 1 {
            Payload::NumberField(QRatPoly::constant(c))
        } else {
            Payload::MultiField(MPolyFrac::from_qrat(dst_nvars, c))
        };
    }
    let frac = payload_to_mpoly_frac(payload, old_nvars);
    let substs: Vec<MPoly> = var_map.iter().map(|&dst_idx| MPoly::gen(dst_nvars, dst_idx)).collect();
    let lifted = frac.compose_gen(&substs, dst_nvars);
    if dst_nvars <= 1 {
        Payload::NumberField(lifted.numer.to_univariate())
    } else {
        Payload::MultiField(lifted)
    }
}

/// Merge the fields of `x` and `y`, returning both operands re-expressed
/// over a common field. Special values and elements already sharing a field
/// pass through unchanged (the common fast path).
pub fn merge_fields(ctx: &mut Context, x: &Element, y: &Element) -> (Element, Element) {
    let (fx, fy) = match (x.field_id(), y.field_id()) {
        (Some(fx), Some(fy)) => (fx, fy),
        _ => return (x.clone(), y.clone()),
    };
    if fx == fy {
        return (x.clone(), y.clone());
    }
    if fx == QQ {
        return (promote_rational_to(ctx, x, fy), y.clone());
    }
    if fy == QQ {
        return (x.clone(), promote_rational_to(ctx, y, fx));
    }

    let gens_x = ctx.fields().get(fx).generators().to_vec();
    let gens_y = ctx.fields().get(fy).generators().to_vec();
    let (merged, map_x, map_y) = union_generators(ctx, &gens_x, &gens_y);

    let new_field = ctx.intern_multi_field(&merged);
    let field_x = ctx.fields().get(fx).clone();
    let field_y = ctx.fields().get(fy).clone();

    let px = lift(x.payload().unwrap(), &field_x, &map_x, merged.len());
    let py = lift(y.payload().unwrap(), &field_y, &map_y, merged.len());

    (
        Element::Regular { field: new_field, payload: px },
        Element::Regular { field: new_field, payload: py },
    )
}

fn promote_rational_to(ctx: &Context, x: &Element, target: FieldId) -> Element {
    let q = match x.payload() {
        Some(Payload::Rational(q)) => q.clone(),
        _ => return x.clone(),
    };
    let nvars = ctx.fields().get(target).nvars();
    if nvars <= 1 {
        Element::Regular { field: target, payload: Payload::NumberField(QRatPoly::constant(q)) }
    } else {
        Element::Regular { field: target, payload: Payload::MultiField(MPolyFrac::from_qrat(nvars, q)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::extension::{ConstantCode, Extension};

    #[test]
    fn merging_with_qq_promotes_the_rational_operand() {
        let mut ctx = Context::new();
        let pi_ext = ctx.extensions_mut().intern(Extension::constant(ConstantCode::Pi));
        let pi_field = ctx.intern_number_field(pi_ext);
        let pi_elem = Element::Regular {
            field: pi_field,
            payload: Payload::NumberField(QRatPoly::x()),
        };
        let one = Element::rational(QQ, QRat::one());
        let (a, b) = merge_fields(&mut ctx, &one, &pi_elem);
        assert_eq!(a.field_id(), Some(pi_field));
        assert_eq!(b.field_id(), Some(pi_field));
    }

    #[test]
    fn merging_same_field_is_identity() {
        let mut ctx = Context::new();
        let a = Element::rational(QQ, QRat::one());
        let b = Element::rational(QQ, QRat::zero());
        let (ra, rb) = merge_fields(&mut ctx, &a, &b);
        assert_eq!(ra, a);
        assert_eq!(rb, b);
    }
}
