//! Output formatting for evaluator [`Value`]s.
//!
//! Exact rational and algebraic results are shown exactly; everything else
//! falls back to a decimal approximation from the interval evaluator
//! (`Element::enclosure`), the same escalation order the engine itself uses
//! to decide equality/sign before resorting to numeric disambiguation.
//!
//! Every formatter here takes the session's `Context` explicitly: an
//! `Element`'s field/extension ids are only meaningful against the context
//! that produced them, so formatting must never construct its own.

use ca_core::context::Context;
use ca_core::element::Element;
use ca_core::{arith, Payload};

use crate::eval::Value;

/// Working precision (bits) used for the decimal-approximation fallback.
const DISPLAY_PREC: u32 = 256;

/// Format a [`Value`] as a human-readable string.
///
/// # Output conventions
///
/// - Exact rational: plain fraction (e.g., `3/7`)
/// - Exact algebraic, non-rational: `<decimal approx> (root of a degree-d polynomial)`
/// - `Unknown`: `? (could not be decided at the current precision)`
/// - `Undefined`: `undefined`
/// - `UnsignedInfinity`: `infinity`
/// - `SignedInfinity`: `<direction>*infinity`
/// - Anything else (a generic transcendental element): `~<decimal approx>`
/// - List: `[item1, item2, ...]`
pub fn format_value(ctx: &Context, val: &Value) -> String {
    match val {
        Value::Element(e) => format_element(ctx, e),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(|v| format_value(ctx, v)).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

fn format_element(ctx: &Context, e: &Element) -> String {
    match e {
        Element::Undefined => "undefined".to_string(),
        Element::UnsignedInfinity => "infinity".to_string(),
        Element::SignedInfinity(dir) => format!("{}*infinity", format_element(ctx, dir)),
        Element::Unknown => "? (could not be decided at the current precision)".to_string(),
        Element::Regular { .. } => format_regular(ctx, e),
    }
}

fn format_regular(ctx: &Context, e: &Element) -> String {
    if let Ok(q) = arith::to_rational(e) {
        return format!("{}", q);
    }
    if let Some(Payload::NumberField(_)) = e.payload() {
        // Only single-generator algebraic-atom fields reduce through
        // `to_algebraic`; transcendental generators (exp/sin/pi/...) fall
        // through to the decimal-approximation path below.
        if let Ok(a) = arith::to_algebraic(ctx, e) {
            return format!("{} (root of a degree-{} polynomial)", decimal_approx(ctx, e), a.degree());
        }
    }
    format!("~{}", decimal_approx(ctx, e))
}

/// Render a decimal approximation of `e` at a fixed working precision.
fn decimal_approx(ctx: &Context, e: &Element) -> String {
    let ball = e.enclosure(ctx, DISPLAY_PREC);
    let re = ball.re.lo.clone().to_f64();
    let im = ball.im.lo.clone().to_f64();
    if im.abs() < 1e-12 {
        format!("{:.10}", re)
    } else if im > 0.0 {
        format!("{:.10} + {:.10}*i", re, im)
    } else {
        format!("{:.10} - {:.10}*i", re, -im)
    }
}
