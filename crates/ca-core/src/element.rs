//! Elements: values living in a field of the context, plus the four special
//! tags (`Unknown`, `Undefined`, `UnsignedInfinity`, `SignedInfinity`).
//!
//! Rather than a tagged field pointer with a packed "special" bit (the C
//! representation), special values are their own enum variants -- the
//! idiomatic Rust encoding of the same state space, and one the type system
//! can exhaustively match on.

use crate::field::FieldId;
use crate::mpoly::MPolyFrac;
use crate::number::QRat;
use crate::poly::QRatPoly;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// The payload shape depends on the field variant it was built for: see
/// `crate::field::Field`.
#[derive(Clone, Debug)]
pub enum Payload {
    Rational(QRat),
    NumberField(QRatPoly),
    MultiField(MPolyFrac),
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Rational(a), Payload::Rational(b)) => a == b,
            (Payload::NumberField(a), Payload::NumberField(b)) => a == b,
            (Payload::MultiField(a), Payload::MultiField(b)) => a.numer == b.numer && a.denom == b.denom,
            _ => false,
        }
    }
}

impl Payload {
    pub fn is_zero(&self) -> bool {
        match self {
            Payload::Rational(q) => q.is_zero(),
            Payload::NumberField(p) => p.is_zero(),
            Payload::MultiField(f) => f.is_zero(),
        }
    }

    fn content_hash(&self, hasher: &mut FxHasher) {
        match self {
            Payload::Rational(q) => q.hash(hasher),
            Payload::NumberField(p) => {
                for c in p.coeffs() {
                    c.hash(hasher);
                }
            }
            Payload::MultiField(f) => {
                for (e, c) in f.numer.terms() {
                    e.hash(hasher);
                    c.hash(hasher);
                }
                0xFFu8.hash(hasher); // separator between numer/denom terms
                for (e, c) in f.denom.terms() {
                    e.hash(hasher);
                    c.hash(hasher);
                }
            }
        }
    }
}

/// A value of the engine: either a regular element of some field, or one of
/// the four special tags that propagate through arithmetic by the extended
/// complex rules (§4.7).
#[derive(Clone, Debug)]
pub enum Element {
    Regular { field: FieldId, payload: Payload },
    Unknown,
    Undefined,
    UnsignedInfinity,
    SignedInfinity(Box<Element>),
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Element::Regular { field: fa, payload: pa }, Element::Regular { field: fb, payload: pb }) => {
                fa == fb && pa == pb
            }
            (Element::Unknown, Element::Unknown) => true,
            (Element::Undefined, Element::Undefined) => true,
            (Element::UnsignedInfinity, Element::UnsignedInfinity) => true,
            (Element::SignedInfinity(a), Element::SignedInfinity(b)) => a == b,
            _ => false,
        }
    }
}

impl Element {
    pub fn is_special(&self) -> bool {
        !matches!(self, Element::Regular { .. })
    }

    pub fn field_id(&self) -> Option<FieldId> {
        match self {
            Element::Regular { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Element::Regular { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn rational(field: FieldId, q: QRat) -> Self {
        Element::Regular { field, payload: Payload::Rational(q) }
    }

    pub fn number_field(field: FieldId, p: QRatPoly) -> Self {
        Element::Regular { field, payload: Payload::NumberField(p) }
    }

    pub fn multi_field(field: FieldId, f: MPolyFrac) -> Self {
        Element::Regular { field, payload: Payload::MultiField(f) }
    }

    /// Structural hash used by the extension cache to hash-cons function-call
    /// arguments: two elements hash equal only if they have the same field
    /// identity and bit-identical payload representation.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        match self {
            Element::Regular { field, payload } => {
                0u8.hash(&mut hasher);
                field.hash(&mut hasher);
                payload.content_hash(&mut hasher);
            }
            Element::Unknown => 1u8.hash(&mut hasher),
            Element::Undefined => 2u8.hash(&mut hasher),
            Element::UnsignedInfinity => 3u8.hash(&mut hasher),
            Element::SignedInfinity(dir) => {
                4u8.hash(&mut hasher);
                dir.content_hash().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}
