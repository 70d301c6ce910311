//! Fields: the rational field, single-generator number fields, and
//! multi-generator fields carrying an ideal of relations among their
//! generators.
//!
//! Grounded on §4.2: a field's identity is the *ordered tuple* of extension
//! ids it is built from (order matters -- it fixes the elimination order
//! used by reduction), hash-consed the same way extensions are, via a
//! rolling hash `hash_{i+1} = hash_i * 100003 + ext_i.hash()` matching the
//! spec's stated recurrence.

use crate::extension::{ExtensionCache, ExtensionId};
use crate::ideal::build_ideal;
use crate::mpoly::MPoly;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type FieldId = u32;

/// Fixed slot: the rational field, always id 0.
pub const QQ: FieldId = 0;
/// Fixed slot: `QQ(i)`, always id 1 -- distinguished because it is the home
/// field of every non-real algebraic fast path and of `Element::i()`.
pub const QQ_I: FieldId = 1;

#[derive(Clone, Debug)]
pub enum Field {
    Qq,
    NumberField(ExtensionId),
    MultiField { exts: SmallVec<[ExtensionId; 2]>, ideal: Vec<MPoly> },
}

impl Field {
    pub fn generators(&self) -> &[ExtensionId] {
        match self {
            Field::Qq => &[],
            Field::NumberField(id) => std::slice::from_ref(id),
            Field::MultiField { exts, .. } => exts,
        }
    }

    pub fn ideal(&self) -> &[MPoly] {
        match self {
            Field::MultiField { ideal, .. } => ideal,
            _ => &[],
        }
    }

    pub fn nvars(&self) -> usize {
        self.generators().len()
    }
}

pub struct FieldCache {
    slots: Vec<Field>,
    index: FxHashMap<u64, SmallVec<[FieldId; 1]>>,
}

fn rolling_hash(exts: &[ExtensionId], ext_cache: &ExtensionCache) -> u64 {
    let mut h: u64 = 0;
    for &id in exts {
        h = h.wrapping_mul(100_003).wrapping_add(ext_cache.get(id).hash_key());
    }
    h
}

impl FieldCache {
    pub fn new() -> Self {
        let mut slots = Vec::new();
        slots.push(Field::Qq);
        slots.push(Field::NumberField(u32::MAX)); // placeholder, fixed up by Context::new via intern_qq_i
        FieldCache { slots, index: FxHashMap::default() }
    }

    pub fn get(&self, id: FieldId) -> &Field {
        &self.slots[id as usize]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Intern the single-generator number field `Q(ext)`.
    pub fn intern_number_field(&mut self, ext: ExtensionId, ext_cache: &ExtensionCache, gamma_shift_limit: i64) -> FieldId {
        self.intern_multi(&[ext], ext_cache, gamma_shift_limit)
    }

    /// Intern the field generated by `exts` in the given order, building its
    /// ideal exactly once on first insertion (§4.5). `gamma_shift_limit`
    /// bounds rule (c)'s integer-shift unrolling (`Options::gamma_shift_limit`).
    pub fn intern_multi(&mut self, exts: &[ExtensionId], ext_cache: &ExtensionCache, gamma_shift_limit: i64) -> FieldId {
        if exts.is_empty() {
            return QQ;
        }
        let key = rolling_hash(exts, ext_cache);
        if let Some(bucket) = self.index.get(&key) {
            for &candidate in bucket {
                if self.slots[candidate as usize].generators() == exts {
                    return candidate;
                }
            }
        }
        let field = if exts.len() == 1 {
            Field::NumberField(exts[0])
        } else {
            let ideal = build_ideal(exts, ext_cache, self, gamma_shift_limit);
            Field::MultiField { exts: exts.iter().copied().collect(), ideal }
        };
        let id = self.slots.len() as FieldId;
        self.slots.push(field);
        self.index.entry(key).or_default().push(id);
        id
    }

    /// Replace the QQ(i) placeholder slot (id 1) with its real definition,
    /// called once by `Context::new` after the `i` extension is interned.
    /// Also registers the slot in the hash index so a later
    /// `intern_number_field(i_ext, ..)` resolves back to this fixed id
    /// instead of minting a duplicate.
    pub fn fix_up_qq_i(&mut self, i_ext: ExtensionId, ext_cache: &ExtensionCache) {
        self.slots[QQ_I as usize] = Field::NumberField(i_ext);
        let key = rolling_hash(&[i_ext], ext_cache);
        self.index.entry(key).or_default().push(QQ_I);
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new()
    }
}
