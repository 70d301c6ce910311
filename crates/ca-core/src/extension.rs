//! Extensions and the extension cache: the generators that fields are built
//! from, hash-consed so that two occurrences of (say) `Exp(x)` for the same
//! `x` always resolve to one generator.
//!
//! Grounded on the teacher's `ExprArena`/`SymbolRegistry` hash-consing
//! pattern (a `Vec`-backed slot table plus an `FxHashMap` bucket index keyed
//! on a content hash), generalized here from deduplicating q-series
//! expression trees to deduplicating field generators. FLINT's own
//! `ca_ext_cache_insert` does the same job with open addressing over a raw
//! array; the bucket-table shape is the idiomatic equivalent once "pointer
//! identity" becomes "index into a growable `Vec`".
//!
//! Extensions never reference later extensions (an extension's function
//! arguments are always fully-reduced elements of *already interned*
//! fields), so there is no possibility of a dangling index; nothing here
//! needs FLINT's reverse-insertion-order teardown discipline; a `Vec`'s
//! ordinary `Drop` order is fine.

use crate::element::Element;
use crate::qqbar::QQBar;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

pub type ExtensionId = u32;

/// Named constants available as zero-argument extensions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConstantCode {
    Pi,
    Euler,
}

/// Function heads available as extension-building call expressions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FunctionCode {
    Exp,
    Log,
    Sin,
    Cos,
    Sqrt,
    Gamma,
    Erf,
    Erfc,
    Erfi,
    EllipticK,
    EllipticE,
}

impl FunctionCode {
    /// Arity expected for each head; checked by `Extension::new_call`.
    pub fn arity(self) -> usize {
        1
    }
}

#[derive(Clone, Debug)]
pub enum ExtensionKind {
    /// An algebraic number that is not rational: a fresh generator whose
    /// minimal polynomial is the defining relation (§4.5 rule a).
    AlgebraicAtom(QQBar),
    Constant(ConstantCode),
    Call(FunctionCode, SmallVec<[Element; 2]>),
}

/// One generator: its defining kind, plus a cached structural hash and
/// nesting depth used by the elimination order (§4.2: deeper / later
/// extensions eliminate before shallower / earlier ones).
#[derive(Clone, Debug)]
pub struct Extension {
    kind: ExtensionKind,
    hash: u64,
    depth: u32,
}

impl Extension {
    pub fn algebraic(root: QQBar) -> Self {
        let mut hasher = FxHasher::default();
        0u8.hash(&mut hasher);
        root.minpoly().degree().unwrap_or(1).hash(&mut hasher);
        for c in root.minpoly().coeffs() {
            c.hash(&mut hasher);
        }
        Extension { kind: ExtensionKind::AlgebraicAtom(root), hash: hasher.finish(), depth: 0 }
    }

    pub fn constant(code: ConstantCode) -> Self {
        let mut hasher = FxHasher::default();
        1u8.hash(&mut hasher);
        code.hash(&mut hasher);
        Extension { kind: ExtensionKind::Constant(code), hash: hasher.finish(), depth: 0 }
    }

    /// `depth_of` resolves each argument's nesting depth (0 for arguments
    /// that involve no extensions, i.e. purely rational).
    pub fn call(code: FunctionCode, args: SmallVec<[Element; 2]>, arg_depths: &[u32]) -> Self {
        let mut hasher = FxHasher::default();
        2u8.hash(&mut hasher);
        code.hash(&mut hasher);
        for a in &args {
            a.content_hash().hash(&mut hasher);
        }
        let depth = 1 + arg_depths.iter().copied().max().unwrap_or(0);
        Extension { kind: ExtensionKind::Call(code, args), hash: hasher.finish(), depth }
    }

    pub fn kind(&self) -> &ExtensionKind {
        &self.kind
    }

    pub fn hash_key(&self) -> u64 {
        self.hash
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    fn structurally_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ExtensionKind::AlgebraicAtom(a), ExtensionKind::AlgebraicAtom(b)) => a.same_value(b),
            (ExtensionKind::Constant(a), ExtensionKind::Constant(b)) => a == b,
            (ExtensionKind::Call(fa, aa), ExtensionKind::Call(fb, ab)) => {
                fa == fb && aa.len() == ab.len() && aa.iter().zip(ab.iter()).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }

    /// Elimination order comparator (§4.2): deeper extensions eliminate
    /// first; among equal depth, algebraic atoms eliminate before constants,
    /// which eliminate before function calls, then fall back to the
    /// structural hash to total the order deterministically.
    pub fn elimination_cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        other
            .depth
            .cmp(&self.depth)
            .then_with(|| self.kind_rank().cmp(&other.kind_rank()))
            .then_with(|| self.hash.cmp(&other.hash))
            .then(Ordering::Equal)
    }

    fn kind_rank(&self) -> u8 {
        match self.kind {
            ExtensionKind::AlgebraicAtom(_) => 0,
            ExtensionKind::Constant(_) => 1,
            ExtensionKind::Call(..) => 2,
        }
    }
}

/// Hash-consing table for extensions: a growable slot `Vec` plus an
/// `FxHashMap` bucket index from structural hash to the (usually singleton)
/// list of slots sharing that hash.
#[derive(Default)]
pub struct ExtensionCache {
    slots: Vec<Extension>,
    index: FxHashMap<u64, SmallVec<[ExtensionId; 1]>>,
}

impl ExtensionCache {
    pub fn new() -> Self {
        ExtensionCache { slots: Vec::new(), index: FxHashMap::default() }
    }

    pub fn get(&self, id: ExtensionId) -> &Extension {
        &self.slots[id as usize]
    }

    /// Intern an extension, returning the id of the existing entry if one
    /// structurally equal to `ext` is already present.
    pub fn intern(&mut self, ext: Extension) -> ExtensionId {
        let key = ext.hash_key();
        if let Some(bucket) = self.index.get(&key) {
            for &candidate in bucket {
                if self.slots[candidate as usize].structurally_eq(&ext) {
                    return candidate;
                }
            }
        }
        let id = self.slots.len() as ExtensionId;
        self.slots.push(ext);
        let bucket = self.index.entry(key).or_default();
        bucket.push(id);
        if bucket.len() > 1 {
            log::trace!("extension cache: hash collision at key {key:#x}, bucket size {}", bucket.len());
        }
        id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
