//! The context: owns the extension cache, the field cache, and the active
//! options. Every [`crate::element::Element`] is only meaningful relative to
//! the `Context` that produced it -- field and extension ids are indices
//! into *this* context's tables, not portable references.
//!
//! Matches FLINT's `ca_ctx_t` in spirit (one mutable arena backing every
//! value created against it) translated to Rust's ownership model: rather
//! than a C handle threaded through every call, `Context` is `!Send + !Sync`
//! so the borrow checker enforces single-threaded, single-owner access at
//! compile time instead of by convention.

use crate::config::Options;
use crate::extension::{Extension, ExtensionCache, ExtensionId};
use crate::field::{FieldCache, FieldId, QQ, QQ_I};
use std::marker::PhantomData;

pub struct Context {
    extensions: ExtensionCache,
    fields: FieldCache,
    options: Options,
    /// Opts the type out of `Send`/`Sync`: ids handed out by this context
    /// are only valid against it, and nothing here is safe to share or move
    /// across threads concurrently with further mutation.
    _not_send_sync: PhantomData<*const ()>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let mut extensions = ExtensionCache::new();
        let mut fields = FieldCache::new();
        let i_ext = extensions.intern(Extension::algebraic(crate::qqbar::QQBar::i()));
        fields.fix_up_qq_i(i_ext, &extensions);
        Context { extensions, fields, options, _not_send_sync: PhantomData }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn extensions(&self) -> &ExtensionCache {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionCache {
        &mut self.extensions
    }

    pub fn fields(&self) -> &FieldCache {
        &self.fields
    }

    pub fn qq(&self) -> FieldId {
        QQ
    }

    pub fn qq_i(&self) -> FieldId {
        QQ_I
    }

    pub fn intern_extension(&mut self, ext: Extension) -> ExtensionId {
        self.extensions.intern(ext)
    }

    pub fn intern_number_field(&mut self, ext: ExtensionId) -> FieldId {
        let limit = self.options.gamma_shift_limit;
        self.fields.intern_number_field(ext, &self.extensions, limit)
    }

    pub fn intern_multi_field(&mut self, exts: &[ExtensionId]) -> FieldId {
        let limit = self.options.gamma_shift_limit;
        self.fields.intern_multi(exts, &self.extensions, limit)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
