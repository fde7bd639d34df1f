//! Semantic identifiers for symbols.

use std::fmt;

/// Identity of a symbol in a [`SymbolRegistry`](super::SymbolRegistry).
///
/// Assigned sequentially the first time a qualified name is resolved and never
/// reused for the registry's lifetime, so two resolutions of the same name
/// always compare equal. Parents are stored as `SymbolId`s, which keeps the
/// child-to-parent link non-owning.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub(crate) const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}
