//! Identifiers for analyzed documents.

use std::fmt;

/// A lightweight handle naming one document known to the analysis host.
///
/// Symbols key their definition and reference ranges by `DocumentId`, so a
/// document's contributions can be dropped without touching the rest of the
/// registry. The URI lives in [`DocumentSet`](crate::hir::DocumentSet).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId(pub u32);

impl DocumentId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

impl From<u32> for DocumentId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
