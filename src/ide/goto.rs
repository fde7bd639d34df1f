//! Go to definition.

use crate::base::{DocumentId, LineCol, Range};
use crate::hir::SymbolRegistry;

/// A range in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub document: DocumentId,
    pub range: Range,
}

/// Definition sites of the symbol at `pos`, across all documents.
///
/// Empty when there is no symbol at `pos` or it is never defined (actions,
/// virtual symbols and unresolved names).
pub fn goto_definition(registry: &SymbolRegistry, document: DocumentId, pos: LineCol) -> Vec<Location> {
    let Some(hit) = registry.symbol_at(document, pos) else {
        return Vec::new();
    };
    let Some(symbol) = registry.symbol(hit.symbol) else {
        return Vec::new();
    };

    let mut targets: Vec<Location> = symbol
        .definitions()
        .map(|(document, range)| Location { document, range })
        .collect();
    targets.sort();
    targets
}
