//! Find references and document highlights.

use super::goto::Location;
use crate::base::{DocumentId, LineCol, Range};
use crate::hir::SymbolRegistry;

/// Every use of the symbol at `pos`, across documents.
///
/// Definition sites come first when `include_declaration` is set.
pub fn find_references(
    registry: &SymbolRegistry,
    document: DocumentId,
    pos: LineCol,
    include_declaration: bool,
) -> Vec<Location> {
    let Some(symbol) = registry
        .symbol_at(document, pos)
        .and_then(|hit| registry.symbol(hit.symbol))
    else {
        return Vec::new();
    };

    let mut declarations: Vec<Location> = if include_declaration {
        symbol
            .definitions()
            .map(|(document, range)| Location { document, range })
            .collect()
    } else {
        Vec::new()
    };
    declarations.sort();

    let mut references: Vec<Location> = symbol
        .references()
        .map(|(document, range)| Location { document, range })
        .collect();
    references.sort();

    declarations.extend(references);
    declarations
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    /// A definition site.
    Write,
    /// A use.
    Read,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentHighlight {
    pub range: Range,
    pub kind: HighlightKind,
}

/// Occurrences, within `document`, of the symbol at `pos`.
pub fn document_highlights(
    registry: &SymbolRegistry,
    document: DocumentId,
    pos: LineCol,
) -> Vec<DocumentHighlight> {
    let Some(symbol) = registry
        .symbol_at(document, pos)
        .and_then(|hit| registry.symbol(hit.symbol))
    else {
        return Vec::new();
    };

    let definitions = symbol.definitions_in(document).map(|range| DocumentHighlight {
        range,
        kind: HighlightKind::Write,
    });
    let references = symbol.references_in(document).map(|range| DocumentHighlight {
        range,
        kind: HighlightKind::Read,
    });
    let mut highlights: Vec<_> = definitions.chain(references).collect();
    highlights.sort_by_key(|highlight| highlight.range);
    highlights
}
