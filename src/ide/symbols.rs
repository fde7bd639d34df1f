//! Document and workspace symbol listings.

use smol_str::SmolStr;

use crate::base::{DocumentId, Range};
use crate::hir::{Symbol, SymbolKind, SymbolRegistry};

/// A defined symbol, as listed in outlines and symbol searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    /// Name as written in source.
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub kind: SymbolKind,
    pub document: DocumentId,
    pub range: Range,
    /// Qualified name of the parent symbol.
    pub container: Option<SmolStr>,
}

fn infos(registry: &SymbolRegistry, symbol: &Symbol, document: Option<DocumentId>) -> Vec<SymbolInfo> {
    let Some(kind) = symbol.kind() else {
        return Vec::new();
    };
    let container = symbol
        .parent()
        .and_then(|parent| registry.symbol(parent))
        .map(|parent| SmolStr::new(parent.qualified_name()));
    let name = match &container {
        Some(parent) => symbol.name_within(parent),
        None => symbol.qualified_name(),
    };

    symbol
        .definitions()
        .filter(|(doc, _)| document.is_none_or(|wanted| wanted == *doc))
        .map(|(document, range)| SymbolInfo {
            name: SmolStr::new(name),
            qualified_name: SmolStr::new(symbol.qualified_name()),
            kind,
            document,
            range,
            container: container.clone(),
        })
        .collect()
}

/// Symbols defined in `document`, in source order.
pub fn document_symbols(registry: &SymbolRegistry, document: DocumentId) -> Vec<SymbolInfo> {
    let mut result: Vec<SymbolInfo> = registry
        .symbols_in(document)
        .iter()
        .flat_map(|symbol| infos(registry, symbol, Some(document)))
        .collect();
    result.sort_by_key(|info| info.range);
    result
}

/// Defined symbols whose name contains `query`, ignoring ASCII case.
///
/// An empty query lists every defined symbol.
pub fn workspace_symbols(registry: &SymbolRegistry, query: &str) -> Vec<SymbolInfo> {
    let query = query.to_ascii_lowercase();
    let mut result: Vec<SymbolInfo> = registry
        .known_symbols()
        .iter()
        .flat_map(|symbol| infos(registry, symbol, None))
        .filter(|info| info.name.to_ascii_lowercase().contains(&query))
        .collect();
    result.sort_by(|a, b| {
        a.qualified_name
            .cmp(&b.qualified_name)
            .then_with(|| (a.document, a.range).cmp(&(b.document, b.range)))
    });
    result
}
