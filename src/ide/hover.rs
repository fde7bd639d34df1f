//! Hover: a one-line description of the symbol under the cursor.

use crate::base::{DocumentId, LineCol, Range};
use crate::hir::{SymbolKind, SymbolRegistry};

/// Markdown hover content and the range it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: String,
    pub range: Range,
}

/// Hover text for a symbol of `kind` named `name`.
pub fn hover_text(kind: SymbolKind, name: &str) -> String {
    let label = match kind {
        SymbolKind::Grammar => "Grammar",
        SymbolKind::Context => "Lexical context",
        SymbolKind::Terminal => "Terminal symbol",
        SymbolKind::Variable => "Variable symbol",
        SymbolKind::Virtual => "Virtual symbol",
        SymbolKind::Action => "Grammar action",
        SymbolKind::Param => "Variable parameter",
    };
    format!("{} `{}`", label, name)
}

/// Hover for the symbol at `pos`, if it has a kind.
pub fn hover(registry: &SymbolRegistry, document: DocumentId, pos: LineCol) -> Option<HoverResult> {
    let hit = registry.symbol_at(document, pos)?;
    let symbol = registry.symbol(hit.symbol)?;
    let kind = symbol.kind()?;
    Some(HoverResult {
        contents: hover_text(kind, symbol.qualified_name()),
        range: hit.range,
    })
}
