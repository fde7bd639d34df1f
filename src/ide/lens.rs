//! Code lenses: a "compile" action above each grammar.

use crate::base::{DocumentId, Range};
use crate::hir::{SymbolKind, SymbolRegistry};

/// Command identifier handled by the host to compile a grammar.
pub const COMPILE_COMMAND: &str = "compile";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLens {
    pub range: Range,
    pub title: String,
    pub command: &'static str,
    /// `[document uri, grammar name]`
    pub arguments: Vec<String>,
}

/// One lens per grammar defined in `document`, in source order.
pub fn code_lenses(registry: &SymbolRegistry, document: DocumentId, uri: &str) -> Vec<CodeLens> {
    let mut lenses: Vec<CodeLens> = registry
        .symbols_in(document)
        .iter()
        .filter(|symbol| symbol.kind() == Some(SymbolKind::Grammar))
        .flat_map(|symbol| {
            let name = symbol.qualified_name();
            symbol.definitions_in(document).map(move |range| CodeLens {
                range,
                title: format!("Compile grammar {}", name),
                command: COMPILE_COMMAND,
                arguments: vec![uri.to_owned(), name.to_owned()],
            })
        })
        .collect();
    lenses.sort_by_key(|lens| lens.range);
    lenses
}
