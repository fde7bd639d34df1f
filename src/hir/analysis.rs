//! The result of analyzing one document.

use super::diagnostics::{Diagnostic, Severity};
use super::ids::SymbolId;
use crate::base::{DocumentId, Range};

/// One definition or reference recorded by a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolLocation {
    pub symbol: SymbolId,
    pub range: Range,
}

/// Definitions, references and diagnostics of one document version.
///
/// Superseded wholesale by the next pass over the same document. The
/// registry holds the same locations aggregated per symbol; this is the view
/// indexed by document, in walk order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DocumentAnalysis {
    pub document: DocumentId,
    pub definitions: Vec<SymbolLocation>,
    pub references: Vec<SymbolLocation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentAnalysis {
    /// The result of a document that could not be parsed.
    pub fn empty(document: DocumentId) -> Self {
        Self {
            document,
            definitions: Vec::new(),
            references: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.references.is_empty() && self.diagnostics.is_empty()
    }

    /// Definition ranges of `symbol` in this document.
    pub fn definitions_of(&self, symbol: SymbolId) -> impl Iterator<Item = Range> + '_ {
        self.definitions
            .iter()
            .filter(move |loc| loc.symbol == symbol)
            .map(|loc| loc.range)
    }

    /// Reference ranges of `symbol` in this document.
    pub fn references_of(&self, symbol: SymbolId) -> impl Iterator<Item = Range> + '_ {
        self.references
            .iter()
            .filter(move |loc| loc.symbol == symbol)
            .map(|loc| loc.range)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }
}
