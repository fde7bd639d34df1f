//! Symbols of a Hime grammar and the locations they are declared and used at.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use super::ids::SymbolId;
use crate::base::{DocumentId, LineCol, Range};

/// What a symbol names. This is the one kind table of the crate; the analyzer,
/// the registry and the ide layer all use it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolKind {
    Grammar,
    /// A lexical context grouping terminals.
    Context,
    Terminal,
    /// A syntactic rule.
    Variable,
    Virtual,
    /// A semantic action, declared by its first use.
    Action,
    /// A template rule parameter.
    Param,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 7] = [
        SymbolKind::Grammar,
        SymbolKind::Context,
        SymbolKind::Terminal,
        SymbolKind::Variable,
        SymbolKind::Virtual,
        SymbolKind::Action,
        SymbolKind::Param,
    ];

    /// Get a display label for this kind.
    pub fn display(&self) -> &'static str {
        match self {
            SymbolKind::Grammar => "grammar",
            SymbolKind::Context => "lexical context",
            SymbolKind::Terminal => "terminal",
            SymbolKind::Variable => "variable",
            SymbolKind::Virtual => "virtual symbol",
            SymbolKind::Action => "action",
            SymbolKind::Param => "template parameter",
        }
    }
}

/// What one document's analysis asserted about a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Contribution {
    kind: SymbolKind,
    parent: Option<SymbolId>,
}

/// A named entity with every place it is defined and referenced.
///
/// Kind and parent are tracked per contributing document so that dropping a
/// document's analysis also retracts what it said about the symbol. The
/// effective kind is the latest contribution from a document that defines the
/// symbol, falling back to the latest contribution of any document.
#[derive(Clone, Debug)]
pub struct Symbol {
    id: SymbolId,
    qualified_name: SmolStr,
    contributions: IndexMap<DocumentId, Contribution>,
    definitions: IndexMap<DocumentId, IndexSet<Range>>,
    references: IndexMap<DocumentId, IndexSet<Range>>,
}

impl Symbol {
    pub(crate) fn new(id: SymbolId, qualified_name: SmolStr) -> Self {
        Self {
            id,
            qualified_name,
            contributions: IndexMap::new(),
            definitions: IndexMap::new(),
            references: IndexMap::new(),
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// Dot-separated path, e.g. `Grammar.Rule.Param`.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Last segment of the qualified name.
    ///
    /// Virtual symbols may contain dots of their own; for those the segment
    /// after the owning grammar's name is the one written in source, so use
    /// [`Symbol::name_within`] when the parent is known.
    pub fn name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map_or(self.qualified_name.as_str(), |(_, last)| last)
    }

    /// The qualified name relative to `scope`, or the full name when it is
    /// not nested in `scope`.
    pub fn name_within<'a>(&'a self, scope: &str) -> &'a str {
        self.qualified_name
            .strip_prefix(scope)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.qualified_name)
    }

    /// `None` while the symbol is only a placeholder.
    pub fn kind(&self) -> Option<SymbolKind> {
        self.effective().map(|c| c.kind)
    }

    pub fn parent(&self) -> Option<SymbolId> {
        self.effective().and_then(|c| c.parent)
    }

    fn effective(&self) -> Option<&Contribution> {
        self.contributions
            .iter()
            .rev()
            .find(|(document, _)| self.definitions.contains_key(*document))
            .or_else(|| self.contributions.last())
            .map(|(_, contribution)| contribution)
    }

    pub fn is_defined(&self) -> bool {
        !self.definitions.is_empty()
    }

    pub fn definitions_in(&self, document: DocumentId) -> impl Iterator<Item = Range> + '_ {
        self.definitions.get(&document).into_iter().flatten().copied()
    }

    pub fn references_in(&self, document: DocumentId) -> impl Iterator<Item = Range> + '_ {
        self.references.get(&document).into_iter().flatten().copied()
    }

    /// All definition sites across documents.
    pub fn definitions(&self) -> impl Iterator<Item = (DocumentId, Range)> + '_ {
        self.definitions
            .iter()
            .flat_map(|(&document, ranges)| ranges.iter().map(move |&range| (document, range)))
    }

    /// All reference sites across documents.
    pub fn references(&self) -> impl Iterator<Item = (DocumentId, Range)> + '_ {
        self.references
            .iter()
            .flat_map(|(&document, ranges)| ranges.iter().map(move |&range| (document, range)))
    }

    /// The definition or reference range of this symbol containing `pos`.
    ///
    /// The boolean is `true` for a definition site.
    pub fn location_at(&self, document: DocumentId, pos: LineCol) -> Option<(Range, bool)> {
        self.definitions_in(document)
            .find(|range| range.contains(pos))
            .map(|range| (range, true))
            .or_else(|| {
                self.references_in(document)
                    .find(|range| range.contains(pos))
                    .map(|range| (range, false))
            })
    }

    /// Record `document`'s view of kind and parent.
    ///
    /// A document states the kind once per pass: later calls from the same
    /// document are ignored until it is forgotten. Returns `false` when
    /// ignored.
    pub(crate) fn contribute(
        &mut self,
        document: DocumentId,
        kind: SymbolKind,
        parent: Option<SymbolId>,
    ) -> bool {
        if self.contributions.contains_key(&document) {
            return false;
        }
        // Appended last: the most recent document wins among definers.
        self.contributions.insert(document, Contribution { kind, parent });
        true
    }

    /// Returns `false` if the range was already recorded.
    pub(crate) fn add_definition(&mut self, document: DocumentId, range: Range) -> bool {
        self.definitions.entry(document).or_default().insert(range)
    }

    pub(crate) fn add_reference(&mut self, document: DocumentId, range: Range) -> bool {
        self.references.entry(document).or_default().insert(range)
    }

    /// Drop everything `document` contributed.
    pub(crate) fn forget(&mut self, document: DocumentId) {
        self.contributions.shift_remove(&document);
        self.definitions.shift_remove(&document);
        self.references.shift_remove(&document);
    }
}
