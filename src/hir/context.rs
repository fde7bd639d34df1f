//! Per-pass state of one document analysis.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::sync::Arc;

use super::analysis::{DocumentAnalysis, SymbolLocation};
use super::diagnostics::DiagnosticCollector;
use super::error::AnalysisError;
use super::ids::SymbolId;
use super::registry::RegistrySession;
use super::symbols::SymbolKind;
use crate::base::{DocumentId, LineIndex, Range, TextRange};

/// Everything a pass needs while walking one document.
///
/// Holds the registry session for the whole pass. The name sets are those
/// declared directly in the grammar being walked and are reset by
/// [`AnalysisContext::begin_grammar`].
pub struct AnalysisContext<'a> {
    document: DocumentId,
    session: RegistrySession<'a>,
    lines: LineIndex,
    diagnostics: DiagnosticCollector,
    definitions: Vec<SymbolLocation>,
    references: Vec<SymbolLocation>,
    /// Parent grammars in declaration order.
    imported: IndexSet<SmolStr>,
    contexts: FxHashSet<SmolStr>,
    terminals: FxHashSet<SmolStr>,
    variables: FxHashSet<SmolStr>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        session: RegistrySession<'a>,
        document: DocumentId,
        input: &str,
        source: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            document,
            session,
            lines: LineIndex::new(input),
            diagnostics: DiagnosticCollector::new(document, source),
            definitions: Vec::new(),
            references: Vec::new(),
            imported: IndexSet::new(),
            contexts: FxHashSet::default(),
            terminals: FxHashSet::default(),
            variables: FxHashSet::default(),
        }
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// Line/column range of a node span.
    pub fn range(&self, span: TextRange) -> Result<Range, AnalysisError> {
        self.lines.range(span).ok_or_else(|| AnalysisError::SpanOutOfBounds {
            document: self.document,
            range: span,
            len: self.lines.text_len(),
        })
    }

    /// Start walking a new grammar of the document.
    pub fn begin_grammar(&mut self) {
        self.imported.clear();
        self.contexts.clear();
        self.terminals.clear();
        self.variables.clear();
    }

    // ------------------------------------------------------------------
    // Registry access
    // ------------------------------------------------------------------

    pub fn resolve(&mut self, qualified_name: &str) -> SymbolId {
        self.session.resolve(qualified_name)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.session.lookup(qualified_name)
    }

    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.session.kind(id)
    }

    /// Resolve a symbol and record this document's kind and parent for it.
    pub fn declare(
        &mut self,
        qualified_name: &str,
        kind: SymbolKind,
        parent: Option<SymbolId>,
    ) -> SymbolId {
        let id = self.session.resolve(qualified_name);
        self.session.set_kind(self.document, id, kind, parent);
        id
    }

    /// Resolve a symbol named at a use site. Its kind is recorded only if the
    /// symbol has none yet.
    pub fn declare_if_unset(
        &mut self,
        qualified_name: &str,
        kind: SymbolKind,
        parent: Option<SymbolId>,
    ) -> SymbolId {
        let id = self.session.resolve(qualified_name);
        self.session.set_kind_if_unset(self.document, id, kind, parent);
        id
    }

    /// Declare a symbol and record a definition at `span`.
    pub fn define(
        &mut self,
        qualified_name: &str,
        kind: SymbolKind,
        parent: Option<SymbolId>,
        span: TextRange,
    ) -> Result<SymbolId, AnalysisError> {
        let range = self.range(span)?;
        let id = self.declare(qualified_name, kind, parent);
        self.session.add_definition(self.document, id, range);
        self.definitions.push(SymbolLocation { symbol: id, range });
        Ok(id)
    }

    pub fn reference(&mut self, id: SymbolId, span: TextRange) -> Result<(), AnalysisError> {
        let range = self.range(span)?;
        self.session.add_reference(self.document, id, range);
        self.references.push(SymbolLocation { symbol: id, range });
        Ok(())
    }

    /// First parent grammar, in declaration order, exposing `name` with a kind
    /// accepted by `accept`.
    pub fn find_imported(
        &self,
        name: &str,
        accept: impl Fn(SymbolKind) -> bool,
    ) -> Option<SymbolId> {
        self.imported.iter().find_map(|grammar| {
            let candidate = self.session.lookup(&qualify(grammar, name))?;
            self.session
                .kind(candidate)
                .is_some_and(&accept)
                .then_some(candidate)
        })
    }

    // ------------------------------------------------------------------
    // Names declared in the current grammar
    // ------------------------------------------------------------------

    pub fn add_import(&mut self, grammar: SmolStr) {
        self.imported.insert(grammar);
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imported.iter().map(SmolStr::as_str)
    }

    pub fn add_context(&mut self, name: SmolStr) {
        self.contexts.insert(name);
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains(name)
    }

    pub fn add_terminal(&mut self, name: SmolStr) {
        self.terminals.insert(name);
    }

    pub fn has_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn add_variable(&mut self, name: SmolStr) {
        self.variables.insert(name);
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn diagnostics(&mut self) -> &mut DiagnosticCollector {
        &mut self.diagnostics
    }

    /// End the pass, releasing the registry.
    pub fn finish(self) -> DocumentAnalysis {
        DocumentAnalysis {
            document: self.document,
            definitions: self.definitions,
            references: self.references,
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    /// End the pass, retracting whatever it already wrote to the registry.
    pub fn abort(mut self) {
        self.session.forget_document(self.document);
    }
}

/// `scope.name`
pub fn qualify(scope: &str, name: &str) -> String {
    let mut qualified = String::with_capacity(scope.len() + 1 + name.len());
    qualified.push_str(scope);
    qualified.push('.');
    qualified.push_str(name);
    qualified
}
