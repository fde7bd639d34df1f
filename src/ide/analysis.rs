//! Analysis host: the entry point for editor integrations.
//!
//! Owns the open documents and their latest analysis results, and answers
//! the ide queries against the shared [`SymbolRegistry`].

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::goto::{Location, goto_definition};
use super::hover::{HoverResult, hover};
use super::lens::{CodeLens, code_lenses};
use super::references::{DocumentHighlight, document_highlights, find_references};
use super::rename::{RenameError, TextEdit, rename};
use super::symbols::{SymbolInfo, document_symbols, workspace_symbols};
use crate::base::{DocumentId, LineCol};
use crate::hir::{
    AnalysisError, AnalyzerConfig, Diagnostic, DocumentAnalysis, DocumentSet, GrammarAnalyzer,
    SymbolHit, SymbolRegistry,
};
use crate::syntax::{ParseError, Root};

/// Holds documents and analysis results, and runs passes on change.
///
/// Several hosts may share one registry (see [`AnalysisHost::with_registry`]);
/// each pass locks it for its own duration only.
#[derive(Debug)]
pub struct AnalysisHost {
    registry: Arc<SymbolRegistry>,
    documents: DocumentSet,
    analyzer: GrammarAnalyzer,
    results: FxHashMap<DocumentId, DocumentAnalysis>,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self::with_registry(Arc::new(SymbolRegistry::new()), config)
    }

    pub fn with_registry(registry: Arc<SymbolRegistry>, config: AnalyzerConfig) -> Self {
        Self {
            registry,
            documents: DocumentSet::new(),
            analyzer: GrammarAnalyzer::new(config),
            results: FxHashMap::default(),
        }
    }

    pub fn registry(&self) -> &Arc<SymbolRegistry> {
        &self.registry
    }

    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    pub fn config(&self) -> &AnalyzerConfig {
        self.analyzer.config()
    }

    pub fn document_id(&self, uri: &str) -> Option<DocumentId> {
        self.documents.get(uri)
    }

    /// Set the text of a document and analyze the parser's output for it.
    ///
    /// Replaces the previous analysis of the document. Documents the
    /// configuration does not handle are stored but never analyzed.
    pub fn set_document(
        &mut self,
        uri: &str,
        text: impl Into<Arc<str>>,
        parsed: Result<&Root, &ParseError>,
    ) -> Result<DocumentId, AnalysisError> {
        let document = self.documents.document_id(uri);
        let text: Arc<str> = text.into();
        self.documents.set_text(document, text.clone());
        self.documents.set_language(document, self.analyzer.config().language_for(uri));

        if !self.config().handles(uri) {
            tracing::debug!("{} ({}) is not a grammar document", uri, document);
            return Ok(document);
        }

        match self.analyzer.analyze_parsed(&self.registry, document, &text, parsed) {
            Ok(analysis) => {
                self.results.insert(document, analysis);
                Ok(document)
            }
            Err(err) => {
                self.results.remove(&document);
                Err(err)
            }
        }
    }

    /// Close a document, dropping everything it contributed.
    pub fn remove_document(&mut self, uri: &str) -> Option<DocumentId> {
        let document = self.documents.get(uri)?;
        self.documents.remove(document);
        self.results.remove(&document);
        let dropped = self.registry.forget_document(document);
        tracing::debug!("closed {}: {} symbol(s) touched", uri, dropped);
        Some(document)
    }

    /// Language id the document was tagged with when it was set.
    pub fn language(&self, document: DocumentId) -> Option<Arc<str>> {
        self.documents.language(document)
    }

    pub fn analysis(&self, document: DocumentId) -> Option<&DocumentAnalysis> {
        self.results.get(&document)
    }

    pub fn diagnostics(&self, document: DocumentId) -> &[Diagnostic] {
        self.results
            .get(&document)
            .map(|analysis| analysis.diagnostics.as_slice())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn symbol_at(&self, document: DocumentId, pos: LineCol) -> Option<SymbolHit> {
        self.registry.symbol_at(document, pos)
    }

    pub fn hover(&self, document: DocumentId, pos: LineCol) -> Option<HoverResult> {
        hover(&self.registry, document, pos)
    }

    pub fn rename(
        &self,
        document: DocumentId,
        pos: LineCol,
        new_name: &str,
    ) -> Result<Vec<TextEdit>, RenameError> {
        let text = self.documents.text(document).unwrap_or_default();
        rename(&self.registry, document, &text, pos, new_name)
    }

    pub fn code_lenses(&self, document: DocumentId) -> Vec<CodeLens> {
        match self.documents.uri(document) {
            Some(uri) => code_lenses(&self.registry, document, &uri),
            None => Vec::new(),
        }
    }

    pub fn goto_definition(&self, document: DocumentId, pos: LineCol) -> Vec<Location> {
        goto_definition(&self.registry, document, pos)
    }

    pub fn find_references(
        &self,
        document: DocumentId,
        pos: LineCol,
        include_declaration: bool,
    ) -> Vec<Location> {
        find_references(&self.registry, document, pos, include_declaration)
    }

    pub fn document_highlights(&self, document: DocumentId, pos: LineCol) -> Vec<DocumentHighlight> {
        document_highlights(&self.registry, document, pos)
    }

    pub fn document_symbols(&self, document: DocumentId) -> Vec<SymbolInfo> {
        document_symbols(&self.registry, document)
    }

    pub fn workspace_symbols(&self, query: &str) -> Vec<SymbolInfo> {
        workspace_symbols(&self.registry, query)
    }
}
