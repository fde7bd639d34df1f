//! # hime-base
//!
//! Semantic analysis core for Hime grammar files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Editor features (hover, rename, goto, references, lenses)
//!   ↓
//! hir     → Symbol registry, grammar analyzer, diagnostics
//!   ↓
//! syntax  → Syntax tree produced by the upstream parser
//!   ↓
//! base    → Primitives (DocumentId, spans, line index)
//! ```
//!
//! Parsing grammar text is not part of this crate: callers hand a parsed
//! [`syntax::Root`] (or the parser's [`syntax::ParseError`]) to
//! [`ide::AnalysisHost::set_document`] or directly to
//! [`hir::GrammarAnalyzer`].

/// Foundation types: DocumentId, spans, line/column conversion
pub mod base;

/// Syntax tree of grammar documents
pub mod syntax;

/// Semantic model: symbols, name resolution, diagnostics
pub mod hir;

/// Editor features built on the semantic model
pub mod ide;

pub use base::{DocumentId, LineCol, LineIndex, Range, TextRange, TextSize};
pub use hir::{
    Diagnostic, DiagnosticCode, DocumentAnalysis, GrammarAnalyzer, Severity, SymbolId,
    SymbolKind, SymbolRegistry,
};
pub use ide::AnalysisHost;
