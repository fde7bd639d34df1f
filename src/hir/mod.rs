//! Semantic model of Hime grammars.
//!
//! - [`SymbolRegistry`] - process-wide store of every symbol, shared by documents
//! - [`GrammarAnalyzer`] - the pass that walks a syntax tree into the registry
//! - [`DocumentAnalysis`] - what one pass found in one document
//! - [`DocumentSet`] - URIs and texts of the open documents

mod analysis;
mod config;
mod context;
mod diagnostics;
mod error;
mod ids;
mod registry;
mod resolve;
mod source;
mod symbols;

pub use analysis::{DocumentAnalysis, SymbolLocation};
pub use config::{AnalyzerConfig, PLAIN_TEXT};
pub use context::{AnalysisContext, qualify};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector, Severity, codes};
pub use error::AnalysisError;
pub use ids::SymbolId;
pub use registry::{RegistrySession, SymbolHit, SymbolRegistry};
pub use resolve::{GrammarAnalyzer, OPTION_AXIOM, OPTION_SEPARATOR};
pub use source::DocumentSet;
pub use symbols::{Symbol, SymbolKind};
