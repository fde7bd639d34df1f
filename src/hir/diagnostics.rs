//! Semantic errors and warnings of a grammar document.
//!
//! The codes are stable identifiers surfaced to editors; never renumber them.

use std::fmt;
use std::sync::Arc;

use crate::base::{DocumentId, Range};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
        }
    }
}

/// Standard diagnostic codes for grammar analysis.
pub mod codes {
    /// `Axiom` option names something that is not a variable of the grammar.
    pub const INVALID_AXIOM: &str = "hime.1";
    /// `Separator` option names something that is not a terminal of the grammar.
    pub const INVALID_SEPARATOR: &str = "hime.2";
    /// A terminal's definition mentions the terminal itself.
    pub const SELF_REFERENTIAL_TERMINAL: &str = "hime.3";
    /// Terminal reference found neither locally nor in a parent grammar.
    pub const MISSING_TERMINAL: &str = "hime.4";
    /// Context switch to an undeclared lexical context.
    pub const MISSING_CONTEXT: &str = "hime.5";
    /// Rule reference found neither locally nor in a parent grammar.
    pub const MISSING_SYMBOL: &str = "hime.6";
}

/// The closed set of diagnostics the analyzer raises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    InvalidAxiom,
    InvalidSeparator,
    SelfReferentialTerminal,
    MissingTerminal,
    MissingContext,
    MissingSymbol,
}

impl DiagnosticCode {
    pub const ALL: [DiagnosticCode; 6] = [
        DiagnosticCode::InvalidAxiom,
        DiagnosticCode::InvalidSeparator,
        DiagnosticCode::SelfReferentialTerminal,
        DiagnosticCode::MissingTerminal,
        DiagnosticCode::MissingContext,
        DiagnosticCode::MissingSymbol,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidAxiom => codes::INVALID_AXIOM,
            DiagnosticCode::InvalidSeparator => codes::INVALID_SEPARATOR,
            DiagnosticCode::SelfReferentialTerminal => codes::SELF_REFERENTIAL_TERMINAL,
            DiagnosticCode::MissingTerminal => codes::MISSING_TERMINAL,
            DiagnosticCode::MissingContext => codes::MISSING_CONTEXT,
            DiagnosticCode::MissingSymbol => codes::MISSING_SYMBOL,
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            DiagnosticCode::SelfReferentialTerminal => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DiagnosticCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub document: DocumentId,
    pub range: Range,
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Identifier of the analyzer that raised it.
    pub source: Arc<str>,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a diagnostic with the severity its code prescribes.
    pub fn new(
        document: DocumentId,
        range: Range,
        code: DiagnosticCode,
        source: impl Into<Arc<str>>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            document,
            range,
            severity: code.severity(),
            code,
            source: source.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects the diagnostics of one document, in the order they are raised.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    document: DocumentId,
    source: Arc<str>,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new(document: DocumentId, source: impl Into<Arc<str>>) -> Self {
        Self {
            document,
            source: source.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn raise(&mut self, range: Range, code: DiagnosticCode, message: String) {
        let diagnostic = Diagnostic::new(self.document, range, code, self.source.clone(), message);
        self.add(diagnostic);
    }

    pub fn invalid_axiom(&mut self, range: Range, value: &str) {
        self.raise(
            range,
            DiagnosticCode::InvalidAxiom,
            format!("Axiom '{}' is not a variable defined in this grammar.", value),
        );
    }

    pub fn invalid_separator(&mut self, range: Range, value: &str) {
        self.raise(
            range,
            DiagnosticCode::InvalidSeparator,
            format!("Separator terminal '{}' is not a terminal defined in this grammar.", value),
        );
    }

    pub fn self_referential_terminal(&mut self, range: Range, terminal: &str) {
        self.raise(
            range,
            DiagnosticCode::SelfReferentialTerminal,
            format!("Terminal '{}' is self-referential in its definition.", terminal),
        );
    }

    pub fn missing_terminal(&mut self, range: Range, name: &str) {
        self.raise(
            range,
            DiagnosticCode::MissingTerminal,
            format!("Missing definition for referenced terminal '{}'.", name),
        );
    }

    pub fn missing_context(&mut self, range: Range, name: &str) {
        self.raise(
            range,
            DiagnosticCode::MissingContext,
            format!("Missing definition for referenced lexical context '{}'.", name),
        );
    }

    pub fn missing_symbol(&mut self, range: Range, name: &str) {
        self.raise(
            range,
            DiagnosticCode::MissingSymbol,
            format!("Missing definition for referenced symbol '{}'.", name),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
