//! Analyzer configuration.

use smol_str::SmolStr;
use std::path::Path;
use std::sync::Arc;

/// Language id given to documents the analyzer does not handle.
pub const PLAIN_TEXT: &str = "text";

/// Settings shared by the analyzer and the analysis host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Stamped as the `source` of every diagnostic.
    pub source: Arc<str>,
    /// Language id of grammar documents.
    pub language_id: Arc<str>,
    /// File extensions (without the dot) that hold grammar documents.
    pub file_extensions: Vec<SmolStr>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            source: Arc::from("hime"),
            language_id: Arc::from("hime"),
            file_extensions: vec![SmolStr::new_static("gram")],
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_language_id(mut self, language_id: impl Into<Arc<str>>) -> Self {
        self.language_id = language_id.into();
        self
    }

    pub fn with_file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.file_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a path or URI names a grammar document.
    pub fn handles(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_extensions.iter().any(|known| known == ext))
    }

    /// Language id for a path or URI.
    pub fn language_for(&self, path: impl AsRef<Path>) -> &str {
        if self.handles(path) {
            &self.language_id
        } else {
            PLAIN_TEXT
        }
    }
}
