//! Document set management for tracking open grammar documents.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::base::DocumentId;

/// Manages the mapping between document URIs and DocumentIds.
///
/// Ids are stable: a URI keeps its id after removal, so a document that is
/// closed and reopened contributes under the same id again.
#[derive(Debug, Default)]
pub struct DocumentSet {
    inner: RwLock<DocumentSetInner>,
}

#[derive(Debug, Default)]
struct DocumentSetInner {
    /// URI → DocumentId
    uri_to_id: IndexMap<Arc<str>, DocumentId>,
    /// DocumentId → URI
    id_to_uri: IndexMap<DocumentId, Arc<str>>,
    /// Text of the documents currently open
    texts: IndexMap<DocumentId, Arc<str>>,
    /// Language id each open document is tagged with
    languages: IndexMap<DocumentId, Arc<str>>,
    next_id: u32,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the DocumentId for a URI.
    pub fn document_id(&self, uri: &str) -> DocumentId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.uri_to_id.get(uri) {
                return id;
            }
        }

        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.uri_to_id.get(uri) {
            return id;
        }

        let id = DocumentId::new(inner.next_id);
        inner.next_id += 1;
        let uri: Arc<str> = Arc::from(uri);
        inner.uri_to_id.insert(uri.clone(), id);
        inner.id_to_uri.insert(id, uri);
        id
    }

    /// The DocumentId of a URI, if one was ever assigned.
    pub fn get(&self, uri: &str) -> Option<DocumentId> {
        self.inner.read().uri_to_id.get(uri).copied()
    }

    pub fn uri(&self, document: DocumentId) -> Option<Arc<str>> {
        self.inner.read().id_to_uri.get(&document).cloned()
    }

    pub fn set_text(&self, document: DocumentId, text: impl Into<Arc<str>>) {
        self.inner.write().texts.insert(document, text.into());
    }

    pub fn text(&self, document: DocumentId) -> Option<Arc<str>> {
        self.inner.read().texts.get(&document).cloned()
    }

    pub fn set_language(&self, document: DocumentId, language: impl Into<Arc<str>>) {
        self.inner.write().languages.insert(document, language.into());
    }

    pub fn language(&self, document: DocumentId) -> Option<Arc<str>> {
        self.inner.read().languages.get(&document).cloned()
    }

    /// Drop the text and language of a document. Returns `false` if it was
    /// not open.
    pub fn remove(&self, document: DocumentId) -> bool {
        let mut inner = self.inner.write();
        inner.languages.shift_remove(&document);
        inner.texts.shift_remove(&document).is_some()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.inner.read().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open documents, in the order they were first opened.
    pub fn documents(&self) -> Vec<DocumentId> {
        self.inner.read().texts.keys().copied().collect()
    }
}
