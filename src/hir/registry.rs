//! The process-wide symbol registry.
//!
//! # Concurrency contract
//!
//! A [`SymbolRegistry`] is shared by every open document (wrap it in an
//! `Arc`). All state sits behind one `parking_lot::RwLock`:
//!
//! - the convenience methods ([`SymbolRegistry::resolve`],
//!   [`SymbolRegistry::lookup`], the queries) each lock for a single call;
//! - an analysis pass takes a [`RegistrySession`], which holds the write lock
//!   until it is dropped. Passes are therefore serialized, and readers never
//!   observe a half-analyzed document.
//!
//! Calling a `SymbolRegistry` method from the thread that holds a session
//! deadlocks; inside a pass, go through the session.

use parking_lot::{RwLock, RwLockWriteGuard};
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use std::fmt;

use super::ids::SymbolId;
use super::symbols::{Symbol, SymbolKind};
use crate::base::{DocumentId, LineCol, Range};

/// A symbol occurrence found at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolHit {
    pub symbol: SymbolId,
    pub range: Range,
    pub is_definition: bool,
}

/// Canonical store from qualified names to symbols.
#[derive(Default)]
pub struct SymbolRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    by_name: FxHashMap<SmolStr, SymbolId>,
    symbols: Vec<Symbol>,
    /// Symbols each document contributed a kind or location to.
    by_document: FxHashMap<DocumentId, FxHashSet<SymbolId>>,
}

impl RegistryInner {
    fn resolve(&mut self, qualified_name: &str) -> SymbolId {
        if let Some(&id) = self.by_name.get(qualified_name) {
            return id;
        }
        let id = SymbolId::from_raw(self.symbols.len() as u32);
        let name = SmolStr::new(qualified_name);
        self.symbols.push(Symbol::new(id, name.clone()));
        self.by_name.insert(name, id);
        id
    }

    fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.by_name.get(qualified_name).copied()
    }

    fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.slot())
    }

    fn touch(&mut self, document: DocumentId, id: SymbolId) -> Option<&mut Symbol> {
        let symbol = self.symbols.get_mut(id.slot())?;
        self.by_document.entry(document).or_default().insert(id);
        Some(symbol)
    }

    fn forget_document(&mut self, document: DocumentId) -> usize {
        let Some(ids) = self.by_document.remove(&document) else {
            return 0;
        };
        for id in &ids {
            if let Some(symbol) = self.symbols.get_mut(id.slot()) {
                symbol.forget(document);
            }
        }
        ids.len()
    }

    fn symbols_in(&self, document: DocumentId) -> Vec<&Symbol> {
        let mut symbols: Vec<&Symbol> = self
            .by_document
            .get(&document)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.get(id))
            .collect();
        symbols.sort_by_key(|symbol| symbol.id());
        symbols
    }

    fn symbol_at(&self, document: DocumentId, pos: LineCol) -> Option<SymbolHit> {
        self.symbols_in(document)
            .into_iter()
            .filter_map(|symbol| {
                symbol
                    .location_at(document, pos)
                    .map(|(range, is_definition)| SymbolHit {
                        symbol: symbol.id(),
                        range,
                        is_definition,
                    })
            })
            // Innermost range wins
            .min_by_key(|hit| extent(&hit.range))
    }
}

/// Rough size of a range for picking the innermost hit.
fn extent(range: &Range) -> (u32, u32) {
    let lines = range.end.line.saturating_sub(range.start.line);
    (lines, range.end.col.abs_diff(range.start.col))
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the symbol for `qualified_name`, creating a kindless placeholder on
    /// first use.
    pub fn resolve(&self, qualified_name: &str) -> SymbolId {
        // Fast path: already known (read lock)
        if let Some(id) = self.inner.read().lookup(qualified_name) {
            return id;
        }
        // Slow path: the write lock re-checks before inserting
        self.inner.write().resolve(qualified_name)
    }

    /// Get the symbol for `qualified_name` without creating it.
    pub fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.inner.read().lookup(qualified_name)
    }

    /// Snapshot of a symbol.
    pub fn symbol(&self, id: SymbolId) -> Option<Symbol> {
        self.inner.read().get(id).cloned()
    }

    pub fn symbol_by_name(&self, qualified_name: &str) -> Option<Symbol> {
        let inner = self.inner.read();
        inner.lookup(qualified_name).and_then(|id| inner.get(id)).cloned()
    }

    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.inner.read().get(id).and_then(Symbol::kind)
    }

    /// Snapshots of the symbols `document` defines or references, by id.
    pub fn symbols_in(&self, document: DocumentId) -> Vec<Symbol> {
        self.inner
            .read()
            .symbols_in(document)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Snapshots of every symbol that currently has a kind.
    pub fn known_symbols(&self) -> Vec<Symbol> {
        self.inner
            .read()
            .symbols
            .iter()
            .filter(|symbol| symbol.kind().is_some())
            .cloned()
            .collect()
    }

    /// The symbol defined or referenced at `pos` in `document`.
    pub fn symbol_at(&self, document: DocumentId, pos: LineCol) -> Option<SymbolHit> {
        self.inner.read().symbol_at(document, pos)
    }

    /// Drop every kind, parent and location `document` contributed.
    ///
    /// Symbols keep their identity; a symbol nobody else speaks for becomes a
    /// placeholder again. Returns the number of symbols touched.
    pub fn forget_document(&self, document: DocumentId) -> usize {
        self.inner.write().forget_document(document)
    }

    /// Take exclusive access for one analysis pass.
    pub fn session(&self) -> RegistrySession<'_> {
        RegistrySession {
            inner: self.inner.write(),
        }
    }

    /// Number of symbols ever resolved, placeholders included.
    pub fn len(&self) -> usize {
        self.inner.read().symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SymbolRegistry")
            .field("symbols", &inner.symbols.len())
            .field("documents", &inner.by_document.len())
            .finish()
    }
}

/// Exclusive access to the registry for the duration of one analysis pass.
pub struct RegistrySession<'a> {
    inner: RwLockWriteGuard<'a, RegistryInner>,
}

impl RegistrySession<'_> {
    pub fn resolve(&mut self, qualified_name: &str) -> SymbolId {
        self.inner.resolve(qualified_name)
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.inner.lookup(qualified_name)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.inner.get(id)
    }

    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.inner.get(id).and_then(Symbol::kind)
    }

    /// Record `document`'s kind and parent for a symbol.
    ///
    /// The first kind a document gives a symbol during a pass sticks. Returns
    /// `false` when the call was ignored.
    pub fn set_kind(
        &mut self,
        document: DocumentId,
        id: SymbolId,
        kind: SymbolKind,
        parent: Option<SymbolId>,
    ) -> bool {
        let Some(symbol) = self.inner.touch(document, id) else {
            return false;
        };
        let previous = symbol.kind();
        if !symbol.contribute(document, kind, parent) {
            if previous != Some(kind) {
                tracing::trace!(
                    "[RESOLVE] '{}' keeps kind {:?}, ignoring {:?} ({})",
                    symbol.qualified_name(),
                    previous,
                    kind,
                    document
                );
            }
            return false;
        }
        if previous.is_some_and(|previous| previous != kind) {
            tracing::debug!(
                "symbol '{}' changes kind {:?} -> {:?} ({})",
                symbol.qualified_name(),
                previous,
                kind,
                document
            );
        }
        true
    }

    /// [`set_kind`](Self::set_kind) for use sites: only a placeholder, or a
    /// symbol that already has `kind`, takes the contribution.
    pub fn set_kind_if_unset(
        &mut self,
        document: DocumentId,
        id: SymbolId,
        kind: SymbolKind,
        parent: Option<SymbolId>,
    ) -> bool {
        match self.kind(id) {
            Some(current) if current != kind => {
                tracing::trace!("[RESOLVE] {:?} is a {:?}, not a {:?}", id, current, kind);
                false
            }
            _ => self.set_kind(document, id, kind, parent),
        }
    }

    pub fn add_definition(&mut self, document: DocumentId, id: SymbolId, range: Range) {
        if let Some(symbol) = self.inner.touch(document, id) {
            symbol.add_definition(document, range);
        }
    }

    pub fn add_reference(&mut self, document: DocumentId, id: SymbolId, range: Range) {
        if let Some(symbol) = self.inner.touch(document, id) {
            symbol.add_reference(document, range);
        }
    }

    pub fn forget_document(&mut self, document: DocumentId) -> usize {
        self.inner.forget_document(document)
    }
}
