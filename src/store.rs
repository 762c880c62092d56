//! In-memory triple storage.
//!
//! The explorer holds exactly one ontology at a time. Loading a document
//! replaces the whole store; there is no incremental insert or delete. The
//! revision counter lets derived views (filtered tables, graph projections)
//! notice that their inputs changed without comparing triple lists.

use crate::triple::Triple;

/// Flat, insertion-ordered triple container with a replace-only mutation model.
#[derive(Debug, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
    revision: u64,
}

impl TripleStore {
    /// Create an empty store at revision zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a freshly parsed triple list.
    ///
    /// Bumps the revision even when the new list equals the old one; a
    /// reload is a new ontology state as far as derived views are concerned.
    pub fn replace(&mut self, triples: Vec<Triple>) {
        self.triples = triples;
        self.revision += 1;
    }

    /// Drop all triples.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// All triples in document order.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Monotonic counter, bumped on every replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the store holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
