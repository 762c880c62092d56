//! Selection of triples staged for an outgoing change request.
//!
//! Membership is value equality on (subject, predicate, resolved object),
//! never on the raw object representation. The two load paths hand the
//! explorer a mix of plain-string and structured objects, so a plain `"x"`
//! and a structured URI term `"x"` must toggle the same entry.

use serde::{Deserialize, Serialize};

use crate::triple::Triple;

/// Ordered list of flagged triples with value-equality membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    triples: Vec<Triple>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the matching entry if present, append the triple otherwise.
    /// Returns true when the triple is selected afterwards.
    pub fn toggle(&mut self, triple: Triple) -> bool {
        if let Some(at) = self.triples.iter().position(|t| t.same_fact(&triple)) {
            self.triples.remove(at);
            false
        } else {
            self.triples.push(triple);
            true
        }
    }

    /// Drop the entry at `index`. Stale indices from a lagging rendered
    /// snapshot are expected, so out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.triples.len() {
            self.triples.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.triples.clear();
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.iter().any(|t| t.same_fact(triple))
    }

    /// Hand the selection over for an outgoing change request, leaving it
    /// empty.
    pub fn take(&mut self) -> Vec<Triple> {
        std::mem::take(&mut self.triples)
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
