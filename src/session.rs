//! Explorer session: the one shared state container.
//!
//! An [`ExplorerSession`] owns the triple store, the filter state, the focal
//! entity, and the selection, and exposes every mutation the surrounding
//! surface is allowed to perform. Derived views (filtered rows, projected
//! graph, one-hop zoom) are memoized: reads recompute only when the store
//! revision, the filter state, or the focal id actually changed since the
//! cached derivation. Replacing the store mid-exploration simply makes the
//! next read recompute from the new data; there is no concurrent mutation,
//! so last write wins.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::filter::{self, Column, DEFAULT_CANDIDATE_CAP, FilterState};
use crate::graph::{self, OntologyGraph, ProjectionOptions, neighborhood};
use crate::selection::Selection;
use crate::store::TripleStore;
use crate::triple::Triple;
use crate::turtle;

/// Tuning for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Preview cap for filter pickers.
    pub candidate_cap: usize,
    /// Collapse duplicate projected edges.
    pub dedupe_edges: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            dedupe_edges: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct DerivedKey {
    revision: u64,
    filters: FilterState,
    focal: Option<String>,
}

#[derive(Debug, Default)]
struct Derived {
    key: DerivedKey,
    filtered: Vec<Triple>,
    graph: OntologyGraph,
    zoomed: Option<OntologyGraph>,
}

/// Session state plus memoized derivations.
#[derive(Debug, Default)]
pub struct ExplorerSession {
    config: SessionConfig,
    store: TripleStore,
    filters: FilterState,
    focal: Option<String>,
    selection: Selection,
    derived: Option<Derived>,
    derivations: u64,
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ── Store mutations ──────────────────────────────────────────────────

    /// Parse a Turtle document and swap it in as the current ontology.
    ///
    /// A parse failure propagates without touching the store.
    pub fn load_turtle(&mut self, text: &str) -> Result<usize, LoadError> {
        let triples = turtle::parse_turtle(text)?;
        let count = triples.len();
        self.replace_triples(triples);
        Ok(count)
    }

    /// Swap in an already-parsed triple list.
    pub fn replace_triples(&mut self, triples: Vec<Triple>) {
        self.store.replace(triples);
        info!(
            triples = self.store.len(),
            revision = self.store.revision(),
            "ontology replaced"
        );
    }

    // ── Filter and focal mutations ───────────────────────────────────────

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    pub fn set_column_filter(&mut self, column: Column, values: Vec<String>) {
        self.filters.set_column(column, values);
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::new();
    }

    pub fn set_focal(&mut self, focal: Option<String>) {
        self.focal = focal;
    }

    // ── Selection mutations ──────────────────────────────────────────────

    pub fn toggle_selection(&mut self, triple: Triple) -> bool {
        self.selection.toggle(triple)
    }

    pub fn remove_selected_at(&mut self, index: usize) {
        self.selection.remove_at(index);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drain the selection for an outgoing change request.
    pub fn take_selection(&mut self) -> Vec<Triple> {
        self.selection.take()
    }

    /// Direct access for callers that hand the selection to the chat layer.
    /// Selection state never feeds the memoized views, so this cannot
    /// stale them.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    // ── State reads ──────────────────────────────────────────────────────

    pub fn triples(&self) -> &[Triple] {
        self.store.triples()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn focal(&self) -> Option<&str> {
        self.focal.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// How many times the derived views were recomputed. Stays flat across
    /// reads whose inputs did not change.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }

    // ── Derived views ────────────────────────────────────────────────────

    /// Rows surviving the current filter state, in document order.
    pub fn filtered(&mut self) -> &[Triple] {
        &self.derived().filtered
    }

    /// Full projection of the filtered rows.
    pub fn graph(&mut self) -> &OntologyGraph {
        &self.derived().graph
    }

    /// What the canvas should show: the one-hop neighborhood when a focal
    /// entity is set, the full projection otherwise.
    pub fn visible_graph(&mut self) -> &OntologyGraph {
        let derived = self.derived();
        match &derived.zoomed {
            Some(zoomed) => zoomed,
            None => &derived.graph,
        }
    }

    /// Distinct values offered by one column's filter picker, capped per
    /// the session config.
    pub fn candidate_values(&self, column: Column) -> Vec<String> {
        filter::candidate_values(
            self.store.triples(),
            &self.filters,
            column,
            self.config.candidate_cap,
        )
    }

    fn is_fresh(&self) -> bool {
        self.derived.as_ref().is_some_and(|derived| {
            derived.key.revision == self.store.revision()
                && derived.key.filters == self.filters
                && derived.key.focal == self.focal
        })
    }

    fn derived(&mut self) -> &Derived {
        if !self.is_fresh() {
            let started = Instant::now();
            let filtered = filter::apply_filters(self.store.triples(), &self.filters);
            let graph = graph::project_with(
                &filtered,
                self.focal.as_deref(),
                ProjectionOptions {
                    dedupe_edges: self.config.dedupe_edges,
                },
            );
            let zoomed = self
                .focal
                .as_deref()
                .map(|id| neighborhood::neighborhood(&graph, id));

            self.derivations += 1;
            debug!(
                rows = filtered.len(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "recomputed derived views"
            );

            self.derived = Some(Derived {
                key: DerivedKey {
                    revision: self.store.revision(),
                    filters: self.filters.clone(),
                    focal: self.focal.clone(),
                },
                filtered,
                graph,
                zoomed,
            });
        }
        // the refresh above always fills the slot
        self.derived.get_or_insert_with(Derived::default)
    }
}
