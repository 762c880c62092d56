//! Row filtering over the triple table.
//!
//! Two mechanisms compose conjunctively:
//!
//! - a free-text search, matched case-insensitively as a substring against
//!   subject, predicate, and resolved object (a row passes if any field hits)
//! - per-column filters, exact membership against a selected value set
//!
//! Filtering never reorders rows and never mutates the store. Candidate
//! values for a column's filter picker are computed against the other two
//! columns' filters plus the search, so already-chosen values do not hide
//! their alternatives.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::triple::Triple;

/// Preview cap for filter pickers. Display concern only; row filtering
/// itself is never truncated.
pub const DEFAULT_CANDIDATE_CAP: usize = 50;

/// Which column of the triple table a filter or picker addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Subject,
    Predicate,
    Object,
}

/// The complete user-visible filter state.
///
/// An empty search and empty value sets leave the table unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub predicates: Vec<String>,
    #[serde(default)]
    pub objects: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this state filters nothing out.
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty()
            && self.subjects.is_empty()
            && self.predicates.is_empty()
            && self.objects.is_empty()
    }

    fn selected(&self, column: Column) -> &[String] {
        match column {
            Column::Subject => &self.subjects,
            Column::Predicate => &self.predicates,
            Column::Object => &self.objects,
        }
    }

    fn selected_mut(&mut self, column: Column) -> &mut Vec<String> {
        match column {
            Column::Subject => &mut self.subjects,
            Column::Predicate => &mut self.predicates,
            Column::Object => &mut self.objects,
        }
    }

    /// Replace one column's selected-value set.
    pub fn set_column(&mut self, column: Column, values: Vec<String>) {
        *self.selected_mut(column) = values;
    }
}

fn column_value<'a>(triple: &'a Triple, column: Column) -> &'a str {
    match column {
        Column::Subject => &triple.subject,
        Column::Predicate => &triple.predicate,
        Column::Object => triple.object.resolved(),
    }
}

fn matches_search(triple: &Triple, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    triple.subject.to_lowercase().contains(needle_lower)
        || triple.predicate.to_lowercase().contains(needle_lower)
        || triple.object.resolved().to_lowercase().contains(needle_lower)
}

fn matches_column(triple: &Triple, filters: &FilterState, column: Column) -> bool {
    let selected = filters.selected(column);
    selected.is_empty()
        || selected
            .iter()
            .any(|value| value == column_value(triple, column))
}

fn matches(triple: &Triple, filters: &FilterState, needle_lower: &str) -> bool {
    matches_search(triple, needle_lower)
        && matches_column(triple, filters, Column::Subject)
        && matches_column(triple, filters, Column::Predicate)
        && matches_column(triple, filters, Column::Object)
}

/// Apply the full filter state, preserving document order.
pub fn apply_filters(triples: &[Triple], filters: &FilterState) -> Vec<Triple> {
    let needle = filters.search.to_lowercase();
    triples
        .iter()
        .filter(|triple| matches(triple, filters, &needle))
        .cloned()
        .collect()
}

/// Distinct values available for one column's filter picker.
///
/// The queried column's own filter is ignored so that selecting `A` still
/// shows `B` as choosable; the other columns' filters and the search apply.
/// Results are sorted and truncated to `cap`.
pub fn candidate_values(
    triples: &[Triple],
    filters: &FilterState,
    column: Column,
    cap: usize,
) -> Vec<String> {
    let mut relaxed = filters.clone();
    relaxed.selected_mut(column).clear();

    let needle = relaxed.search.to_lowercase();
    let distinct: BTreeSet<&str> = triples
        .iter()
        .filter(|triple| matches(triple, &relaxed, &needle))
        .map(|triple| column_value(triple, column))
        .collect();

    distinct
        .into_iter()
        .take(cap)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::ObjectValue;

    fn sample() -> Vec<Triple> {
        vec![
            Triple::new("urn:a", "urn:knows", ObjectValue::uri("urn:b")),
            Triple::new("urn:a", "urn:name", ObjectValue::lang_literal("Alice", "en")),
            Triple::new("urn:b", "urn:name", ObjectValue::plain("Bob")),
            Triple::new("urn:c", "urn:age", ObjectValue::typed_literal("42", "urn:int")),
        ]
    }

    #[test]
    fn unrestricted_state_keeps_everything() {
        let triples = sample();
        let rows = apply_filters(&triples, &FilterState::new());
        assert_eq!(rows, triples);
    }

    #[test]
    fn search_is_case_insensitive_and_spans_all_fields() {
        let triples = sample();
        let mut filters = FilterState::new();

        filters.search = "ALICE".into();
        assert_eq!(apply_filters(&triples, &filters).len(), 1);

        filters.search = "urn:b".into();
        let rows = apply_filters(&triples, &filters);
        // hits both as subject and as resolved object
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn search_matches_resolved_object_of_either_shape() {
        let triples = sample();
        let mut filters = FilterState::new();
        filters.search = "bob".into();
        let rows = apply_filters(&triples, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "urn:b");
    }

    #[test]
    fn column_filters_are_conjunctive() {
        let triples = sample();
        let mut filters = FilterState::new();
        filters.subjects = vec!["urn:a".into()];
        filters.predicates = vec!["urn:name".into()];
        let rows = apply_filters(&triples, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].object.resolved(), "Alice");
    }

    #[test]
    fn column_filter_is_exact_membership_not_substring() {
        let triples = vec![
            Triple::new("urn:ab", "urn:p", ObjectValue::plain("x")),
            Triple::new("urn:a", "urn:p", ObjectValue::plain("y")),
        ];
        let mut filters = FilterState::new();
        filters.subjects = vec!["urn:a".into()];
        let rows = apply_filters(&triples, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subject, "urn:a");
    }

    #[test]
    fn filtering_preserves_document_order() {
        let triples = sample();
        let mut filters = FilterState::new();
        filters.predicates = vec!["urn:name".into(), "urn:age".into()];
        let rows = apply_filters(&triples, &filters);
        let subjects: Vec<&str> = rows.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(subjects, ["urn:a", "urn:b", "urn:c"]);
    }

    #[test]
    fn candidates_ignore_their_own_column_filter() {
        let triples = sample();
        let mut filters = FilterState::new();
        filters.subjects = vec!["urn:a".into()];

        let subjects = candidate_values(&triples, &filters, Column::Subject, 50);
        assert!(subjects.contains(&"urn:b".to_string()));
        assert!(subjects.contains(&"urn:c".to_string()));

        // other columns still see the subject restriction
        let predicates = candidate_values(&triples, &filters, Column::Predicate, 50);
        assert_eq!(predicates, vec!["urn:knows".to_string(), "urn:name".to_string()]);
    }

    #[test]
    fn candidates_are_sorted_distinct_and_capped() {
        let triples: Vec<Triple> = (0..80)
            .map(|n| {
                Triple::new(
                    format!("urn:s{n:02}"),
                    "urn:p",
                    ObjectValue::plain("same"),
                )
            })
            .collect();

        let all = candidate_values(&triples, &FilterState::new(), Column::Subject, 200);
        assert_eq!(all.len(), 80);
        assert!(all.windows(2).all(|w| w[0] < w[1]));

        let capped = candidate_values(&triples, &FilterState::new(), Column::Subject, 50);
        assert_eq!(capped.len(), 50);
        assert_eq!(capped, all[..50]);

        let objects = candidate_values(&triples, &FilterState::new(), Column::Object, 50);
        assert_eq!(objects, vec!["same".to_string()]);
    }

    #[test]
    fn cap_never_affects_row_filtering() {
        let triples: Vec<Triple> = (0..80)
            .map(|n| Triple::new(format!("urn:s{n}"), "urn:p", ObjectValue::plain("v")))
            .collect();
        let rows = apply_filters(&triples, &FilterState::new());
        assert_eq!(rows.len(), 80);
    }
}
