//! Category overview of a triple list.
//!
//! Backs the entity browser: how many distinct subjects, predicates, and
//! object entities a (possibly filtered) triple list contains, and the
//! sorted entity listing for one category. Literal objects are attributes,
//! not entities, so the object category only counts linkable values.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::filter::Column;
use crate::term;
use crate::triple::Triple;

/// Distinct-value counts per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    /// Total triples considered.
    pub triples: usize,
    pub subjects: usize,
    pub predicates: usize,
    /// Linkable object values only.
    pub objects: usize,
}

/// Count distinct values in each category.
pub fn category_counts(triples: &[Triple]) -> CategoryCounts {
    let mut subjects = BTreeSet::new();
    let mut predicates = BTreeSet::new();
    let mut objects = BTreeSet::new();

    for triple in triples {
        subjects.insert(triple.subject.as_str());
        predicates.insert(triple.predicate.as_str());
        let object = triple.object.resolved();
        if term::is_linkable_entity(object) {
            objects.insert(object);
        }
    }

    CategoryCounts {
        triples: triples.len(),
        subjects: subjects.len(),
        predicates: predicates.len(),
        objects: objects.len(),
    }
}

/// Sorted distinct entities of one category.
///
/// A non-empty `search` keeps only entities whose short label contains it,
/// case-insensitively. The object category lists linkable values only.
pub fn category_entities(triples: &[Triple], category: Column, search: &str) -> Vec<String> {
    let needle = search.to_lowercase();

    let distinct: BTreeSet<&str> = triples
        .iter()
        .filter_map(|triple| match category {
            Column::Subject => Some(triple.subject.as_str()),
            Column::Predicate => Some(triple.predicate.as_str()),
            Column::Object => {
                let object = triple.object.resolved();
                term::is_linkable_entity(object).then_some(object)
            }
        })
        .collect();

    distinct
        .into_iter()
        .filter(|entity| {
            needle.is_empty() || term::short_label(entity).to_lowercase().contains(&needle)
        })
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
            Triple::new("urn:a", "urn:name", ObjectValue::literal("Alice")),
            Triple::new("urn:b", "urn:knows", ObjectValue::uri("urn:a")),
        ]
    }

    #[test]
    fn counts_ignore_literal_objects() {
        let counts = category_counts(&sample());
        assert_eq!(counts.triples, 3);
        assert_eq!(counts.subjects, 2);
        assert_eq!(counts.predicates, 2);
        assert_eq!(counts.objects, 2);
    }

    #[test]
    fn entity_listing_is_sorted_distinct() {
        let subjects = category_entities(&sample(), Column::Subject, "");
        assert_eq!(subjects, vec!["urn:a".to_string(), "urn:b".to_string()]);

        let objects = category_entities(&sample(), Column::Object, "");
        assert_eq!(objects, vec!["urn:a".to_string(), "urn:b".to_string()]);
    }

    #[test]
    fn entity_search_matches_short_labels() {
        let triples = vec![
            Triple::new(
                "http://ex.org/Person",
                "urn:p",
                ObjectValue::uri("http://ex.org/Dog"),
            ),
            Triple::new(
                "http://ex.org/Place",
                "urn:p",
                ObjectValue::uri("http://ex.org/Cat"),
            ),
        ];

        let hits = category_entities(&triples, Column::Subject, "PER");
        assert_eq!(hits, vec!["http://ex.org/Person".to_string()]);

        let none = category_entities(&triples, Column::Object, "bird");
        assert!(none.is_empty());
    }
}
