//! Benchmarks for the filter and projection pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ontoscope::filter::{Column, FilterState, apply_filters, candidate_values};
use ontoscope::graph::{self, neighborhood::neighborhood};
use ontoscope::term::ObjectValue;
use ontoscope::triple::Triple;

/// Synthetic ontology: 500 entities, 20 predicates, a third of the objects
/// literal. Deterministic so runs are comparable.
fn corpus(n: usize) -> Vec<Triple> {
    (0..n)
        .map(|i| {
            let subject = format!("http://example.org/entity/e{}", i % 500);
            let predicate = format!("http://example.org/vocab/p{}", i % 20);
            let object = if i % 3 == 0 {
                ObjectValue::lang_literal(format!("label {i}"), "en")
            } else {
                ObjectValue::uri(format!("http://example.org/entity/e{}", (i * 7) % 500))
            };
            Triple::new(subject, predicate, object)
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let triples = corpus(50_000);
    let filters = FilterState {
        search: "e42".into(),
        ..Default::default()
    };

    c.bench_function("search_50k", |bench| {
        bench.iter(|| black_box(apply_filters(&triples, &filters)))
    });
}

fn bench_column_filter(c: &mut Criterion) {
    let triples = corpus(50_000);
    let mut filters = FilterState::default();
    filters.set_column(
        Column::Predicate,
        vec![
            "http://example.org/vocab/p3".into(),
            "http://example.org/vocab/p7".into(),
        ],
    );

    c.bench_function("column_filter_50k", |bench| {
        bench.iter(|| black_box(apply_filters(&triples, &filters)))
    });
}

fn bench_candidates(c: &mut Criterion) {
    let triples = corpus(50_000);
    let filters = FilterState {
        search: "entity".into(),
        ..Default::default()
    };

    c.bench_function("candidates_50k", |bench| {
        bench.iter(|| black_box(candidate_values(&triples, &filters, Column::Subject, 50)))
    });
}

fn bench_project(c: &mut Criterion) {
    let triples = corpus(50_000);

    c.bench_function("project_50k", |bench| {
        bench.iter(|| black_box(graph::project(&triples, None)))
    });
}

fn bench_neighborhood(c: &mut Criterion) {
    let triples = corpus(50_000);
    let projected = graph::project(&triples, Some("http://example.org/entity/e42"));

    c.bench_function("neighborhood_50k", |bench| {
        bench.iter(|| black_box(neighborhood(&projected, "http://example.org/entity/e42")))
    });
}

criterion_group!(
    benches,
    bench_search,
    bench_column_filter,
    bench_candidates,
    bench_project,
    bench_neighborhood
);
criterion_main!(benches);
