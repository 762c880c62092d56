//! One-hop neighborhood extraction.
//!
//! Zooming into an entity keeps the focal node, every node sharing an edge
//! with it, and the edges running among that kept set. This is strictly one
//! hop, not a connected-component walk: a neighbor's own further edges are
//! dropped along with their far endpoints.

use std::collections::HashSet;

use crate::graph::{Node, NodeRole, OntologyGraph};
use crate::term;

/// Induced subgraph of `focal` and its direct neighbors.
///
/// A focal id the graph does not contain is not an error: the result is a
/// lone phantom node carrying the requested id, so callers can still render
/// the empty zoom state.
pub fn neighborhood(graph: &OntologyGraph, focal: &str) -> OntologyGraph {
    if !graph.contains_node(focal) {
        return OntologyGraph {
            nodes: vec![Node {
                id: focal.to_string(),
                label: term::short_label(focal).to_string(),
                role: NodeRole::Object,
                weight: 0,
                selected: true,
            }],
            edges: Vec::new(),
        };
    }

    let mut keep: HashSet<&str> = HashSet::new();
    keep.insert(focal);
    for edge in &graph.edges {
        if edge.source == focal {
            keep.insert(&edge.target);
        }
        if edge.target == focal {
            keep.insert(&edge.source);
        }
    }

    let nodes = graph
        .nodes
        .iter()
        .filter(|node| keep.contains(node.id.as_str()))
        .cloned()
        .collect();
    let edges = graph
        .edges
        .iter()
        .filter(|edge| {
            keep.contains(edge.source.as_str()) && keep.contains(edge.target.as_str())
        })
        .cloned()
        .collect();

    OntologyGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeRelation, project};
    use crate::term::ObjectValue;
    use crate::triple::Triple;

    fn sample_graph() -> OntologyGraph {
        project(
            &[
                Triple::new(
                    "http://ex.org/A",
                    "http://ex.org/knows",
                    ObjectValue::uri("http://ex.org/B"),
                ),
                Triple::new(
                    "http://ex.org/A",
                    "http://ex.org/name",
                    ObjectValue::literal("Alice"),
                ),
            ],
            None,
        )
    }

    #[test]
    fn focal_keeps_only_direct_neighbors() {
        let sub = neighborhood(&sample_graph(), "http://ex.org/B");

        let ids: Vec<&str> = sub.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["http://ex.org/knows", "http://ex.org/B"]);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.edges[0].source, "http://ex.org/knows");
        assert_eq!(sub.edges[0].target, "http://ex.org/B");
        assert_eq!(sub.edges[0].relation, EdgeRelation::PointsTo);
    }

    #[test]
    fn extraction_is_one_hop_not_a_component_walk() {
        let graph = project(
            &[
                Triple::new("urn:a", "urn:p", ObjectValue::uri("urn:b")),
                Triple::new("urn:b", "urn:q", ObjectValue::uri("urn:c")),
            ],
            None,
        );

        let sub = neighborhood(&graph, "urn:b");
        let ids: Vec<&str> = sub.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["urn:p", "urn:b", "urn:q"]);
        // q survives as a neighbor but its edge onward to c does not
        assert!(sub.edges.iter().all(|e| e.target != "urn:c"));
        assert!(!sub.contains_node("urn:a"));
        assert!(!sub.contains_node("urn:c"));
    }

    #[test]
    fn neighbor_membership_is_symmetric() {
        let graph = sample_graph();
        for edge in &graph.edges {
            let from_source = neighborhood(&graph, &edge.source);
            assert!(from_source.contains_node(&edge.target));
            let from_target = neighborhood(&graph, &edge.target);
            assert!(from_target.contains_node(&edge.source));
        }
    }

    #[test]
    fn absent_focal_yields_a_phantom_node() {
        let sub = neighborhood(&sample_graph(), "http://ex.org/Nobody");
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);

        let phantom = &sub.nodes[0];
        assert_eq!(phantom.id, "http://ex.org/Nobody");
        assert_eq!(phantom.label, "Nobody");
        assert_eq!(phantom.weight, 0);
        assert!(phantom.selected);
    }
}
