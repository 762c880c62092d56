//! Graph projection: from a flat triple list to a node/edge structure.
//!
//! The projection is three-tier. Every triple contributes its subject and
//! predicate as nodes joined by a `has` edge; when the object resolves to a
//! linkable entity it becomes a node too, reached from the predicate by a
//! `pointsTo` edge. Literal objects stay off the canvas entirely. Predicates
//! are first-class nodes, so relation types stay inspectable in the rendered
//! graph at the cost of doubling the edge count against a plain
//! subject-to-object view.
//!
//! - nodes are deduplicated by id; the first occurrence fixes the role
//! - node weight counts every triple position that touched the id
//! - duplicate edges are kept unless [`ProjectionOptions`] says otherwise

pub mod neighborhood;
pub mod stats;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::term;
use crate::triple::Triple;

/// Which triple position first produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Subject,
    Predicate,
    Object,
}

/// A projected graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical string value: the subject/predicate string, or the
    /// resolved object string.
    pub id: String,
    /// Compact display name derived via [`term::short_label`].
    pub label: String,
    pub role: NodeRole,
    /// How many triple positions referenced this id.
    pub weight: usize,
    /// Marks the focal entity for the renderer.
    pub selected: bool,
}

/// Relation carried on a projected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeRelation {
    Has,
    PointsTo,
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: EdgeRelation,
}

/// Node/edge output of the projection, shaped for a force-directed canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntologyGraph {
    pub nodes: Vec<Node>,
    #[serde(rename = "links")]
    pub edges: Vec<Edge>,
}

impl OntologyGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Knobs for [`project_with`].
///
/// Edge multiplicity carries no meaning in this projection, so renderers
/// that dislike overdraw can collapse duplicates; the default keeps them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionOptions {
    pub dedupe_edges: bool,
}

struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    seen_edges: HashSet<(String, String, EdgeRelation)>,
    options: ProjectionOptions,
}

impl GraphBuilder {
    fn new(options: ProjectionOptions) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            seen_edges: HashSet::new(),
            options,
        }
    }

    fn touch_node(&mut self, id: &str, role: NodeRole, focal: Option<&str>) {
        if let Some(&at) = self.index.get(id) {
            self.nodes[at].weight += 1;
            return;
        }
        self.index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(Node {
            id: id.to_string(),
            label: term::short_label(id).to_string(),
            role,
            weight: 1,
            selected: focal == Some(id),
        });
    }

    fn add_edge(&mut self, source: &str, target: &str, relation: EdgeRelation) {
        if self.options.dedupe_edges {
            let key = (source.to_string(), target.to_string(), relation);
            if !self.seen_edges.insert(key) {
                return;
            }
        }
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            relation,
        });
    }

    fn finish(self) -> OntologyGraph {
        OntologyGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Project triples into a graph with default options.
pub fn project(triples: &[Triple], focal: Option<&str>) -> OntologyGraph {
    project_with(triples, focal, ProjectionOptions::default())
}

/// Project triples into a graph.
///
/// Deterministic: node order follows first appearance, edge order follows
/// the triple list. Re-running on the same input yields the same graph.
pub fn project_with(
    triples: &[Triple],
    focal: Option<&str>,
    options: ProjectionOptions,
) -> OntologyGraph {
    let mut builder = GraphBuilder::new(options);

    for triple in triples {
        builder.touch_node(&triple.subject, NodeRole::Subject, focal);
        builder.touch_node(&triple.predicate, NodeRole::Predicate, focal);
        builder.add_edge(&triple.subject, &triple.predicate, EdgeRelation::Has);

        let object = triple.object.resolved();
        if term::is_linkable_entity(object) {
            builder.touch_node(object, NodeRole::Object, focal);
            builder.add_edge(&triple.predicate, object, EdgeRelation::PointsTo);
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::ObjectValue;

    fn knows_and_name() -> Vec<Triple> {
        vec![
            Triple::new(
                "http://ex.org/A",
                "http://ex.org/knows",
                ObjectValue::plain("http://ex.org/B"),
            ),
            Triple::new(
                "http://ex.org/A",
                "http://ex.org/name",
                ObjectValue::literal("Alice"),
            ),
        ]
    }

    #[test]
    fn literals_never_become_nodes() {
        let graph = project(&knows_and_name(), None);

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "http://ex.org/A",
                "http://ex.org/knows",
                "http://ex.org/B",
                "http://ex.org/name",
            ]
        );
        assert!(!graph.contains_node("Alice"));

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.edges,
            [
                Edge {
                    source: "http://ex.org/A".into(),
                    target: "http://ex.org/knows".into(),
                    relation: EdgeRelation::Has,
                },
                Edge {
                    source: "http://ex.org/knows".into(),
                    target: "http://ex.org/B".into(),
                    relation: EdgeRelation::PointsTo,
                },
                Edge {
                    source: "http://ex.org/A".into(),
                    target: "http://ex.org/name".into(),
                    relation: EdgeRelation::Has,
                },
            ]
        );
    }

    #[test]
    fn projection_is_deterministic() {
        let triples = knows_and_name();
        assert_eq!(project(&triples, None), project(&triples, None));
    }

    #[test]
    fn node_labels_are_short_forms() {
        let graph = project(&knows_and_name(), None);
        let a = graph.node("http://ex.org/A").unwrap();
        assert_eq!(a.label, "A");
    }

    #[test]
    fn first_seen_role_wins_and_weight_accumulates() {
        let triples = vec![Triple::new(
            "urn:x",
            "urn:x",
            ObjectValue::uri("urn:x"),
        )];
        let graph = project(&triples, None);

        assert_eq!(graph.node_count(), 1);
        let x = graph.node("urn:x").unwrap();
        assert_eq!(x.role, NodeRole::Subject);
        assert_eq!(x.weight, 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicate_edges_kept_by_default() {
        let t = Triple::new("urn:a", "urn:p", ObjectValue::uri("urn:b"));
        let triples = vec![t.clone(), t];

        let graph = project(&triples, None);
        assert_eq!(graph.edge_count(), 4);

        let deduped = project_with(
            &triples,
            None,
            ProjectionOptions { dedupe_edges: true },
        );
        assert_eq!(deduped.edge_count(), 2);
        assert_eq!(deduped.nodes, graph.nodes);
    }

    #[test]
    fn focal_id_marks_the_node_selected() {
        let graph = project(&knows_and_name(), Some("http://ex.org/B"));
        assert!(graph.node("http://ex.org/B").unwrap().selected);
        assert!(!graph.node("http://ex.org/A").unwrap().selected);
    }

    #[test]
    fn blank_node_objects_stay_off_the_canvas() {
        let triples = vec![Triple::new("urn:a", "urn:p", ObjectValue::plain("_:b0"))];
        let graph = project(&triples, None);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn graph_serializes_with_canvas_field_names() {
        let graph = project(&knows_and_name(), None);
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json.get("links").is_some());
        assert_eq!(json["links"][1]["relation"], "pointsTo");
        assert_eq!(json["nodes"][0]["role"], "subject");
    }
}
