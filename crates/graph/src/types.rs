//! The derived match-graph structure.
//!
//! Purely derived from the final candidate and tattoo-match sets, never
//! mutated in place once built. Attribute maps are ordered so every
//! serialization of the same graph is byte-identical.

use std::collections::BTreeMap;

use fxhash::FxHashMap;
use serde::Serialize;

/// Marker used for attributes the registries did not provide, so
/// downstream consumers can tell "no data" from "zero similarity".
pub const UNKNOWN: &str = "Unknown";

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Missing,
    Body,
    Location,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Missing => "missing",
            NodeKind::Body => "body",
            NodeKind::Location => "location",
        }
    }
}

/// A graph node: one per distinct person id per registry, one per
/// distinct normalized location string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub attrs: BTreeMap<String, String>,
}

/// An edge carrying the originating match's scores (person-person) or a
/// relationship tag (person-location).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub attrs: BTreeMap<String, String>,
}

/// The assembled match graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    node_index: FxHashMap<String, usize>,
    #[serde(skip)]
    edge_index: FxHashMap<(String, String), usize>,
}

impl MatchGraph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts a node unless one with the same id exists; first insertion
    /// wins, matching the builder's bottom-up construction order.
    pub(crate) fn ensure_node(&mut self, node: Node) {
        if self.node_index.contains_key(&node.id) {
            return;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Inserts or replaces the edge between `source` and `target`. A later
    /// edge for the same pair overwrites the earlier attributes.
    pub(crate) fn upsert_edge(&mut self, edge: Edge) {
        let key = (edge.source.clone(), edge.target.clone());
        match self.edge_index.get(&key) {
            Some(&index) => self.edges[index] = edge,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }
}
