//! Match graph assembly and export.
//!
//! Consumes the final match-candidate and tattoo-match collections and
//! produces the reviewable network: person nodes per registry, location
//! nodes, person-person edges carrying every similarity sub-score, and
//! person-location edges tagged with their relationship. The graph is
//! derived bottom-up and immutable once built; exports (GraphML, JSON)
//! are deterministic for identical inputs.

mod builder;
mod error;
mod graphml;
mod types;

pub use crate::builder::GraphBuilder;
pub use crate::error::GraphError;
pub use crate::graphml::to_graphml;
pub use crate::types::{Edge, MatchGraph, Node, NodeKind, UNKNOWN};

/// Serializes the graph as a `{nodes, edges}` JSON document.
pub fn to_json(graph: &MatchGraph) -> Result<String, GraphError> {
    Ok(serde_json::to_string_pretty(graph)?)
}
