//! Bottom-up graph assembly from the final match collections.

use std::collections::BTreeMap;

use matcher::{MatchCandidate, TattooMatch};
use registry::AgeValue;
use tracing::info;

use crate::types::{Edge, MatchGraph, Node, NodeKind, UNKNOWN};

fn missing_node_id(id: &str) -> String {
    format!("missing_{id}")
}

fn body_node_id(id: &str) -> String {
    format!("body_{id}")
}

fn location_node_id(label: &str) -> String {
    format!("loc_{}", label.replace(' ', "_"))
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

fn age_attr(age: &AgeValue) -> String {
    match age {
        AgeValue::Unknown => UNKNOWN.to_string(),
        known => known.to_string(),
    }
}

/// Assembles a [`MatchGraph`] from person candidates and tattoo matches.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: MatchGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds person nodes and person-person edges for attribute-level
    /// candidates. Edge attributes carry the aggregate score, the joined
    /// reasons, and the day-count metadata.
    pub fn add_person_candidates(mut self, candidates: &[MatchCandidate]) -> Self {
        for candidate in candidates {
            let missing_id = missing_node_id(&candidate.missing_id);
            let body_id = body_node_id(&candidate.body_id);
            self.graph.ensure_node(person_node(
                &missing_id,
                NodeKind::Missing,
                &candidate.missing_name,
                &age_attr(&candidate.missing_age),
                &candidate.missing_location,
            ));
            self.graph.ensure_node(person_node(
                &body_id,
                NodeKind::Body,
                &candidate.body_name,
                &age_attr(&candidate.body_age),
                &candidate.body_location,
            ));

            let mut attrs = BTreeMap::new();
            attrs.insert("score".to_string(), format!("{:.3}", candidate.score));
            attrs.insert("reasons".to_string(), or_unknown(&candidate.reasons()));
            attrs.insert("days_between".to_string(), candidate.days_between.to_string());
            for contribution in &candidate.contributions {
                attrs.insert(
                    format!("{}_score", contribution.attribute),
                    format!("{:.3}", contribution.value),
                );
            }
            self.graph.upsert_edge(Edge {
                source: missing_id,
                target: body_id,
                attrs,
            });
        }
        self
    }

    /// Adds person nodes, tattoo-scored person-person edges, and
    /// person-location edges for tattoo matches. Location relationships
    /// are tagged `found_at` on the missing side and `located_at` on the
    /// body side.
    pub fn add_tattoo_matches(mut self, matches: &[TattooMatch]) -> Self {
        for tattoo_match in matches {
            let missing_id = missing_node_id(&tattoo_match.missing_id);
            let body_id = body_node_id(&tattoo_match.body_id);
            self.graph.ensure_node(tattoo_person_node(
                &missing_id,
                NodeKind::Missing,
                &tattoo_match.missing_description,
            ));
            self.graph.ensure_node(tattoo_person_node(
                &body_id,
                NodeKind::Body,
                &tattoo_match.body_description,
            ));

            let mut attrs = BTreeMap::new();
            attrs.insert(
                "text_similarity".to_string(),
                format!("{:.3}", tattoo_match.text_similarity),
            );
            attrs.insert(
                "location_similarity".to_string(),
                format!("{:.3}", tattoo_match.location_similarity),
            );
            attrs.insert(
                "literal_match".to_string(),
                u8::from(tattoo_match.literal_match).to_string(),
            );
            attrs.insert("score".to_string(), format!("{:.3}", tattoo_match.score));
            self.graph.upsert_edge(Edge {
                source: missing_id.clone(),
                target: body_id.clone(),
                attrs,
            });

            self.link_locations(&missing_id, &tattoo_match.missing_location, "found_at");
            self.link_locations(&body_id, &tattoo_match.body_location, "located_at");
        }
        self
    }

    fn link_locations(&mut self, person_node_id: &str, locations: &str, relationship: &str) {
        for label in locations.split(',').map(str::trim).filter(|l| !l.is_empty()) {
            let location_id = location_node_id(label);
            let mut attrs = BTreeMap::new();
            attrs.insert("type".to_string(), NodeKind::Location.as_str().to_string());
            attrs.insert("name".to_string(), label.to_string());
            self.graph.ensure_node(Node {
                id: location_id.clone(),
                kind: NodeKind::Location,
                attrs,
            });

            let mut edge_attrs = BTreeMap::new();
            edge_attrs.insert("relationship".to_string(), relationship.to_string());
            self.graph.upsert_edge(Edge {
                source: person_node_id.to_string(),
                target: location_id,
                attrs: edge_attrs,
            });
        }
    }

    pub fn build(self) -> MatchGraph {
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "match graph assembled"
        );
        self.graph
    }
}

fn person_node(id: &str, kind: NodeKind, name: &str, age: &str, location: &str) -> Node {
    let mut attrs = BTreeMap::new();
    attrs.insert("type".to_string(), kind.as_str().to_string());
    attrs.insert("name".to_string(), or_unknown(name));
    attrs.insert("age".to_string(), or_unknown(age));
    attrs.insert("location".to_string(), or_unknown(location));
    Node {
        id: id.to_string(),
        kind,
        attrs,
    }
}

fn tattoo_person_node(id: &str, kind: NodeKind, description: &str) -> Node {
    let mut attrs = BTreeMap::new();
    attrs.insert("type".to_string(), kind.as_str().to_string());
    attrs.insert("name".to_string(), UNKNOWN.to_string());
    attrs.insert("age".to_string(), UNKNOWN.to_string());
    attrs.insert("location".to_string(), UNKNOWN.to_string());
    attrs.insert("description".to_string(), or_unknown(description));
    Node {
        id: id.to_string(),
        kind,
        attrs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher::{Contribution, ScoreAttribute};
    use registry::AgeValue;

    fn candidate(missing_id: &str, body_id: &str, score: f64) -> MatchCandidate {
        MatchCandidate {
            missing_id: missing_id.into(),
            body_id: body_id.into(),
            score,
            contributions: vec![Contribution {
                attribute: ScoreAttribute::Name,
                value: score,
                reason: "name similarity: 0.90".into(),
            }],
            days_between: 42,
            missing_name: "JUAN PEREZ".into(),
            missing_age: AgeValue::Point(30),
            missing_date: None,
            missing_location: "ZAPOPAN".into(),
            body_name: String::new(),
            body_age: AgeValue::Unknown,
            body_date: None,
            body_location: "IJCF ZAPOPAN NORTE".into(),
        }
    }

    fn tattoo_match(missing_id: &str, body_id: &str) -> TattooMatch {
        TattooMatch {
            missing_id: missing_id.into(),
            body_id: body_id.into(),
            missing_description: "CRUZ EN BRAZO".into(),
            body_description: "CRUZ EN BRAZO".into(),
            missing_location: "BRAZO DERECHO".into(),
            body_location: "BRAZO DERECHO, HOMBRO".into(),
            text_similarity: 0.9,
            location_similarity: 1.0,
            literal_match: false,
            score: 0.75,
        }
    }

    #[test]
    fn person_candidates_produce_nodes_and_scored_edges() {
        let graph = GraphBuilder::new()
            .add_person_candidates(&[candidate("M-1", "B-1", 1.8)])
            .build();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        let missing = graph.node("missing_M-1").expect("missing node");
        assert_eq!(missing.kind, NodeKind::Missing);
        assert_eq!(missing.attrs.get("name").map(String::as_str), Some("JUAN PEREZ"));

        // Absent attributes surface as the explicit Unknown marker.
        let body = graph.node("body_B-1").expect("body node");
        assert_eq!(body.attrs.get("name").map(String::as_str), Some(UNKNOWN));
        assert_eq!(body.attrs.get("age").map(String::as_str), Some(UNKNOWN));

        let edge = &graph.edges()[0];
        assert_eq!(edge.attrs.get("score").map(String::as_str), Some("1.800"));
        assert_eq!(edge.attrs.get("days_between").map(String::as_str), Some("42"));
        assert!(edge.attrs.contains_key("name_score"));
    }

    #[test]
    fn tattoo_matches_link_locations_with_relationship_tags() {
        let graph = GraphBuilder::new()
            .add_tattoo_matches(&[tattoo_match("M-1", "B-1")])
            .build();
        // 2 persons + 2 distinct locations.
        assert_eq!(graph.node_count(), 4);
        assert!(graph.node("loc_BRAZO_DERECHO").is_some());
        assert!(graph.node("loc_HOMBRO").is_some());

        let found_at: Vec<_> = graph
            .edges()
            .iter()
            .filter(|e| e.attrs.get("relationship").map(String::as_str) == Some("found_at"))
            .collect();
        assert_eq!(found_at.len(), 1);
        assert_eq!(found_at[0].source, "missing_M-1");

        let located_at: Vec<_> = graph
            .edges()
            .iter()
            .filter(|e| e.attrs.get("relationship").map(String::as_str) == Some("located_at"))
            .collect();
        assert_eq!(located_at.len(), 2);
    }

    #[test]
    fn duplicate_person_pairs_keep_one_edge() {
        let graph = GraphBuilder::new()
            .add_person_candidates(&[candidate("M-1", "B-1", 1.0), candidate("M-1", "B-1", 2.0)])
            .build();
        assert_eq!(graph.edge_count(), 1);
        // Last write wins, matching overwrite semantics of the export.
        assert_eq!(
            graph.edges()[0].attrs.get("score").map(String::as_str),
            Some("2.000")
        );
    }

    #[test]
    fn nodes_deduplicate_across_sources() {
        let graph = GraphBuilder::new()
            .add_person_candidates(&[candidate("M-1", "B-1", 1.0)])
            .add_tattoo_matches(&[tattoo_match("M-1", "B-1")])
            .build();
        // Person nodes shared; only location nodes are added on top.
        assert_eq!(graph.node_count(), 4);
        // The tattoo edge overwrote the person-candidate edge attributes.
        let person_edge = graph
            .edges()
            .iter()
            .find(|e| e.source == "missing_M-1" && e.target == "body_B-1")
            .expect("person edge");
        assert!(person_edge.attrs.contains_key("text_similarity"));
    }
}
