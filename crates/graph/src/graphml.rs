//! GraphML serialization.
//!
//! Emits typed attribute keys followed by the node and edge data, in the
//! graph's insertion order with sorted attribute names, so identical
//! graphs serialize byte-identically.

use std::collections::BTreeSet;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::GraphError;
use crate::types::MatchGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// Serializes the graph to a GraphML document.
pub fn to_graphml(graph: &MatchGraph) -> Result<String, GraphError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    writer.write_event(Event::Start(root))?;

    let node_keys: BTreeSet<&str> = graph
        .nodes()
        .iter()
        .flat_map(|n| n.attrs.keys().map(String::as_str))
        .collect();
    let edge_keys: BTreeSet<&str> = graph
        .edges()
        .iter()
        .flat_map(|e| e.attrs.keys().map(String::as_str))
        .collect();
    for key in &node_keys {
        write_key(&mut writer, "node", key)?;
    }
    for key in &edge_keys {
        write_key(&mut writer, "edge", key)?;
    }

    let mut graph_el = BytesStart::new("graph");
    graph_el.push_attribute(("id", "G"));
    graph_el.push_attribute(("edgedefault", "undirected"));
    writer.write_event(Event::Start(graph_el))?;

    for node in graph.nodes() {
        let mut node_el = BytesStart::new("node");
        node_el.push_attribute(("id", node.id.as_str()));
        writer.write_event(Event::Start(node_el))?;
        for (name, value) in &node.attrs {
            write_data(&mut writer, "node", name, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for edge in graph.edges() {
        let mut edge_el = BytesStart::new("edge");
        edge_el.push_attribute(("source", edge.source.as_str()));
        edge_el.push_attribute(("target", edge.target.as_str()));
        writer.write_event(Event::Start(edge_el))?;
        for (name, value) in &edge.attrs {
            write_data(&mut writer, "edge", name, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn key_id(domain: &str, name: &str) -> String {
    format!("{}_{name}", &domain[..1])
}

fn write_key(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    domain: &str,
    name: &str,
) -> Result<(), GraphError> {
    let mut key = BytesStart::new("key");
    let id = key_id(domain, name);
    key.push_attribute(("id", id.as_str()));
    key.push_attribute(("for", domain));
    key.push_attribute(("attr.name", name));
    key.push_attribute(("attr.type", "string"));
    writer.write_event(Event::Empty(key))?;
    Ok(())
}

fn write_data(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    domain: &str,
    name: &str,
    value: &str,
) -> Result<(), GraphError> {
    let mut data = BytesStart::new("data");
    let id = key_id(domain, name);
    data.push_attribute(("key", id.as_str()));
    writer.write_event(Event::Start(data))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use matcher::TattooMatch;

    fn sample_graph() -> MatchGraph {
        GraphBuilder::new()
            .add_tattoo_matches(&[TattooMatch {
                missing_id: "M-1".into(),
                body_id: "B-1".into(),
                missing_description: "CRUZ EN BRAZO".into(),
                body_description: "CRUZ EN BRAZO".into(),
                missing_location: "BRAZO DERECHO".into(),
                body_location: "BRAZO DERECHO".into(),
                text_similarity: 1.0,
                location_similarity: 1.0,
                literal_match: false,
                score: 0.8,
            }])
            .build()
    }

    #[test]
    fn graphml_document_has_keys_nodes_and_edges() {
        let xml = to_graphml(&sample_graph()).expect("serialize");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">"));
        assert!(xml.contains("attr.name=\"type\""));
        assert!(xml.contains("node id=\"missing_M-1\""));
        assert!(xml.contains("node id=\"loc_BRAZO_DERECHO\""));
        assert!(xml.contains("source=\"missing_M-1\" target=\"body_B-1\""));
        assert!(xml.contains("relationship"));
        assert!(xml.ends_with("</graphml>"));
    }

    #[test]
    fn serialization_is_deterministic() {
        let a = to_graphml(&sample_graph()).expect("serialize");
        let b = to_graphml(&sample_graph()).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn json_dump_lists_nodes_and_edges() {
        let graph = sample_graph();
        let json = crate::to_json(&graph).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert!(value["nodes"].as_array().is_some_and(|n| n.len() == 3));
        assert!(value["edges"].as_array().is_some_and(|e| !e.is_empty()));
        assert_eq!(value["nodes"][0]["attrs"]["name"], "Unknown");
    }
}
