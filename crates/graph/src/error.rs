use thiserror::Error;

/// Errors produced while serializing a match graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to write graph XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to write graph output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}
