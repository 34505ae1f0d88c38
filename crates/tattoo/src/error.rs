use thiserror::Error;

/// Errors produced by the tattoo extraction layer.
///
/// Extraction itself is total (malformed narratives just yield fewer
/// fragments), so the only failure mode is a bad configuration caught at
/// start-up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TattooError {
    #[error("invalid tattoo configuration: {0}")]
    InvalidConfig(String),
}
