use thiserror::Error;

/// Errors produced by the registry ingest layer.
///
/// Field-level problems are not errors: they degrade to sentinels and are
/// logged. These variants cover whole-file failures and start-up
/// configuration mistakes.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse registry table: {0}")]
    Csv(#[from] csv::Error),
    #[error("registry {registry} contains no usable records")]
    EmptyRegistry { registry: &'static str },
}
