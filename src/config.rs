//! Pipeline-wide configuration.
//!
//! One serde-loadable struct aggregating every stage's settings, so a
//! deployment configures a whole run from a single JSON document. Every
//! stage validates its own section; [`PipelineConfig::validate`] runs all
//! of them before any scoring begins.

use matcher::{MatchConfig, TattooMatchConfig};
use registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use tattoo::TattooConfig;

use crate::PipelineError;

/// Aggregated configuration for an end-to-end matching run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub registry: RegistryConfig,
    pub tattoo: TattooConfig,
    pub matching: MatchConfig,
    pub tattoo_matching: TattooMatchConfig,
}

impl PipelineConfig {
    /// Validates every stage's configuration. Intended for process
    /// start-up: configuration errors must surface before any record is
    /// read or scored.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.registry.validate()?;
        self.tattoo.validate()?;
        self.matching.validate()?;
        self.tattoo_matching.validate()?;
        Ok(())
    }
}
