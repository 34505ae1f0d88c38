//! Runtime configuration for registry ingest.
//!
//! [`RegistryConfig`] carries the sentinel vocabularies and date formats
//! the normalizer relies on. It is cheap to clone and serde-friendly so a
//! deployment can replace the marker lists without code changes.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Runtime configuration for registry loading and field normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Date formats tried in order by the date normalizer.
    pub date_formats: Vec<String>,
    /// Upper-cased markers that mean "no data" in free-text cells.
    pub na_markers: Vec<String>,
    /// Upper-cased markers that mean "no tattoos present" in a narrative.
    pub no_tattoo_markers: Vec<String>,
    /// Upper-cased localization statuses that exclude a missing-person
    /// record from matching (the person was found alive).
    pub alive_status_markers: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".into(),
                "%d/%m/%Y".into(),
                "%Y/%m/%d".into(),
            ],
            na_markers: vec!["NA".into(), "N/A".into(), "SIN DATO".into(), "NAN".into()],
            no_tattoo_markers: vec!["NO PRESENTA".into(), "NINGUNO".into()],
            alive_status_markers: vec!["CON VIDA".into()],
        }
    }
}

impl RegistryConfig {
    /// Validates internal consistency. Intended for process start-up,
    /// before any registry is read.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.date_formats.is_empty() {
            return Err(RegistryError::InvalidConfig(
                "date_formats must list at least one format".into(),
            ));
        }
        Ok(())
    }

    /// Cleans a tattoo narrative cell: trims, collapses NA markers and the
    /// "none present" sentinel to `None`.
    pub fn clean_narrative(&self, raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        let folded = trimmed.to_uppercase();
        if self.na_markers.iter().any(|m| folded == *m)
            || self.no_tattoo_markers.iter().any(|m| folded == *m)
        {
            return None;
        }
        Some(trimmed.to_string())
    }
}
