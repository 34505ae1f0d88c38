//! Registry ingest layer.
//!
//! Loads the two source registries (missing-person reports and
//! unidentified-body intake records) from tabular files, normalizes their
//! raw fields into comparable forms, and hands read-only record slices to
//! the matching stages.
//!
//! ## What we do
//!
//! - CSV ingest tolerant of the legacy column headers of both registries
//! - Date, age, sex, and free-text normalization with well-defined sentinels
//! - Exclusion of missing-person records whose status says the person was
//!   located alive
//!
//! Malformed field values never abort a load: unparseable dates become
//! "unknown" (and are excluded from temporal predicates downstream),
//! blank or NA-like text becomes the empty string, and unusable ages become
//! [`AgeValue::Unknown`]. Records are never mutated after loading.

mod config;
mod error;
mod io;
mod normalize;
mod types;

pub use crate::config::RegistryConfig;
pub use crate::error::RegistryError;
pub use crate::io::{
    load_bodies_from_path, load_bodies_from_reader, load_missing_from_path,
    load_missing_from_reader,
};
pub use crate::normalize::{clean_text, normalize_sex, parse_age, parse_date};
pub use crate::types::{AgeValue, Body, BodyRow, MissingPerson, MissingPersonRow};
