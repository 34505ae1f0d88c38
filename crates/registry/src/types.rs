//! Core record types for the two registries.
//!
//! The raw `*Row` structs mirror the tabular files (including their legacy
//! Spanish column headers, accepted through serde aliases). The canonical
//! `MissingPerson` / `Body` structs are what the matching stages consume.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::normalize::{clean_text, normalize_sex, parse_age, parse_date};

/// An age as reported by a registry.
///
/// Intake records often carry estimated ranges ("66-70 años"); report
/// records usually carry a single integer. A bare integer is treated as a
/// degenerate one-point interval so the age scorer handles both shapes
/// uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AgeValue {
    Point(u32),
    Range { min: u32, max: u32 },
    #[default]
    Unknown,
}

impl AgeValue {
    /// Inclusive numeric bounds, or `None` when the age is unknown.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match *self {
            AgeValue::Point(years) => Some((years, years)),
            AgeValue::Range { min, max } => Some((min, max)),
            AgeValue::Unknown => None,
        }
    }

    /// Widens both ends of the interval by `tolerance` years.
    /// Unknown stays unknown.
    pub fn widened(&self, tolerance: u32) -> AgeValue {
        match self.bounds() {
            Some((min, max)) => AgeValue::Range {
                min: min.saturating_sub(tolerance),
                max: max.saturating_add(tolerance),
            },
            None => AgeValue::Unknown,
        }
    }

    /// True when the two intervals overlap. Unknown overlaps nothing.
    pub fn overlaps(&self, other: &AgeValue) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => a_min <= b_max && b_min <= a_max,
            _ => false,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AgeValue::Unknown)
    }
}

impl fmt::Display for AgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AgeValue::Point(years) => write!(f, "{years}"),
            AgeValue::Range { min, max } => write!(f, "{min}-{max}"),
            AgeValue::Unknown => write!(f, "unknown"),
        }
    }
}

/// Raw missing-person row as read from the registry export.
#[derive(Debug, Clone, Deserialize)]
pub struct MissingPersonRow {
    #[serde(alias = "id_cedula_busqueda")]
    pub id: String,
    #[serde(alias = "sexo", default)]
    pub sex: Option<String>,
    #[serde(alias = "edad_momento_desaparicion", default)]
    pub age: Option<String>,
    #[serde(alias = "nombre_completo", default)]
    pub full_name: Option<String>,
    #[serde(alias = "fecha_desaparicion", default)]
    pub event_date: Option<String>,
    #[serde(alias = "municipio", default)]
    pub municipality: Option<String>,
    #[serde(alias = "tatuajes", alias = "Tatuajes", default)]
    pub tattoo_narrative: Option<String>,
    #[serde(alias = "condicion_localizacion", default)]
    pub status: Option<String>,
}

/// Raw body-intake row as read from the forensic export.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyRow {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Sexo", default)]
    pub sex: Option<String>,
    #[serde(alias = "Edad", default)]
    pub age: Option<String>,
    #[serde(alias = "Probable_nombre", default)]
    pub name: Option<String>,
    #[serde(alias = "Fecha_Ingreso", default)]
    pub intake_date: Option<String>,
    #[serde(alias = "Delegacion_IJCF", default)]
    pub jurisdiction: Option<String>,
    #[serde(alias = "tatuajes", alias = "Tatuajes", default)]
    pub tattoo_narrative: Option<String>,
}

/// Normalized missing-person record. Identifiers are opaque strings; the
/// matcher only ever reads these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingPerson {
    pub id: String,
    /// Canonical (trimmed, upper-cased) sex code.
    pub sex: String,
    pub age: AgeValue,
    pub full_name: String,
    /// Disappearance date; `None` means unknown and never satisfies a
    /// temporal predicate.
    pub event_date: Option<NaiveDate>,
    pub municipality: String,
    pub tattoo_narrative: Option<String>,
    /// Raw localization status, kept for auditing.
    pub status: Option<String>,
}

impl MissingPerson {
    /// Normalizes a raw row. Returns `None` only when the row has no usable
    /// identifier; every other malformed field degrades to its sentinel.
    pub fn from_row(row: MissingPersonRow, cfg: &RegistryConfig) -> Option<Self> {
        let id = row.id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        let narrative = cfg.clean_narrative(row.tattoo_narrative.as_deref());
        let status = row.status.as_deref().map(str::trim).filter(|s| !s.is_empty());
        Some(Self {
            id,
            sex: normalize_sex(row.sex.as_deref().unwrap_or_default()),
            age: parse_age(row.age.as_deref().unwrap_or_default()),
            full_name: clean_text(row.full_name.as_deref().unwrap_or_default(), &cfg.na_markers),
            event_date: parse_date(row.event_date.as_deref().unwrap_or_default(), &cfg.date_formats),
            municipality: clean_text(
                row.municipality.as_deref().unwrap_or_default(),
                &cfg.na_markers,
            ),
            tattoo_narrative: narrative,
            status: status.map(str::to_string),
        })
    }

    /// True when the record's status says the person was located alive and
    /// must be excluded from matching.
    pub fn located_alive(&self, cfg: &RegistryConfig) -> bool {
        self.status
            .as_deref()
            .map(|s| {
                let folded = s.trim().to_uppercase();
                cfg.alive_status_markers.iter().any(|m| folded == *m)
            })
            .unwrap_or(false)
    }
}

/// Normalized unidentified-body record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: String,
    /// Canonical (trimmed, upper-cased) sex code.
    pub sex: String,
    pub age: AgeValue,
    /// Probable name; may carry the registry's "no name assigned"
    /// placeholder, which the name scorer recognizes and skips.
    pub name: String,
    /// Forensic intake date; `None` means unknown and never satisfies a
    /// temporal predicate.
    pub intake_date: Option<NaiveDate>,
    pub jurisdiction: String,
    pub tattoo_narrative: Option<String>,
}

impl Body {
    /// Normalizes a raw row. Returns `None` only when the row has no usable
    /// identifier.
    pub fn from_row(row: BodyRow, cfg: &RegistryConfig) -> Option<Self> {
        let id = row.id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        let narrative = cfg.clean_narrative(row.tattoo_narrative.as_deref());
        Some(Self {
            id,
            sex: normalize_sex(row.sex.as_deref().unwrap_or_default()),
            age: parse_age(row.age.as_deref().unwrap_or_default()),
            name: clean_text(row.name.as_deref().unwrap_or_default(), &cfg.na_markers),
            intake_date: parse_date(
                row.intake_date.as_deref().unwrap_or_default(),
                &cfg.date_formats,
            ),
            jurisdiction: clean_text(
                row.jurisdiction.as_deref().unwrap_or_default(),
                &cfg.na_markers,
            ),
            tattoo_narrative: narrative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bounds_and_widening() {
        assert_eq!(AgeValue::Point(45).bounds(), Some((45, 45)));
        assert_eq!(
            AgeValue::Range { min: 66, max: 70 }.widened(10),
            AgeValue::Range { min: 56, max: 80 }
        );
        assert_eq!(AgeValue::Point(5).widened(10), AgeValue::Range { min: 0, max: 15 });
        assert_eq!(AgeValue::Unknown.widened(10), AgeValue::Unknown);
    }

    #[test]
    fn age_overlap_is_symmetric_and_unknown_never_overlaps() {
        let range = AgeValue::Range { min: 56, max: 80 };
        let point = AgeValue::Point(62);
        assert!(range.overlaps(&point));
        assert!(point.overlaps(&range));
        assert!(!AgeValue::Unknown.overlaps(&point));
        assert!(!point.overlaps(&AgeValue::Unknown));
    }

    #[test]
    fn missing_person_from_row_degrades_bad_fields() {
        let cfg = RegistryConfig::default();
        let row = MissingPersonRow {
            id: " M-001 ".into(),
            sex: Some(" hombre ".into()),
            age: Some("not a number".into()),
            full_name: Some("NA".into()),
            event_date: Some("31/31/2020".into()),
            municipality: Some("Zapopan".into()),
            tattoo_narrative: Some("No presenta".into()),
            status: None,
        };
        let person = MissingPerson::from_row(row, &cfg).expect("id present");
        assert_eq!(person.id, "M-001");
        assert_eq!(person.sex, "HOMBRE");
        assert_eq!(person.age, AgeValue::Unknown);
        assert_eq!(person.full_name, "");
        assert_eq!(person.event_date, None);
        assert_eq!(person.tattoo_narrative, None);
    }

    #[test]
    fn blank_id_rejects_row() {
        let cfg = RegistryConfig::default();
        let row = BodyRow {
            id: "   ".into(),
            sex: None,
            age: None,
            name: None,
            intake_date: None,
            jurisdiction: None,
            tattoo_narrative: None,
        };
        assert!(Body::from_row(row, &cfg).is_none());
    }

    #[test]
    fn located_alive_marker_detected() {
        let cfg = RegistryConfig::default();
        let mut person = MissingPerson {
            id: "M-1".into(),
            sex: "MUJER".into(),
            age: AgeValue::Point(30),
            full_name: "X".into(),
            event_date: None,
            municipality: "".into(),
            tattoo_narrative: None,
            status: Some("con vida".into()),
        };
        assert!(person.located_alive(&cfg));
        person.status = Some("SIN VIDA".into());
        assert!(!person.located_alive(&cfg));
    }
}
