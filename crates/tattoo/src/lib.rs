//! Tattoo narrative normalization and categorization.
//!
//! Splits a person's raw tattoo narrative into one fragment per physically
//! distinct tattoo, then tags each fragment with body locations (with
//! window-associated laterality), lexicon categories, keywords, and any
//! quoted literal text. The stage is total: malformed narratives produce
//! fewer fragments, never errors.
//!
//! A "PALABRAS CLAVE:" trailer, when the upstream pre-tagging stage left
//! one in the narrative, is parsed into the keyword list and overrides the
//! lexicon-derived categories for that narrative's fragments.

mod category;
mod config;
mod error;
mod extract;
mod fold;
mod location;
mod split;
mod types;

pub use crate::category::{tag_categories, CategoryHit};
pub use crate::config::{CategoryEntry, CategoryStrategy, TattooConfig, TattooLexicon};
pub use crate::error::TattooError;
pub use crate::extract::{extract_quoted_literal, parse_keyword_trailer};
pub use crate::location::{tag_locations, LocationTag};
pub use crate::split::{normalize_quotes, split_fragments};
pub use crate::types::TattooRecord;

use tracing::debug;

/// Extracts every tattoo record from one person's raw narrative.
///
/// Returns an empty vector when the narrative yields no usable fragment.
pub fn extract_tattoos(person_id: &str, narrative: &str, cfg: &TattooConfig) -> Vec<TattooRecord> {
    let normalized = normalize_quotes(narrative);
    let (override_keywords, cleaned) = parse_keyword_trailer(&normalized);

    let fragments = split_fragments(&cleaned, cfg);
    let mut records = Vec::with_capacity(fragments.len());
    for description in fragments {
        let locations = tag_locations(&description, cfg);
        let literal_text = extract_quoted_literal(&description);

        let (categories, keywords) = match &override_keywords {
            // Pre-tagged keywords replace the lexicon's opinion wholesale.
            Some(supplied) => (supplied.clone(), Vec::new()),
            None => {
                let hits = tag_categories(&description, cfg);
                let categories = hits.iter().map(|h| h.category.clone()).collect();
                let keywords = hits.into_iter().flat_map(|h| h.terms).collect();
                (categories, keywords)
            }
        };

        records.push(TattooRecord {
            person_id: person_id.to_string(),
            description,
            locations,
            categories,
            keywords,
            literal_text,
        });
    }
    debug!(person = person_id, tattoos = records.len(), "narrative extracted");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_splits_into_tagged_records() {
        let cfg = TattooConfig::default();
        let records = extract_tattoos(
            "B-100",
            "1.- ROSA ROJA EN HOMBRO IZQUIERDO 2.- LEYENDA \"AMOR ETERNO\" EN ANTEBRAZO",
            &cfg,
        );
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].person_id, "B-100");
        assert!(records[0]
            .locations
            .iter()
            .any(|t| t.part == "HOMBRO" && t.laterality.as_deref() == Some("IZQUIERDO")));
        assert_eq!(records[0].literal_text, "");

        assert_eq!(records[1].literal_text, "AMOR ETERNO");
        assert!(records[1].categories.contains(&"Letras-Números".to_string()));
        assert!(records[1].locations.iter().any(|t| t.part == "ANTEBRAZO"));
    }

    #[test]
    fn fragments_are_substrings_of_the_cleaned_narrative() {
        let cfg = TattooConfig::default();
        let narrative = "TATUAJE EN FORMA DE CRUZ EN BRAZO DERECHO, ROSA EN PIERNA";
        let normalized = normalize_quotes(narrative);
        for record in extract_tattoos("M-1", narrative, &cfg) {
            assert!(
                normalized.contains(&record.description),
                "{} not a substring",
                record.description
            );
        }
    }

    #[test]
    fn keyword_trailer_overrides_lexicon_categories() {
        let cfg = TattooConfig::default();
        let records = extract_tattoos(
            "B-200",
            "CRUZ EN BRAZO PALABRAS CLAVE: simbolo religioso, cruz",
            &cfg,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].categories,
            vec!["simbolo religioso".to_string(), "cruz".to_string()]
        );
        assert!(records[0].keywords.is_empty());
    }

    #[test]
    fn empty_narrative_yields_no_records() {
        let cfg = TattooConfig::default();
        assert!(extract_tattoos("M-2", "   ", &cfg).is_empty());
        assert!(extract_tattoos("M-2", "12", &cfg).is_empty());
    }

    #[test]
    fn combined_features_collects_every_axis() {
        let cfg = TattooConfig::default();
        let records = extract_tattoos("B-300", "LEYENDA \"MARIA\" EN ANTEBRAZO DERECHO", &cfg);
        assert_eq!(records.len(), 1);
        let features = records[0].combined_features();
        assert!(features.contains("ANTEBRAZO DERECHO"));
        assert!(features.contains("MARIA"));
        assert!(features.contains("Letras-Números"));
    }
}
