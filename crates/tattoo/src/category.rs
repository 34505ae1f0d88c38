//! Lexicon-driven category and keyword tagging.

use serde::{Deserialize, Serialize};

use crate::config::{CategoryStrategy, TattooConfig};
use crate::fold::{contains_word, fold};

/// One matched category together with the lexicon terms that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHit {
    pub category: String,
    pub terms: Vec<String>,
}

/// Tags a fragment against the category lexicon. Matching is accent- and
/// case-insensitive on word boundaries. Categories are non-exclusive:
/// with the default strategy every matching category is kept; with
/// [`CategoryStrategy::FirstMatch`] only the first (in lexicon order).
pub fn tag_categories(fragment: &str, cfg: &TattooConfig) -> Vec<CategoryHit> {
    let folded = fold(fragment);
    let mut hits = Vec::new();

    for category in &cfg.lexicon.categories {
        let terms: Vec<String> = category
            .terms
            .iter()
            .filter(|term| contains_word(&folded, &fold(term)))
            .cloned()
            .collect();
        if terms.is_empty() {
            continue;
        }
        hits.push(CategoryHit {
            category: category.name.clone(),
            terms,
        });
        if cfg.category_strategy == CategoryStrategy::FirstMatch {
            break;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_can_match_several_categories() {
        let cfg = TattooConfig::default();
        let hits = tag_categories("CRUZ Y LEYENDA DE LA SANTA MUERTE", &cfg);
        let names: Vec<&str> = hits.iter().map(|h| h.category.as_str()).collect();
        assert!(names.contains(&"Simbolos"));
        assert!(names.contains(&"Letras-Números"));
        assert!(names.contains(&"Religiosos"));
    }

    #[test]
    fn first_match_strategy_stops_at_one() {
        let cfg = TattooConfig {
            category_strategy: CategoryStrategy::FirstMatch,
            ..TattooConfig::default()
        };
        let hits = tag_categories("CRUZ Y LEYENDA DE LA SANTA MUERTE", &cfg);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Letras-Números");
    }

    #[test]
    fn matched_terms_are_recorded() {
        let cfg = TattooConfig::default();
        let hits = tag_categories("corazón y estrella roja", &cfg);
        let simbolos = hits
            .iter()
            .find(|h| h.category == "Simbolos")
            .expect("simbolos hit");
        assert!(simbolos.terms.contains(&"corazón".to_string()));
        assert!(simbolos.terms.contains(&"estrella".to_string()));
    }

    #[test]
    fn accent_insensitive_matching() {
        let cfg = TattooConfig::default();
        let hits = tag_categories("DRAGON EN ESPALDA", &cfg);
        assert!(hits.iter().any(|h| h.category == "Animales"));
    }

    #[test]
    fn unmatched_fragment_gets_no_category() {
        let cfg = TattooConfig::default();
        assert!(tag_categories("XYZQ", &cfg).is_empty());
    }
}
