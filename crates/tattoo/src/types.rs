//! The per-tattoo record produced by extraction.

use serde::{Deserialize, Serialize};

use crate::location::LocationTag;

/// One physically distinct tattoo, derived from a person's narrative.
///
/// The description fragment is a strict substring of the cleaned-up
/// narrative it came from. Category tags are non-exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TattooRecord {
    /// Owning person id in its registry.
    pub person_id: String,
    /// Description fragment for this single tattoo.
    pub description: String,
    /// Tagged body locations, each with optional laterality.
    pub locations: Vec<LocationTag>,
    /// Matching category names.
    pub categories: Vec<String>,
    /// Lexicon terms (or narrative-supplied keywords) that fired.
    pub keywords: Vec<String>,
    /// Text found inside quotation marks, verbatim; empty when none.
    pub literal_text: String,
}

impl TattooRecord {
    /// Location tags rendered as comparable text ("BRAZO DERECHO, HOMBRO").
    pub fn location_text(&self) -> String {
        let labels: Vec<String> = self.locations.iter().map(LocationTag::label).collect();
        labels.join(", ")
    }

    /// The combined text the feature vector space is built over:
    /// description, locations, quoted literal, categories, and keywords.
    pub fn combined_features(&self) -> String {
        let mut parts: Vec<String> = vec![self.description.clone()];
        let locations = self.location_text();
        if !locations.is_empty() {
            parts.push(locations);
        }
        if !self.literal_text.is_empty() {
            parts.push(self.literal_text.clone());
        }
        if !self.categories.is_empty() {
            parts.push(self.categories.join(" "));
        }
        if !self.keywords.is_empty() {
            parts.push(self.keywords.join(" "));
        }
        parts.join(" ")
    }

    /// True when the tattoo resolves to exactly one body location.
    pub fn single_location(&self) -> Option<&LocationTag> {
        match self.locations.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
