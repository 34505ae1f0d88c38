//! Body-location tagging.
//!
//! Descriptions are terse and positional, so laterality is associated by a
//! character window around the body-part hit rather than by parsing: the
//! window runs from `laterality_window_before` characters ahead of the hit
//! to `laterality_window_after` characters past its start, and the first
//! laterality term found in it wins.

use serde::{Deserialize, Serialize};

use crate::config::TattooConfig;
use crate::fold::fold;

/// A tagged body location with optional laterality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTag {
    /// Canonical body-part name as spelled in the lexicon.
    pub part: String,
    /// Laterality term found near the part name, if any.
    pub laterality: Option<String>,
}

impl LocationTag {
    /// Display form: "BRAZO DERECHO" or just "BRAZO".
    pub fn label(&self) -> String {
        match &self.laterality {
            Some(side) => format!("{} {side}", self.part),
            None => self.part.clone(),
        }
    }
}

/// Scans a fragment against the body-part vocabulary. Every part found is
/// kept (a fragment can describe several locations); parts that fold to
/// the same form are tagged once.
pub fn tag_locations(fragment: &str, cfg: &TattooConfig) -> Vec<LocationTag> {
    let folded = fold(fragment);
    let mut tags: Vec<LocationTag> = Vec::new();
    let mut seen_parts: Vec<String> = Vec::new();

    for part in &cfg.lexicon.body_parts {
        let folded_part = fold(part);
        let Some(pos) = folded.find(&folded_part) else {
            continue;
        };
        if seen_parts.contains(&folded_part) {
            continue;
        }

        let window = char_window(
            &folded,
            pos,
            cfg.laterality_window_before,
            cfg.laterality_window_after,
        );
        let laterality = cfg
            .lexicon
            .laterality
            .iter()
            .find(|side| window.contains(fold(side).as_str()))
            .cloned();

        seen_parts.push(folded_part);
        tags.push(LocationTag {
            part: part.clone(),
            laterality,
        });
    }
    tags
}

/// Slice of `text` from `before` characters ahead of byte position `pos`
/// to `after` characters past it, clamped to char boundaries.
fn char_window(text: &str, pos: usize, before: usize, after: usize) -> &str {
    let mut start = pos.saturating_sub(before);
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (pos + after).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}
