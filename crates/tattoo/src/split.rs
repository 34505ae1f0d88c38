//! Narrative splitting: one fragment per physically distinct tattoo.
//!
//! Rules are tried in priority order: enumerated markers ("1.-", "2)")
//! first, then dashes (unless the narrative contains a protected dashed
//! label), then commas, else the narrative is a single fragment.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::TattooConfig;
use crate::fold::fold;

fn enumerated_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.-|\d+\)").expect("static regex"))
}

fn bare_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,4}$").expect("static regex"))
}

/// Replaces typographic quotes with straight ones so literal extraction
/// and splitting see a single quote character.
pub fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

/// Splits a quote-normalized narrative into cleaned fragments.
pub fn split_fragments(narrative: &str, cfg: &TattooConfig) -> Vec<String> {
    let folded = fold(narrative);
    let dash_protected = cfg
        .lexicon
        .protected_labels
        .iter()
        .any(|label| folded.contains(&fold(label)));

    let parts: Vec<&str> = if enumerated_re().is_match(narrative) {
        enumerated_re().split(narrative).collect()
    } else if narrative.contains('-') && !dash_protected {
        narrative.split('-').collect()
    } else if narrative.contains(',') {
        narrative.split(',').collect()
    } else {
        vec![narrative]
    };

    parts
        .into_iter()
        .filter_map(|part| clean_fragment(part, cfg))
        .collect()
}

/// Trims a raw split part, strips leading noise, and drops fragments that
/// are too short, purely numeric, or filler words.
fn clean_fragment(part: &str, cfg: &TattooConfig) -> Option<String> {
    let mut fragment = part.trim();
    if fragment.is_empty() {
        return None;
    }
    if fragment.chars().count() < cfg.min_fragment_chars || bare_number_re().is_match(fragment) {
        return None;
    }

    let mut stripped = true;
    while stripped {
        stripped = false;
        for prefix in &cfg.lexicon.strip_prefixes {
            if let Some(rest) = strip_prefix_ci(fragment, prefix) {
                fragment = rest.trim_start();
                stripped = true;
            }
        }
    }
    if fragment.is_empty() || fragment.chars().count() < cfg.min_fragment_chars {
        return None;
    }

    let folded = fold(fragment);
    if cfg.lexicon.filler_words.iter().any(|w| folded == fold(w)) {
        return None;
    }
    Some(fragment.to_string())
}

/// ASCII case-insensitive prefix strip. Vocabulary prefixes are ASCII, so
/// byte offsets are safe once the boundary check passes.
fn strip_prefix_ci<'a>(fragment: &'a str, prefix: &str) -> Option<&'a str> {
    if fragment.len() < prefix.len() || !fragment.is_char_boundary(prefix.len()) {
        return None;
    }
    fragment[..prefix.len()]
        .eq_ignore_ascii_case(prefix)
        .then(|| &fragment[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerated_markers_take_priority() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments(
            "1.- ROSA ROJA EN HOMBRO 2.- CRUZ NEGRA EN BRAZO",
            &cfg,
        );
        assert_eq!(fragments, vec!["ROSA ROJA EN HOMBRO", "CRUZ NEGRA EN BRAZO"]);
    }

    #[test]
    fn paren_markers_also_split() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("1) LEYENDA AMOR 2) CALAVERA", &cfg);
        assert_eq!(fragments, vec!["LEYENDA AMOR", "CALAVERA"]);
    }

    #[test]
    fn dash_splitting_applies_without_protected_label() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("ROSA EN HOMBRO - CRUZ EN BRAZO", &cfg);
        assert_eq!(fragments, vec!["ROSA EN HOMBRO", "CRUZ EN BRAZO"]);
    }

    #[test]
    fn protected_label_suppresses_dash_splitting() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("LETRAS-NÚMEROS EN ANTEBRAZO, ROSA EN HOMBRO", &cfg);
        assert_eq!(
            fragments,
            vec!["LETRAS-NÚMEROS EN ANTEBRAZO", "ROSA EN HOMBRO"]
        );
    }

    #[test]
    fn comma_splitting_is_the_fallback() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("ROSA EN HOMBRO, CRUZ EN BRAZO", &cfg);
        assert_eq!(fragments, vec!["ROSA EN HOMBRO", "CRUZ EN BRAZO"]);
    }

    #[test]
    fn splitting_is_idempotent_on_split_fragments() {
        let cfg = TattooConfig::default();
        let once = split_fragments("1.- ROSA ROJA EN HOMBRO 2.- CRUZ NEGRA", &cfg);
        for fragment in &once {
            let again = split_fragments(fragment, &cfg);
            assert_eq!(again, vec![fragment.clone()]);
        }
    }

    #[test]
    fn noise_fragments_are_dropped() {
        let cfg = TattooConfig::default();
        // Short pieces, bare numbers, and filler words all disappear.
        let fragments = split_fragments("ROSA GRANDE, 12, AB, TATUAJE", &cfg);
        assert_eq!(fragments, vec!["ROSA GRANDE"]);
    }

    #[test]
    fn leading_noise_is_stripped() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("TATUAJE EN FORMA DE ROSA, EN CRUZ GRANDE", &cfg);
        assert_eq!(fragments, vec!["FORMA DE ROSA", "CRUZ GRANDE"]);
    }

    #[test]
    fn single_fragment_passes_through() {
        let cfg = TattooConfig::default();
        let fragments = split_fragments("CALAVERA CON ALAS EN ESPALDA", &cfg);
        assert_eq!(fragments, vec!["CALAVERA CON ALAS EN ESPALDA"]);
    }

    #[test]
    fn curly_quotes_normalize() {
        assert_eq!(normalize_quotes("\u{201C}AMOR\u{201D}"), "\"AMOR\"");
    }
}
