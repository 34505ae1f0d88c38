//! Quoted-literal extraction and keyword-trailer parsing.

use std::sync::OnceLock;

use regex::Regex;

fn quoted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("static regex"))
}

fn keyword_trailer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)PALABRAS CLAVE:\s*(.*)$").expect("static regex"))
}

/// Collects the text enclosed in quotation marks, verbatim, joined with
/// ", ". Empty when the fragment carries no quoted span.
pub fn extract_quoted_literal(fragment: &str) -> String {
    let spans: Vec<&str> = quoted_re()
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    spans.join(", ")
}

/// Splits off a "PALABRAS CLAVE: ..." trailer. Returns the keyword list
/// (when the trailer is present) and the narrative with the trailer
/// removed, ready for fragment splitting.
pub fn parse_keyword_trailer(narrative: &str) -> (Option<Vec<String>>, String) {
    match keyword_trailer_re().captures(narrative) {
        Some(caps) => {
            let keywords: Vec<String> = caps
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or_default()
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            let cleaned = keyword_trailer_re().replace(narrative, "").trim().to_string();
            let keywords = if keywords.is_empty() { None } else { Some(keywords) };
            (keywords, cleaned)
        }
        None => (None, narrative.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::normalize_quotes;

    #[test]
    fn quoted_spans_join_verbatim() {
        assert_eq!(
            extract_quoted_literal(r#"LEYENDA "AMOR ETERNO" Y "MARIA""#),
            "AMOR ETERNO, MARIA"
        );
        assert_eq!(extract_quoted_literal("SIN COMILLAS"), "");
    }

    #[test]
    fn curly_quoted_spans_extract_after_normalization() {
        let normalized = normalize_quotes("LEYENDA \u{201C}AMOR\u{201D}");
        assert_eq!(extract_quoted_literal(&normalized), "AMOR");
    }

    #[test]
    fn keyword_trailer_is_parsed_and_removed() {
        let (keywords, cleaned) =
            parse_keyword_trailer("ROSA EN HOMBRO PALABRAS CLAVE: rosa, flor, hombro");
        assert_eq!(
            keywords,
            Some(vec!["rosa".to_string(), "flor".to_string(), "hombro".to_string()])
        );
        assert_eq!(cleaned, "ROSA EN HOMBRO");
    }

    #[test]
    fn absent_trailer_leaves_narrative_untouched() {
        let (keywords, cleaned) = parse_keyword_trailer("CRUZ EN BRAZO");
        assert_eq!(keywords, None);
        assert_eq!(cleaned, "CRUZ EN BRAZO");
    }
}
