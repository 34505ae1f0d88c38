//! Field-level normalization helpers.
//!
//! Every function here is total: malformed input maps to a sentinel value
//! ("unknown" date, empty string, [`AgeValue::Unknown`]) instead of an
//! error, so a single bad cell never aborts a registry load.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::AgeValue;

fn age_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("static regex"))
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

/// Trims free text and collapses NA-like markers to the empty string.
/// Case is preserved; comparisons fold case at the call site.
pub fn clean_text(raw: &str, na_markers: &[String]) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let folded = trimmed.to_uppercase();
    if na_markers.iter().any(|m| folded == *m) {
        return String::new();
    }
    trimmed.to_string()
}

/// Canonical sex code: trimmed and upper-cased. Blank stays blank and will
/// fail the sex-equality hard filter against any non-blank value.
pub fn normalize_sex(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Parses an event or intake date, trying each configured format in order.
/// Timestamps are tolerated by taking the leading date token. Returns
/// `None` for anything unparseable; unknown dates are excluded from
/// temporal predicates, they are not wildcards.
pub fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let token = raw.trim().split_whitespace().next()?;
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Parses an age cell into an inclusive interval.
///
/// "66-70 años" becomes `Range { 66, 70 }`; a bare integer (with or
/// without a unit suffix) becomes a degenerate `Point`; everything else is
/// `Unknown`.
pub fn parse_age(raw: &str) -> AgeValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return AgeValue::Unknown;
    }
    if let Some(caps) = age_range_re().captures(trimmed) {
        let min = caps[1].parse::<u32>().ok();
        let max = caps[2].parse::<u32>().ok();
        if let (Some(min), Some(max)) = (min, max) {
            let (min, max) = if min <= max { (min, max) } else { (max, min) };
            return AgeValue::Range { min, max };
        }
    }
    match digits_re()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<u32>().ok())
    {
        Some(years) => AgeValue::Point(years),
        None => AgeValue::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    #[test]
    fn date_parsing_accepts_configured_formats() {
        let cfg = RegistryConfig::default();
        assert_eq!(
            parse_date("2019-05-04", &cfg.date_formats),
            NaiveDate::from_ymd_opt(2019, 5, 4)
        );
        assert_eq!(
            parse_date("04/05/2019", &cfg.date_formats),
            NaiveDate::from_ymd_opt(2019, 5, 4)
        );
        assert_eq!(
            parse_date("2019-05-04 00:00:00", &cfg.date_formats),
            NaiveDate::from_ymd_opt(2019, 5, 4)
        );
    }

    #[test]
    fn unparseable_date_is_unknown_not_error() {
        let cfg = RegistryConfig::default();
        assert_eq!(parse_date("pendiente", &cfg.date_formats), None);
        assert_eq!(parse_date("", &cfg.date_formats), None);
        assert_eq!(parse_date("2019-13-40", &cfg.date_formats), None);
    }

    #[test]
    fn age_range_with_unit_suffix() {
        assert_eq!(parse_age("66-70 años"), AgeValue::Range { min: 66, max: 70 });
        assert_eq!(parse_age("66 - 70"), AgeValue::Range { min: 66, max: 70 });
    }

    #[test]
    fn age_point_and_reversed_range() {
        assert_eq!(parse_age("45"), AgeValue::Point(45));
        assert_eq!(parse_age("45 años"), AgeValue::Point(45));
        assert_eq!(parse_age("70-66"), AgeValue::Range { min: 66, max: 70 });
    }

    #[test]
    fn age_garbage_is_unknown() {
        assert_eq!(parse_age(""), AgeValue::Unknown);
        assert_eq!(parse_age("adulto"), AgeValue::Unknown);
    }

    #[test]
    fn na_markers_collapse_to_empty() {
        let cfg = RegistryConfig::default();
        assert_eq!(clean_text("  n/a ", &cfg.na_markers), "");
        assert_eq!(clean_text("SIN DATO", &cfg.na_markers), "");
        assert_eq!(clean_text(" Juan Perez ", &cfg.na_markers), "Juan Perez");
    }
}
