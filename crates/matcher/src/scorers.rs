//! Attribute similarity scorers.
//!
//! Each scorer is a pure function `(missing attrs, body attrs) -> Option<Contribution>`:
//! a bounded, non-negative contribution plus the justification string, or
//! `None` when the attribute stays silent. Absence of evidence is not a
//! rejection; the hard filters already decided plausibility.

use chrono::NaiveDate;
use registry::AgeValue;
use strsim::normalized_levenshtein;

use crate::config::MatchConfig;
use crate::types::{Contribution, ScoreAttribute};

/// Age evidence: the body's interval is widened by the tolerance on both
/// ends, then tested against the missing person's age. Contributes a unit
/// weight on success; with either age unknown it stays silent.
pub fn score_age(missing: &AgeValue, body: &AgeValue, tolerance: u32) -> Option<Contribution> {
    if !missing.is_known() || !body.is_known() {
        return None;
    }
    body.widened(tolerance).overlaps(missing).then(|| Contribution {
        attribute: ScoreAttribute::Age,
        value: 1.0,
        reason: "age within range".to_string(),
    })
}

/// Name evidence: a normalized, symmetric similarity ratio between
/// case-folded full names, contributing `name_weight x ratio` above the
/// ratio threshold. Skipped entirely when the body carries a placeholder
/// instead of a name, or when either name is blank.
pub fn score_name(missing_name: &str, body_name: &str, cfg: &MatchConfig) -> Option<Contribution> {
    if missing_name.is_empty() || body_name.is_empty() {
        return None;
    }
    let body_folded = body_name.to_uppercase();
    if cfg
        .name_placeholder_markers
        .iter()
        .any(|marker| body_folded.contains(&marker.to_uppercase()))
    {
        return None;
    }
    let ratio = normalized_levenshtein(&missing_name.to_uppercase(), &body_folded);
    (ratio > cfg.name_ratio_threshold).then(|| Contribution {
        attribute: ScoreAttribute::Name,
        value: cfg.name_weight * ratio,
        reason: format!("name similarity: {ratio:.2}"),
    })
}

/// Location evidence: a fixed bonus when the missing municipality occurs
/// inside the body jurisdiction, case-insensitively. This is containment,
/// not similarity, and intentionally directional: jurisdictions are the
/// finer-grained administrative names that contain municipality names.
pub fn score_location(municipality: &str, jurisdiction: &str, bonus: f64) -> Option<Contribution> {
    if municipality.is_empty() || jurisdiction.is_empty() {
        return None;
    }
    jurisdiction
        .to_uppercase()
        .contains(&municipality.to_uppercase())
        .then(|| Contribution {
            attribute: ScoreAttribute::Location,
            value: bonus,
            reason: "same municipality".to_string(),
        })
}

/// Day count between disappearance and intake; recorded as supplementary
/// metadata on every candidate, never part of the score.
pub fn days_between(event: NaiveDate, intake: NaiveDate) -> i64 {
    (intake - event).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_within_widened_range_contributes_unit_weight() {
        // Missing age 62 against body range 66-70: 62 >= 66 - 10.
        let contribution = score_age(
            &AgeValue::Point(62),
            &AgeValue::Range { min: 66, max: 70 },
            10,
        )
        .expect("within tolerance");
        assert_eq!(contribution.value, 1.0);
        assert_eq!(contribution.reason, "age within range");
    }

    #[test]
    fn age_outside_widened_range_is_silent() {
        assert!(score_age(
            &AgeValue::Point(40),
            &AgeValue::Range { min: 66, max: 70 },
            10
        )
        .is_none());
    }

    #[test]
    fn unknown_age_is_silent_not_rejected() {
        assert!(score_age(&AgeValue::Unknown, &AgeValue::Point(30), 10).is_none());
        assert!(score_age(&AgeValue::Point(30), &AgeValue::Unknown, 10).is_none());
    }

    #[test]
    fn degenerate_point_interval_widens_like_a_range() {
        let contribution =
            score_age(&AgeValue::Point(35), &AgeValue::Point(30), 10).expect("within tolerance");
        assert_eq!(contribution.value, 1.0);
    }

    #[test]
    fn name_scorer_is_symmetric() {
        let cfg = MatchConfig::default();
        let ab = score_name("JUAN PEREZ", "JUAN PERES", &cfg).expect("similar");
        let ba = score_name("JUAN PERES", "JUAN PEREZ", &cfg).expect("similar");
        assert_eq!(ab.value, ba.value);
    }

    #[test]
    fn identical_names_double_weight() {
        let cfg = MatchConfig::default();
        let contribution = score_name("Maria Lopez", "MARIA LOPEZ", &cfg).expect("identical");
        assert!((contribution.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn placeholder_body_name_skips_the_scorer() {
        let cfg = MatchConfig::default();
        assert!(score_name("JUAN PEREZ", "PFSI-00123", &cfg).is_none());
    }

    #[test]
    fn dissimilar_names_stay_below_threshold() {
        let cfg = MatchConfig::default();
        assert!(score_name("JUAN PEREZ", "XIOMARA QUINTERO BLANCO", &cfg).is_none());
    }

    #[test]
    fn municipality_containment_earns_fixed_bonus() {
        let contribution =
            score_location("ZAPOPAN", "IJCF ZAPOPAN NORTE", 0.5).expect("contained");
        assert_eq!(contribution.value, 0.5);
        assert_eq!(contribution.reason, "same municipality");
    }

    #[test]
    fn containment_is_directional() {
        assert!(score_location("IJCF ZAPOPAN NORTE", "ZAPOPAN", 0.5).is_none());
        assert!(score_location("", "IJCF ZAPOPAN NORTE", 0.5).is_none());
    }

    #[test]
    fn day_count_metadata() {
        let event = NaiveDate::from_ymd_opt(2019, 1, 1).expect("valid date");
        let intake = NaiveDate::from_ymd_opt(2019, 1, 31).expect("valid date");
        assert_eq!(days_between(event, intake), 30);
    }
}
