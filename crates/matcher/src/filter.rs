//! Hard filters: mandatory preconditions a pair must satisfy before any
//! scoring. These are absolute (a failing pair is discarded, not
//! down-weighted) and deliberately unweighted: they define the universe
//! of physically plausible pairs, not of likely ones.

use chrono::NaiveDate;
use registry::{Body, MissingPerson};

/// The disappearance must strictly precede the forensic intake. An
/// unknown date on either side discards the pair; unknown is not a
/// wildcard.
pub fn temporal_precedes(event: Option<NaiveDate>, intake: Option<NaiveDate>) -> bool {
    matches!((event, intake), (Some(event), Some(intake)) if event < intake)
}

/// Case-insensitive exact match on canonical sex codes. Blank codes never
/// match: a record without sex is excluded from the predicate.
pub fn sex_matches(missing_sex: &str, body_sex: &str) -> bool {
    !missing_sex.is_empty() && missing_sex.eq_ignore_ascii_case(body_sex)
}

/// Both predicates, evaluated cheapest first with short-circuiting.
pub fn passes_hard_filters(missing: &MissingPerson, body: &Body) -> bool {
    temporal_precedes(missing.event_date, body.intake_date) && sex_matches(&missing.sex, &body.sex)
}
