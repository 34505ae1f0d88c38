//! Tabular input/output for the review workflow.
//!
//! The ranked person-match and tattoo-match tables are written as CSV in
//! the shape reviewers work with; the person-match table can be read back
//! as the candidate-pair list that strict-mode tattoo matching consumes.

use std::io::{Read, Write};

use chrono::NaiveDate;
use registry::{parse_age, parse_date, AgeValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{MatchCandidate, PipelineError, TattooMatch};

const ISO_DATE: &str = "%Y-%m-%d";

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "unknown".to_string())
}

/// Flat row of the person-match table.
#[derive(Debug, Serialize, Deserialize)]
struct CandidateRow {
    missing_id: String,
    missing_name: String,
    missing_age: String,
    missing_date: String,
    missing_location: String,
    body_id: String,
    body_name: String,
    body_age: String,
    body_date: String,
    body_location: String,
    days_between: i64,
    score: f64,
    match_reasons: String,
}

/// Writes the ranked person-match table.
pub fn write_person_matches_csv<W: Write>(
    writer: W,
    candidates: &[MatchCandidate],
) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for candidate in candidates {
        csv_writer.serialize(CandidateRow {
            missing_id: candidate.missing_id.clone(),
            missing_name: candidate.missing_name.clone(),
            missing_age: candidate.missing_age.to_string(),
            missing_date: date_cell(candidate.missing_date),
            missing_location: candidate.missing_location.clone(),
            body_id: candidate.body_id.clone(),
            body_name: candidate.body_name.clone(),
            body_age: candidate.body_age.to_string(),
            body_date: date_cell(candidate.body_date),
            body_location: candidate.body_location.clone(),
            days_between: candidate.days_between,
            score: candidate.score,
            match_reasons: candidate.reasons(),
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads a previously written person-match table back as a candidate-pair
/// list for strict-mode tattoo matching.
///
/// Only the fields strict mode relies on are reconstructed; per-attribute
/// contributions are not recoverable from the flat table and come back
/// empty. Rows without both identifiers are skipped with a warning.
pub fn read_candidate_pairs_csv<R: Read>(
    reader: R,
) -> Result<Vec<MatchCandidate>, PipelineError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut candidates = Vec::new();
    let formats = vec![ISO_DATE.to_string()];
    for (line, result) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, %err, "skipping unreadable candidate row");
                continue;
            }
        };
        if row.missing_id.trim().is_empty() || row.body_id.trim().is_empty() {
            warn!(line, "skipping candidate row without both identifiers");
            continue;
        }
        candidates.push(MatchCandidate {
            missing_id: row.missing_id.trim().to_string(),
            body_id: row.body_id.trim().to_string(),
            score: row.score,
            contributions: Vec::new(),
            days_between: row.days_between,
            missing_name: row.missing_name,
            missing_age: parse_cell_age(&row.missing_age),
            missing_date: parse_date(&row.missing_date, &formats),
            missing_location: row.missing_location,
            body_name: row.body_name,
            body_age: parse_cell_age(&row.body_age),
            body_date: parse_date(&row.body_date, &formats),
            body_location: row.body_location,
        });
    }
    Ok(candidates)
}

fn parse_cell_age(cell: &str) -> AgeValue {
    if cell == "unknown" {
        AgeValue::Unknown
    } else {
        parse_age(cell)
    }
}

/// Flat row of the tattoo-match table.
#[derive(Debug, Serialize)]
struct TattooRow<'a> {
    missing_id: &'a str,
    body_id: &'a str,
    missing_description: &'a str,
    body_description: &'a str,
    missing_location: &'a str,
    body_location: &'a str,
    text_similarity: f32,
    location_similarity: f32,
    literal_match: u8,
    score: f32,
}

/// Writes the ranked tattoo-match table.
pub fn write_tattoo_matches_csv<W: Write>(
    writer: W,
    matches: &[TattooMatch],
) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for tattoo_match in matches {
        csv_writer.serialize(TattooRow {
            missing_id: &tattoo_match.missing_id,
            body_id: &tattoo_match.body_id,
            missing_description: &tattoo_match.missing_description,
            body_description: &tattoo_match.body_description,
            missing_location: &tattoo_match.missing_location,
            body_location: &tattoo_match.body_location,
            text_similarity: tattoo_match.text_similarity,
            location_similarity: tattoo_match.location_similarity,
            literal_match: u8::from(tattoo_match.literal_match),
            score: tattoo_match.score,
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher::{Contribution, ScoreAttribute};

    fn candidate(missing_id: &str, body_id: &str, score: f64) -> MatchCandidate {
        MatchCandidate {
            missing_id: missing_id.into(),
            body_id: body_id.into(),
            score,
            contributions: vec![Contribution {
                attribute: ScoreAttribute::Location,
                value: 0.5,
                reason: "same municipality".into(),
            }],
            days_between: 90,
            missing_name: "JUAN PEREZ".into(),
            missing_age: AgeValue::Point(30),
            missing_date: NaiveDate::from_ymd_opt(2019, 1, 1),
            missing_location: "ZAPOPAN".into(),
            body_name: String::new(),
            body_age: AgeValue::Range { min: 28, max: 34 },
            body_date: NaiveDate::from_ymd_opt(2019, 4, 1),
            body_location: "IJCF ZAPOPAN NORTE".into(),
        }
    }

    #[test]
    fn person_match_table_roundtrips_the_pair_list() {
        let candidates = vec![candidate("M-1", "B-1", 0.5), candidate("M-2", "B-2", 2.0)];
        let mut buffer = Vec::new();
        write_person_matches_csv(&mut buffer, &candidates).expect("write succeeds");

        let text = String::from_utf8(buffer.clone()).expect("utf8");
        assert!(text.starts_with("missing_id,"));
        assert!(text.contains("same municipality"));

        let back = read_candidate_pairs_csv(buffer.as_slice()).expect("read succeeds");
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].missing_id, "M-1");
        assert_eq!(back[0].body_id, "B-1");
        assert_eq!(back[0].score, 0.5);
        assert_eq!(back[0].missing_age, AgeValue::Point(30));
        assert_eq!(back[0].body_age, AgeValue::Range { min: 28, max: 34 });
        assert_eq!(back[0].missing_date, NaiveDate::from_ymd_opt(2019, 1, 1));
    }

    #[test]
    fn unknown_cells_survive_the_roundtrip() {
        let mut unknown = candidate("M-1", "B-1", 1.0);
        unknown.missing_age = AgeValue::Unknown;
        unknown.missing_date = None;
        let mut buffer = Vec::new();
        write_person_matches_csv(&mut buffer, &[unknown]).expect("write succeeds");

        let back = read_candidate_pairs_csv(buffer.as_slice()).expect("read succeeds");
        assert_eq!(back[0].missing_age, AgeValue::Unknown);
        assert_eq!(back[0].missing_date, None);
    }

    #[test]
    fn tattoo_match_table_serializes_every_score() {
        let matches = vec![TattooMatch {
            missing_id: "M-1".into(),
            body_id: "B-1".into(),
            missing_description: "CRUZ EN BRAZO".into(),
            body_description: "CRUZ EN BRAZO".into(),
            missing_location: "BRAZO DERECHO".into(),
            body_location: "BRAZO DERECHO".into(),
            text_similarity: 1.0,
            location_similarity: 1.0,
            literal_match: true,
            score: 1.0,
        }];
        let mut buffer = Vec::new();
        write_tattoo_matches_csv(&mut buffer, &matches).expect("write succeeds");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("text_similarity"));
        assert!(text.contains("CRUZ EN BRAZO"));
    }
}
