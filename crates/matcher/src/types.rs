//! Output types of the matching layer.

use std::fmt;

use chrono::NaiveDate;
use registry::AgeValue;
use serde::{Deserialize, Serialize};

/// The attribute a score contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreAttribute {
    Age,
    Name,
    Location,
}

impl fmt::Display for ScoreAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreAttribute::Age => write!(f, "age"),
            ScoreAttribute::Name => write!(f, "name"),
            ScoreAttribute::Location => write!(f, "location"),
        }
    }
}

/// One scorer's contribution to a candidate: a non-negative value and a
/// human-readable justification for the review table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub attribute: ScoreAttribute,
    pub value: f64,
    pub reason: String,
}

/// A person pair that survived the hard filters and scored above zero.
///
/// Immutable once created. The aggregate `score` is the exact sum of the
/// contributions, with no hidden normalization. Echo fields carry the raw
/// attributes a reviewer needs without re-joining the registries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub missing_id: String,
    pub body_id: String,
    pub score: f64,
    pub contributions: Vec<Contribution>,
    /// Days between disappearance and intake; supplementary metadata, not
    /// part of the score.
    pub days_between: i64,
    pub missing_name: String,
    pub missing_age: AgeValue,
    pub missing_date: Option<NaiveDate>,
    pub missing_location: String,
    pub body_name: String,
    pub body_age: AgeValue,
    pub body_date: Option<NaiveDate>,
    pub body_location: String,
}

impl MatchCandidate {
    /// The joined reason strings, in scorer order.
    pub fn reasons(&self) -> String {
        let reasons: Vec<&str> = self.contributions.iter().map(|c| c.reason.as_str()).collect();
        reasons.join(", ")
    }
}

/// A tattoo pair whose composite similarity exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TattooMatch {
    pub missing_id: String,
    pub body_id: String,
    pub missing_description: String,
    pub body_description: String,
    pub missing_location: String,
    pub body_location: String,
    /// Cosine similarity over the combined feature space.
    pub text_similarity: f32,
    /// Cosine or token-overlap similarity of the location tags.
    pub location_similarity: f32,
    /// True when both quoted literals are present and identical.
    pub literal_match: bool,
    /// Weighted composite of the three feature scores.
    pub score: f32,
}

/// Per person-pair aggregation of tattoo matches, for triage: pairs with
/// several matching tattoos rank above single coincidences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub missing_id: String,
    pub body_id: String,
    pub match_count: usize,
    pub avg_score: f32,
    pub max_score: f32,
}

/// Ranked tattoo matches plus their per-pair summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TattooMatchReport {
    pub matches: Vec<TattooMatch>,
    pub pairs: Vec<PairSummary>,
}
