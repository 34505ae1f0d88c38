//! Cross-registry matching layer.
//!
//! Sits on top of the registry, tattoo, and textsim crates and turns two
//! normalized registries into ranked, human-reviewable match candidates:
//!
//! - [`match_persons`]: hard-filtered, attribute-scored person pairs,
//!   ranked by an additive aggregate score.
//! - [`match_tattoos`]: per-tattoo composite similarity over admissible
//!   person pairs, in strict (candidate-bounded) or open mode.
//!
//! Every comparison is independent and referentially transparent given the
//! normalized records and a fitted vector space, so enumeration is chunked
//! and parallelized with worker-local accumulators; the final sort is the
//! only synchronization point. Scores are heuristic: the output is an aid
//! for human adjudication, not a classification.

mod config;
mod engine;
mod error;
mod filter;
mod scorers;
mod tattoo_match;
mod types;

pub use crate::config::{
    ChunkPolicy, MatchConfig, TattooMatchConfig, TattooMatchMode, TattooWeights,
};
pub use crate::engine::match_persons;
pub use crate::error::MatchError;
pub use crate::filter::{passes_hard_filters, sex_matches, temporal_precedes};
pub use crate::scorers::{days_between, score_age, score_location, score_name};
pub use crate::tattoo_match::{match_tattoos, summarize_pairs, TattooSpaces};
pub use crate::types::{
    Contribution, MatchCandidate, PairSummary, ScoreAttribute, TattooMatch, TattooMatchReport,
};
