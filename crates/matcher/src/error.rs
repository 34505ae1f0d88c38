use thiserror::Error;

use textsim::TextSimError;

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid configuration, rejected before any scoring begins.
    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),
    /// A chunk of the cross product exceeded the configured pair budget.
    /// The engine retries with a smaller chunk before surfacing this.
    #[error("pair budget exceeded: chunk holds {pairs} pairs, budget is {budget}")]
    PairBudgetExceeded { pairs: u64, budget: u64 },
    /// Vector-space fitting failed (empty corpus, bad vectorizer config).
    #[error("text similarity error: {0}")]
    Text(#[from] TextSimError),
    /// Strict-mode tattoo matching needs the candidate-pair list.
    #[error("strict mode requires a candidate-pair list")]
    MissingCandidates,
}
