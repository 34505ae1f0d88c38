use thiserror::Error;

/// Errors produced when fitting the vector space.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextSimError {
    /// A vector space cannot be fit over zero documents.
    #[error("cannot fit a vector space over an empty corpus")]
    EmptyCorpus,
    /// Every document tokenized to nothing (or fell under min_df).
    #[error("corpus produced an empty vocabulary")]
    EmptyVocabulary,
    #[error("invalid vectorizer configuration: {0}")]
    InvalidConfig(String),
}
