//! Term-weighted text similarity.
//!
//! Builds one TF-IDF vector space per comparison axis over the union of
//! both registries' text fragments, then compares fragments by cosine
//! similarity. The vocabulary is fit once per run over the full corpus,
//! never per pair, so inverse document frequencies are stable and the
//! all-pairs comparison reduces to sparse dot products.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same corpus and config,
//! same vocabulary, same vectors, on any machine.

mod error;
mod preprocess;
mod vector;
mod vectorizer;

pub use crate::error::TextSimError;
pub use crate::preprocess::{preprocess, tokenize};
pub use crate::vector::{cosine, SparseVector};
pub use crate::vectorizer::{TfIdfConfig, TfIdfVectorizer};
