//! TF-IDF vocabulary fitting and fragment vectorization.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TextSimError;
use crate::preprocess::{preprocess, tokenize};
use crate::vector::SparseVector;

/// Configuration for vocabulary fitting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Minimum characters for a token to enter the vocabulary.
    pub min_token_chars: usize,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Upper bound on vocabulary size; when exceeded, only the highest
    /// document-frequency terms are kept and a warning is logged. This is
    /// the memory-degradation knob for very large corpora.
    pub max_vocabulary: Option<usize>,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            min_token_chars: 2,
            min_df: 1,
            max_vocabulary: None,
        }
    }
}

impl TfIdfConfig {
    pub fn validate(&self) -> Result<(), TextSimError> {
        if self.min_token_chars == 0 {
            return Err(TextSimError::InvalidConfig(
                "min_token_chars must be >= 1".into(),
            ));
        }
        if self.min_df == 0 {
            return Err(TextSimError::InvalidConfig("min_df must be >= 1".into()));
        }
        if self.max_vocabulary == Some(0) {
            return Err(TextSimError::InvalidConfig(
                "max_vocabulary must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// A fitted TF-IDF vector space.
///
/// Term ids are assigned in lexicographic term order and inverse document
/// frequencies use smoothed counts (`ln((1+n)/(1+df)) + 1`), so identical
/// corpora always produce identical spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    vocabulary: FxHashMap<String, u32>,
    idf: Vec<f32>,
    config: TfIdfConfig,
}

impl TfIdfVectorizer {
    /// Fits the vocabulary over the full corpus. Fails fast on an empty
    /// corpus or a corpus that tokenizes to nothing; vocabulary fitting is
    /// once-per-run by contract, never per pair.
    pub fn fit<S: AsRef<str>>(corpus: &[S], config: &TfIdfConfig) -> Result<Self, TextSimError> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(TextSimError::EmptyCorpus);
        }

        let mut document_frequency: FxHashMap<String, u32> = FxHashMap::default();
        for doc in corpus {
            let cleaned = preprocess(doc.as_ref());
            let mut seen: Vec<&str> = Vec::new();
            for token in tokenize(&cleaned, config.min_token_chars) {
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
            for token in seen {
                *document_frequency.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(String, u32)> = document_frequency
            .into_iter()
            .filter(|&(_, df)| df as usize >= config.min_df)
            .collect();
        if terms.is_empty() {
            return Err(TextSimError::EmptyVocabulary);
        }

        if let Some(bound) = config.max_vocabulary {
            if terms.len() > bound {
                warn!(
                    vocabulary = terms.len(),
                    bound, "vocabulary exceeds configured bound; keeping most frequent terms"
                );
                terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                terms.truncate(bound);
            }
        }
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let doc_count = corpus.len() as f32;
        let mut vocabulary = FxHashMap::default();
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, df)) in terms.into_iter().enumerate() {
            vocabulary.insert(term, index as u32);
            idf.push(((1.0 + doc_count) / (1.0 + df as f32)).ln() + 1.0);
        }

        debug!(vocabulary = vocabulary.len(), documents = corpus.len(), "vector space fitted");
        Ok(Self {
            vocabulary,
            idf,
            config: config.clone(),
        })
    }

    /// Projects a fragment into the fitted space. Out-of-vocabulary terms
    /// are ignored; a fragment with no known terms yields the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let cleaned = preprocess(text);
        let mut term_frequency: FxHashMap<u32, u32> = FxHashMap::default();
        for token in tokenize(&cleaned, self.config.min_token_chars) {
            if let Some(&id) = self.vocabulary.get(token) {
                *term_frequency.entry(id).or_insert(0) += 1;
            }
        }
        let weights = term_frequency
            .into_iter()
            .map(|(id, tf)| (id, tf as f32 * self.idf[id as usize]))
            .collect();
        SparseVector::from_weights(weights)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// The inverse document frequency for a term, if it is in vocabulary.
    pub fn idf_for(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&id| self.idf[id as usize])
    }
}
