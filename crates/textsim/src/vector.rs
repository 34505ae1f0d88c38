//! Sparse term-weight vectors.

use serde::{Deserialize, Serialize};

/// A sparse, L2-normalized term-weight vector. Entries are sorted by term
/// id, so the dot product is a single merge walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Builds a vector from unsorted `(term_id, weight)` pairs and
    /// normalizes it to unit length. Zero-weight pairs are dropped.
    pub(crate) fn from_weights(mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(id, _)| id);
        let norm = entries
            .iter()
            .map(|&(_, w)| f64::from(w) * f64::from(w))
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            let inv = (1.0 / norm) as f32;
            for (_, w) in entries.iter_mut() {
                *w *= inv;
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|&(_, w)| w)
    }

    /// Dot product over the sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0f64;
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_id, a_w) = self.entries[i];
            let (b_id, b_w) = other.entries[j];
            match a_id.cmp(&b_id) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(a_w) * f64::from(b_w);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum as f32
    }
}

/// Cosine similarity between two vectors produced by the same vectorizer.
/// Both are unit-length by construction, so this is their dot product,
/// clamped against float drift. An empty vector is similar to nothing.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}
