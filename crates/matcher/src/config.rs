//! Matching configuration.
//!
//! All knobs are validated before any scoring begins; a bad weight or
//! threshold is a start-up error, never a mid-run surprise.

use serde::{Deserialize, Serialize};
use textsim::TfIdfConfig;

use crate::error::MatchError;

/// Chunked-evaluation policy for cross-product enumeration.
///
/// The cross product is never materialized at once: one side is processed
/// in chunks, and a chunk whose pair count exceeds the budget makes the
/// engine retry with a halved chunk size instead of exhausting memory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChunkPolicy {
    /// Records (or person pairs, for tattoo matching) per chunk.
    pub chunk_size: usize,
    /// Maximum pairwise comparisons a single chunk may hold.
    pub max_pairs_per_chunk: u64,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            max_pairs_per_chunk: 5_000_000,
        }
    }
}

impl ChunkPolicy {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.chunk_size == 0 {
            return Err(MatchError::InvalidConfig("chunk_size must be >= 1".into()));
        }
        if self.max_pairs_per_chunk == 0 {
            return Err(MatchError::InvalidConfig(
                "max_pairs_per_chunk must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for person-level matching (hard filters + scorers).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Years added to both ends of the body's age interval before the
    /// containment test.
    pub age_tolerance: u32,
    /// Markers identifying a "no name assigned" placeholder in the body
    /// registry; the name scorer is skipped when one occurs in the name.
    pub name_placeholder_markers: Vec<String>,
    /// Minimum similarity ratio before name evidence contributes.
    pub name_ratio_threshold: f64,
    /// Multiplier applied to the name ratio; above 1.0 it deliberately
    /// weights name evidence over age evidence.
    pub name_weight: f64,
    /// Fixed bonus when the missing municipality is contained in the body
    /// jurisdiction.
    pub location_bonus: f64,
    pub chunking: ChunkPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            age_tolerance: 10,
            name_placeholder_markers: vec!["PFSI".into()],
            name_ratio_threshold: 0.5,
            name_weight: 2.0,
            location_bonus: 0.5,
            chunking: ChunkPolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Start-up validation of every scoring knob.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.name_ratio_threshold) {
            return Err(MatchError::InvalidConfig(
                "name_ratio_threshold must be within [0, 1]".into(),
            ));
        }
        if self.name_weight < 0.0 {
            return Err(MatchError::InvalidConfig(
                "name_weight must be non-negative".into(),
            ));
        }
        if self.location_bonus < 0.0 {
            return Err(MatchError::InvalidConfig(
                "location_bonus must be non-negative".into(),
            ));
        }
        self.chunking.validate()
    }
}

/// Which person pairs the tattoo matcher considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TattooMatchMode {
    /// Only pairs already produced by the person-level matcher. Bounds the
    /// tattoo cross product to plausible persons; the recommended default.
    #[default]
    Strict,
    /// Every missing x body pair with tattoos on both sides.
    Open,
}

/// Weights for the tattoo composite score. They are published profiles,
/// not free parameters: pick one and keep it fixed for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TattooWeights {
    pub text: f32,
    pub location: f32,
    pub literal: f32,
}

impl TattooWeights {
    /// The balanced profile: 0.5 text, 0.3 location, 0.2 literal.
    pub fn balanced() -> Self {
        Self {
            text: 0.5,
            location: 0.3,
            literal: 0.2,
        }
    }

    /// The text-heavy profile: 0.6 text, 0.25 location, 0.15 literal.
    /// Pairs with a lower threshold for sparser narratives.
    pub fn text_heavy() -> Self {
        Self {
            text: 0.6,
            location: 0.25,
            literal: 0.15,
        }
    }
}

impl Default for TattooWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Configuration for tattoo pair matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TattooMatchConfig {
    pub mode: TattooMatchMode,
    pub weights: TattooWeights,
    /// Composite score a tattoo pair must strictly exceed.
    pub threshold: f32,
    pub chunking: ChunkPolicy,
    /// Vectorizer settings shared by the feature and location spaces.
    pub vectorizer: TfIdfConfig,
}

impl Default for TattooMatchConfig {
    fn default() -> Self {
        Self {
            mode: TattooMatchMode::default(),
            weights: TattooWeights::default(),
            threshold: 0.6,
            chunking: ChunkPolicy::default(),
            vectorizer: TfIdfConfig::default(),
        }
    }
}

impl TattooMatchConfig {
    /// The text-heavy preset: looser threshold, text-weighted composite.
    pub fn text_heavy() -> Self {
        Self {
            weights: TattooWeights::text_heavy(),
            threshold: 0.4,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig(
                "threshold must be within [0, 1]".into(),
            ));
        }
        let TattooWeights {
            text,
            location,
            literal,
        } = self.weights;
        if text < 0.0 || location < 0.0 || literal < 0.0 {
            return Err(MatchError::InvalidConfig(
                "tattoo weights must be non-negative".into(),
            ));
        }
        if text + location + literal <= 0.0 {
            return Err(MatchError::InvalidConfig(
                "tattoo weights must not all be zero".into(),
            ));
        }
        self.vectorizer.validate()?;
        self.chunking.validate()
    }
}
