//! Tattoo pair matching.
//!
//! Every tattoo of one person is compared against every tattoo of the
//! other, for each admissible person pair. In strict mode the admissible
//! pairs are exactly the candidates produced by the person-level matcher,
//! which bounds the tattoo cross product to plausible persons; open mode
//! runs over the full cross product of persons with tattoos.
//!
//! Both vector spaces (combined features and locations) are fit once over
//! the union of the registries' tattoo records, then every record is
//! transformed once, so the all-pairs stage is pure sparse dot products.

use fxhash::FxHashMap;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use tattoo::{LocationTag, TattooRecord};
use textsim::{cosine, SparseVector, TextSimError, TfIdfConfig, TfIdfVectorizer};

use crate::config::{TattooMatchConfig, TattooMatchMode};
use crate::error::MatchError;
use crate::types::{MatchCandidate, PairSummary, TattooMatch, TattooMatchReport};

/// The fitted vector spaces for one matching run.
pub struct TattooSpaces {
    features: TfIdfVectorizer,
    /// Absent when no tattoo in either registry carries a location tag;
    /// location similarity then relies on the token-overlap shortcut.
    locations: Option<TfIdfVectorizer>,
}

impl TattooSpaces {
    /// Fits both spaces over the union of the two tattoo sets. Fails fast
    /// when there is nothing to fit on.
    pub fn fit(
        missing: &[TattooRecord],
        bodies: &[TattooRecord],
        cfg: &TfIdfConfig,
    ) -> Result<Self, MatchError> {
        let corpus: Vec<String> = missing
            .iter()
            .chain(bodies.iter())
            .map(TattooRecord::combined_features)
            .collect();
        let features = TfIdfVectorizer::fit(&corpus, cfg)?;

        let location_corpus: Vec<String> = missing
            .iter()
            .chain(bodies.iter())
            .map(TattooRecord::location_text)
            .collect();
        let locations = match TfIdfVectorizer::fit(&location_corpus, cfg) {
            Ok(vectorizer) => Some(vectorizer),
            Err(TextSimError::EmptyVocabulary) => {
                warn!("no location tags in either registry; location axis limited to token overlap");
                None
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { features, locations })
    }
}

/// Runs tattoo matching and returns ranked matches plus per-pair
/// summaries. `candidates` must be supplied in strict mode and is ignored
/// in open mode.
pub fn match_tattoos(
    missing_tattoos: &[TattooRecord],
    body_tattoos: &[TattooRecord],
    candidates: Option<&[MatchCandidate]>,
    cfg: &TattooMatchConfig,
) -> Result<TattooMatchReport, MatchError> {
    cfg.validate()?;
    let spaces = TattooSpaces::fit(missing_tattoos, body_tattoos, &cfg.vectorizer)?;

    let missing_vectors = transform_all(missing_tattoos, &spaces);
    let body_vectors = transform_all(body_tattoos, &spaces);
    let missing_by_person = group_by_person(missing_tattoos);
    let body_by_person = group_by_person(body_tattoos);

    let pairs: Vec<(String, String)> = match cfg.mode {
        TattooMatchMode::Strict => {
            let candidates = candidates.ok_or(MatchError::MissingCandidates)?;
            candidates
                .iter()
                .filter(|c| {
                    let usable = missing_by_person.contains_key(c.missing_id.as_str())
                        && body_by_person.contains_key(c.body_id.as_str());
                    if !usable {
                        debug!(
                            missing = %c.missing_id,
                            body = %c.body_id,
                            "skipping candidate pair without tattoos on both sides"
                        );
                    }
                    usable
                })
                .map(|c| (c.missing_id.clone(), c.body_id.clone()))
                .collect()
        }
        TattooMatchMode::Open => {
            let mut missing_ids: Vec<&str> = missing_by_person.keys().copied().collect();
            let mut body_ids: Vec<&str> = body_by_person.keys().copied().collect();
            missing_ids.sort_unstable();
            body_ids.sort_unstable();
            missing_ids
                .iter()
                .flat_map(|m| body_ids.iter().map(move |b| (m.to_string(), b.to_string())))
                .collect()
        }
    };

    let mut matches: Vec<TattooMatch> = Vec::new();
    let mut tile_size = cfg.chunking.chunk_size.min(pairs.len().max(1));
    let mut start = 0usize;
    while start < pairs.len() {
        let end = (start + tile_size).min(pairs.len());
        let tile = &pairs[start..end];
        match score_tile(
            tile,
            missing_tattoos,
            body_tattoos,
            &missing_vectors,
            &body_vectors,
            &missing_by_person,
            &body_by_person,
            cfg,
        ) {
            Ok(mut tile_matches) => {
                matches.append(&mut tile_matches);
                start = end;
            }
            Err(MatchError::PairBudgetExceeded { pairs, budget }) if tile_size > 1 => {
                tile_size = (tile_size / 2).max(1);
                warn!(pairs, budget, tile_size, "tattoo pair budget exceeded; retrying smaller tile");
            }
            Err(err) => return Err(err),
        }
    }

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    let pairs_summary = summarize_pairs(&matches);
    info!(
        person_pairs = pairs.len(),
        matches = matches.len(),
        summarized_pairs = pairs_summary.len(),
        "tattoo matching complete"
    );
    Ok(TattooMatchReport {
        matches,
        pairs: pairs_summary,
    })
}

struct Vectors {
    features: Vec<SparseVector>,
    locations: Option<Vec<SparseVector>>,
}

fn transform_all(records: &[TattooRecord], spaces: &TattooSpaces) -> Vectors {
    Vectors {
        features: records
            .iter()
            .map(|r| spaces.features.transform(&r.combined_features()))
            .collect(),
        locations: spaces.locations.as_ref().map(|vectorizer| {
            records
                .iter()
                .map(|r| vectorizer.transform(&r.location_text()))
                .collect()
        }),
    }
}

fn group_by_person(records: &[TattooRecord]) -> FxHashMap<&str, Vec<usize>> {
    let mut by_person: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (index, record) in records.iter().enumerate() {
        by_person.entry(record.person_id.as_str()).or_default().push(index);
    }
    by_person
}

#[allow(clippy::too_many_arguments)]
fn score_tile(
    tile: &[(String, String)],
    missing_tattoos: &[TattooRecord],
    body_tattoos: &[TattooRecord],
    missing_vectors: &Vectors,
    body_vectors: &Vectors,
    missing_by_person: &FxHashMap<&str, Vec<usize>>,
    body_by_person: &FxHashMap<&str, Vec<usize>>,
    cfg: &TattooMatchConfig,
) -> Result<Vec<TattooMatch>, MatchError> {
    let comparisons: u64 = tile
        .iter()
        .map(|(m, b)| {
            let m_count = missing_by_person.get(m.as_str()).map_or(0, Vec::len) as u64;
            let b_count = body_by_person.get(b.as_str()).map_or(0, Vec::len) as u64;
            m_count * b_count
        })
        .sum();
    if comparisons > cfg.chunking.max_pairs_per_chunk {
        return Err(MatchError::PairBudgetExceeded {
            pairs: comparisons,
            budget: cfg.chunking.max_pairs_per_chunk,
        });
    }

    Ok(tile
        .par_iter()
        .flat_map_iter(|(missing_id, body_id)| {
            let missing_indices = missing_by_person
                .get(missing_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let body_indices = body_by_person
                .get(body_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            missing_indices.iter().flat_map(move |&mi| {
                body_indices.iter().filter_map(move |&bi| {
                    score_tattoo_pair(
                        &missing_tattoos[mi],
                        &body_tattoos[bi],
                        mi,
                        bi,
                        missing_vectors,
                        body_vectors,
                        cfg,
                    )
                })
            })
        })
        .collect())
}

fn score_tattoo_pair(
    missing: &TattooRecord,
    body: &TattooRecord,
    missing_index: usize,
    body_index: usize,
    missing_vectors: &Vectors,
    body_vectors: &Vectors,
    cfg: &TattooMatchConfig,
) -> Option<TattooMatch> {
    let text_similarity = cosine(
        &missing_vectors.features[missing_index],
        &body_vectors.features[body_index],
    );

    // When both sides resolve to one canonical body part, direct token
    // overlap short-circuits the vector computation.
    let location_similarity = match (missing.single_location(), body.single_location()) {
        (Some(m_loc), Some(b_loc)) => location_overlap(m_loc, b_loc),
        _ => match (&missing_vectors.locations, &body_vectors.locations) {
            (Some(m_locs), Some(b_locs)) => cosine(&m_locs[missing_index], &b_locs[body_index]),
            _ => 0.0,
        },
    };

    let literal_match = !missing.literal_text.is_empty()
        && !body.literal_text.is_empty()
        && missing.literal_text.eq_ignore_ascii_case(&body.literal_text);

    let score = cfg.weights.text * text_similarity
        + cfg.weights.location * location_similarity
        + cfg.weights.literal * f32::from(u8::from(literal_match));

    (score > cfg.threshold).then(|| TattooMatch {
        missing_id: missing.person_id.clone(),
        body_id: body.person_id.clone(),
        missing_description: missing.description.clone(),
        body_description: body.description.clone(),
        missing_location: missing.location_text(),
        body_location: body.location_text(),
        text_similarity,
        location_similarity,
        literal_match,
        score,
    })
}

/// Jaccard overlap of the location-label token sets.
fn location_overlap(a: &LocationTag, b: &LocationTag) -> f32 {
    let a_label = a.label().to_uppercase();
    let b_label = b.label().to_uppercase();
    let a_tokens: Vec<&str> = a_label.split_whitespace().collect();
    let b_tokens: Vec<&str> = b_label.split_whitespace().collect();
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }
    let shared = a_tokens.iter().filter(|t| b_tokens.contains(t)).count();
    let union = a_tokens.len() + b_tokens.len() - shared;
    shared as f32 / union as f32
}

/// Groups matches per person pair: pairs with several matching tattoos
/// sort above single coincidences, then by average score.
pub fn summarize_pairs(matches: &[TattooMatch]) -> Vec<PairSummary> {
    let mut grouped: FxHashMap<(String, String), Vec<f32>> = FxHashMap::default();
    for m in matches {
        grouped
            .entry((m.missing_id.clone(), m.body_id.clone()))
            .or_default()
            .push(m.score);
    }
    let mut summaries: Vec<PairSummary> = grouped
        .into_iter()
        .map(|((missing_id, body_id), scores)| PairSummary {
            missing_id,
            body_id,
            match_count: scores.len(),
            avg_score: scores.iter().sum::<f32>() / scores.len() as f32,
            max_score: scores.iter().copied().fold(0.0f32, f32::max),
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| b.avg_score.partial_cmp(&a.avg_score).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.missing_id.cmp(&b.missing_id))
            .then_with(|| a.body_id.cmp(&b.body_id))
    });
    summaries
}
