//! Person-level matching: hard filters, scorers, weighted aggregation.
//!
//! The cross product is enumerated in chunks of the missing-person side;
//! within a chunk every pair is scored independently on the rayon pool
//! with worker-local accumulators. Merging is concatenation plus one
//! global sort at the end, the only synchronization point.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use registry::{Body, MissingPerson};

use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::filter::passes_hard_filters;
use crate::scorers::{days_between, score_age, score_location, score_name};
use crate::types::MatchCandidate;

/// Scores every missing x body pair and returns the candidates ranked by
/// descending aggregate score.
///
/// A candidate is materialized only when at least one scorer fired: any
/// single strong signal is reportable on its own, reflecting that the
/// evidence in these registries is typically partial.
pub fn match_persons(
    missing: &[MissingPerson],
    bodies: &[Body],
    cfg: &MatchConfig,
) -> Result<Vec<MatchCandidate>, MatchError> {
    cfg.validate()?;
    if missing.is_empty() || bodies.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<MatchCandidate> = Vec::new();
    let mut chunk_size = cfg.chunking.chunk_size.min(missing.len());
    let mut start = 0usize;

    while start < missing.len() {
        let end = (start + chunk_size).min(missing.len());
        match score_chunk(&missing[start..end], bodies, cfg) {
            Ok(mut chunk_candidates) => {
                candidates.append(&mut chunk_candidates);
                start = end;
            }
            Err(MatchError::PairBudgetExceeded { pairs, budget }) if chunk_size > 1 => {
                // Degradation policy: retry the same region with a smaller
                // batch instead of crashing.
                chunk_size = (chunk_size / 2).max(1);
                warn!(pairs, budget, chunk_size, "pair budget exceeded; retrying smaller chunk");
            }
            Err(err) => return Err(err),
        }
    }

    // Stable sort keeps input order among ties.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    info!(
        missing = missing.len(),
        bodies = bodies.len(),
        candidates = candidates.len(),
        "person matching complete"
    );
    Ok(candidates)
}

fn score_chunk(
    chunk: &[MissingPerson],
    bodies: &[Body],
    cfg: &MatchConfig,
) -> Result<Vec<MatchCandidate>, MatchError> {
    let pairs = chunk.len() as u64 * bodies.len() as u64;
    if pairs > cfg.chunking.max_pairs_per_chunk {
        return Err(MatchError::PairBudgetExceeded {
            pairs,
            budget: cfg.chunking.max_pairs_per_chunk,
        });
    }
    debug!(chunk = chunk.len(), pairs, "scoring chunk");

    Ok(chunk
        .par_iter()
        .flat_map_iter(|person| {
            bodies
                .iter()
                .filter_map(move |body| score_pair(person, body, cfg))
        })
        .collect())
}

/// Scores one pair. `None` when the pair fails a hard filter or no scorer
/// fires.
fn score_pair(missing: &MissingPerson, body: &Body, cfg: &MatchConfig) -> Option<MatchCandidate> {
    if !passes_hard_filters(missing, body) {
        return None;
    }
    // Hard filters guarantee both dates are known.
    let (Some(event_date), Some(intake_date)) = (missing.event_date, body.intake_date) else {
        return None;
    };

    let contributions: Vec<_> = [
        score_age(&missing.age, &body.age, cfg.age_tolerance),
        score_name(&missing.full_name, &body.name, cfg),
        score_location(&missing.municipality, &body.jurisdiction, cfg.location_bonus),
    ]
    .into_iter()
    .flatten()
    .collect();

    let score: f64 = contributions.iter().map(|c| c.value).sum();
    if score <= 0.0 {
        return None;
    }

    Some(MatchCandidate {
        missing_id: missing.id.clone(),
        body_id: body.id.clone(),
        score,
        contributions,
        days_between: days_between(event_date, intake_date),
        missing_name: missing.full_name.clone(),
        missing_age: missing.age,
        missing_date: missing.event_date,
        missing_location: missing.municipality.clone(),
        body_name: body.name.clone(),
        body_age: body.age,
        body_date: body.intake_date,
        body_location: body.jurisdiction.clone(),
    })
}
