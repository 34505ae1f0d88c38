//! Workspace umbrella crate for cotejo, a cross-registry forensic record
//! linkage engine.
//!
//! Two disjoint registries (open missing-person reports and unidentified
//! body intake records) are linked by scoring cross-record similarity
//! over demographic, temporal, textual, and tattoo attributes. The result
//! is a ranked set of candidate matches for human review: the scores are
//! heuristic and an aid to adjudication, never a classification.
//!
//! The member crates each own one stage; this crate stitches them into
//! end-to-end entry points:
//!
//! - [`run_person_matching`]: hard filters + attribute scorers + ranked
//!   aggregation ([`matcher`]).
//! - [`extract_registry_tattoos`]: narrative splitting and tagging for
//!   both registries ([`tattoo`]).
//! - [`run_tattoo_matching`]: TF-IDF + composite tattoo pair scoring
//!   ([`matcher`], [`textsim`]).
//! - [`run_pipeline`]: everything above plus the review graph
//!   ([`graph`]).

mod config;
mod export;

pub use crate::config::PipelineConfig;
pub use crate::export::{
    read_candidate_pairs_csv, write_person_matches_csv, write_tattoo_matches_csv,
};
pub use graph::{to_graphml, to_json, GraphBuilder, GraphError, MatchGraph, NodeKind, UNKNOWN};
pub use matcher::{
    match_persons, match_tattoos, ChunkPolicy, Contribution, MatchCandidate, MatchConfig,
    MatchError, PairSummary, ScoreAttribute, TattooMatch, TattooMatchConfig, TattooMatchMode,
    TattooMatchReport, TattooWeights,
};
pub use registry::{
    load_bodies_from_path, load_bodies_from_reader, load_missing_from_path,
    load_missing_from_reader, AgeValue, Body, MissingPerson, RegistryConfig, RegistryError,
};
pub use tattoo::{
    extract_tattoos, CategoryStrategy, LocationTag, TattooConfig, TattooError, TattooLexicon,
    TattooRecord,
};
pub use textsim::{cosine, SparseVector, TextSimError, TfIdfConfig, TfIdfVectorizer};

use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced by the end-to-end pipeline entry points.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("registry stage failed: {0}")]
    Registry(#[from] RegistryError),
    #[error("tattoo extraction stage failed: {0}")]
    Tattoo(#[from] TattooError),
    #[error("matching stage failed: {0}")]
    Match(#[from] MatchError),
    #[error("graph export failed: {0}")]
    Graph(#[from] GraphError),
    #[error("match table I/O failed: {0}")]
    Table(#[from] csv::Error),
}

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Ranked person-level candidates.
    pub candidates: Vec<MatchCandidate>,
    /// Ranked tattoo matches plus per-pair summaries.
    pub tattoo_report: TattooMatchReport,
    /// The assembled review graph.
    pub graph: MatchGraph,
}

/// Runs person-level matching over two normalized registries.
pub fn run_person_matching(
    missing: &[MissingPerson],
    bodies: &[Body],
    cfg: &PipelineConfig,
) -> Result<Vec<MatchCandidate>, PipelineError> {
    Ok(match_persons(missing, bodies, &cfg.matching)?)
}

/// Extracts tattoo records from both registries' narratives.
pub fn extract_registry_tattoos(
    missing: &[MissingPerson],
    bodies: &[Body],
    cfg: &TattooConfig,
) -> (Vec<TattooRecord>, Vec<TattooRecord>) {
    let missing_tattoos: Vec<TattooRecord> = missing
        .iter()
        .filter_map(|p| p.tattoo_narrative.as_deref().map(|n| (p.id.as_str(), n)))
        .flat_map(|(id, narrative)| extract_tattoos(id, narrative, cfg))
        .collect();
    let body_tattoos: Vec<TattooRecord> = bodies
        .iter()
        .filter_map(|b| b.tattoo_narrative.as_deref().map(|n| (b.id.as_str(), n)))
        .flat_map(|(id, narrative)| extract_tattoos(id, narrative, cfg))
        .collect();
    info!(
        missing_tattoos = missing_tattoos.len(),
        body_tattoos = body_tattoos.len(),
        "tattoo extraction complete"
    );
    (missing_tattoos, body_tattoos)
}

/// Runs tattoo pair matching over already-extracted tattoo records.
/// `candidates` is required in strict mode.
pub fn run_tattoo_matching(
    missing_tattoos: &[TattooRecord],
    body_tattoos: &[TattooRecord],
    candidates: Option<&[MatchCandidate]>,
    cfg: &PipelineConfig,
) -> Result<TattooMatchReport, PipelineError> {
    Ok(match_tattoos(
        missing_tattoos,
        body_tattoos,
        candidates,
        &cfg.tattoo_matching,
    )?)
}

/// The full run: person matching, tattoo extraction and matching, and the
/// review graph.
///
/// When neither registry carries a tattoo narrative the tattoo stage is
/// skipped with a warning instead of failing the person-level results; a
/// direct [`run_tattoo_matching`] call still fails fast on an empty
/// corpus.
pub fn run_pipeline(
    missing: &[MissingPerson],
    bodies: &[Body],
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    cfg.validate()?;

    let candidates = run_person_matching(missing, bodies, cfg)?;
    let (missing_tattoos, body_tattoos) = extract_registry_tattoos(missing, bodies, &cfg.tattoo);

    let tattoo_report = if missing_tattoos.is_empty() && body_tattoos.is_empty() {
        warn!("no tattoo narratives in either registry; skipping tattoo matching");
        TattooMatchReport {
            matches: Vec::new(),
            pairs: Vec::new(),
        }
    } else {
        run_tattoo_matching(&missing_tattoos, &body_tattoos, Some(&candidates), cfg)?
    };

    let graph = GraphBuilder::new()
        .add_person_candidates(&candidates)
        .add_tattoo_matches(&tattoo_report.matches)
        .build();

    Ok(PipelineOutput {
        candidates,
        tattoo_report,
        graph,
    })
}
