//! Frame typing expansion
//!
//! For a seed frame: collect the frames related to it through
//! skos:closeMatch / schema:subsumedUnder (both directions, seed included),
//! then ask, per candidate, whether the graph uses it as a metaphor source
//! frame and as a target frame. Two ASK round-trips per candidate, nothing
//! is cached between seeds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::errors::Result;
use crate::sparql::{QueryExecutor, Sleeper, SparqlEndpoint, SparqlQuery};

pub const TYPING_COLUMNS: [&str; 4] = [
    "seed_frame",
    "equivalent_or_related_frames",
    "as_source",
    "as_target",
];

pub const LIST_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTyping {
    pub seed: String,
    pub candidates: BTreeSet<String>,
    pub as_source: BTreeSet<String>,
    pub as_target: BTreeSet<String>,
}

impl FrameTyping {
    pub fn to_row(&self) -> TypingRow {
        TypingRow {
            seed_frame: self.seed.clone(),
            equivalent_or_related_frames: join_sorted(&self.candidates),
            as_source: join_sorted(&self.as_source),
            as_target: join_sorted(&self.as_target),
        }
    }
}

/// Flattened form written to the typing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingRow {
    pub seed_frame: String,
    pub equivalent_or_related_frames: String,
    pub as_source: String,
    pub as_target: String,
}

fn join_sorted(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Seed plus its closeMatch/subsumedUnder neighbours
pub fn frame_candidates<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    seed: &str,
) -> Result<BTreeSet<String>> {
    let bindings = executor.select(&SparqlQuery::frame_candidates(seed))?;

    let mut candidates: BTreeSet<String> = bindings
        .iter()
        .map(|binding| binding.value("candidate").unwrap_or(seed).to_string())
        .collect();
    candidates.insert(seed.to_string());

    Ok(candidates)
}

pub fn expand_frame_typing<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    seed: &str,
) -> Result<FrameTyping> {
    let candidates = frame_candidates(executor, seed)?;
    let mut as_source = BTreeSet::new();
    let mut as_target = BTreeSet::new();

    for candidate in &candidates {
        if executor.ask(&SparqlQuery::is_source_frame(candidate))? {
            as_source.insert(candidate.clone());
        }
        if executor.ask(&SparqlQuery::is_target_frame(candidate))? {
            as_target.insert(candidate.clone());
        }
    }

    debug!(
        seed,
        candidates = candidates.len(),
        as_source = as_source.len(),
        as_target = as_target.len(),
        "expanded frame typing"
    );

    Ok(FrameTyping {
        seed: seed.to_string(),
        candidates,
        as_source,
        as_target,
    })
}

/// Expand every frame in order
pub fn expand_all<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    frames: &[String],
) -> Result<Vec<FrameTyping>> {
    let mut typings = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        info!("[{}/{}] Expanding frame typing for {}", index + 1, frames.len(), frame);
        typings.push(expand_frame_typing(executor, frame)?);
    }

    Ok(typings)
}
