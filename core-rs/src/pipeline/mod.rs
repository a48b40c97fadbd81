//! Pipeline stages and their orchestration
//!
//! ```text
//! metaphors ──▶ mappings ──▶ unique frames ──▶ typing
//!                  │
//!                  └──▶ (source, target) pairs ──▶ overlap
//! ```
//!
//! Stages run once, strictly in sequence. Each output table is written as
//! soon as its stage finishes, so a failure later on leaves the earlier
//! tables in place.

pub mod mappings;
pub mod overlap;
pub mod typing;

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

use crate::config::RunConfig;
use crate::errors::Result;
use crate::output;
use crate::sparql::{QueryExecutor, Sleeper, SparqlEndpoint};

pub use mappings::{collect_mappings, fetch_mappings, MappingRow, MappingTable};
pub use overlap::{compute_overlap, frame_profile, rank_pairs, FrameProfile, OverlapRecord};
pub use typing::{expand_frame_typing, FrameTyping, TypingRow};

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub metaphors_processed: usize,
    pub mapping_rows: usize,
    pub pairs_with_frames: usize,
    pub frames_typed: usize,
    pub overlaps: Vec<OverlapRecord>,
    pub top_pairs: Vec<OverlapRecord>,
    pub outputs: Vec<PathBuf>,
}

pub struct Pipeline<'a, E, S> {
    config: &'a RunConfig,
    executor: QueryExecutor<E, S>,
}

impl<'a, E: SparqlEndpoint, S: Sleeper> Pipeline<'a, E, S> {
    pub fn new(config: &'a RunConfig, executor: QueryExecutor<E, S>) -> Self {
        Self { config, executor }
    }

    pub fn run(&self) -> Result<RunSummary> {
        info!(
            endpoint = %self.executor.endpoint().describe(),
            metaphors = self.config.metaphors.len(),
            "Starting pipeline"
        );

        // Stage 1: mappings
        let table = collect_mappings(&self.executor, &self.config.metaphors)?;
        let mappings_path = self.config.mappings_path();
        output::write_mappings(&mappings_path, table.rows())?;

        // Stage 2: typing
        let frames = table.unique_frames();
        let typings = typing::expand_all(&self.executor, &frames)?;
        let typing_rows: Vec<TypingRow> = typings.iter().map(FrameTyping::to_row).collect();
        let typing_path = self.config.typing_path();
        output::write_typing(&typing_path, &typing_rows)?;

        // Stage 3: overlap, once per distinct pair
        let pairs_with_frames = table.frame_pairs().len();
        let pairs = table.distinct_frame_pairs();
        let overlaps = dedup_overlaps(overlap::compute_all(&self.executor, &pairs)?);
        let overlap_path = self.config.overlap_path();
        output::write_overlaps(&overlap_path, &overlaps)?;

        let top_pairs = rank_pairs(&overlaps, self.config.top_pairs);

        info!(
            mapping_rows = table.len(),
            frames = frames.len(),
            overlaps = overlaps.len(),
            "Pipeline finished"
        );

        Ok(RunSummary {
            metaphors_processed: self.config.metaphors.len(),
            mapping_rows: table.len(),
            pairs_with_frames,
            frames_typed: typings.len(),
            overlaps,
            top_pairs,
            outputs: vec![mappings_path, typing_path, overlap_path],
        })
    }
}

fn dedup_overlaps(records: Vec<OverlapRecord>) -> Vec<OverlapRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
