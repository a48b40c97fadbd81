//! Metaphor → source/target frame mappings
//!
//! One query per metaphor, flattened into [`MappingRow`]s. A metaphor with
//! no rows still gets an all-null placeholder so that every configured
//! metaphor shows up in the table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use crate::errors::Result;
use crate::sparql::{Binding, QueryExecutor, Sleeper, SparqlEndpoint, SparqlQuery};

pub const MAPPING_COLUMNS: [&str; 7] = [
    "metaphor",
    "source_frame",
    "target_frame",
    "source_role",
    "target_role",
    "entailment",
    "example",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRow {
    pub metaphor: String,
    pub source_frame: Option<String>,
    pub target_frame: Option<String>,
    pub source_role: Option<String>,
    pub target_role: Option<String>,
    pub entailment: Option<String>,
    pub example: Option<String>,
}

impl MappingRow {
    /// Row standing in for a metaphor the graph knows nothing about
    pub fn placeholder(metaphor: &str) -> Self {
        Self {
            metaphor: metaphor.to_string(),
            source_frame: None,
            target_frame: None,
            source_role: None,
            target_role: None,
            entailment: None,
            example: None,
        }
    }

    pub fn from_binding(metaphor: &str, binding: &Binding) -> Self {
        let field = |var: &str| binding.value(var).map(str::to_string);

        Self {
            metaphor: field("metaphor").unwrap_or_else(|| metaphor.to_string()),
            source_frame: field("src"),
            target_frame: field("tgt"),
            source_role: field("srcRole"),
            target_role: field("tgtRole"),
            entailment: field("ent"),
            example: field("ex"),
        }
    }

    /// Both frames, when both are bound
    pub fn frame_pair(&self) -> Option<(&str, &str)> {
        match (&self.source_frame, &self.target_frame) {
            (Some(source), Some(target)) => Some((source.as_str(), target.as_str())),
            _ => None,
        }
    }
}

/// Fetch and flatten the mapping rows of one metaphor (may be empty)
pub fn fetch_mappings<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    metaphor: &str,
) -> Result<Vec<MappingRow>> {
    let bindings = executor.select(&SparqlQuery::metaphor_mappings(metaphor))?;
    debug!(metaphor, rows = bindings.len(), "fetched mappings");

    Ok(bindings
        .iter()
        .map(|binding| MappingRow::from_binding(metaphor, binding))
        .collect())
}

/// Mapping rows of all metaphors, deduplicated on the exact tuple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    rows: Vec<MappingRow>,
}

impl MappingTable {
    /// Drop exact duplicates, keeping the first occurrence
    pub fn from_rows(rows: Vec<MappingRow>) -> Self {
        let mut seen = HashSet::new();
        let rows = rows
            .into_iter()
            .filter(|row| seen.insert(row.clone()))
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every frame seen as source or target, sorted and distinct
    pub fn unique_frames(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|row| [row.source_frame.as_ref(), row.target_frame.as_ref()])
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// (source, target) of every row with both frames bound, in table order
    pub fn frame_pairs(&self) -> Vec<(&str, &str)> {
        self.rows.iter().filter_map(MappingRow::frame_pair).collect()
    }

    /// Like [`frame_pairs`](Self::frame_pairs) without repeats
    pub fn distinct_frame_pairs(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        self.frame_pairs()
            .into_iter()
            .filter(|pair| seen.insert(*pair))
            .collect()
    }

    pub fn contains_metaphor(&self, metaphor: &str) -> bool {
        self.rows.iter().any(|row| row.metaphor == metaphor)
    }
}

/// Fetch every metaphor in order, substituting a placeholder for empty ones
pub fn collect_mappings<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    metaphors: &[String],
) -> Result<MappingTable> {
    let mut all_rows = Vec::new();

    for (index, metaphor) in metaphors.iter().enumerate() {
        info!("[{}/{}] Fetching mappings for {}", index + 1, metaphors.len(), metaphor);

        let rows = fetch_mappings(executor, metaphor)?;
        if rows.is_empty() {
            debug!(metaphor = %metaphor, "no mappings, emitting placeholder");
            all_rows.push(MappingRow::placeholder(metaphor));
        } else {
            all_rows.extend(rows);
        }
    }

    Ok(MappingTable::from_rows(all_rows))
}
