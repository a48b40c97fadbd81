//! Lexical overlap between the source and target frame of a mapping
//!
//! Each frame contributes two label sets: frame-element labels and
//! WordNet-looking synset labels. Overlap is the exact-string intersection
//! of the trimmed labels; case, diacritics and inflection are left alone.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::errors::Result;
use crate::pipeline::typing::LIST_SEPARATOR;
use crate::sparql::{QueryExecutor, Sleeper, SparqlEndpoint, SparqlQuery};

pub const OVERLAP_COLUMNS: [&str; 6] = [
    "source_frame",
    "target_frame",
    "n_common_frame_elements",
    "n_common_synset_labels",
    "common_frame_elements",
    "common_synset_labels",
];

/// Sorted, distinct, trimmed labels of one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameProfile {
    pub frame_elements: Vec<String>,
    pub synset_labels: Vec<String>,
}

impl FrameProfile {
    /// Build from raw labels; blanks are dropped
    pub fn from_labels<I, J>(frame_elements: I, synset_labels: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        Self {
            frame_elements: normalize(frame_elements),
            synset_labels: normalize(synset_labels),
        }
    }
}

fn normalize<I>(labels: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| label.as_ref().trim().to_string())
        .filter(|label| !label.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted intersection of two label lists
pub fn common_labels(a: &[String], b: &[String]) -> Vec<String> {
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|label| b.contains(label.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Inverse of the `"; "` join; the empty string is the empty list
///
/// Labels are not escaped when joined, so a label that itself contains `;`
/// splits into more parts than the count column reports.
pub fn split_joined(joined: &str) -> Vec<String> {
    if joined.trim().is_empty() {
        return Vec::new();
    }
    joined.split(';').map(|part| part.trim().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlapRecord {
    pub source_frame: String,
    pub target_frame: String,
    pub n_common_frame_elements: usize,
    pub n_common_synset_labels: usize,
    pub common_frame_elements: String,
    pub common_synset_labels: String,
}

impl OverlapRecord {
    pub fn from_profiles(
        source_frame: &str,
        target_frame: &str,
        source: &FrameProfile,
        target: &FrameProfile,
    ) -> Self {
        let common_fe = common_labels(&source.frame_elements, &target.frame_elements);
        let common_syn = common_labels(&source.synset_labels, &target.synset_labels);

        Self {
            source_frame: source_frame.to_string(),
            target_frame: target_frame.to_string(),
            n_common_frame_elements: common_fe.len(),
            n_common_synset_labels: common_syn.len(),
            common_frame_elements: common_fe.join(LIST_SEPARATOR),
            common_synset_labels: common_syn.join(LIST_SEPARATOR),
        }
    }

    /// Ranking key, compared descending
    pub fn score(&self) -> (usize, usize) {
        (self.n_common_frame_elements, self.n_common_synset_labels)
    }
}

pub fn frame_profile<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    frame: &str,
) -> Result<FrameProfile> {
    let bindings = executor.select(&SparqlQuery::frame_elements_and_synsets(frame))?;

    let profile = FrameProfile::from_labels(
        bindings.iter().filter_map(|b| b.value("feLabel")),
        bindings.iter().filter_map(|b| b.value("synLabel")),
    );

    debug!(
        frame,
        frame_elements = profile.frame_elements.len(),
        synset_labels = profile.synset_labels.len(),
        "fetched frame profile"
    );

    Ok(profile)
}

/// Fetch both profiles and intersect them
pub fn compute_overlap<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    source_frame: &str,
    target_frame: &str,
) -> Result<OverlapRecord> {
    let source = frame_profile(executor, source_frame)?;
    let target = frame_profile(executor, target_frame)?;
    Ok(OverlapRecord::from_profiles(source_frame, target_frame, &source, &target))
}

/// Overlap of every pair, in order
pub fn compute_all<E: SparqlEndpoint, S: Sleeper>(
    executor: &QueryExecutor<E, S>,
    pairs: &[(&str, &str)],
) -> Result<Vec<OverlapRecord>> {
    let mut records = Vec::with_capacity(pairs.len());

    for (index, (source, target)) in pairs.iter().enumerate() {
        info!("[{}/{}] Computing overlap {} vs {}", index + 1, pairs.len(), source, target);
        records.push(compute_overlap(executor, source, target)?);
    }

    Ok(records)
}

/// Top `n` records by (frame-element overlap, synset overlap), descending.
/// Ties keep their input order.
pub fn rank_pairs(records: &[OverlapRecord], n: usize) -> Vec<OverlapRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked.truncate(n);
    ranked
}
