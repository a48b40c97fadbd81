// Pipeline Contract Tests
//
// These tests pin the invariants the output tables must always satisfy,
// whatever the remote graph happens to contain.

use fso_core::pipeline::overlap::{split_joined, OverlapRecord};
use fso_core::pipeline::{mappings, typing, FrameProfile, MappingRow, MappingTable};
use fso_core::sparql::{RecordingSleeper, SparqlEndpoint};
use fso_core::{
    Binding, FsoError, LocalEndpoint, QueryExecutor, QueryResponse, RetryPolicy, SparqlQuery,
};
use std::cell::Cell;
use std::time::Duration;

const SAMPLE: &str = include_str!("../fixtures/metanet_sample.ttl");

fn local_executor() -> QueryExecutor<LocalEndpoint, RecordingSleeper> {
    QueryExecutor::with_sleeper(
        LocalEndpoint::from_turtle(SAMPLE).unwrap(),
        RetryPolicy::default(),
        RecordingSleeper::new(),
    )
}

/// Answers every SELECT with no rows
struct EmptyEndpoint;

impl SparqlEndpoint for EmptyEndpoint {
    fn execute(&self, query: &SparqlQuery) -> fso_core::Result<QueryResponse> {
        match query.form() {
            fso_core::sparql::QueryForm::Ask => Ok(QueryResponse::Boolean(false)),
            fso_core::sparql::QueryForm::Select => Ok(QueryResponse::Bindings(Vec::<Binding>::new())),
        }
    }

    fn describe(&self) -> String {
        "empty".to_string()
    }
}

/// WHY: Every configured metaphor must be visible in the mapping table
/// BREAKS: Downstream joins on the metaphor column silently lose metaphors
#[test]
fn every_metaphor_has_at_least_one_row() {
    let executor = QueryExecutor::with_sleeper(EmptyEndpoint, RetryPolicy::default(), RecordingSleeper::new());
    let metaphors = vec![
        "http://example.org/m/A".to_string(),
        "http://example.org/m/B".to_string(),
    ];

    let table = mappings::collect_mappings(&executor, &metaphors).unwrap();

    assert_eq!(table.len(), 2);
    for m in &metaphors {
        assert!(table.contains_metaphor(m));
    }
    assert_eq!(table.rows()[0], MappingRow::placeholder("http://example.org/m/A"));
}

/// WHY: Zero metaphors means zero rows, not a spurious placeholder
#[test]
fn no_metaphors_no_rows() {
    let executor = local_executor();
    let table = mappings::collect_mappings(&executor, &[]).unwrap();
    assert!(table.is_empty());
}

/// WHY: Deduplication must be idempotent
/// BREAKS: Re-processing an exported table would change its content
#[test]
fn deduplication_is_idempotent() {
    let executor = local_executor();
    let metaphors: Vec<String> = fso_core::SELECTED_METAPHORS.iter().map(|m| m.to_string()).collect();
    let mut doubled = metaphors.clone();
    doubled.extend(metaphors);

    let table = mappings::collect_mappings(&executor, &doubled).unwrap();
    let again = MappingTable::from_rows(table.rows().to_vec());

    assert_eq!(table, again);
    assert_eq!(table.len(), 11);
}

/// WHY: as_source and as_target are classifications of the candidates,
///      and the seed is always a candidate of itself
#[test]
fn typing_subsets_are_within_candidates() {
    let executor = local_executor();
    let metaphors: Vec<String> = fso_core::SELECTED_METAPHORS.iter().map(|m| m.to_string()).collect();
    let table = mappings::collect_mappings(&executor, &metaphors).unwrap();

    let mut frames = table.unique_frames();
    frames.push("http://example.org/unknown-frame".to_string());

    for typing in typing::expand_all(&executor, &frames).unwrap() {
        assert!(typing.candidates.contains(&typing.seed), "seed missing for {}", typing.seed);
        assert!(typing.as_source.is_subset(&typing.candidates));
        assert!(typing.as_target.is_subset(&typing.candidates));
    }
}

/// WHY: Counts and joined contents are two views of the same intersection
/// BREAKS: Consumers splitting the joined column get a different number
#[test]
fn overlap_counts_match_joined_contents() {
    let profiles = [
        FrameProfile::from_labels(["Agent", "Goal", "Path"], ["go", "travel"]),
        FrameProfile::from_labels(["Agent", "Theme"], Vec::<String>::new()),
        FrameProfile::from_labels(Vec::<String>::new(), ["travel"]),
        FrameProfile::default(),
    ];

    for source in &profiles {
        for target in &profiles {
            let record = OverlapRecord::from_profiles("S", "T", source, target);
            assert_eq!(
                split_joined(&record.common_frame_elements).len(),
                record.n_common_frame_elements
            );
            assert_eq!(
                split_joined(&record.common_synset_labels).len(),
                record.n_common_synset_labels
            );
        }
    }
}

/// WHY: {"Agent","Goal"} ∩ {"Agent","Theme"} is exactly "Agent"
#[test]
fn overlap_reference_example() {
    let source = FrameProfile::from_labels(["Agent", "Goal"], Vec::<String>::new());
    let target = FrameProfile::from_labels(["Agent", "Theme"], Vec::<String>::new());

    let record = OverlapRecord::from_profiles("S", "T", &source, &target);
    assert_eq!(record.n_common_frame_elements, 1);
    assert_eq!(record.common_frame_elements, "Agent");
}

/// WHY: Retry backoff is linear: backoff*1, then backoff*2
/// BREAKS: Hammering the public endpoint, or stalling far longer than needed
#[test]
fn retry_sleeps_linearly_between_attempts() {
    struct FailTwice {
        calls: Cell<u32>,
    }

    impl SparqlEndpoint for FailTwice {
        fn execute(&self, _query: &SparqlQuery) -> fso_core::Result<QueryResponse> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n < 2 {
                Err(FsoError::Query("transient".to_string()))
            } else {
                Ok(QueryResponse::Boolean(true))
            }
        }

        fn describe(&self) -> String {
            "fail-twice".to_string()
        }
    }

    let sleeper = RecordingSleeper::new();
    let endpoint = FailTwice { calls: Cell::new(0) };
    let executor = QueryExecutor::with_sleeper(
        &endpoint,
        RetryPolicy::new(3, Duration::from_millis(800)),
        &sleeper,
    );

    assert!(executor.ask(&SparqlQuery::new("ASK {}")).unwrap());
    assert_eq!(
        sleeper.durations(),
        vec![Duration::from_millis(800), Duration::from_millis(1600)]
    );
}
