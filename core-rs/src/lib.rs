//! # FSO Core - Framester metaphor frame overlap
//!
//! Retrieves MetaNet metaphor → frame mappings from the Framester knowledge
//! graph, expands frame typing through taxonomic links, and measures the
//! lexical overlap between each mapped source and target frame.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ QueryExecutor│──▶│   Mappings   │──▶│    Typing    │──▶│   Overlap    │
//! │ retry+backoff│   │ per metaphor │   │  per frame   │   │  per pair    │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//!                           │                  │                  │
//!                           ▼                  ▼                  ▼
//!                     mappings.csv        typing.csv        overlap.csv
//! ```
//!
//! Everything is sequential and blocking: one remote round-trip at a time.

pub mod config;
pub mod errors;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod sparql;

pub use config::{RunConfig, FRAMESTER_SPARQL, SELECTED_METAPHORS};
pub use errors::{FsoError, Result};
pub use pipeline::{
    FrameProfile, FrameTyping, MappingRow, MappingTable, OverlapRecord, Pipeline, RunSummary,
    TypingRow,
};
pub use sparql::{
    Binding, HttpEndpoint, LocalEndpoint, QueryExecutor, QueryResponse, RetryPolicy,
    SparqlEndpoint, SparqlQuery,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
