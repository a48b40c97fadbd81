//! Error types for the frame-overlap pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}: {body}")]
    EndpointStatus { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Unexpected result: expected {expected}, got {actual}")]
    UnexpectedResult {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Query failed after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<FsoError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl From<oxigraph::store::StorageError> for FsoError {
    fn from(err: oxigraph::store::StorageError) -> Self {
        FsoError::Store(err.to_string())
    }
}

impl From<oxigraph::store::LoaderError> for FsoError {
    fn from(err: oxigraph::store::LoaderError) -> Self {
        FsoError::Store(err.to_string())
    }
}

impl From<oxigraph::sparql::EvaluationError> for FsoError {
    fn from(err: oxigraph::sparql::EvaluationError) -> Self {
        FsoError::Query(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FsoError>;
