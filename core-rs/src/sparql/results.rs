//! SPARQL 1.1 Query Results JSON format
//!
//! Both SELECT (`results.bindings`) and ASK (`boolean`) documents are
//! parsed into [`QueryResponse`]. Unbound variables are simply absent from
//! a [`Binding`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{FsoError, Result};

/// RDF term as it appears in a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfTerm {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl RdfTerm {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: "uri".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }
}

/// One solution: variable name -> bound term
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding(HashMap<String, RdfTerm>);

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: &str, term: RdfTerm) -> Self {
        self.insert(var, term);
        self
    }

    pub fn insert(&mut self, var: &str, term: RdfTerm) {
        self.0.insert(var.to_string(), term);
    }

    /// Lexical value of `var`, `None` when unbound
    pub fn value(&self, var: &str) -> Option<&str> {
        self.0.get(var).map(|term| term.value.as_str())
    }

    pub fn term(&self, var: &str) -> Option<&RdfTerm> {
        self.0.get(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Bindings(Vec<Binding>),
    Boolean(bool),
}

impl QueryResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            QueryResponse::Bindings(_) => "bindings",
            QueryResponse::Boolean(_) => "boolean",
        }
    }

    pub fn into_bindings(self) -> Result<Vec<Binding>> {
        match self {
            QueryResponse::Bindings(rows) => Ok(rows),
            other => Err(FsoError::UnexpectedResult {
                expected: "bindings",
                actual: other.kind(),
            }),
        }
    }

    pub fn into_boolean(self) -> Result<bool> {
        match self {
            QueryResponse::Boolean(b) => Ok(b),
            other => Err(FsoError::UnexpectedResult {
                expected: "boolean",
                actual: other.kind(),
            }),
        }
    }

    /// Parse a `application/sparql-results+json` document
    pub fn from_json(body: &str) -> Result<Self> {
        let document: ResultsDocument = serde_json::from_str(body)?;

        match (document.boolean, document.results) {
            (Some(b), _) => Ok(QueryResponse::Boolean(b)),
            (None, Some(results)) => Ok(QueryResponse::Bindings(results.bindings)),
            (None, None) => Err(FsoError::Query(
                "result document has neither 'results' nor 'boolean'".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    results: Option<ResultSet>,
    #[serde(default)]
    boolean: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    bindings: Vec<Binding>,
}
