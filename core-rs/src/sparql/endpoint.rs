//! SPARQL endpoints
//!
//! - `HttpEndpoint`: remote SPARQL 1.1 protocol endpoint (Framester by default)
//! - `LocalEndpoint`: in-memory Oxigraph store loaded from Turtle, used for
//!   offline datasets and fixtures

use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::errors::{FsoError, Result};
use crate::sparql::query::SparqlQuery;
use crate::sparql::results::{Binding, QueryResponse, RdfTerm};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Anything that can evaluate a query and hand back a result document.
///
/// Implementations perform exactly one attempt; retrying is the
/// executor's job.
pub trait SparqlEndpoint {
    fn execute(&self, query: &SparqlQuery) -> Result<QueryResponse>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

impl<E: SparqlEndpoint + ?Sized> SparqlEndpoint for &E {
    fn execute(&self, query: &SparqlQuery) -> Result<QueryResponse> {
        (**self).execute(query)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<E: SparqlEndpoint + ?Sized> SparqlEndpoint for Box<E> {
    fn execute(&self, query: &SparqlQuery) -> Result<QueryResponse> {
        (**self).execute(query)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Remote endpoint spoken to over HTTP POST (form-encoded `query`)
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    url: String,
    client: Client,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SparqlEndpoint for HttpEndpoint {
    fn execute(&self, query: &SparqlQuery) -> Result<QueryResponse> {
        debug!(endpoint = %self.url, "POST query ({} bytes)", query.as_str().len());

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .header(USER_AGENT, concat!("fso/", env!("CARGO_PKG_VERSION")))
            .form(&[("query", query.as_str())])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(FsoError::EndpointStatus {
                status: status.as_u16(),
                body: body.chars().take(512).collect(),
            });
        }

        QueryResponse::from_json(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// In-memory store answering queries locally
pub struct LocalEndpoint {
    store: Store,
    source: String,
}

impl LocalEndpoint {
    pub fn empty() -> Result<Self> {
        Ok(Self {
            store: Store::new()?,
            source: "memory".to_string(),
        })
    }

    /// Load a Turtle document given as text
    pub fn from_turtle(turtle: &str) -> Result<Self> {
        let mut endpoint = Self::empty()?;
        endpoint.load_turtle(turtle)?;
        Ok(endpoint)
    }

    /// Load a Turtle file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FsoError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let mut endpoint = Self::from_turtle(&content)?;
        endpoint.source = path.display().to_string();
        Ok(endpoint)
    }

    pub fn load_turtle(&mut self, turtle: &str) -> Result<()> {
        self.store
            .load_from_reader(RdfFormat::Turtle, turtle.as_bytes())?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.is_empty()?)
    }
}

impl SparqlEndpoint for LocalEndpoint {
    fn execute(&self, query: &SparqlQuery) -> Result<QueryResponse> {
        let results = self.store.query(query.as_str())?;

        match results {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();

                for solution in solutions {
                    let solution = solution?;

                    let mut row = Binding::new();
                    for (var, term) in solution.iter() {
                        row.insert(var.as_str(), to_rdf_term(term));
                    }

                    rows.push(row);
                }

                Ok(QueryResponse::Bindings(rows))
            }
            QueryResults::Boolean(result) => Ok(QueryResponse::Boolean(result)),
            QueryResults::Graph(_) => Err(FsoError::Query(
                "CONSTRUCT/DESCRIBE queries are not supported".to_string(),
            )),
        }
    }

    fn describe(&self) -> String {
        format!("local store ({})", self.source)
    }
}

fn to_rdf_term(term: &Term) -> RdfTerm {
    match term {
        Term::NamedNode(node) => RdfTerm::uri(node.as_str()),
        Term::BlankNode(node) => RdfTerm {
            kind: "bnode".to_string(),
            value: node.as_str().to_string(),
            datatype: None,
            lang: None,
        },
        Term::Literal(literal) => RdfTerm {
            kind: "literal".to_string(),
            value: literal.value().to_string(),
            datatype: Some(literal.datatype().as_str().to_string()),
            lang: literal.language().map(str::to_string),
        },
        #[allow(unreachable_patterns)]
        other => RdfTerm::literal(other.to_string()),
    }
}
