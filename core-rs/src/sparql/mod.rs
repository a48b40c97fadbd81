/**
 * sparql module
 *
 * - query: SPARQL query builders for the MetaNet/FrameNet/WordNet vocabulary
 * - results: SPARQL 1.1 JSON results (bindings or boolean)
 * - endpoint: remote HTTP endpoint and local Oxigraph store
 * - executor: retry loop with linear backoff
 */

pub mod endpoint;
pub mod executor;
pub mod query;
pub mod results;

pub use endpoint::{HttpEndpoint, LocalEndpoint, SparqlEndpoint};
pub use executor::{QueryExecutor, RecordingSleeper, RetryPolicy, Sleeper, ThreadSleeper};
pub use query::{QueryForm, SparqlQuery};
pub use results::{Binding, QueryResponse, RdfTerm};
