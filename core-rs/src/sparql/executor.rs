//! Query execution with bounded, linearly backed-off retries
//!
//! After failed attempt `k` (0-based) the executor waits `backoff × (k+1)`
//! before trying again. The last failure is returned to the caller; there
//! is no recovery beyond the loop.

use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{DEFAULT_BACKOFF_SECS, DEFAULT_RETRIES};
use crate::errors::{FsoError, Result};
use crate::sparql::endpoint::SparqlEndpoint;
use crate::sparql::query::{QueryForm, SparqlQuery};
use crate::sparql::results::{Binding, QueryResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Wait after failed attempt `attempt` (0-based), saturating at `Duration::MAX`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt.saturating_add(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIES, Duration::from_secs_f64(DEFAULT_BACKOFF_SECS))
    }
}

/// Blocking pause between attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested pauses instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    slept: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

pub struct QueryExecutor<E, S = ThreadSleeper> {
    endpoint: E,
    policy: RetryPolicy,
    sleeper: S,
}

impl<E: SparqlEndpoint> QueryExecutor<E, ThreadSleeper> {
    pub fn new(endpoint: E, policy: RetryPolicy) -> Self {
        Self::with_sleeper(endpoint, policy, ThreadSleeper)
    }
}

impl<E: SparqlEndpoint, S: Sleeper> QueryExecutor<E, S> {
    pub fn with_sleeper(endpoint: E, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            endpoint,
            policy,
            sleeper,
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `query`, retrying on any error
    pub fn run(&self, query: &SparqlQuery) -> Result<QueryResponse> {
        let attempts = self.policy.retries.max(1);
        let mut attempt = 0;

        loop {
            match self.endpoint.execute(query) {
                Ok(response) => {
                    if attempt > 0 {
                        debug!(attempt = attempt + 1, "query succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(err) if attempt + 1 >= attempts => {
                    warn!(attempts, endpoint = %self.endpoint.describe(), "giving up on query: {}", err);
                    return Err(FsoError::RetriesExhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.policy.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        of = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "query failed, retrying: {}",
                        err
                    );
                    self.sleeper.sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Run a SELECT query and return its rows
    pub fn select(&self, query: &SparqlQuery) -> Result<Vec<Binding>> {
        debug_assert_eq!(query.form(), QueryForm::Select);
        self.run(query)?.into_bindings()
    }

    /// Run an ASK query
    pub fn ask(&self, query: &SparqlQuery) -> Result<bool> {
        debug_assert_eq!(query.form(), QueryForm::Ask);
        self.run(query)?.into_boolean()
    }
}
