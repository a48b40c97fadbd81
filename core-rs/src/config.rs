/**
 * config.rs
 * Run configuration (YAML format)
 *
 * Format:
 * ```yaml
 * endpoint: https://etna.istc.cnr.it/framester2/sparql
 * retries: 3
 * backoffSecs: 0.8
 * timeoutSecs: 60
 * outputDir: .
 * metaphors:
 *   - https://w3id.org/framester/metanet/metaphors/MACHINES_ARE_PEOPLE
 * ```
 *
 * Every key is optional; missing keys take the built-in defaults.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{FsoError, Result};
use crate::sparql::RetryPolicy;

/// Public Framester SPARQL endpoint
pub const FRAMESTER_SPARQL: &str = "https://etna.istc.cnr.it/framester2/sparql";

/// MetaNet metaphors processed when no list is configured
pub const SELECTED_METAPHORS: [&str; 10] = [
    "https://w3id.org/framester/metanet/metaphors/GOVERNMENT_INSTITUTION_IS_A_BUILDING",
    "https://w3id.org/framester/metanet/metaphors/GOVERNMENT_IS_A_PERSON",
    "https://w3id.org/framester/metanet/metaphors/GOVERNMENT_IS_AN_ORGANISM",
    "https://w3id.org/framester/metanet/metaphors/GOVERNING_ACTION_IS_MOTION",
    "https://w3id.org/framester/metanet/metaphors/GOVERNMENT_INSTITUTION_IS_A_PHYSICAL_STRUCTURE",
    "https://w3id.org/framester/metanet/metaphors/CAUSED_CHANGE_OF_STATE_IS_CAUSED_CHANGE_OF_LOCATION",
    "https://w3id.org/framester/metanet/metaphors/ANALYZING_IS_DISSECTING",
    "https://w3id.org/framester/metanet/metaphors/MACHINES_ARE_PEOPLE",
    "https://w3id.org/framester/metanet/metaphors/CHANGE_IN_CONTROLLER_IS_TRANSFER_OF_POSSESSION",
    "https://w3id.org/framester/metanet/metaphors/DISEASE_TREATMENT_IS_WAR",
];

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_SECS: f64 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TOP_PAIRS: usize = 5;

/// Output file names, relative to `output_dir`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputFiles {
    pub mappings: String,
    pub typing: String,
    pub overlap: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            mappings: "metaphor_mappings_roles_entailments.csv".to_string(),
            typing: "frame_typing_expanded.csv".to_string(),
            overlap: "similarity_overlap.csv".to_string(),
        }
    }
}

/// Immutable settings for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    pub endpoint: String,
    pub retries: u32,
    pub backoff_secs: f64,
    pub timeout_secs: u64,
    pub metaphors: Vec<String>,
    pub output_dir: PathBuf,
    pub outputs: OutputFiles,
    pub top_pairs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            endpoint: FRAMESTER_SPARQL.to_string(),
            retries: DEFAULT_RETRIES,
            backoff_secs: DEFAULT_BACKOFF_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            metaphors: SELECTED_METAPHORS.iter().map(|m| m.to_string()).collect(),
            output_dir: PathBuf::from("."),
            outputs: OutputFiles::default(),
            top_pairs: DEFAULT_TOP_PAIRS,
        }
    }
}

impl RunConfig {
    /// Load a config file, filling unspecified keys with defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FsoError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(FsoError::Config("endpoint cannot be empty".to_string()));
        }
        if self.retries == 0 {
            return Err(FsoError::Config("retries must be at least 1".to_string()));
        }
        self.backoff()?;
        Ok(())
    }

    /// Backoff as a `Duration`; rejects negative, non-finite and overflowing values
    fn backoff(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.backoff_secs).map_err(|_| {
            FsoError::Config(format!(
                "backoffSecs must be a non-negative number of seconds, got {}",
                self.backoff_secs
            ))
        })
    }

    /// Retry policy for this run; an invalid backoff falls back to no pause
    /// (`validate` reports it before a run starts)
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, self.backoff().unwrap_or_default())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn mappings_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.mappings)
    }

    pub fn typing_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.typing)
    }

    pub fn overlap_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.overlap)
    }
}
