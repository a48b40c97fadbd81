//! FSO - Framester metaphor frame overlap CLI
//!
//! With no arguments, runs the full pipeline against the public Framester
//! endpoint and writes the three CSV tables to the current directory.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fso_core::report;
use fso_core::{HttpEndpoint, LocalEndpoint, Pipeline, QueryExecutor, RunConfig, SparqlEndpoint};

#[derive(Parser, Debug)]
#[command(name = "fso")]
#[command(version, about = "Metaphor frame mappings, typing and lexical overlap from Framester", long_about = None)]
struct Cli {
    /// YAML run configuration (defaults apply to missing keys)
    #[arg(long)]
    config: Option<PathBuf>,
    /// SPARQL endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
    /// Query a local Turtle file instead of the remote endpoint
    #[arg(long, conflicts_with = "endpoint")]
    dataset: Option<PathBuf>,
    /// Directory for the output tables
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Attempts per query
    #[arg(long)]
    retries: Option<u32>,
    /// Base backoff between attempts, in seconds
    #[arg(long)]
    backoff: Option<f64>,
    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if let Some(backoff) = self.backoff {
            config.backoff_secs = backoff;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    init_logging(cli.verbose)?;

    let endpoint: Box<dyn SparqlEndpoint> = match &cli.dataset {
        Some(path) => {
            info!("Loading dataset {}", path.display());
            Box::new(
                LocalEndpoint::from_file(path)
                    .with_context(|| format!("loading dataset {}", path.display()))?,
            )
        }
        None => Box::new(HttpEndpoint::new(config.endpoint.clone(), config.timeout())?),
    };

    let executor = QueryExecutor::new(endpoint, config.retry_policy());
    let summary = Pipeline::new(&config, executor).run()?;

    report::print_summary(&summary);
    Ok(())
}
