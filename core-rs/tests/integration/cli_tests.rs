//! Integration tests for the `fso` binary
//!
//! Runs the built CLI to check how flags and a config file combine into
//! the effective configuration, and that an offline dataset run writes
//! every table.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const FSO: &str = env!("CARGO_BIN_EXE_fso");
const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/core-rs/tests/fixtures/metanet_sample.ttl");

fn fso(args: &[&str]) -> Output {
    Command::new(FSO)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run fso")
}

fn dump(output: &Output) {
    eprintln!("STDOUT:\n{}", String::from_utf8_lossy(&output.stdout));
    eprintln!("STDERR:\n{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_print_config_applies_flags_over_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fso.yaml");
    fs::write(
        &config_path,
        "endpoint: http://localhost:3030/ds/sparql\nretries: 2\nbackoffSecs: 0.1\n",
    )
    .unwrap();

    let output = fso(&[
        "--print-config",
        "--retries",
        "5",
        "--config",
        config_path.to_str().unwrap(),
    ]);
    if !output.status.success() {
        dump(&output);
    }
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Flag wins over the file, the file wins over defaults
    assert!(stdout.contains("retries: 5"), "got:\n{}", stdout);
    assert!(stdout.contains("endpoint: http://localhost:3030/ds/sparql"));
    assert!(stdout.contains("backoffSecs: 0.1"));
    assert!(!stdout.contains("retries: 2"));
}

#[test]
fn test_print_config_defaults() {
    let output = fso(&["--print-config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("endpoint: https://etna.istc.cnr.it/framester2/sparql"));
    assert!(stdout.contains("retries: 3"));
    assert!(stdout.contains("MACHINES_ARE_PEOPLE"));
}

#[test]
fn test_zero_retries_is_rejected() {
    let output = fso(&["--print-config", "--retries", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("retries must be at least 1"));
}

#[test]
fn test_overflowing_backoff_is_rejected_without_panic() {
    let output = fso(&["--print-config", "--backoff", "1e20"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("backoffSecs"), "got:\n{}", stderr);
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_dataset_conflicts_with_endpoint() {
    let output = fso(&["--dataset", SAMPLE, "--endpoint", "http://localhost:3030/ds/sparql"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used with"));
}

#[test]
fn test_dataset_run_writes_all_tables() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");

    let output = fso(&["--dataset", SAMPLE, "--output-dir", out_dir.to_str().unwrap()]);
    if !output.status.success() {
        dump(&output);
    }
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Summary"));
    assert!(stdout.contains("Metaphors processed: 10"));
    assert!(stdout.contains("Pairs with frames: 4"));

    for name in [
        "metaphor_mappings_roles_entailments.csv",
        "frame_typing_expanded.csv",
        "similarity_overlap.csv",
    ] {
        let path = out_dir.join(name);
        assert!(Path::new(&path).exists(), "{} not written", path.display());
    }

    let overlap = fs::read_to_string(out_dir.join("similarity_overlap.csv")).unwrap();
    assert_eq!(overlap.lines().count(), 4);
}

#[test]
fn test_missing_dataset_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.ttl");

    let output = fso(&[
        "--dataset",
        missing.to_str().unwrap(),
        "--output-dir",
        temp_dir.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading dataset"));
}
