//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Helper to get a faultkit command with no parameters leaking in from the environment
pub fn faultkit() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("faultkit"));
    for var in [
        "FAULTKIT_SIGMA1_AZIMUTH",
        "FAULTKIT_SIGMA1_DIP",
        "FAULTKIT_SIGMA3_AZIMUTH",
        "FAULTKIT_SIGMA3_DIP",
        "FAULTKIT_RATIO",
        "FAULTKIT_CONFIG",
        "FAULTKIT_COUNT",
        "FAULTKIT_SEED",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to write a YAML config file into a temp directory
pub fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("stress.yaml");
    fs::write(&path, contents).unwrap();
    (tmp, path)
}

/// Run `analyze` with CSV output and return the data rows (header stripped)
pub fn analyze_csv(args: &[&str]) -> Vec<Vec<String>> {
    let output = faultkit()
        .args(["analyze", "--format", "csv"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let mut rdr = csv::Reader::from_reader(output.stdout.as_slice());
    rdr.records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}
