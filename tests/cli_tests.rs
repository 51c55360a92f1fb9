//! CLI and command tests

mod common;

use common::{analyze_csv, faultkit, write_config};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    faultkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fault planes"));
}

#[test]
fn test_version_displays() {
    faultkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("faultkit"));
}

#[test]
fn test_unknown_command_fails() {
    faultkit()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Analyze Command Tests
// ============================================================================

#[test]
fn test_analyze_default_produces_fifty_rows() {
    let rows = analyze_csv(&[]);
    assert_eq!(rows.len(), 50);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row[0], (i + 1).to_string());
        assert_eq!(row[9], "true");
    }
}

#[test]
fn test_analyze_csv_header() {
    faultkit()
        .args(["analyze", "--format", "csv", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Plane,Azimuth,Dip,Dip_Direction,Normal_Stress,Shear_Stress,Rake,Movement,Reference_Az,Vector_Valid",
        ));
}

#[test]
fn test_analyze_is_reproducible_with_seed() {
    let a = analyze_csv(&["--seed", "123", "-n", "20"]);
    let b = analyze_csv(&["--seed", "123", "-n", "20"]);
    assert_eq!(a, b);

    let c = analyze_csv(&["--seed", "124", "-n", "20"]);
    assert_ne!(a, c);
}

#[test]
fn test_analyze_rake_within_bounds() {
    let rows = analyze_csv(&["-n", "200", "--seed", "5"]);
    for row in rows {
        let rake: f64 = row[6].parse().unwrap();
        assert!((0.0..=90.0).contains(&rake), "rake {}", rake);
        let shear: f64 = row[5].parse().unwrap();
        assert!(shear >= 0.0);
    }
}

#[test]
fn test_analyze_movement_codes_are_known() {
    let known = ["I", "N", "LL", "RL", "I+LL", "I+RL", "N+LL", "N+RL"];
    for row in analyze_csv(&["-n", "100"]) {
        assert!(known.contains(&row[7].as_str()), "unexpected code {}", row[7]);
    }
}

#[test]
fn test_analyze_table_output() {
    faultkit()
        .args(["analyze", "--format", "table", "-n", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Principal stress axes"))
        .stdout(predicate::str::contains("Vector validation: 12/12"))
        .stdout(predicate::str::contains("first 10 of 12"))
        .stdout(predicate::str::contains("Movement types"));
}

#[test]
fn test_analyze_table_limit_zero_shows_all() {
    faultkit()
        .args(["analyze", "--format", "table", "-n", "15", "--limit", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first 15 of 15"));
}

#[test]
fn test_analyze_writes_csv_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fault_analysis_results.csv");

    faultkit()
        .args(["analyze", "--format", "json", "-n", "8", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Results saved"));

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 9);
    assert!(content.starts_with("Plane,"));
}

#[test]
fn test_analyze_json_report() {
    let output = faultkit()
        .args(["analyze", "--format", "json", "-n", "6"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"].as_array().unwrap().len(), 6);
    assert_eq!(value["summary"]["invalid_vectors"], 0);
    assert_eq!(value["summary"]["orthogonality_violations"], 0);
    assert_eq!(value["config"]["seed"], 42);
}

#[test]
fn test_analyze_yaml_report() {
    faultkit()
        .args(["analyze", "--format", "yaml", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("movement_counts:"))
        .stdout(predicate::str::contains("records:"));
}

#[test]
fn test_analyze_non_numeric_angle_uses_default() {
    let output = faultkit()
        .args(["analyze", "--format", "json", "-n", "3", "--sigma1-azimuth", "abc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("sigma1_azimuth"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["sigma1"]["azimuth"], 45.0);
}

#[test]
fn test_analyze_ratio_is_clamped() {
    let output = faultkit()
        .args(["analyze", "--format", "json", "-n", "1", "--ratio", "-2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("clamped"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["stress_ratio"], 0.0);
}

#[test]
fn test_analyze_bad_count_uses_default() {
    let rows = analyze_csv(&["-n", "0"]);
    assert_eq!(rows.len(), 50);
}

#[test]
fn test_analyze_parallel_axes_still_completes() {
    faultkit()
        .args([
            "analyze",
            "--format",
            "table",
            "-n",
            "5",
            "--sigma1-azimuth",
            "20",
            "--sigma1-dip",
            "40",
            "--sigma3-azimuth",
            "20",
            "--sigma3-dip",
            "40",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("parallel"))
        .stdout(predicate::str::contains("not orthogonal"));
}

#[test]
fn test_analyze_reads_config_file() {
    let (_tmp, path) = write_config("sigma1_azimuth: 0\nsigma1_dip: 0\nsigma3_azimuth: 90\nsigma3_dip: 0\nstress_ratio: 0.25\nfault_count: 7\n");

    let output = faultkit()
        .args(["analyze", "--format", "json", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"].as_array().unwrap().len(), 7);
    assert_eq!(value["tensor"]["andersonian"], true);
    assert_eq!(value["tensor"]["stress_ratio"], 0.25);
}

#[test]
fn test_flags_override_config_file() {
    let (_tmp, path) = write_config("fault_count: 7\nstress_ratio: 0.25\n");

    let output = faultkit()
        .args(["analyze", "--format", "json", "-n", "4", "--ratio", "0.75", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"].as_array().unwrap().len(), 4);
    assert_eq!(value["config"]["stress_ratio"], 0.75);
}

#[test]
fn test_analyze_bad_seed_uses_default() {
    let output = faultkit()
        .args(["analyze", "--format", "json", "-n", "2", "--seed", "abc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("seed: invalid value"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["seed"], 42);
}

#[test]
fn test_config_with_wrong_value_shapes_still_runs() {
    let (_tmp, path) = write_config("sigma1_azimuth: true\nsigma3_dip: [1, 2]\nseed: -5\nfault_count: 3\n");

    let output = faultkit()
        .args(["analyze", "--format", "json", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sigma1_azimuth"));
    assert!(stderr.contains("sigma3_dip"));
    assert!(stderr.contains("seed"));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["config"]["sigma1"]["azimuth"], 45.0);
    assert_eq!(value["config"]["seed"], 42);
}

#[test]
fn test_missing_config_file_fails() {
    faultkit()
        .args(["analyze", "--config", "/nonexistent/stress.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config file"));
}

#[test]
fn test_seed_conflicts_with_unseeded() {
    faultkit()
        .args(["analyze", "--seed", "1", "--unseeded"])
        .assert()
        .failure();
}

// ============================================================================
// Tensor Command Tests
// ============================================================================

#[test]
fn test_tensor_andersonian() {
    let output = faultkit()
        .args([
            "tensor",
            "--format",
            "json",
            "--sigma1-dip",
            "0",
            "--sigma3-azimuth",
            "135",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["andersonian"], true);
    assert_eq!(value["sigma2"]["vector"], serde_json::json!([0.0, 0.0, -1.0]));
    assert_eq!(value["sigma2"]["orientation"]["azimuth"], 0.0);
    assert_eq!(value["sigma2"]["orientation"]["dip"], 90.0);
}

#[test]
fn test_tensor_table() {
    faultkit()
        .args(["tensor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("σ2"))
        .stdout(predicate::str::contains("Stress tensor"));
}

#[test]
fn test_tensor_rejects_csv() {
    faultkit()
        .args(["tensor", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV output"));
}

// ============================================================================
// Plane Command Tests
// ============================================================================

#[test]
fn test_plane_json() {
    let output = faultkit()
        .args(["plane", "--azimuth", "120", "--dip", "60", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let azimuth = value["azimuth"].as_f64().unwrap();
    let dip = value["dip"].as_f64().unwrap();
    assert!((azimuth - 120.0).abs() < 1e-6);
    assert!((dip - 60.0).abs() < 1e-6);
    assert_eq!(value["vector_valid"], true);
}

#[test]
fn test_plane_table() {
    faultkit()
        .args(["plane", "-a", "10", "-d", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Normal stress"))
        .stdout(predicate::str::contains("MOVEMENT"));
}

#[test]
fn test_plane_rejects_bad_dip() {
    faultkit()
        .args(["plane", "-a", "10", "-d", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 90"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    faultkit()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("faultkit"));
}
