use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn cst_size_auto_runs() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args(["size", "--current", "63", "--length", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conductor size"))
        .stdout(predicate::str::contains("Voltage drop"))
        .stdout(predicate::str::contains("Compliant"));
}

#[test]
fn cst_size_json_output() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    let output = cmd
        .args(["size", "--current", "63", "--length", "40", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(result["selected_size_mm2"].as_f64().unwrap() > 0.0);
    assert!(result["voltage_drop"]["percent"].as_f64().is_some());
    assert!(result["rating"]["meets_load"].as_bool().unwrap());
}

#[test]
fn cst_size_fixed_size_and_earth() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    let output = cmd
        .args([
            "size",
            "--current",
            "63",
            "--length",
            "40",
            "--size",
            "16",
            "--earth-size",
            "10",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(result["selected_size_mm2"].as_f64().unwrap(), 16.0);
    assert_eq!(result["earth"]["size_mm2"].as_f64().unwrap(), 10.0);
}

#[test]
fn cst_size_unsatisfiable_still_exits_zero() {
    // Degraded results report via diagnostics, not the exit code
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args(["size", "--current", "800", "--length", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NO"));
}

#[test]
fn cst_size_rejects_unknown_cable_type() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args([
        "size",
        "--current",
        "63",
        "--length",
        "40",
        "--cable-type",
        "coax",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown cable type"));
}

#[test]
fn cst_size_rejects_nonpositive_current() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args(["size", "--current", "0", "--length", "40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--current"));
}

#[test]
fn cst_size_with_external_dataset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(cst_io::DEFAULT_DATASET_JSON.as_bytes())
        .unwrap();

    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args([
        "size",
        "--current",
        "63",
        "--length",
        "40",
        "--dataset",
        file.path().to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Conductor size"));
}

#[test]
fn cst_size_missing_dataset_fails() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.args([
        "size",
        "--current",
        "63",
        "--length",
        "40",
        "--dataset",
        "/nonexistent/dataset.json",
    ])
    .assert()
    .failure();
}

#[test]
fn cst_tables_lists_reference_tables() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    cmd.arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("current-rating"))
        .stdout(predicate::str::contains("resistance"))
        .stdout(predicate::str::contains("reactance"));
}

#[test]
fn cst_tables_json_output() {
    let mut cmd = Command::cargo_bin("cst").unwrap();
    let output = cmd
        .args(["tables", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let dataset: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(!dataset["current_rating_tables"]
        .as_array()
        .unwrap()
        .is_empty());
}
