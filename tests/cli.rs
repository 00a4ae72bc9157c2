use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn baseline_summary_without_config() {
    Command::cargo_bin("size")
        .expect("size binary")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Weight Budget ==="))
        .stdout(predicate::str::contains("=== Wing Spar ==="))
        .stdout(predicate::str::contains("stiffness governs"))
        .stdout(predicate::str::contains("tip slope"));
}

#[test]
fn json_output_parses() {
    let output = Command::cargo_bin("size")
        .expect("size binary")
        .args(["--config", "configs/designs", "--case", "baseline", "--json"])
        .output()
        .expect("run size");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    let mass = value["report"]["budget"]["total_kg"].as_f64().expect("mass");
    assert!((mass - 1.96).abs() < 0.01, "mass = {}", mass);
}

#[test]
fn csv_and_chart_outputs() {
    let dir = tempdir().expect("tempdir");
    let csv_path = dir.path().join("out/report.csv");
    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--chart", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Matching Chart ==="))
        .stdout(predicate::str::contains("Stall limit"))
        .stdout(predicate::str::contains("Min cruise P/W"));

    let contents = fs::read_to_string(&csv_path).expect("csv written");
    assert!(contents.starts_with("key,value,unit"));
    assert!(contents.contains("mass.total"));
}

#[test]
fn sweep_prints_one_line_per_value() {
    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--sweep", "cd0", "--from", "0.018", "--to", "0.024", "--steps", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Sweep: cd0 (baseline) ==="))
        .stdout(predicate::str::contains("mass =").count(4));
}

#[test]
fn unknown_case_fails() {
    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--config", "configs/cases.yaml", "--case", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn sweep_without_bounds_fails() {
    Command::cargo_bin("size")
        .expect("size binary")
        .args(["--sweep", "aspect-ratio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from"));
}
