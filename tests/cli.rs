use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/olympics_sample.csv")
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("olympic-scatter"));
}

#[test]
fn fields_lists_columns_with_kinds() {
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.arg("fields").arg("--data").arg(sample_path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("integer\tTeamSize"))
        .stdout(predicate::str::contains("text\tCountry"))
        .stdout(predicate::str::contains("real\tAdult literacy rate (%)"));
}

#[test]
fn render_writes_svg() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("medals.svg");
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.args(["render", "--x", "Silver", "--locale", "de"])
        .arg("--data")
        .arg(sample_path())
        .arg("--out")
        .arg(&out);
    cmd.assert().success();
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Silver"));
}

#[test]
fn render_rejects_unknown_field() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.args(["render", "--y", "Platinum"])
        .arg("--data")
        .arg(sample_path())
        .arg("--out")
        .arg(dir.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Platinum"));
}

#[test]
fn missing_dataset_fails() {
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.args(["fields", "--data", "no/such/file.csv"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn stats_writes_json() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("gold.json");
    let mut cmd = Command::cargo_bin("olympic-scatter").unwrap();
    cmd.args(["stats", "--field", "Gold", "--by", "Continent"])
        .arg("--data")
        .arg(sample_path())
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("count="));
    let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 7);
}
