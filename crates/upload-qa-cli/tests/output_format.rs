//! Output format tests.
//!
//! Checks the shape of JSON Lines and JSON array records.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use upload_qa_core::LoadedImage;
use upload_qa_test_support::SyntheticImageBuilder;

fn upload_qa(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("upload-qa").unwrap();
    cmd.current_dir(dir).env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd
}

fn save(dir: &Path, name: &str, image: &LoadedImage) {
    image.image.save(dir.join(name)).unwrap();
}

/// Sharp, dark and flat fixtures, named so that directory order is a, b, c.
fn mixed_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "a_sharp.png", &SyntheticImageBuilder::checkerboard(100, 100));
    save(dir.path(), "b_dark.png", &SyntheticImageBuilder::black(100, 100));
    save(dir.path(), "c_flat.png", &SyntheticImageBuilder::white(100, 100));
    dir
}

fn jsonl_records(stdout: &[u8]) -> Vec<Value> {
    std::str::from_utf8(stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_jsonl_one_record_per_line() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path()).arg(dir.path()).output().unwrap();

    let records = jsonl_records(&output.stdout);
    assert_eq!(records.len(), 3);
    for record in &records {
        assert!(record.is_object());
    }
}

#[test]
fn test_jsonl_record_fields() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path())
        .arg(dir.path().join("a_sharp.png"))
        .output()
        .unwrap();

    let records = jsonl_records(&output.stdout);
    let record = &records[0];

    assert!(record["path"].as_str().unwrap().ends_with("a_sharp.png"));
    assert!(record["timestamp"].as_str().unwrap().contains('T'));
    assert_eq!(record["dimensions"]["width"], 100);
    assert_eq!(record["dimensions"]["height"], 100);
    assert_eq!(record["verdict"], "ok");
    assert_eq!(record["total_regions"], 25);
    assert_eq!(record["dark_regions"], 0);
    assert_eq!(record["blurry_regions"], 0);
}

#[test]
fn test_verdict_values() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path()).arg(dir.path()).output().unwrap();

    let verdicts: Vec<_> = jsonl_records(&output.stdout)
        .iter()
        .map(|r| r["verdict"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(verdicts, vec!["ok", "dark", "blurry"]);
}

#[test]
fn test_dark_record_counts() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path())
        .arg(dir.path().join("b_dark.png"))
        .output()
        .unwrap();

    let record = &jsonl_records(&output.stdout)[0];
    assert_eq!(record["dark_regions"], 25);
    assert_eq!(record["blurry_regions"], 25);
}

#[test]
fn test_json_array_output() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path())
        .args(["--format", "json"])
        .arg(dir.path())
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim().lines().count(), 1, "compact array is one line");

    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert_eq!(array[1]["verdict"], "dark");
}

#[test]
fn test_json_pretty_output() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path())
        .args(["--format", "json", "--pretty"])
        .arg(dir.path())
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 3);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_pretty_ignored_for_jsonl() {
    let dir = mixed_dir();
    let output = upload_qa(dir.path())
        .arg("--pretty")
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(jsonl_records(&output.stdout).len(), 3);
}

#[test]
fn test_empty_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let output = upload_qa(dir.path())
        .args(["--format", "json"])
        .arg(dir.path())
        .output()
        .unwrap();

    let parsed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed, Value::Array(vec![]));
}

#[test]
fn test_undecodable_file_record() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg at all").unwrap();

    let output = upload_qa(dir.path()).arg(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let records = jsonl_records(&output.stdout);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record["path"].as_str().unwrap().ends_with("broken.jpg"));
    assert_eq!(record["verdict"], "ok");
    assert_eq!(record["total_regions"], 0);
    assert!(record.get("dimensions").is_none());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("broken.jpg"));
}
