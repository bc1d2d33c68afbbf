//! End-to-end pipeline tests.
//!
//! Runs the binary over synthetic uploads and checks verdicts and exit codes.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
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

fn verdict_of(dir: &Path, name: &str, image: &LoadedImage) -> (Option<i32>, String) {
    save(dir, name, image);
    let output = upload_qa(dir).arg(dir.join(name)).output().unwrap();
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    (
        output.status.code(),
        record["verdict"].as_str().unwrap().to_string(),
    )
}

/// Strips the timestamp so records from two runs can be compared.
fn without_timestamps(stdout: &[u8]) -> Vec<Value> {
    std::str::from_utf8(stdout)
        .unwrap()
        .lines()
        .map(|line| {
            let mut record: Value = serde_json::from_str(line).unwrap();
            record.as_object_mut().unwrap().remove("timestamp");
            record
        })
        .collect()
}

#[test]
fn test_sharp_image_passes() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(dir.path(), "sharp.png", &SyntheticImageBuilder::checkerboard(200, 150));
    assert_eq!(result, (Some(0), "ok".to_string()));
}

#[test]
fn test_black_image_is_dark() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(dir.path(), "black.png", &SyntheticImageBuilder::black(200, 150));
    assert_eq!(result, (Some(1), "dark".to_string()));
}

#[test]
fn test_flat_image_is_blurry() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(dir.path(), "flat.png", &SyntheticImageBuilder::uniform_gray(200, 150, 180));
    assert_eq!(result, (Some(1), "blurry".to_string()));
}

#[test]
fn test_gradient_is_blurry() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(
        dir.path(),
        "gradient.png",
        &SyntheticImageBuilder::horizontal_gradient(200, 150),
    );
    assert_eq!(result, (Some(1), "blurry".to_string()));
}

#[test]
fn test_dim_texture_is_dark_not_blurry() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(dir.path(), "dim.png", &SyntheticImageBuilder::dim_texture(100, 100));
    assert_eq!(result, (Some(1), "dark".to_string()));
}

#[test]
fn test_dark_bottom_half_passes() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(
        dir.path(),
        "half.png",
        &SyntheticImageBuilder::sharp_over_dark(100, 100, 50),
    );
    assert_eq!(result, (Some(0), "ok".to_string()));
}

#[test]
fn test_dark_top_band_is_dark() {
    let dir = tempfile::tempdir().unwrap();
    let result = verdict_of(
        dir.path(),
        "band.png",
        &SyntheticImageBuilder::dark_over_sharp(100, 100, 40),
    );
    assert_eq!(result, (Some(1), "dark".to_string()));
}

#[test]
fn test_tiny_image_is_single_region() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "tiny.png", &SyntheticImageBuilder::single_pixel(255));

    let output = upload_qa(dir.path())
        .arg(dir.path().join("tiny.png"))
        .output()
        .unwrap();
    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["total_regions"], 1);
    assert_eq!(record["verdict"], "blurry");
}

#[test]
fn test_mixed_batch_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "a.png", &SyntheticImageBuilder::checkerboard(100, 100));
    save(dir.path(), "b.png", &SyntheticImageBuilder::black(100, 100));

    upload_qa(dir.path()).arg(dir.path()).assert().code(1);
}

#[test]
fn test_all_ok_batch_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "a.png", &SyntheticImageBuilder::checkerboard(100, 100));
    save(dir.path(), "b.png", &SyntheticImageBuilder::checkerboard(64, 48));

    upload_qa(dir.path()).arg(dir.path()).assert().code(0);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "a.png", &SyntheticImageBuilder::sharp_over_dark(120, 90, 45));
    save(dir.path(), "b.png", &SyntheticImageBuilder::dark_over_sharp(100, 100, 40));
    save(dir.path(), "c.png", &SyntheticImageBuilder::horizontal_gradient(80, 60));

    let sequential = upload_qa(dir.path()).arg(dir.path()).output().unwrap();
    let parallel = upload_qa(dir.path())
        .arg("--parallel")
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(sequential.status.code(), parallel.status.code());
    assert_eq!(
        without_timestamps(&sequential.stdout),
        without_timestamps(&parallel.stdout)
    );
}

#[test]
fn test_progress_flag_keeps_stdout_clean() {
    let dir = tempfile::tempdir().unwrap();
    save(dir.path(), "a.png", &SyntheticImageBuilder::checkerboard(100, 100));

    let output = upload_qa(dir.path())
        .arg("--progress")
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(without_timestamps(&output.stdout).len(), 1);
}

#[test]
fn test_tiles_command_lists_regions() {
    let dir = tempfile::tempdir().unwrap();
    let output = upload_qa(dir.path())
        .args(["tiles", "--width", "100", "--height", "100"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let regions: Vec<Value> = std::str::from_utf8(&output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(regions.len(), 25);
    assert_eq!(
        regions[0],
        serde_json::json!({"left": 0, "top": 0, "right": 10, "bottom": 10})
    );
    assert_eq!(
        regions[24],
        serde_json::json!({"left": 80, "top": 80, "right": 100, "bottom": 100})
    );
}

#[test]
fn test_tiles_command_small_image() {
    let dir = tempfile::tempdir().unwrap();
    upload_qa(dir.path())
        .args(["tiles", "--width", "9", "--height", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"left":0,"top":0,"right":9,"bottom":9}"#));
}
