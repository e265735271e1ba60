//! Tests of the `formex-corpus` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn build_writes_corpus_and_report() {
    let out = TempDir::new().unwrap();
    let corpus = out.path().join("corpus");

    let mut cmd = cargo_bin_cmd!("formex-corpus");
    cmd.arg("build")
        .arg(fixtures().join("formex"))
        .arg("--config")
        .arg(fixtures().join("workflow.yaml"))
        .arg("--output")
        .arg(&corpus);

    cmd.assert().success().stdout(
        predicate::str::contains("articles: 4/4")
            .and(predicate::str::contains("3 pass, 3 warn, 0 fail"))
            .and(predicate::str::contains("Wrote 9 files")),
    );

    let article = fs::read_to_string(corpus.join("articles/article-1.md")).unwrap();
    assert!(article.contains("celex: 32024R1689\n"));
    assert!(!article.contains("{{timestamp}}"));
    assert!(corpus.join("annexes/annex-III.md").exists());

    let report = fs::read_to_string(out.path().join("validation-report.json")).unwrap();
    assert!(report.contains("gap between 3 and 5"));
}

#[test]
fn build_without_corpus_section_renders_nothing() {
    let out = TempDir::new().unwrap();
    let corpus = out.path().join("corpus");

    let mut cmd = cargo_bin_cmd!("formex-corpus");
    cmd.arg("build")
        .arg(fixtures().join("formex"))
        .arg("--output")
        .arg(&corpus);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("nothing rendered"));

    assert!(!corpus.exists());
    assert!(out.path().join("validation-report.json").exists());
}

#[test]
fn validate_applies_overrides() {
    let out = TempDir::new().unwrap();
    let report = out.path().join("report.json");

    let mut cmd = cargo_bin_cmd!("formex-corpus");
    cmd.arg("validate")
        .arg(fixtures().join("formex"))
        .arg("--config")
        .arg(fixtures().join("workflow.yaml"))
        .arg("--expected-articles")
        .arg("113")
        .arg("--report")
        .arg(&report);

    cmd.assert().success().stdout(
        predicate::str::contains("articles: 4/113")
            .and(predicate::str::contains("2 pass, 3 warn, 1 fail")),
    );
    assert!(report.exists());
}

#[test]
fn validate_rejects_invalid_threshold() {
    let mut cmd = cargo_bin_cmd!("formex-corpus");
    cmd.arg("validate")
        .arg(fixtures().join("formex"))
        .arg("--threshold")
        .arg("2.0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("coverage_ratio_threshold"));
}

#[test]
fn missing_main_document_exits_with_error() {
    let dir = TempDir::new().unwrap();
    fs::copy(
        fixtures().join("formex/L_202401689EN.011301.fmx.xml"),
        dir.path().join("L_202401689EN.011301.fmx.xml"),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("formex-corpus");
    cmd.arg("validate").arg(dir.path());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: No main document found"));
}
