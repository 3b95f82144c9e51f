//! End-to-end tests for the docfill binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn docfill(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("docfill");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_fixture(dir: &Path) {
    fs::write(
        dir.join("cv.txt"),
        "{{NAME}}\n{{#JOBS}}\n{{COMPANY}}\n{{DUTIES}}\n{{/JOBS}}\n{{SKILLS}}\n\n\n",
    )
    .unwrap();
    let data = serde_json::json!({
        "NAME": "Jane Doe",
        "JOBS": [
            {"COMPANY": "Acme", "DUTIES": ["Shipped", "Scaled"]},
            {"COMPANY": "Initech", "DUTIES": ["Built *things*"]}
        ],
        "SKILLS": ["Rust", "Go"]
    });
    fs::write(dir.join("data.json"), data.to_string()).unwrap();
}

#[test]
fn test_fill_to_explicit_output() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "data.json", "--output", "out/filled.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/filled.txt"));

    let filled = fs::read_to_string(dir.path().join("out/filled.txt")).unwrap();
    assert_eq!(
        filled,
        "Jane Doe\nAcme\nShipped\nScaled\nInitech\nBuilt things\nRust\nGo\n"
    );
}

#[test]
fn test_default_output_path_with_role_and_company() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "data.json"])
        .args(["--role", "Data Engineer", "--company", "Acme, Inc."])
        .assert()
        .success();

    assert!(dir
        .path()
        .join("output/cv_Data_Engineer_Acme_Inc.txt")
        .exists());
}

#[test]
fn test_keep_trailing_empty() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "data.json", "--output", "kept.txt"])
        .arg("--keep-trailing-empty")
        .assert()
        .success();

    let filled = fs::read_to_string(dir.path().join("kept.txt")).unwrap();
    assert!(filled.ends_with("Go\n\n\n"));
}

#[test]
fn test_without_data_reports_unresolved() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--output", "raw.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unresolved placeholders"))
        .stdout(predicate::str::contains("{{NAME}}"));
}

#[test]
fn test_missing_template_fails() {
    let dir = tempdir().unwrap();

    docfill(dir.path())
        .args(["--template", "nope.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Template file 'nope.txt' not found"));
}

#[test]
fn test_missing_data_fails() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "missing.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Data file 'missing.json' not found"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_unparsable_data_fails() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    fs::write(dir.path().join("bad.json"), "{\"NAME\": ").unwrap();

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "bad.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn test_unsupported_template_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("cv.odt"), "").unwrap();

    docfill(dir.path())
        .args(["--template", "cv.odt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported document format"));
}

#[test]
fn test_pdf_with_failing_converter() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.txt", "--data", "data.json", "--output", "cv_out.txt"])
        .args(["--pdf", "--converter", "./no-such-converter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conversion failed"));

    // The filled document is written before conversion is attempted.
    assert!(dir.path().join("cv_out.txt").exists());
}

#[test]
fn test_requires_template() {
    let dir = tempdir().unwrap();

    docfill(dir.path()).assert().failure();
}

fn write_json_template(dir: &Path) {
    fs::write(
        dir.join("cv.json"),
        r#"{"body": [{"type": "paragraph", "runs": [{"text": "{{NAME}}", "style": {"bold": true}}]}]}"#,
    )
    .unwrap();
}

#[test]
fn test_pdf_rejects_json_output() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    write_json_template(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.json", "--data", "data.json", "--pdf"])
        .args(["--converter", "./no-such-converter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported document format"))
        .stderr(predicate::str::contains("cannot be rendered to PDF"));

    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_pdf_from_json_template_to_text_output() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    write_json_template(dir.path());

    docfill(dir.path())
        .args(["--template", "cv.json", "--data", "data.json", "--output", "filled.txt"])
        .args(["--pdf", "--converter", "./no-such-converter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conversion failed"));

    let filled = fs::read_to_string(dir.path().join("filled.txt")).unwrap();
    assert_eq!(filled, "Jane Doe\n");
}

#[test]
fn test_help_notes_pdf_restriction() {
    let dir = tempdir().unwrap();

    docfill(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--pdf renders plain-text outputs (.txt) only"));
}
