//! Integration tests for the `pdfpane` binary.
//!
//! Network commands run against a loopback server, never the internet.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `pdfpane` binary.
fn pdfpane() -> Command {
    Command::cargo_bin("pdfpane").expect("binary 'pdfpane' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_lists_subcommands() {
    pdfpane()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: pdfpane"))
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn version_flag_shows_semver() {
    pdfpane()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^pdfpane \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn unknown_platform_is_rejected() {
    pdfpane()
        .args(["plan", "https://example.com/a.pdf", "--platform", "ios"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown platform"));
}

// ─── plan ────────────────────────────────────────────────────────────────────

#[test]
fn plan_web_passes_reference_through() {
    pdfpane()
        .args(["plan", "https://example.com/a.pdf", "--platform", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inline-frame"))
        .stdout(predicate::str::contains("https://example.com/a.pdf"));
}

#[test]
fn plan_native_uses_viewer() {
    pdfpane()
        .args(["plan", "https://example.com/a.pdf", "-p", "native"])
        .assert()
        .success()
        .stdout(predicate::str::contains("embedded-viewer-url"))
        .stdout(predicate::str::contains("url=https%3A%2F%2Fexample.com%2Fa.pdf"));
}

// ─── open ────────────────────────────────────────────────────────────────────

#[test]
fn open_local_pdf_is_ready() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    pdfpane()
        .args(["open", "--platform", "web"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: ready"))
        .stdout(predicate::str::contains("file://"));
}

#[test]
fn open_non_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "hello").unwrap();

    pdfpane()
        .arg("open")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Status: error"))
        .stderr(predicate::str::contains("not a PDF"));
}

#[test]
fn open_with_empty_answer_is_cancelled() {
    pdfpane()
        .arg("open")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No document selected"));
}

// ─── read / download ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn read_prints_json_state_and_plan() {
    let server = common::serve(vec![(200, b"%PDF".to_vec())]).await;
    let url = server.url("/doc.pdf");

    let output = tokio::task::spawn_blocking(move || {
        pdfpane()
            .args(["read", &url, "--platform", "web", "--format", "json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["state"]["status"], "ready");
    assert_eq!(json["plan"]["mode"], "inline-frame");
    assert_eq!(json["plan"]["reference"], "data:application/pdf;base64,JVBERg==");
}

#[tokio::test(flavor = "multi_thread")]
async fn read_failure_exits_non_zero() {
    let server = common::serve(vec![(500, Vec::new())]).await;
    let url = server.url("/doc.pdf");

    let output = tokio::task::spawn_blocking(move || pdfpane().args(["read", &url]).output().unwrap())
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Status: error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn download_writes_into_configured_cache() {
    let server = common::serve(vec![(200, b"%PDF-cached".to_vec())]).await;
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");
    let config = dir.path().join("config.toml");
    fs::write(&config, format!("cache_dir = {:?}\n", cache.display().to_string())).unwrap();
    let url = server.url("/a.pdf");

    let output = tokio::task::spawn_blocking(move || {
        pdfpane()
            .args(["download", &url, "doc", "--config"])
            .arg(&config)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(cache.join("doc.pdf")).unwrap(), b"%PDF-cached");
}
