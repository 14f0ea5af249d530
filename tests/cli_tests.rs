//! Integration tests for the identshrink CLI

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

use common::{game, SnapshotBuilder};
use identshrink::rename::{SymbolKind, SyntaxKind};

/// Test helper to get the CLI binary
fn identshrink_cmd() -> Command {
    Command::cargo_bin("identshrink").unwrap()
}

#[test]
fn test_cli_help() {
    identshrink_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("print-default-config"))
        .stdout(predicate::str::contains("validate-config"));
}

#[test]
fn test_rename_writes_documents() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("game.json");
    fs::write(&snapshot, game().to_json().unwrap()).unwrap();
    let out = dir.path().join("out");

    identshrink_cmd()
        .args(["rename", "--quiet", "--snapshot"])
        .arg(&snapshot)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let renamed = fs::read_to_string(out.join("Game.cs")).unwrap();
    assert!(renamed.starts_with("interface A { void "));
    assert!(renamed.contains("static void Main()"));
    assert!(!renamed.contains("Rocket"));
}

#[test]
fn test_rename_reports_summary() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("game.json");
    fs::write(&snapshot, game().to_json().unwrap()).unwrap();

    identshrink_cmd()
        .args(["rename", "--snapshot"])
        .arg(&snapshot)
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename complete"))
        .stdout(predicate::str::contains("Symbols renamed"));
}

#[test]
fn test_conflict_exits_without_writing() {
    let mut b = SnapshotBuilder::new();
    let doc = b.document("Clash.cs", "class Alpha { } class Beta { }");
    b.declare(1, SymbolKind::NamedType, "Alpha", doc, 0);
    b.declare(2, SymbolKind::NamedType, "Beta", doc, 0);
    b.reference(2, doc, "Alpha", 0);
    let alpha = b.node(SyntaxKind::Class, Some(1), vec![]);
    let beta = b.node(SyntaxKind::Class, Some(2), vec![]);
    let snapshot = b.build(vec![vec![alpha, beta]]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("clash.json");
    fs::write(&path, snapshot.to_json().unwrap()).unwrap();
    let out = dir.path().join("out");

    identshrink_cmd()
        .args(["rename", "--quiet", "--snapshot"])
        .arg(&path)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicts: 'Alpha'"));

    assert!(!out.exists());
}

#[test]
fn test_rename_with_config_protects_types() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("game.json");
    fs::write(&snapshot, game().to_json().unwrap()).unwrap();
    let config = dir.path().join("identshrink.yml");
    fs::write(
        &config,
        "policy:\n  protected_type_names: [Rocket]\nprogress:\n  enabled: false\n",
    )
    .unwrap();
    let out = dir.path().join("out");

    identshrink_cmd()
        .args(["rename", "--quiet", "--snapshot"])
        .arg(&snapshot)
        .arg("--out")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let renamed = fs::read_to_string(out.join("Game.cs")).unwrap();
    assert!(renamed.contains("new Rocket()"));
}

#[test]
fn test_missing_snapshot_fails() {
    let dir = tempdir().unwrap();
    identshrink_cmd()
        .args(["rename", "--snapshot", "does-not-exist.json", "--out"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn test_print_default_config() {
    identshrink_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("entry_type_name: Program"))
        .stdout(predicate::str::contains("max_concurrent_lookups: 64"));
}

#[test]
fn test_validate_config_accepts_valid_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("identshrink.yml");
    fs::write(&config, "policy:\n  protected_method_names: [Save, Main, Load]\n").unwrap();

    identshrink_cmd()
        .args(["validate-config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_config_rejects_zero_bound() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("identshrink.yml");
    fs::write(&config, "concurrency:\n  max_concurrent_lookups: 0\n").unwrap();

    identshrink_cmd()
        .args(["validate-config", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_concurrent_lookups"));
}
