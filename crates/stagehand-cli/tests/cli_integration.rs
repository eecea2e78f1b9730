//! Integration tests for the `stagehand` binary.
//!
//! These drive the commands that work without the network or the
//! external toolchain: sync, remove, and the error surfaces.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn stagehand(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stagehand").expect("binary not found");
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

/// Project fixture with a valid manifest and an existing (empty)
/// template checkout, so no clone is attempted.
fn fixture(manifest: &str) -> TempDir {
    let dir = tempdir().expect("failed to create temp dir");
    fs::create_dir_all(dir.path().join(".stagehand")).unwrap();
    fs::write(dir.path().join("stagehand.json"), manifest).unwrap();
    dir
}

const EMPTY_MANIFEST: &str = r#"{
    "version": "1.2.0",
    "template_repo": {
        "url": "",
        "tag": ""
    },
    "auto_commit": false,
    "scenes": {},
    "sceneprotos": {}
}
"#;

const BOSS_MANIFEST: &str = r#"{
    "version": "1.2.0",
    "template_repo": {
        "url": "",
        "tag": ""
    },
    "auto_commit": false,
    "scenes": {
        "Boss1": {
            "raw": false,
            "sceneproto": "Boss"
        }
    },
    "sceneprotos": {
        "Boss": {
            "raw": false,
            "levels": [
                "Boss1"
            ]
        }
    }
}
"#;

#[test]
fn test_help_lists_subcommands() {
    let dir = tempdir().unwrap();
    stagehand(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scene"))
        .stdout(predicate::str::contains("sceneproto"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn test_missing_manifest_is_a_config_error() {
    let dir = tempdir().unwrap();
    stagehand(dir.path())
        .args(["sync", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("stagehand.json"))
        .stderr(predicate::str::contains("stagehand init"));
}

#[test]
fn test_version_mismatch_suggests_update() {
    let stale = EMPTY_MANIFEST.replace("1.2.0", "0.9.0");
    let dir = fixture(&stale);
    stagehand(dir.path())
        .args(["sync", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("0.9.0"))
        .stderr(predicate::str::contains("stagehand update"));
}

#[test]
fn test_confirmation_required_without_tty() {
    let dir = fixture(EMPTY_MANIFEST);
    stagehand(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_sync_rebuilds_manifest_from_tree() {
    let dir = fixture(EMPTY_MANIFEST);
    fs::create_dir_all(dir.path().join("src/Scenes/Home")).unwrap();
    fs::write(
        dir.path().join("src/Scenes/Home/Model.elm"),
        "module Scenes.Home.Model exposing (scene)\n",
    )
    .unwrap();

    stagehand(dir.path())
        .args(["sync", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"));

    let manifest = fs::read_to_string(dir.path().join("stagehand.json")).unwrap();
    assert!(manifest.contains("\"Home\""));
}

#[test]
fn test_remove_unknown_scene_is_not_found() {
    let dir = fixture(EMPTY_MANIFEST);
    stagehand(dir.path())
        .args(["remove", "scene", "Ghost", "--yes"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("scene not found: Ghost"));
}

#[test]
fn test_remove_sceneproto_with_levels_is_refused() {
    let dir = fixture(BOSS_MANIFEST);
    stagehand(dir.path())
        .args(["remove", "sceneproto", "Boss", "--yes"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("level(s)"));

    // Refusal leaves the manifest untouched.
    let manifest = fs::read_to_string(dir.path().join("stagehand.json")).unwrap();
    assert_eq!(manifest, BOSS_MANIFEST);
}

#[test]
fn test_entity_names_are_normalized() {
    let dir = fixture(BOSS_MANIFEST);
    // Lowercase input resolves to the capitalized entity.
    stagehand(dir.path())
        .args(["remove", "scene", "boss1", "--yes"])
        .assert()
        .success();

    let manifest = fs::read_to_string(dir.path().join("stagehand.json")).unwrap();
    assert!(!manifest.contains("Boss1"));
}
