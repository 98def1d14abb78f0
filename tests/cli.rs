mod common;

use assert_cmd::Command;
use common::{file, snapshot};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// The binary with its config directory pointed at an empty scratch dir.
fn spaceprune(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spaceprune").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn media_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    file(dir.path(), "cam1/2024-01-01/a.jpg", 64, 1_000);
    file(dir.path(), "cam1/2024-01-02/b.jpg", 64, 2_000);
    file(dir.path(), "cam2/.donotdelete", 0, 500);
    dir
}

#[test]
fn status_reports_free_space() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();

    spaceprune(home.path())
        .arg("--root").arg(media.path())
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Space free (percent)"))
        .stdout(predicate::str::contains("Required deletion"));
}

#[test]
fn dry_run_reports_but_keeps_every_file() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();
    let before = snapshot(media.path());

    spaceprune(home.path())
        .arg("--root").arg(media.path())
        .args(["--free", "100", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": 2"))
        .stdout(predicate::str::contains("\"dry_run\": true"));

    assert_eq!(snapshot(media.path()), before);
}

#[test]
fn verbose_dry_run_logs_intended_removals() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();

    spaceprune(home.path())
        .arg("--root").arg(media.path())
        .args(["--free", "100", "-n", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("would remove"))
        .stderr(predicate::str::contains("skipping protected file"));
}

#[test]
fn zero_target_deletes_nothing() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();
    let before = snapshot(media.path());

    spaceprune(home.path())
        .arg("--root").arg(media.path())
        .args(["--free", "0"])
        .assert()
        .success();

    assert_eq!(snapshot(media.path()), before);
}

#[test]
fn root_comes_from_motioneye_config() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();
    let conf = home.path().join("motioneye.conf");
    fs::write(&conf, format!("listen 0.0.0.0\nmedia_path {}\n", media.path().display())).unwrap();

    spaceprune(home.path())
        .arg("--config").arg(&conf)
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            media.path().canonicalize().unwrap().to_string_lossy().into_owned(),
        ));
}

#[test]
fn missing_root_fails() {
    let home = tempfile::tempdir().unwrap();

    spaceprune(home.path())
        .arg("--root").arg(home.path().join("no-such-dir"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("path unavailable"));
}

#[test]
fn percent_above_100_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();

    spaceprune(home.path())
        .arg("--root").arg(media.path())
        .args(["--free", "101"])
        .assert()
        .failure();
}

#[test]
fn config_file_is_honoured() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();
    fs::create_dir_all(home.path().join("spaceprune")).unwrap();
    fs::write(
        home.path().join("spaceprune/spaceprune.toml"),
        format!("[general]\ndry_run = true\ntarget_free_pct = 100\n\n[source]\nroot = {:?}\n", media.path()),
    )
    .unwrap();
    let before = snapshot(media.path());

    spaceprune(home.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"target_free_pct\": 100"));

    assert_eq!(snapshot(media.path()), before);
}

#[test]
fn print_config_shows_defaults() {
    let home = tempfile::tempdir().unwrap();

    spaceprune(home.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_free_pct = 20%"))
        .stdout(predicate::str::contains(".donotdelete"));
}

#[test]
fn relative_root_is_resolved_before_seeding_the_keep_list() {
    let home = tempfile::tempdir().unwrap();
    let media = media_tree();
    // a bare "." pattern would protect this file by suffix
    file(media.path(), "cam1/2024-01-03/clip.", 64, 3_000);

    spaceprune(home.path())
        .current_dir(media.path())
        .args(["--root", ".", "--free", "100", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": 3"))
        .stdout(predicate::str::contains("\"skipped\": 1"));
}
