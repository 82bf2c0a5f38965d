#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn autopush() -> Command {
    Command::cargo_bin("autopush").unwrap()
}

/// Config pointing gh at a program that cannot exist.
fn config_without_gh(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[tools]\ngh = \"autopush-test-missing-gh\"\n").unwrap();
    path
}

/// Write an executable shell script named `name` into `bin`.
fn install(bin: &Path, name: &str, body: &str) {
    let path = bin.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\nexit 0\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Stub `gh` that reports `octocat` as the logged-in user.
fn install_gh(bin: &Path) {
    install(bin, "gh", r#"[ "$1" = api ] && echo '{"login":"octocat"}'"#);
}

/// Empty config so a user's own config file never leaks into a test.
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    path
}

/// Run the binary in `work` with only `bin` on PATH.
fn autopush_in(work: &Path, bin: &Path, cfg: &TempDir) -> Command {
    let mut cmd = autopush();
    cmd.arg("--config")
        .arg(empty_config(cfg))
        .current_dir(work)
        .env("PATH", bin);
    cmd
}

#[test]
fn help_lists_prefill_flags() {
    autopush()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--visibility"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn missing_gh_exits_nonzero_without_touching_dir() {
    let cfg = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    autopush()
        .arg("--config")
        .arg(config_without_gh(&cfg))
        .current_dir(work.path())
        .write_stdin("demo\n\n\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not found"))
        .stdout(predicate::str::contains("gh auth login"));

    assert!(!work.path().join(".git").exists());
    assert!(!work.path().join(".gitignore").exists());
}

#[test]
fn invalid_config_is_reported() {
    let cfg = TempDir::new().unwrap();
    let path = cfg.path().join("config.toml");
    std::fs::write(&path, "[tools]\nsvn = \"svn\"\n").unwrap();

    autopush()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Failed to parse config"));
}

#[test]
fn missing_explicit_config_is_reported() {
    let cfg = TempDir::new().unwrap();

    autopush()
        .arg("--config")
        .arg(cfg.path().join("absent.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to read config"));
}

#[test]
fn dirty_existing_repo_exits_zero() {
    let cfg = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    std::fs::create_dir(work.path().join(".git")).unwrap();
    install(bin.path(), "git", r#"[ "$1" = status ] && echo " M README.md""#);
    install_gh(bin.path());

    autopush_in(work.path(), bin.path(), &cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes pushed successfully"))
        .stdout(predicate::str::contains("All done"));
}

#[test]
fn new_repo_exits_zero_and_prints_url() {
    let cfg = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    install(bin.path(), "git", ":");
    install_gh(bin.path());

    autopush_in(work.path(), bin.path(), &cfg)
        .write_stdin("demo\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository created and pushed successfully"))
        .stdout(predicate::str::contains("https://github.com/octocat/demo"));

    assert!(work.path().join(".gitignore").exists());
}

#[test]
fn failed_commit_exits_one() {
    let cfg = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    std::fs::create_dir(work.path().join(".git")).unwrap();
    install(
        bin.path(),
        "git",
        r#"case "$1" in
  status) echo "?? new.txt" ;;
  commit) echo "commit refused" >&2; exit 1 ;;
esac"#,
    );
    install_gh(bin.path());

    autopush_in(work.path(), bin.path(), &cfg)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("commit refused"))
        .stdout(predicate::str::contains("Error executing command: git commit"))
        .stdout(predicate::str::contains("Operation failed"))
        .stdout(predicate::str::contains("All done").not());
}
