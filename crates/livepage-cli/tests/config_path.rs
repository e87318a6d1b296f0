use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("[session]"));
    assert!(contents.contains("# url ="));
    assert!(contents.contains("open_browser = true"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_watch_without_source_explains_setup() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No session source"));
}

#[test]
fn test_watch_requires_terminal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("empty.jsonl");
    fs::write(&file, "").unwrap();

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .args(["--file", file.to_str().unwrap(), "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[preview]\nopen_browser = \"yes\"\n").unwrap();

    cargo_bin_cmd!("livepage")
        .env("LIVEPAGE_HOME", dir.path())
        .args(["replay", "-"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
