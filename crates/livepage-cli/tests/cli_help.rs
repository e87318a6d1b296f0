use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("livepage")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_watch_help_shows_sources() {
    cargo_bin_cmd!("livepage")
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--no-open"));
}

#[test]
fn test_url_and_file_conflict() {
    cargo_bin_cmd!("livepage")
        .args(["watch", "--url", "http://localhost:1/events", "--file", "x.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("livepage")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
