use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    cargo_bin_cmd!("tkt")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tickets"))
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_tickets_help_lists_actions() {
    cargo_bin_cmd!("tkt")
        .args(["tickets", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("tkt")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tkt"));
}
