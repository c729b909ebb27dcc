use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_startup_flags() {
    Command::cargo_bin("nbagent")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--addr")
                .and(predicate::str::contains("--port"))
                .and(predicate::str::contains("--data"))
                .and(predicate::str::contains("--reset-token"))
                .and(predicate::str::contains("--override-token")),
        );
}

#[test]
fn rejects_bad_port() {
    Command::cargo_bin("nbagent")
        .unwrap()
        .args(["--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("nbagent")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nbagent"));
}
