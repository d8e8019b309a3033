//! Binary-level tests for the swaystatus command.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_empty_stdin_writes_header_and_exits() {
    let mut cmd = Command::cargo_bin("swaystatus").unwrap();
    cmd.args(["--grace-ms", "100"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"{"version":1,"click_events":true,"stop_signal":2,"cont_signal":18}"#,
        ))
        .stdout(predicate::str::contains("\n[\n"));
}

#[test]
fn test_header_reflects_flags() {
    let mut cmd = Command::cargo_bin("swaystatus").unwrap();
    cmd.args(["--no-click-events", "--stop-signal", "15", "--grace-ms", "100"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""click_events":false"#))
        .stdout(predicate::str::contains(r#""stop_signal":15"#));
}

#[test]
fn test_stray_clicks_do_not_crash() {
    let input = "[\n{\"name\":\"??\",\"button\":1}\n,garbage\n";
    let mut cmd = Command::cargo_bin("swaystatus").unwrap();
    cmd.args(["--grace-ms", "100", "--click-counter"])
        .write_stdin(input)
        .assert()
        .success();
}

#[test]
fn test_invalid_stop_signal_fails() {
    let mut cmd = Command::cargo_bin("swaystatus").unwrap();
    cmd.args(["--stop-signal", "9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported stop signal: 9"));
}
