//! CLI surface tests.
//!
//! These exercise argument validation only; nothing here talks to a Docker
//! daemon.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_run_command() {
    Command::cargo_bin("runbox")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn run_requires_script_argument() {
    Command::cargo_bin("runbox")
        .unwrap()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SCRIPT"));
}

#[test]
fn run_reports_missing_script() {
    Command::cargo_bin("runbox")
        .unwrap()
        .args(["run", "/nonexistent/script.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script not found"));
}

#[test]
fn run_rejects_non_python_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.txt");
    std::fs::write(&path, "print('x')\n").unwrap();

    Command::cargo_bin("runbox")
        .unwrap()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script path"));
}

#[test]
fn run_accepts_hyphen_leading_argument_values() {
    // --arguments and --params take flag-shaped values verbatim; the parse
    // must get past them and fail on the missing script instead.
    Command::cargo_bin("runbox")
        .unwrap()
        .args([
            "run",
            "/nonexistent/script.py",
            "--arguments",
            "--fast",
            "--params",
            "-v",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script not found"));
}

#[test]
fn run_rejects_invalid_port() {
    Command::cargo_bin("runbox")
        .unwrap()
        .args(["run", "script.py", "--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid port"));
}
