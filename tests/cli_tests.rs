//! Run the `ses-sender` binary and check exit codes and the log file it leaves behind.

use std::process::{Command, Output};

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Run the binary inside `dir` so `sender.log` and relative paths land there.
fn run(dir: &TempDir, config: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ses-sender"))
        .current_dir(dir.path())
        .env("SES_SENDER_CONFIG", dir.path().join(config))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run ses-sender")
}

fn log_text(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("sender.log")).unwrap_or_default()
}

#[test]
fn test_dry_run_success_exits_zero() {
    let dir = TempDir::new().unwrap();
    dir.child("report.txt").write_str("quarterly numbers\n").unwrap();

    let out = run(
        &dir,
        "absent.yaml",
        &["report.txt", "me@example.com", "a@example.com", "--dry-run", "outbox"],
    );

    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    dir.child("outbox/message-001.eml").assert(predicate::path::exists());
    dir.child("outbox/message-002.eml").assert(predicate::path::missing());
}

#[test]
fn test_bad_recipient_exits_one() {
    let dir = TempDir::new().unwrap();
    dir.child("report.txt").write_str("quarterly numbers\n").unwrap();

    let out = run(
        &dir,
        "absent.yaml",
        &["report.txt", "me@example.com", "not an address", "--dry-run", "outbox"],
    );

    assert_eq!(out.status.code(), Some(1));
    dir.child("outbox/message-001.eml").assert(predicate::path::missing());
    let log = log_text(&dir);
    assert!(log.contains("ERROR"), "{log}");
    assert!(log.contains("not an address"), "{log}");
}

#[test]
fn test_broken_config_warning_reaches_log() {
    let dir = TempDir::new().unwrap();
    dir.child("report.txt").write_str("quarterly numbers\n").unwrap();
    dir.child("bad.yaml").write_str("compress: [not, a, bool]\n").unwrap();

    let out = run(
        &dir,
        "bad.yaml",
        &["report.txt", "me@example.com", "a@example.com", "--dry-run", "outbox"],
    );

    assert_eq!(out.status.code(), Some(0));
    let log = log_text(&dir);
    assert!(log.contains("WARN"), "{log}");
    assert!(log.contains("Failed to load config, using defaults"), "{log}");
}
