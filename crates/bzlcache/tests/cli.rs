//! End-to-end tests of the bzlcache binary

use assert_cmd::Command;
use bzlcache_log::proto::remote_logging::{LogEntry, ReadDetails, RpcCallDetails, rpc_call_details};
use predicates::prelude::*;
use prost::Message;
use std::io::Write;

fn bzlcache() -> Command {
    let mut cmd = Command::cargo_bin("bzlcache").unwrap();
    cmd.env_remove("BAZEL_REMOTE_CACHE")
        .env_remove("BAZEL_REMOTE_CACHE_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn read_entry() -> LogEntry {
    LogEntry {
        method_name: "google.bytestream.ByteStream/Read".to_string(),
        details: Some(RpcCallDetails {
            details: Some(rpc_call_details::Details::Read(ReadDetails {
                request: None,
                num_reads: 2,
                bytes_read: 1024,
            })),
        }),
        ..Default::default()
    }
}

fn log_file(entries: &[LogEntry]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for entry in entries {
        file.write_all(&entry.encode_length_delimited_to_vec())
            .unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn help_lists_commands() {
    bzlcache()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("action-cache"))
        .stdout(predicate::str::contains("cas"))
        .stdout(predicate::str::contains("log"));
}

#[test]
fn log_prints_events() {
    let file = log_file(&[read_entry()]);

    bzlcache()
        .args(["--no-color", "log"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[-] google.bytestream.ByteStream::Read - OK\n",
        ))
        .stdout(predicate::str::contains("\t|- NumReads: 2\n"))
        .stdout(predicate::str::contains("\t|- BytesRead: 1024\n"));
}

#[test]
fn log_json_output() {
    let file = log_file(&[read_entry(), LogEntry::default()]);

    let output = bzlcache()
        .args(["log", "--json"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let events: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["details"]["read"]["response"]["bytes_read"], 1024);
    assert!(events[1]["details"].is_null());
}

#[test]
fn log_truncated_file_fails() {
    let file = log_file(&[read_entry()]);
    let len = file.as_file().metadata().unwrap().len();
    file.as_file().set_len(len - 3).unwrap();

    bzlcache()
        .args(["--no-color", "log"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("truncated"));
}

#[test]
fn log_missing_file_fails() {
    bzlcache()
        .args(["log", "/nonexistent/grpc.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/grpc.log"));
}

#[test]
fn ac_get_without_remote_fails() {
    bzlcache()
        .args(["ac", "get", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remote cache address not given"));
}

#[test]
fn ac_get_unreachable_remote_fails() {
    bzlcache()
        .args(["ac", "get", "-r", "127.0.0.1:1", "--connect-timeout", "2", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't connect"));
}

#[test]
fn ac_get_rejects_token_unfit_for_a_header() {
    bzlcache()
        .args(["ac", "get", "-r", "127.0.0.1:1", "abc"])
        .env("BAZEL_REMOTE_CACHE_TOKEN", "t\u{f6}ken")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bearer token"));
}

#[test]
fn cas_output_takes_one_digest() {
    let dir = tempfile::tempdir().unwrap();
    bzlcache()
        .args(["cas", "get", "-o"])
        .arg(dir.path().join("out"))
        .args(["a/1", "b/2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one digest"));
}
