//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

/// Build command for the voltdrop-cli binary (finds it in target/debug when run via cargo test).
fn voltdrop_cli() -> Command {
    cargo_bin_cmd!("voltdrop-cli")
}

#[test]
fn test_cli_help() {
    let mut cmd = voltdrop_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("wire sizing"));
}

#[test]
fn test_cli_version() {
    let mut cmd = voltdrop_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_size_short_run() {
    let mut cmd = voltdrop_cli();

    cmd.args([
        "size",
        "--amps",
        "15",
        "--volts",
        "120",
        "--length",
        "10",
        "--percent-drop",
        "3",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#14"));
}

#[test]
fn test_cli_size_json_format() {
    let mut cmd = voltdrop_cli();

    cmd.args([
        "size",
        "--amps",
        "50",
        "--volts",
        "240",
        "--length",
        "50",
        "--material",
        "aluminum",
        "--format",
        "json",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"gauge\": \"3\""));
}

#[test]
fn test_cli_size_insufficient_input_exit_code() {
    let mut cmd = voltdrop_cli();

    cmd.args([
        "size", "--amps", "0", "--volts", "120", "--length", "10",
    ]);

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("Insufficient input"));
}

#[test]
fn test_cli_size_no_adequate_gauge_exit_code() {
    let mut cmd = voltdrop_cli();

    cmd.args([
        "size",
        "--amps",
        "400",
        "--volts",
        "120",
        "--length",
        "5000",
        "--percent-drop",
        "1",
    ]);

    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("no listed conductor"));
}

#[test]
fn test_cli_length_from_json_path() {
    let mut cmd = voltdrop_cli();

    cmd.args([
        "length",
        "--path",
        r#"[{"lat":43.0,"lng":-79.0},{"lat":44.0,"lng":-79.0}]"#,
    ]);

    // One degree of latitude is about 111.3 km on the sphere.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("111319."));
}

#[test]
fn test_cli_length_rejects_bad_json() {
    let mut cmd = voltdrop_cli();

    cmd.args(["length", "--path", "not json"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid path JSON"));
}

#[test]
fn test_cli_state_normalizes_malformed_path() {
    let mut cmd = voltdrop_cli();

    cmd.args(["state", "amps=15&path=garbage&length=42"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("length=0.00"))
        .stdout(predicate::str::contains("path=").not());
}

#[test]
fn test_cli_state_preserves_manual_length_without_path() {
    let mut cmd = voltdrop_cli();

    // No path key: the length is a hand-typed value, not a derived one,
    // and must come through untouched.
    cmd.args(["state", "amps=15&volts=120&length=42&percentage_drop=3"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("length=42"))
        .stdout(predicate::str::contains("length=0.00").not());
}

#[test]
fn test_cli_gauges_lists_table() {
    let mut cmd = voltdrop_cli();

    cmd.args(["gauges", "--material", "copper", "--method", "raceway"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#14"))
        .stdout(predicate::str::contains("9.92"));
}
