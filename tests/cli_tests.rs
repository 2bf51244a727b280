//! End-to-end tests for the `keyline` binary.

#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

const CONF: &str = "{\n  \"build\": {\n    \"distDir\": \"../dist\"\n  },\n  \"plugins\": [\n    \"shell\",\n    \"fs\"\n  ]\n}";

fn keyline() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_keyline"));
    cmd.env_remove("KEYLINE_LOG");
    cmd
}

fn conf_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = keyline()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_locate_found() {
    let file = conf_file(CONF);
    let output = keyline()
        .args(["locate", "build.distDir"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn test_locate_not_found() {
    let file = conf_file(CONF);
    let output = keyline()
        .args(["locate", "build.devPath"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "-1\n");
}

#[test]
fn test_locate_from_stdin_with_pointer() {
    let output = run_with_stdin(&["locate", "--syntax", "pointer", "/plugins/1"], CONF);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "7\n");
}

#[test]
fn test_locate_normalized_minified_input() {
    let output = run_with_stdin(
        &["locate", "--normalize", "-s", "jq", ".plugins[0]"],
        r#"{"build":{"distDir":"../dist"},"plugins":["shell","fs"]}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "6\n");
}

#[test]
fn test_locate_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = keyline()
        .args(["locate", "a"])
        .arg(dir.path().join("absent.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn test_locate_invalid_pointer() {
    let output = run_with_stdin(&["locate", "-s", "pointer", "plugins"], CONF);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_show_window() {
    let file = conf_file(CONF);
    let output = keyline()
        .args(["show", "--no-color", "-A", "1", "plugins.1"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "  6 |     \"shell\",\n> 7 |     \"fs\"\n  8 |   ]\n"
    );
}

#[test]
fn test_show_forced_color() {
    let file = conf_file(CONF);
    let output = keyline()
        .args(["show", "-C", "-A", "0", "plugins.1"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("\x1b[1;32m>\x1b[0m"), "missing color marker: {:?}", out);
    assert_eq!(
        out,
        "\x1b[1;32m>\x1b[0m \x1b[0;34m7\x1b[0m | \x1b[1;33m    \"fs\"\x1b[0m\n"
    );
}

#[test]
fn test_show_not_found_quiet() {
    let output = run_with_stdin(&["show", "-q", "nope"], CONF);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_normalize() {
    let output = run_with_stdin(&["normalize"], r#"{"a":[1]}"#);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "{\n  \"a\": [\n    1\n  ]\n}\n");
}
