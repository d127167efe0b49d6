//! Shared integration-test harness for running the `docs2schema` binary as a
//! child process.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

/// Path to a file under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Runs the binary with `args` and no stdin.
pub fn spawn_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docs2schema"))
        .args(args)
        .env_remove("DOCS2SCHEMA_CONFIG")
        .env_remove("DOCS2SCHEMA_BLANK_LINES")
        .env_remove("DOCS2SCHEMA_LOG_LEVEL")
        .env_remove("DOCS2SCHEMA_MAX_CONFIG_SIZE")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run docs2schema")
}

/// Runs the binary with `args`, writing `input` to its stdin.
pub fn run_with_stdin(args: &[&str], input: &str) -> Output {
    run_with_env(args, input, &[])
}

/// Like [`run_with_stdin`], with extra environment variables set.
pub fn run_with_env(args: &[&str], input: &str, env: &[(&str, &str)]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_docs2schema"))
        .args(args)
        .env_remove("DOCS2SCHEMA_CONFIG")
        .env_remove("DOCS2SCHEMA_BLANK_LINES")
        .env_remove("DOCS2SCHEMA_LOG_LEVEL")
        .env_remove("DOCS2SCHEMA_MAX_CONFIG_SIZE")
        .envs(env.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn docs2schema");

    child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for docs2schema")
}

/// Parses stdout as JSON, panicking with the captured streams on failure.
pub fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}
