mod common;

use common::{fixture_path, run_with_env, run_with_stdin, spawn_command, stdout_json};
use serde_json::json;

fn generate_fixture(name: &str, extra: &[&str]) -> std::process::Output {
    let input = fixture_path(name);
    let mut args = vec!["generate", "--quiet", "--input", input.to_str().unwrap()];
    args.extend_from_slice(extra);
    spawn_command(&args)
}

// ============================================================================
// Successful generation
// ============================================================================

#[test]
fn reference_document_generates_schema() {
    let output = generate_fixture("reference.md", &[]);
    assert!(
        output.status.success(),
        "generate should exit 0: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let schema = stdout_json(&output);
    assert_eq!(schema["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(schema["$ref"], "#/definitions/Basic Configuration Modules");

    assert_eq!(schema["definitions"].as_object().unwrap().len(), 4);

    // Definitions are emitted in first-encounter order
    let stdout = String::from_utf8_lossy(&output.stdout);
    let positions: Vec<usize> = [
        "\"Basic Configuration Modules\": {",
        "\"LogObject\": {",
        "\"InboundObject\": {",
        "\"EmptyObject\": {",
    ]
    .iter()
    .map(|key| stdout.find(key).unwrap_or_else(|| panic!("{key} missing")))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn reference_document_property_shapes() {
    let schema = stdout_json(&generate_fixture("reference.md", &[]));
    let root = &schema["definitions"]["Basic Configuration Modules"]["properties"];

    assert_eq!(root["log"]["$ref"], "#/definitions/LogObject");
    assert_eq!(root["log"]["name"], "log");
    assert_eq!(
        root["inbounds"]["items"],
        json!({"$ref": "#/definitions/InboundObject"})
    );
    assert_eq!(root["inbounds"]["type"], "array");
    assert_eq!(root["dns"]["type"], "object");
    assert!(root.get("Tony").is_none());
    assert!(root.get("orphan").is_none());

    let loglevel = &schema["definitions"]["LogObject"]["properties"]["loglevel"];
    assert_eq!(
        loglevel["anyOf"],
        json!([{"const": "debug"}, {"const": "info"}, {"const": "warning"}])
    );
    assert!(loglevel["description"].as_str().unwrap().contains("Log verbosity."));
    assert_eq!(loglevel["description"], loglevel["markdownDescription"]);
}

#[test]
fn duplicate_titles_become_any_of() {
    let schema = stdout_json(&generate_fixture("reference.md", &[]));
    let variants = schema["definitions"]["InboundObject"]["anyOf"]
        .as_array()
        .expect("InboundObject should be an anyOf");
    assert_eq!(variants.len(), 2);
    assert!(variants[0]["properties"].get("port").is_some());
    assert!(variants[1]["properties"].get("settings").is_some());
    assert_eq!(variants[1]["properties"]["settings"]["type"], "object");
}

#[test]
fn additional_properties_follow_property_count() {
    let schema = stdout_json(&generate_fixture("reference.md", &[]));
    assert_eq!(schema["definitions"]["LogObject"]["additionalProperties"], false);
    assert_eq!(schema["definitions"]["EmptyObject"]["additionalProperties"], true);
}

#[test]
fn stdin_to_stdout_with_trailing_newline() {
    let output = run_with_stdin(&["generate", "--quiet"], "## Basic Configuration Modules\n> a: int\n");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("}\n"));
    assert!(stdout.contains("\n  \"definitions\": {"), "two-space indent: {stdout}");
}

#[test]
fn empty_input_yields_empty_definitions() {
    let output = run_with_stdin(&["generate", "--quiet"], "");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["definitions"], json!({}));
}

#[test]
fn output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    let output = generate_fixture("reference.md", &["--output", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(written["definitions"].get("LogObject").is_some());
}

#[test]
fn no_markdown_description_flag() {
    let schema = stdout_json(&generate_fixture("reference.md", &["--no-markdown-description"]));
    let log = &schema["definitions"]["Basic Configuration Modules"]["properties"]["log"];
    assert!(log.get("markdownDescription").is_none());
    assert!(log["description"].is_string());
}

#[test]
fn config_file_policy_applies() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("policy.yaml");
    std::fs::write(
        &config,
        "known_unresolvable: [FakeDnsObject, MissingObject, OutbondObject]\n",
    )
    .unwrap();

    let output = generate_fixture("unresolved.md", &["--config", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "allow-listed names should not be verified: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let schema = stdout_json(&output);
    let props = &schema["definitions"]["Basic Configuration Modules"]["properties"];
    assert_eq!(props["outbound"], json!({
        "name": "outbound",
        "description": "\n",
        "markdownDescription": "\n",
        "type": "object"
    }));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn translation_failure_exits_4_without_output() {
    let output = generate_fixture("bad_type.md", &[]);
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"float\""), "stderr: {stderr}");
    assert!(!stderr.contains("duration"), "fail-fast stops at first section: {stderr}");
}

#[test]
fn collect_errors_reports_every_failure() {
    let output = generate_fixture("bad_type.md", &["--collect-errors"]);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("float"), "stderr: {stderr}");
    assert!(stderr.contains("duration"), "stderr: {stderr}");
}

#[test]
fn unresolved_reference_exits_5_with_suggestion() {
    let output = generate_fixture("unresolved.md", &[]);
    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OutbondObject"), "stderr: {stderr}");
    assert!(stderr.contains("did you mean 'OutboundObject'"), "stderr: {stderr}");
    assert!(stderr.contains("MissingObject"), "stderr: {stderr}");
}

#[test]
fn no_verify_references_accepts_dangling_refs() {
    let output = generate_fixture("unresolved.md", &["--no-verify-references"]);
    assert!(output.status.success());
}

#[test]
fn allow_unresolved_flag() {
    let output = generate_fixture(
        "unresolved.md",
        &["--allow-unresolved", "OutbondObject", "--allow-unresolved", "MissingObject"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn missing_input_exits_3() {
    let output = spawn_command(&["generate", "--input", "/nonexistent/docs2schema/input.md"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn invalid_config_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("policy.yaml");
    std::fs::write(&config, "unknown_knob: true\n").unwrap();
    let output = run_with_stdin(&["generate", "--config", config.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn oversized_config_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("policy.yaml");
    let padding = format!("# {}\n", "x".repeat(2000));
    std::fs::write(&config, format!("{padding}blank_lines: skip\n")).unwrap();

    let args = ["generate", "--config", config.to_str().unwrap()];
    let output = run_with_env(&args, "", &[("DOCS2SCHEMA_MAX_CONFIG_SIZE", "100")]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(limit: 100)"), "stderr: {stderr}");

    let output = run_with_env(&args, "", &[("DOCS2SCHEMA_MAX_CONFIG_SIZE", "1000000")]);
    assert!(
        output.status.success(),
        "a raised limit should accept the file: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
