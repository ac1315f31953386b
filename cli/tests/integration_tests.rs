use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const COPY_SCHEMA: &str = r#"program: copy
flags:
  - name: file
    help: Output file
    default: out.txt
  - name: n
    help: Number of copies
    default: 1
  - name: v
    help: Verbose output
    default: false
positionals: [input]
"#;

fn write_schema(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn argschema(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argschema"))
        .args(args)
        .output()
        .expect("failed to run argschema")
}

fn check(schema: &Path, extra: &[&str]) -> Output {
    let schema = schema.to_str().expect("utf-8 temp path");
    let mut args = vec!["check", "--schema", schema];
    args.extend_from_slice(extra);
    argschema(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_prints_resolved_flags_as_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--", "input.txt", "--file", "result.txt", "-v"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let flags = json["flags"].as_array().unwrap();
    let file = flags.iter().find(|f| f["name"] == "file").unwrap();
    assert_eq!(file["value"], "result.txt");
    assert_eq!(file["provenance"], "explicit");

    let n = flags.iter().find(|f| f["name"] == "n").unwrap();
    assert_eq!(n["value"], "1");
    assert_eq!(n["provenance"], "defaulted");

    let v = flags.iter().find(|f| f["name"] == "v").unwrap();
    assert_eq!(v["value"], "");
    assert_eq!(v["provenance"], "explicit");

    assert_eq!(json["positionals"], serde_json::json!(["input.txt"]));
}

#[test]
fn check_tokenizes_line_argument() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--line", "'my input.txt' -vn 3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["positionals"], serde_json::json!(["my input.txt"]));
    let n = json["flags"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "n")
        .unwrap();
    assert_eq!(n["value"], "3");
}

#[test]
fn check_rejects_line_with_trailing_args() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--line", "input.txt", "--", "other.txt"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot be used with"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn check_yaml_output() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--format", "yaml", "--", "input.txt"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("positionals:"));
    assert!(text.contains("input.txt"));
}

#[test]
fn check_reports_failure_with_usage() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--", "input.txt", "--nope", "x"]);
    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.starts_with("Error:\n    an unknown flag 'nope' was supplied"));
    assert!(err.contains("Usage: copy <INPUT> [Flags]"));
    assert!(stdout(&output).is_empty());

    let output = check(&schema, &["--", "input.txt", "--n", "many"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("flag 'n' expects input of type 'integer'"));

    let output = check(&schema, &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("expected 1, got 0"));
}

#[test]
fn check_help_prints_usage_and_succeeds() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = check(&schema, &["--", "--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Usage: copy <INPUT> [Flags]"));
    assert!(text.contains("--file"));
    assert!(text.contains("[Default = \"out.txt\"]"));
}

#[test]
fn check_accepts_json_schema() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        &dir,
        "tool.json",
        r#"{"flags": [{"name": "ratio", "default": 0.5, "required": true}], "positional_count": 0}"#,
    );

    let output = check(&schema, &["--", "--ratio", "1.25"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = check(&schema, &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("did not receive required flag 'ratio'"));
    assert!(stderr(&output).contains("Usage: program [Flags]"));
}

// ---------------------------------------------------------------------------
// configuration errors
// ---------------------------------------------------------------------------

#[test]
fn invalid_schema_file_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        &dir,
        "dup.yaml",
        "flags:\n  - name: x\n    default: 1\n  - name: x\n    default: 2\n",
    );

    let output = check(&schema, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tried to create flag 'x' twice"));
}

#[test]
fn missing_schema_file_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let output = check(&dir.path().join("absent.yaml"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: Failed to load schema"));
}

// ---------------------------------------------------------------------------
// usage / tokenize
// ---------------------------------------------------------------------------

#[test]
fn usage_prints_aligned_flags() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "copy.yaml", COPY_SCHEMA);

    let output = argschema(&["usage", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Usage: copy <INPUT> [Flags]");
    assert_eq!(lines[2], "Flags:");
    assert_eq!(lines.last().copied(), Some("    --help  Print help        [Default = false]"));
}

#[test]
fn tokenize_prints_json_tokens() {
    let output = argschema(&["tokenize", "a 'b c' \"d\""]);
    assert!(output.status.success());
    let tokens: Vec<String> = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(tokens, vec!["a", "b c", "d"]);

    let output = argschema(&["tokenize", "'open"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unexpected end of input"));
}
