use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use dte_lib::error::ErrorCategory;
use dte_lib::DteOutput;
use tempfile::TempDir;

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_assets")
        .join(name)
}

fn run_cmd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dte"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run dte")
}

fn parse_json(stdout: &[u8]) -> DteOutput {
    serde_json::from_slice(stdout).expect("output should be valid JSON")
}

#[test]
fn analyze_succeeds_for_valid_capture() {
    let input = asset("landing_page.json");
    let output = run_cmd(&["analyze", "--input", input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    match parse_json(&output.stdout) {
        DteOutput::Analyze(out) => {
            assert_eq!(out.sample_count, 25);
            assert_eq!(out.source.url.as_deref(), Some("https://example.com/landing"));
            assert_eq!(out.analyzers.len(), 3);
            assert!(out.tokens.colors.is_some());
            assert!(out.tokens.typography.is_some());
            assert!(out.tokens.spacing.is_some());
            let highlights = out.summary.map(|s| s.highlights).unwrap_or_default();
            assert!(!highlights.is_empty() && highlights.len() <= 5);
        }
        other => panic!("expected analyze output, got {:?}", other),
    }
}

#[test]
fn analyze_runs_only_selected_analyzers() {
    let input = asset("landing_page.json");
    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--analyzers",
        "spacing",
    ]);

    assert_eq!(output.status.code(), Some(0));
    match parse_json(&output.stdout) {
        DteOutput::Analyze(out) => {
            assert!(out.tokens.colors.is_none());
            assert!(out.tokens.typography.is_none());
            assert_eq!(out.tokens.spacing.map(|s| s.base_unit), Some(4.0));
        }
        other => panic!("expected analyze output, got {:?}", other),
    }
}

#[test]
fn analyze_writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let out_path = dir.path().join("tokens.json");
    let input = asset("landing_page.json");

    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty(), "stdout should stay empty with --output");
    let written = std::fs::read(&out_path).expect("read output file");
    assert!(matches!(parse_json(&written), DteOutput::Analyze(_)));
}

#[test]
fn missing_capture_exits_fatal_with_error_payload() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("missing.json");

    let output = run_cmd(&["analyze", "--input", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    match parse_json(&output.stdout) {
        DteOutput::Error(err) => {
            assert_eq!(err.error.category, ErrorCategory::Capture);
            assert!(err.error.message.contains("Capture file not found"));
            assert!(err.error.remediation.is_some());
        }
        other => panic!("expected error output, got {:?}", other),
    }
}

#[test]
fn empty_capture_yields_default_tokens() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("empty.json");
    std::fs::write(&path, r#"{"url":"https://example.com","samples":[]}"#).expect("write capture");

    let output = run_cmd(&["analyze", "--input", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    match parse_json(&output.stdout) {
        DteOutput::Analyze(out) => {
            assert_eq!(out.sample_count, 0);
            let palette = out.tokens.colors.expect("palette");
            assert!(palette.all.is_empty());
            assert_eq!(out.tokens.typography.map(|t| t.scale.base_size), Some(16.0));
            assert_eq!(out.tokens.spacing.map(|s| s.base_unit), Some(8.0));
        }
        other => panic!("expected analyze output, got {:?}", other),
    }
}

#[test]
fn malformed_sample_is_skipped() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("mixed.json");
    std::fs::write(
        &path,
        r#"{"samples":[
            {"tag":"p","typography":{"fontSize":"16px"}},
            {"tag":"div","typography":{"fontSize":16}},
            {"typography":{"fontSize":"12px"}}
        ]}"#,
    )
    .expect("write capture");

    let output = run_cmd(&[
        "analyze",
        "--input",
        path.to_str().unwrap(),
        "--analyzers",
        "typography",
    ]);

    assert_eq!(output.status.code(), Some(0));
    match parse_json(&output.stdout) {
        DteOutput::Analyze(out) => {
            assert_eq!(out.sample_count, 2);
            let typography = out.tokens.typography.expect("typography");
            assert_eq!(typography.scale.sizes, vec![12.0, 16.0]);
        }
        other => panic!("expected analyze output, got {:?}", other),
    }
}

#[test]
fn malformed_capture_exits_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write capture");

    let output = run_cmd(&["analyze", "--input", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    match parse_json(&output.stdout) {
        DteOutput::Error(err) => assert_eq!(err.error.category, ErrorCategory::Capture),
        other => panic!("expected error output, got {:?}", other),
    }
}

#[test]
fn unknown_analyzer_exits_fatal() {
    let input = asset("landing_page.json");
    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--analyzers",
        "color,layout",
    ]);

    assert_eq!(output.status.code(), Some(2));
    match parse_json(&output.stdout) {
        DteOutput::Error(err) => {
            assert_eq!(err.error.category, ErrorCategory::Config);
            assert!(err.error.message.contains("layout"));
        }
        other => panic!("expected error output, got {:?}", other),
    }
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("dte.toml");
    std::fs::write(&cfg_path, "[spacing]\nbase_unit_candidates = [8.0, 16.0]\n")
        .expect("write config");
    let input = asset("landing_page.json");

    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--analyzers",
        "spacing",
        "--config",
        cfg_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    match parse_json(&output.stdout) {
        DteOutput::Analyze(out) => {
            assert_eq!(out.tokens.spacing.map(|s| s.base_unit), Some(8.0));
        }
        other => panic!("expected analyze output, got {:?}", other),
    }
}

#[test]
fn invalid_config_exits_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("dte.toml");
    std::fs::write(&cfg_path, "[color]\nmin_occurrences = 0\n").expect("write config");
    let input = asset("landing_page.json");

    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--config",
        cfg_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid config"), "got: {stdout}");
}

#[test]
fn invalid_flag_value_exits_fatal() {
    let input = asset("landing_page.json");
    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--similarity-threshold=0",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid settings"), "got: {stdout}");
}

#[test]
fn pretty_format_falls_back_to_json_when_piped() {
    let input = asset("landing_page.json");
    let output = run_cmd(&[
        "analyze",
        "-i",
        input.to_str().unwrap(),
        "--format",
        "pretty",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(matches!(parse_json(&output.stdout), DteOutput::Analyze(_)));
}
