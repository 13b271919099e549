//! End-to-end tests for `digital-prefs scheme` commands.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the digital-prefs binary
fn prefs_bin() -> String {
    std::env::var("CARGO_BIN_EXE_digital-prefs")
        .unwrap_or_else(|_| "target/debug/digital-prefs".to_string())
}

/// Runs the binary with `DIGITAL_HOME` pointed at `home`.
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(prefs_bin())
        .env("DIGITAL_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// List / Show Tests
// ============================================================================

#[test]
fn test_scheme_list_marks_default_selection() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "list"]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("default"));
    assert!(lines[1].starts_with('*') && lines[1].contains("dark"));
    assert!(lines[2].contains("color_blind"));
    assert!(lines[3].contains("custom"));
}

#[test]
fn test_scheme_show_json() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "show", "color-blind", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Should parse JSON output");
    assert_eq!(result["name"], "color_blind");
    assert_eq!(result["active"], false);
    assert_eq!(result["type"], "light");
    assert_eq!(result["colors"]["wire_out"], "#FAA500");
    assert_eq!(result["colors"].as_object().unwrap().len(), 17);
}

#[test]
fn test_scheme_show_defaults_to_active() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "show"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Scheme: Dark"), "{text}");
    assert!(text.contains("#363636"), "{text}");
}

#[test]
fn test_scheme_show_unknown_name() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "show", "solarized"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("solarized"));
}

// ============================================================================
// Set / Custom Tests
// ============================================================================

#[test]
fn test_scheme_set_persists_selection() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "set", "default"]);
    assert_eq!(output.status.code(), Some(0));

    let content = fs::read_to_string(settings_file(home.path())).unwrap();
    assert!(content.contains("color_scheme = \"default\""), "{content}");

    let output = run(home.path(), &["scheme", "show", "--json"]);
    let result: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(result["name"], "default");
    assert_eq!(result["active"], true);
}

#[test]
fn test_custom_set_and_diff() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "custom", "set", "grid", "#102030"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let output = run(home.path(), &["scheme", "custom", "set", "wire-z", "#01020380"]);
    assert_eq!(output.status.code(), Some(0));

    let output = run(home.path(), &["scheme", "diff", "custom"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{text}");
    // Key order: wire_z precedes grid.
    assert!(lines[0].contains("#01020380"));
    assert!(lines[1].contains("#102030"));

    let store = settings_store(home.path());
    let custom = store.custom_color_scheme().expect("custom scheme saved");
    assert_eq!(
        custom.color(digital_prefs::models::ColorKey::Grid).to_hex(),
        "#102030"
    );
}

#[test]
fn test_custom_set_rejects_bad_input() {
    let home = TempDir::new().unwrap();

    let output = run(home.path(), &["scheme", "custom", "set", "sparkles", "#FFFFFF"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(home.path(), &["scheme", "custom", "set", "grid", "#12345"]);
    assert_eq!(output.status.code(), Some(1));

    assert!(!settings_file(home.path()).exists());
}

#[test]
fn test_custom_reset() {
    let home = TempDir::new().unwrap();
    run(home.path(), &["scheme", "custom", "set", "grid", "#102030"]);

    let output = run(home.path(), &["scheme", "custom", "reset"]);
    assert_eq!(output.status.code(), Some(0));

    let output = run(home.path(), &["scheme", "diff", "custom"]);
    assert!(stdout(&output).contains("matches the default scheme"));
}

#[test]
fn test_corrupt_settings_file_is_io_error() {
    let home = TempDir::new().unwrap();
    fs::write(settings_file(home.path()), "color_scheme = [").unwrap();

    let output = run(home.path(), &["scheme", "list"]);

    assert_eq!(output.status.code(), Some(2));
}
