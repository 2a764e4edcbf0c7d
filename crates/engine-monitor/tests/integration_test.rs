use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn monitor(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_engine-monitor"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run engine-monitor")
}

fn read_audit(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .expect("Audit log was not created")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Audit line is not JSON"))
        .collect()
}

fn engine_events<'a>(entries: &'a [Value], kind: &str) -> Vec<&'a Value> {
    entries
        .iter()
        .filter(|e| e["record"]["type"] == "engine" && e["record"]["kind"] == kind)
        .collect()
}

#[test]
fn test_default_script_prints_status_blocks() {
    let output = monitor(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Engine Status ==="));
    assert!(stdout.contains("Status: OFF"));
    assert!(stdout.contains("Status: ON"));
    assert!(stdout.contains("Temperature: 95°C"));
    assert!(stdout.contains("Pressure: 60 PSI"));
    assert!(stdout.contains("RPM: 3000"));
    assert!(stdout.contains("Fuel: 75%"));
}

#[test]
fn test_audit_log_records_session() {
    let dir = tempdir().unwrap();
    let audit = dir.path().join("audit.jsonl");

    let output = monitor(&[
        "--script",
        "start;update 100 50 2500 80;classify;stop",
        "--audit-log",
        audit.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let entries = read_audit(&audit);
    assert_eq!(entries.first().unwrap()["record"]["type"], "session_start");
    assert_eq!(entries.first().unwrap()["record"]["commands"], 4);
    assert_eq!(entries.last().unwrap()["record"]["type"], "session_end");
    assert_eq!(entries.last().unwrap()["record"]["rejected"], 0);

    let sequences: Vec<u64> = entries
        .iter()
        .map(|e| e["sequence"].as_u64().unwrap())
        .collect();
    let expected: Vec<u64> = (0..entries.len() as u64).collect();
    assert_eq!(sequences, expected);

    assert_eq!(engine_events(&entries, "initialized").len(), 1);
    assert_eq!(engine_events(&entries, "started").len(), 1);
    assert_eq!(engine_events(&entries, "stopped").len(), 1);

    let updated = engine_events(&entries, "readings_updated");
    assert_eq!(updated.len(), 1);
    let readings = &updated[0]["record"]["snapshot"]["readings"];
    assert_eq!(readings["temperature_c"], 100);
    assert_eq!(readings["pressure_psi"], 50);
    assert_eq!(readings["rpm"], 2500);
    assert_eq!(readings["fuel_percent"], 80);

    let classified = engine_events(&entries, "parameter_classified");
    assert_eq!(classified.len(), 4);
    assert!(classified
        .iter()
        .all(|e| e["record"]["severity"] == "OK" && e["record"]["level"] == "debug"));

    let stopped = engine_events(&entries, "stopped");
    assert_eq!(stopped[0]["record"]["snapshot"]["readings"]["fuel_percent"], 80);
    assert_eq!(stopped[0]["record"]["snapshot"]["running"], false);
}

#[test]
fn test_empty_tank_rejects_start() {
    let dir = tempdir().unwrap();
    let audit = dir.path().join("audit.jsonl");

    let output = monitor(&[
        "--fuel",
        "0",
        "--script",
        "start;running;update 100 50 2500 80",
        "--audit-log",
        audit.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("running: false"));

    let entries = read_audit(&audit);
    let rejected = engine_events(&entries, "start_rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["record"]["level"], "error");
    assert!(engine_events(&entries, "started").is_empty());

    let update_rejected = engine_events(&entries, "update_rejected");
    assert_eq!(update_rejected.len(), 1);
    assert_eq!(update_rejected[0]["record"]["level"], "warning");
    assert_eq!(entries.last().unwrap()["record"]["rejected"], 2);
}

#[test]
fn test_cycles_write_log_file() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("logs").join("engine.log");

    let output = monitor(&["--cycles", "3", "--log-file", log_file.to_str().unwrap()]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&log_file).expect("Log file was not created");
    assert_eq!(content.matches("Engine started").count(), 3);
    assert_eq!(content.matches("Engine stopped").count(), 3);
    assert!(content.contains("Current state - OFF"));
    assert!(!content.contains("ERROR"));
}

#[test]
fn test_bad_script_exits_with_usage_error() {
    let output = monitor(&["--script", "start;launch"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command: launch"));
}

#[test]
fn test_help_exits_cleanly() {
    let output = monitor(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE:"));
}
