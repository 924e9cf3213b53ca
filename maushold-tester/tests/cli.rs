use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "maushold-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_maushold-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("battle-roundtrip"));
}

#[test]
fn cli_runs_sandbox_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_maushold-tester");
    let output_path = temp_path("logic");
    let status = Command::new(exe)
        .args([
            "--mode",
            "logic",
            "--scenarios",
            "smoke,battle-roundtrip",
            "--seeds",
            "1,2",
            "--iterations",
            "2",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let results: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let runs = results.as_array().expect("array of results");
    assert_eq!(runs.len(), 4);
    assert!(runs.iter().all(|run| run["passed"] == true && run["target"] == "sandbox"));
}

#[test]
fn cli_fails_when_the_gateway_is_unreachable() {
    let exe = env!("CARGO_BIN_EXE_maushold-tester");
    let output_path = temp_path("api");
    let status = Command::new(exe)
        .args([
            "--mode",
            "api",
            "--api-base-url",
            "http://127.0.0.1:9",
            "--iterations",
            "1",
            "--report",
            "markdown",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(!status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("## Failures"));
}

#[test]
fn cli_runs_with_unknown_browser_and_json_report() {
    let exe = env!("CARGO_BIN_EXE_maushold-tester");
    let output_path = temp_path("browser");
    let output = Command::new(exe)
        .args([
            "--mode",
            "browser",
            "--browsers",
            "unknown",
            "--report",
            "json",
            "--scenarios",
            "smoke",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown browser"));
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(content.trim(), "[]");
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_maushold-tester");
    let output = Command::new(exe)
        .args(["--seeds", "one"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}
