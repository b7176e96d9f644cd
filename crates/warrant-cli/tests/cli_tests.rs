//! Runs of the `warrant` binary

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn warrant(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_warrant"));
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--no-color")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_markdown_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("project.toml");
    fs::write(
        &input,
        r#"
objective = "Move invoice processing to a managed queue"

[users_load]
peak_rps = "tbd"
"#,
    )
    .unwrap();

    let output = warrant(&dir).arg("run").arg(&input).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("**Termination:** TERM-PROTOCOL"));
    assert!(stdout.contains("users_load.peak_rps"));
}

#[test]
fn test_config_file_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[settings]\nformat = \"json\"\n\n[overrides]\ndivergence = \"low\"\n",
    )
    .unwrap();
    let input = dir.path().join("project.json");
    fs::write(&input, r#"{"objective": "Write an onboarding guide"}"#).unwrap();

    let output = warrant(&dir).arg("run").arg(&input).output().unwrap();
    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["options"].as_array().unwrap().len(), 2);
}

#[test]
fn test_params_command() {
    let dir = TempDir::new().unwrap();
    let output = warrant(&dir)
        .args(["--format", "json", "params", "complex"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let params: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(params["repair_max"], 3);
}

#[test]
fn test_bad_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("project.yaml");
    fs::write(&input, "objective: x").unwrap();

    let output = warrant(&dir).arg("run").arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error:"));
}

#[test]
fn test_scan_exit_status_follows_result() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("pitch.md"), "Adoption is risk-free.\n").unwrap();
    fs::write(docs.join("notes.txt"), "Adoption is risk-free.\n").unwrap();

    let failed = warrant(&dir).arg("scan").arg(&docs).output().unwrap();
    assert_eq!(failed.status.code(), Some(1));
    let stdout = String::from_utf8(failed.stdout).unwrap();
    assert!(stdout.contains("# Scan: 1 file(s), light mode"));
    assert!(stdout.contains("OVER-001"));

    let baseline = dir.path().join("baseline.json");
    let created = warrant(&dir)
        .arg("scan")
        .arg(&docs)
        .arg("--create-baseline")
        .arg("--baseline")
        .arg(&baseline)
        .output()
        .unwrap();
    assert!(created.status.success());

    let passed = warrant(&dir)
        .arg("scan")
        .arg(&docs)
        .arg("--baseline")
        .arg(&baseline)
        .output()
        .unwrap();
    assert!(passed.status.success());
    assert!(String::from_utf8(passed.stdout)
        .unwrap()
        .contains("**Baselined:** 1"));
}

#[test]
fn test_scan_missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let output = warrant(&dir)
        .arg("scan")
        .arg(dir.path().join("absent.md"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No such file or directory"));
}
