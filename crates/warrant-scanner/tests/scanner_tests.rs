//! Scans over real files and directories

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use warrant_domain::{ClaimStatus, ProofLevel, RiskClass};
use warrant_scanner::{
    resolve_files, Baseline, DocumentTag, RuleSet, ScanError, ScanMode, Scanner,
};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn create_test_scanner() -> Scanner {
    Scanner::new(RuleSet::builtin().unwrap()).unwrap()
}

#[test]
fn test_directory_walk_picks_documents_only() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# Readme");
    write(dir.path(), "docs/plan.markdown", "# Plan");
    write(dir.path(), "deploy/values.yaml", "replicas: 2");
    write(dir.path(), "src/main.rs", "fn main() {}");

    let files = resolve_files(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["README.md", "deploy/values.yaml", "docs/plan.markdown"]);
}

#[test]
fn test_same_file_named_twice_is_scanned_once() {
    let dir = TempDir::new().unwrap();
    let readme = write(dir.path(), "README.md", "Results are guaranteed.");

    let report = create_test_scanner()
        .scan_paths(&[readme.clone(), dir.path().to_path_buf()], ScanMode::Light)
        .unwrap();
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.violations.len(), 1);
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.md");

    let err = create_test_scanner()
        .scan_paths(&[missing.clone()], ScanMode::Light)
        .unwrap_err();
    assert!(matches!(err, ScanError::NotFound(p) if p == missing));
}

#[test]
fn test_secret_fails_scan_with_high_risk() {
    let dir = TempDir::new().unwrap();
    let env = write(
        dir.path(),
        "setup.md",
        "Export the key:\n\n    OPENAI_KEY=sk-123456789012345678901234567890123456789012345678\n",
    );

    let report = create_test_scanner()
        .scan_paths(&[env], ScanMode::Light)
        .unwrap();
    assert!(!report.passed());
    assert_eq!(report.violations[0].rule_id, "SEC-002");
    assert_eq!(report.violations[0].line, 3);
    assert_eq!(report.summary.risk_distribution.get(RiskClass::R2), 1);
}

#[test]
fn test_baseline_suppresses_only_accepted_violations() {
    let dir = TempDir::new().unwrap();
    let doc = write(dir.path(), "pitch.md", "Setup is risk-free.\n");
    let baseline_path = dir.path().join(".warrant-baseline.json");
    let scanner = create_test_scanner();

    let first = scanner.scan_paths(&[doc.clone()], ScanMode::Light).unwrap();
    assert_eq!(first.violations.len(), 1);
    Baseline::from_violations(&first.violations)
        .save(&baseline_path)
        .unwrap();

    let baseline = Baseline::load(&baseline_path).unwrap().unwrap();
    let scanner = create_test_scanner().with_baseline(baseline);
    let second = scanner.scan_paths(&[doc.clone()], ScanMode::Light).unwrap();
    assert!(second.violations.is_empty());
    assert_eq!(second.baselined, 1);
    assert!(second.passed());

    fs::write(&doc, "Setup is risk-free.\nThe outcome is guaranteed.\n").unwrap();
    let third = scanner.scan_paths(&[doc], ScanMode::Light).unwrap();
    assert_eq!(third.violations.len(), 1);
    assert_eq!(third.violations[0].line, 2);
    assert_eq!(third.baselined, 1);
}

#[test]
fn test_claim_ledger_across_files() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "b.md",
        "[USER] Editors publish weekly.\n[DED] The latest plan costs less.\n",
    );
    write(dir.path(), "a.md", "[HYP] Search depends on index-service.\n");

    let report = create_test_scanner()
        .scan_paths(&[dir.path().to_path_buf()], ScanMode::Max)
        .unwrap();
    let tags: Vec<_> = report.claims.iter().map(|c| c.tag).collect();
    assert_eq!(tags, vec![DocumentTag::Hyp, DocumentTag::User, DocumentTag::Ded]);
    assert_eq!(report.claims[0].dependencies, vec!["index-service"]);

    let sourced = &report.claims[2];
    assert!(sourced.needs_source);
    assert_eq!(sourced.proof_level, ProofLevel::S2);
    assert_eq!(sourced.test_status, ClaimStatus::Pass);

    // The DED line still carries a recency trigger
    assert!(report.violations.iter().any(|v| v.rule_id == "REC-001" && v.line == 2));
}

#[test]
fn test_custom_rules_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        dir.path(),
        "rules.toml",
        r#"
[[rules]]
id = "OVER-002"
name = "Zero downtime"
description = "Zero downtime is a promise, not a measurement"
severity = "error"
category = "overpromises"
patterns = ['\bzero downtime\b']
"#,
    );
    let doc = write(dir.path(), "deploy.md", "Deploys have zero downtime.");

    let scanner = Scanner::new(RuleSet::with_file(&rules).unwrap()).unwrap();
    let report = scanner.scan_paths(&[doc], ScanMode::Light).unwrap();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].rule_id, "OVER-002");
    assert_eq!(report.violations[0].column, 14);
}

#[test]
fn test_report_serializes_with_ledger_names() {
    let report = create_test_scanner().scan_documents(
        &[("plan.md".to_string(), "[DED] Costs fall.".to_string())],
        ScanMode::Light,
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "light");
    assert_eq!(json["filesScanned"], 1);
    assert_eq!(json["claimLedger"][0]["claimId"], "CLAIM-plan_md-1-1");
    assert_eq!(json["summary"]["riskDistribution"]["R2"], 0);
    assert_eq!(json["sensitivityMap"][0]["factor"], "Scan Mode");
}
