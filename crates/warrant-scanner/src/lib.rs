//! Warrant Scanner
//!
//! Lints Markdown and YAML documents for the same failures the pipeline
//! refuses in a dossier: exposed secrets, promissory wording, stale
//! time-sensitive statements and causal claims without an origin tag.
//! Tagged claims (`[USER]`, `[DED]`, `[HYP]`, `[UNKNOWN]`) are collected
//! into a ledger with the proof level and testability their tag implies.
//!
//! A baseline file grandfathers existing violations so a repository can
//! adopt the scan incrementally.
//!
//! # Examples
//!
//! ```
//! use warrant_scanner::{RuleSet, ScanMode, Scanner};
//!
//! let scanner = Scanner::new(RuleSet::builtin().unwrap()).unwrap();
//! let docs = vec![("plan.md".to_string(), "Zero risk, guaranteed.".to_string())];
//! let report = scanner.scan_documents(&docs, ScanMode::Light);
//! assert!(!report.passed());
//! assert_eq!(report.violations[0].rule_id, "OVER-001");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod baseline;
pub mod error;
pub mod extract;
pub mod rules;
pub mod scanner;
pub mod sensitivity;

pub use baseline::{fingerprint, Baseline, BaselineEntry, BASELINE_VERSION};
pub use error::{Result, ScanError};
pub use extract::{ClaimExtractor, DocumentTag, LedgerEntry};
pub use rules::{Rule, RuleCategory, RuleSet, Severity};
pub use scanner::{
    resolve_files, RiskDistribution, ScanMode, ScanReport, ScanSummary, Scanner, Violation,
};
pub use sensitivity::{sensitivity_map, SensitivityFactor};
