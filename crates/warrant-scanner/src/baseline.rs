//! Baseline files: violations accepted once and suppressed afterwards
//!
//! A violation is suppressed when its file, rule, line and fingerprint all
//! match a baseline entry. Editing the text around a grandfathered
//! violation changes its fingerprint and brings it back.

use crate::error::{Result, ScanError};
use crate::scanner::Violation;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Baseline format version written by [`Baseline::from_violations`]
pub const BASELINE_VERSION: &str = "1.0.0";

/// One grandfathered violation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineEntry {
    /// Document path as scanned
    pub file: String,
    /// Rule that fired
    pub rule_id: String,
    /// 1-indexed line
    pub line: usize,
    /// [`fingerprint`] of the violation
    pub hash: String,
}

impl BaselineEntry {
    fn of(violation: &Violation) -> Self {
        Self {
            file: violation.file.clone(),
            rule_id: violation.rule_id.clone(),
            line: violation.line,
            hash: fingerprint(violation),
        }
    }
}

/// A set of accepted violations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// Format version
    pub version: String,
    /// Accepted violations
    pub violations: Vec<BaselineEntry>,
    #[serde(skip)]
    index: HashSet<BaselineEntry>,
}

impl Baseline {
    /// Accept every violation in `violations`
    pub fn from_violations(violations: &[Violation]) -> Self {
        let entries = violations.iter().map(BaselineEntry::of).collect();
        Self::with_entries(BASELINE_VERSION.to_string(), entries)
    }

    fn with_entries(version: String, violations: Vec<BaselineEntry>) -> Self {
        let index = violations.iter().cloned().collect();
        Self {
            version,
            violations,
            index,
        }
    }

    /// Load a baseline; a missing file is no baseline
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "no baseline file");
            return Ok(None);
        }
        let contents = fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        let parsed: Baseline = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), entries = parsed.violations.len(), "baseline loaded");
        Ok(Some(Self::with_entries(parsed.version, parsed.violations)))
    }

    /// Write the baseline as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| ScanError::io(path, e))
    }

    /// Whether `violation` is grandfathered
    pub fn contains(&self, violation: &Violation) -> bool {
        self.index.contains(&BaselineEntry::of(violation))
    }

    /// Number of accepted violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether nothing is accepted
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// First 16 hex digits of SHA-256 over `file:rule:line:context`
pub fn fingerprint(violation: &Violation) -> String {
    let mut hasher = Sha256::new();
    hasher.update(violation.file.as_bytes());
    hasher.update(b":");
    hasher.update(violation.rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(violation.line.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(violation.context.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(16);
    digest
}
