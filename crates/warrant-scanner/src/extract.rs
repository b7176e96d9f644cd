//! Claim ledger extraction from tagged documents
//!
//! Every inline `[USER]`, `[DED]`, `[HYP]` or `[UNKNOWN]` tag opens one
//! ledger entry. The entry's proof level, testability and status follow
//! from the tag and from whether the surrounding text is time-sensitive.

use crate::error::{Result, ScanError};
use crate::rules::TAG_PATTERN;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use warrant_domain::{ClaimStatus, ProofLevel, Testability};

/// Origin tag as written in a document
///
/// Documents may mark a claim `[UNKNOWN]`; the pipeline's own tags have no
/// such value, which is why this is not [`warrant_domain::OriginTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentTag {
    /// Reported by the user
    User,
    /// Deduced
    Ded,
    /// Hypothesis
    Hyp,
    /// Provenance not known
    Unknown,
}

impl DocumentTag {
    /// Get the tag name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentTag::User => "USER",
            DocumentTag::Ded => "DED",
            DocumentTag::Hyp => "HYP",
            DocumentTag::Unknown => "UNKNOWN",
        }
    }

    /// Parse a tag name, case-sensitively as it appears between brackets
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(DocumentTag::User),
            "DED" => Some(DocumentTag::Ded),
            "HYP" => Some(DocumentTag::Hyp),
            "UNKNOWN" => Some(DocumentTag::Unknown),
            _ => None,
        }
    }

    /// Evidence the tag stands for
    pub fn proof_level(&self, needs_source: bool) -> ProofLevel {
        match (self, needs_source) {
            (DocumentTag::User, _) => ProofLevel::S0,
            (DocumentTag::Hyp, _) => ProofLevel::S1,
            (DocumentTag::Ded, true) | (DocumentTag::Unknown, true) => ProofLevel::S2,
            (DocumentTag::Ded, false) => ProofLevel::S1,
            (DocumentTag::Unknown, false) => ProofLevel::S0,
        }
    }
}

impl fmt::Display for DocumentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown document tag: {}", s))
    }
}

/// One tagged claim found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// `CLAIM-<file>-<line>-<n>`, `n` counting claims within the file
    pub claim_id: String,
    /// Text around the tag
    pub claim: String,
    /// Tag as written
    pub tag: DocumentTag,
    /// Document the claim was found in
    pub file: String,
    /// 1-indexed line
    pub line: usize,
    /// Whether the text is time-sensitive and needs a dated source
    pub needs_source: bool,
    /// Evidence level implied by the tag
    pub proof_level: ProofLevel,
    /// Components the claim names as dependencies
    pub dependencies: Vec<String>,
    /// How decisively the claim can be checked
    pub testability: Testability,
    /// PASS once the proof level reaches S2
    pub test_status: ClaimStatus,
}

const RECENCY_MARKERS: &[&str] = &[
    "202", "latest", "current", "recent", "price", "cost", "law", "legal",
];

/// Characters kept before a tag
const CLAIM_LEAD: usize = 50;
/// Characters kept from a tag onward
const CLAIM_SPAN: usize = 100;

/// Compiled extraction patterns
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    tag: Regex,
    metric: Regex,
    dependency: Regex,
}

impl ClaimExtractor {
    /// Compile the extraction patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            tag: pattern(TAG_PATTERN)?,
            metric: pattern(r"\d+%|\d+ms|\d+\s*(seconds|minutes|hours|bytes|MB|GB)")?,
            dependency: pattern(r"(?i)\b(?:depends on|requires|uses) ([A-Za-z0-9-]+)")?,
        })
    }

    /// Ledger entries for every tag in `content`, in document order
    pub fn extract(&self, file: &str, content: &str) -> Vec<LedgerEntry> {
        let file_key: String = file
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let mut counter = 0;
        let mut entries = Vec::new();

        for (index, line) in content.lines().enumerate() {
            for caps in self.tag.captures_iter(line) {
                let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let Some(tag) = DocumentTag::parse(tag.as_str()) else {
                    continue;
                };
                counter += 1;

                let claim = excerpt(line, whole.start(), CLAIM_LEAD, CLAIM_SPAN, true);
                let needs_source = needs_source(&claim);
                let proof_level = tag.proof_level(needs_source);

                entries.push(LedgerEntry {
                    claim_id: format!("CLAIM-{}-{}-{}", file_key, index + 1, counter),
                    tag,
                    file: file.to_string(),
                    line: index + 1,
                    needs_source,
                    proof_level,
                    dependencies: self.dependencies(&claim),
                    testability: self.testability(tag, &claim),
                    test_status: if proof_level >= ProofLevel::S2 {
                        ClaimStatus::Pass
                    } else {
                        ClaimStatus::Untested
                    },
                    claim,
                });
            }
        }
        entries
    }

    fn testability(&self, tag: DocumentTag, text: &str) -> Testability {
        match tag {
            DocumentTag::Ded if self.metric.is_match(text) => Testability::T3,
            DocumentTag::Ded | DocumentTag::Hyp => Testability::T2,
            DocumentTag::User | DocumentTag::Unknown => Testability::T1,
        }
    }

    fn dependencies(&self, text: &str) -> Vec<String> {
        self.dependency
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn pattern(p: &str) -> Result<Regex> {
    Regex::new(p).map_err(|source| ScanError::InvalidPattern {
        rule: "claim-extraction".to_string(),
        source,
    })
}

fn needs_source(text: &str) -> bool {
    let lower = text.to_lowercase();
    RECENCY_MARKERS.iter().any(|m| lower.contains(m))
}

/// Slice of `line` from `before` characters ahead of byte offset `at` to
/// `span` characters after it, with `...` where the line was cut
pub(crate) fn excerpt(line: &str, at: usize, before: usize, span: usize, trim: bool) -> String {
    let bounds: Vec<usize> = line.char_indices().map(|(i, _)| i).collect();
    let pos = bounds.partition_point(|&b| b < at);
    let lo = pos.saturating_sub(before);
    let hi = (pos + span).min(bounds.len());
    let byte = |i: usize| bounds.get(i).copied().unwrap_or(line.len());

    let slice = &line[byte(lo)..byte(hi)];
    let slice = if trim { slice.trim() } else { slice };
    let mut text = String::with_capacity(slice.len() + 6);
    if lo > 0 {
        text.push_str("...");
    }
    text.push_str(slice);
    if hi < bounds.len() {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<LedgerEntry> {
        ClaimExtractor::new().unwrap().extract("docs/plan.md", content)
    }

    #[test]
    fn test_entry_per_tag() {
        let entries = extract(
            "# Plan\n\
             [USER] The export runs nightly.\n\
             [DED] Export uses postgres-replica and [HYP] load stays flat.\n",
        );
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].claim_id, "CLAIM-docs_plan_md-2-1");
        assert_eq!(entries[1].claim_id, "CLAIM-docs_plan_md-3-2");
        assert_eq!(entries[2].claim_id, "CLAIM-docs_plan_md-3-3");
        assert_eq!(entries[1].dependencies, vec!["postgres-replica"]);
        assert_eq!(entries[2].tag, DocumentTag::Hyp);
    }

    #[test]
    fn test_levels_by_tag() {
        let entries = extract(
            "[USER] Nightly export.\n\
             [DED] Export takes 40 seconds.\n\
             [DED] The current price is stable.\n\
             [UNKNOWN] Nobody reads the export.\n",
        );
        let levels: Vec<_> = entries
            .iter()
            .map(|e| (e.proof_level, e.testability, e.test_status))
            .collect();
        assert_eq!(
            levels,
            vec![
                (ProofLevel::S0, Testability::T1, ClaimStatus::Untested),
                (ProofLevel::S1, Testability::T3, ClaimStatus::Untested),
                (ProofLevel::S2, Testability::T2, ClaimStatus::Pass),
                (ProofLevel::S0, Testability::T1, ClaimStatus::Untested),
            ]
        );
        assert!(entries[2].needs_source);
        assert!(!entries[3].needs_source);
    }

    #[test]
    fn test_long_line_is_cut() {
        let line = format!("{}[HYP] {}", "a".repeat(80), "b".repeat(200));
        let entries = extract(&line);
        let claim = &entries[0].claim;
        assert!(claim.starts_with("..."));
        assert!(claim.ends_with("..."));
        assert_eq!(claim.chars().count(), 3 + CLAIM_LEAD + CLAIM_SPAN + 3);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let line = "éééé [DED] ça marche";
        let at = line.find('[').unwrap();
        assert_eq!(excerpt(line, at, 2, 5, false), "...é [DED]...");
    }

    #[test]
    fn test_document_tag_parse() {
        assert_eq!("UNKNOWN".parse::<DocumentTag>(), Ok(DocumentTag::Unknown));
        assert!("user".parse::<DocumentTag>().is_err());
    }
}
