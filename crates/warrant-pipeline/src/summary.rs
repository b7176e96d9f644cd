//! Validation summary of a run

use crate::record::{StageRecord, TriggerRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use warrant_domain::Stage;

/// Per-stage gate and repair results, collected over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Stage records in execution order
    pub stages: Vec<StageRecord>,
    /// Active review modules chosen at COMPILE
    pub active_modules: Vec<String>,
    /// Trigger outcomes from COMPILE
    pub triggers: Vec<TriggerRecord>,
    /// Stop rules from COMPILE
    pub stop_rules: Vec<String>,
}

impl ValidationSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage record
    pub fn record(&mut self, record: StageRecord) {
        self.stages.push(record);
    }

    /// Record of a stage, if it ran
    pub fn stage(&self, stage: Stage) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Stages that ended with fatal issues
    pub fn degraded_stages(&self) -> Vec<Stage> {
        self.stages
            .iter()
            .filter(|r| r.degraded)
            .map(|r| r.stage)
            .collect()
    }

    /// Whether any repair loop made an attempt
    pub fn repair_fired(&self) -> bool {
        self.stages.iter().any(StageRecord::repair_fired)
    }

    /// Repair attempts per stage
    pub fn repair_attempts(&self) -> BTreeMap<Stage, u32> {
        self.stages
            .iter()
            .filter_map(|r| r.repair.as_ref().map(|o| (r.stage, o.attempts)))
            .collect()
    }

    /// Total repair attempts across stages
    pub fn total_repair_attempts(&self) -> u32 {
        self.repair_attempts().values().sum()
    }

    /// Fatal issues left in final gates
    pub fn total_issues(&self) -> usize {
        self.stages
            .iter()
            .filter_map(StageRecord::final_gate)
            .map(|g| g.issues().len())
            .sum()
    }

    /// Warnings left in final gates
    pub fn total_warnings(&self) -> usize {
        self.stages
            .iter()
            .filter_map(StageRecord::final_gate)
            .map(|g| g.warnings().len())
            .sum()
    }

    /// Whether the final gate of `stage` failed
    pub fn gate_failed(&self, stage: Stage) -> bool {
        self.stage(stage)
            .and_then(StageRecord::final_gate)
            .is_some_and(|g| !g.passed())
    }

    /// Triggers that fired without evidence
    pub fn unsupported_triggers(&self) -> impl Iterator<Item = &TriggerRecord> {
        self.triggers
            .iter()
            .filter(|t| t.fired && !t.evidence_supplied)
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Validation Summary".to_string(),
            "==================".to_string(),
            format!("Stages run: {}", self.stages.len()),
            format!("Fatal issues: {}", self.total_issues()),
            format!("Warnings: {}", self.total_warnings()),
            format!("Repair attempts: {}", self.total_repair_attempts()),
        ];

        let degraded = self.degraded_stages();
        if degraded.is_empty() {
            lines.push("Degraded stages: none".to_string());
        } else {
            lines.push(format!(
                "Degraded stages: {}",
                degraded
                    .iter()
                    .map(Stage::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warrant_domain::ClaimId;
    use warrant_gatekeeper::{Finding, GateResult};

    fn create_test_record(stage: Stage, issues: Vec<Finding>) -> StageRecord {
        let gate = GateResult::new(stage, issues, Vec::new());
        StageRecord {
            stage,
            degraded: !gate.passed(),
            degradation_reason: None,
            gate: Some(gate),
            repair: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = ValidationSummary::new();
        assert_eq!(summary.total_issues(), 0);
        assert!(summary.degraded_stages().is_empty());
        assert!(!summary.repair_fired());
        assert!(summary.summary().contains("Degraded stages: none"));
    }

    #[test]
    fn test_gate_failed() {
        let mut summary = ValidationSummary::new();
        summary.record(create_test_record(Stage::Lint, Vec::new()));
        summary.record(create_test_record(
            Stage::Stress,
            vec![Finding::missing_gap_closure(&ClaimId::new("C-001"))],
        ));

        assert!(!summary.gate_failed(Stage::Lint));
        assert!(summary.gate_failed(Stage::Stress));
        assert!(!summary.gate_failed(Stage::Commit));
        assert_eq!(summary.degraded_stages(), vec![Stage::Stress]);
        assert_eq!(summary.total_issues(), 1);
        assert!(summary.summary().contains("Degraded stages: STRESS"));
    }
}
