//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};
use warrant_domain::{Profile, RiskClass, TerminationCode};
use warrant_pipeline::DeliverableRecord;
use warrant_scanner::{ScanReport, Severity};
use warrant_tuner::{ControlParameters, ShowMode, TuningResult};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the deliverable record of a run.
    pub fn format_record(&self, record: &DeliverableRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(record.to_json()?),
            OutputFormat::Markdown => Ok(self.record_markdown(record)),
            OutputFormat::Table => Ok(self.record_tables(record)),
        }
    }

    /// Format the classification of an input.
    pub fn format_tuning(&self, tuning: &TuningResult) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(tuning)?);
        }

        let triggers = if tuning.triggers.is_empty() {
            "none".to_string()
        } else {
            tuning
                .triggers
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let rows = vec![
            ("Risk class", tuning.risk_class.to_string()),
            (
                "Complexity",
                format!("{} (score {})", tuning.complexity_class, tuning.complexity_score),
            ),
            ("Deliverable", tuning.deliverable_type.to_string()),
            ("Profile", tuning.profile.to_string()),
            ("Triggers", triggers),
        ];

        let mut out = self.key_value_table(&rows);
        out.push_str("\n\n");
        out.push_str(&self.parameters_table(&tuning.parameters));
        for key in &tuning.ignored_overrides {
            out.push('\n');
            out.push_str(&self.warning(&format!("Ignored unknown override '{}'", key)));
        }
        Ok(out)
    }

    /// Format the control parameters of a profile.
    pub fn format_parameters(
        &self,
        profile: Profile,
        parameters: &ControlParameters,
    ) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(parameters)?);
        }
        Ok(format!(
            "{}\n{}",
            self.colorize(&format!("Profile {}", profile), "cyan"),
            self.parameters_table(parameters)
        ))
    }

    /// Format the report of a document scan.
    pub fn format_scan(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Markdown => Ok(self.scan_markdown(report)),
            OutputFormat::Table => Ok(self.scan_tables(report)),
        }
    }

    fn scan_markdown(&self, report: &ScanReport) -> String {
        let summary = &report.summary;
        let mut out = vec![
            format!("# Scan: {} file(s), {} mode", report.files_scanned, report.mode),
            String::new(),
            format!("**Result:** {}", self.scan_result(report)),
            format!(
                "**Errors:** {} | **Warnings:** {} | **Baselined:** {}",
                summary.errors, summary.warnings, report.baselined
            ),
        ];

        section(&mut out, "Violations");
        if report.violations.is_empty() {
            out.push("None.".to_string());
        } else {
            out.push(markdown(self.violations_table(report)));
        }

        section(&mut out, "Claim ledger");
        if report.claims.is_empty() {
            out.push("No tagged claims.".to_string());
        } else {
            out.push(markdown(self.ledger_table(report)));
        }

        section(&mut out, "Sensitivity");
        for factor in &report.sensitivity {
            out.push(format!("- **{}**: {} ({})", factor.factor, factor.impact, factor.test));
        }

        out.join("\n")
    }

    fn scan_tables(&self, report: &ScanReport) -> String {
        let summary = &report.summary;
        let risk = &summary.risk_distribution;
        let rows = vec![
            ("Result", self.scan_result(report)),
            ("Mode", report.mode.to_string()),
            ("Files", report.files_scanned.to_string()),
            ("Errors", summary.errors.to_string()),
            ("Warnings", summary.warnings.to_string()),
            ("Baselined", report.baselined.to_string()),
            (
                "Risk",
                format!(
                    "R0 {} / R1 {} / R2 {} / R3 {}",
                    risk.get(RiskClass::R0),
                    risk.get(RiskClass::R1),
                    risk.get(RiskClass::R2),
                    risk.get(RiskClass::R3)
                ),
            ),
            ("Claims", report.claims.len().to_string()),
        ];

        let mut out = vec![self.key_value_table(&rows)];
        if !report.violations.is_empty() {
            out.push(rounded(self.violations_table(report)));
        }
        if !report.claims.is_empty() {
            out.push(rounded(self.ledger_table(report)));
        }
        out.join("\n\n")
    }

    fn violations_table(&self, report: &ScanReport) -> Table {
        let mut builder = Builder::default();
        builder.push_record(["Location", "Rule", "Severity", "Risk", "Context"]);
        for v in &report.violations {
            let severity = match v.severity {
                Severity::Error => self.colorize(v.severity.as_str(), "red"),
                Severity::Warning => self.colorize(v.severity.as_str(), "yellow"),
            };
            builder.push_record([
                format!("{}:{}:{}", v.file, v.line, v.column),
                v.rule_id.clone(),
                severity,
                v.risk_class.to_string(),
                v.context.clone(),
            ]);
        }
        builder.build()
    }

    fn ledger_table(&self, report: &ScanReport) -> Table {
        let mut builder = Builder::default();
        builder.push_record(["ID", "Tag", "Proof", "Test", "Status", "Source", "Claim"]);
        for entry in &report.claims {
            builder.push_record([
                entry.claim_id.clone(),
                entry.tag.to_string(),
                entry.proof_level.to_string(),
                entry.testability.to_string(),
                entry.test_status.to_string(),
                if entry.needs_source { "needed" } else { "-" }.to_string(),
                entry.claim.clone(),
            ]);
        }
        builder.build()
    }

    fn scan_result(&self, report: &ScanReport) -> String {
        if report.passed() {
            self.colorize("PASSED", "green")
        } else {
            self.colorize("FAILED", "red")
        }
    }

    fn record_markdown(&self, record: &DeliverableRecord) -> String {
        let tuning = &record.tuning;
        let mut out = vec![
            format!("# Review: {}", record.objective),
            String::new(),
            format!("**Termination:** {}", self.termination(record.termination)),
            format!(
                "**Risk:** {} | **Complexity:** {} | **Deliverable:** {} | **Profile:** {}",
                record.risk_class, tuning.complexity_class, tuning.deliverable_type, tuning.profile
            ),
            format!("**Run:** {}", record.run_id),
        ];

        section(&mut out, "Facts");
        bullets(&mut out, &record.facts);

        section(&mut out, "Open questions");
        if record.open_questions.is_empty() {
            out.push("None.".to_string());
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Gap", "Field", "Priority", "Decision", "Test", "Impact"]);
            for gap in &record.open_questions {
                builder.push_record([
                    gap.id(),
                    gap.field.as_deref().unwrap_or("-"),
                    gap.priority.as_str(),
                    gap.closure.decision.as_str(),
                    gap.closure.test.as_str(),
                    gap.closure.impact.as_str(),
                ]);
            }
            out.push(markdown(builder.build()));
        }

        if !record.assumptions.is_empty() {
            section(&mut out, "Assumptions");
            bullets(&mut out, &record.assumptions);
        }

        if !record.drafted.is_empty() {
            section(&mut out, "Drafted fields");
            for draft in &record.drafted {
                out.push(format!("- `{}` ({}): {}", draft.field, draft.claim_id, draft.text));
            }
        }

        section(&mut out, "Options");
        if record.options.is_empty() {
            out.push("No options were explored.".to_string());
        } else {
            out.push(markdown(self.options_table(record)));
        }

        section(&mut out, "Recommendation");
        match (&record.recommendation, &record.fallback) {
            (Some(rec), fallback) => {
                out.push(format!("**{} {}** ({}/40)", rec.id, rec.name, rec.total()));
                if let Some(fallback) = fallback {
                    out.push(format!(
                        "Fallback: {} {} ({}/40)",
                        fallback.id,
                        fallback.name,
                        fallback.total()
                    ));
                }
            }
            (None, _) => out.push("No recommendation.".to_string()),
        }

        section(&mut out, "Claims");
        out.push(markdown(self.claims_table(record)));

        section(&mut out, "Validation");
        out.push("```text".to_string());
        out.push(record.validation.summary());
        out.push("```".to_string());
        if record.parameters.show == ShowMode::State {
            out.push(String::new());
            out.push(markdown(self.stages_table(record)));
            let all = findings(record);
            if !all.is_empty() {
                out.push(String::new());
                bullets(&mut out, &all);
            }
        }
        if !record.validation.stop_rules.is_empty() {
            out.push(String::new());
            bullets(&mut out, &record.validation.stop_rules);
        }

        section(&mut out, "Next step");
        out.push(record.next_step.to_string());

        section(&mut out, "Runbook");
        for (i, step) in record.runbook.iter().enumerate() {
            out.push(format!("{}. {}", i + 1, step));
        }

        out.join("\n")
    }

    fn record_tables(&self, record: &DeliverableRecord) -> String {
        let tuning = &record.tuning;
        let rows = vec![
            ("Termination", self.termination(record.termination)),
            ("Risk class", record.risk_class.to_string()),
            ("Complexity", tuning.complexity_class.to_string()),
            ("Profile", tuning.profile.to_string()),
            ("Open questions", record.open_questions.len().to_string()),
            (
                "Recommendation",
                record
                    .recommendation
                    .as_ref()
                    .map(|o| o.id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Fallback",
                record
                    .fallback
                    .as_ref()
                    .map(|o| o.id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Next step", record.next_step.to_string()),
        ];

        let mut out = vec![self.key_value_table(&rows)];
        if !record.options.is_empty() {
            out.push(rounded(self.options_table(record)));
        }
        out.push(rounded(self.stages_table(record)));
        out.join("\n\n")
    }

    fn options_table(&self, record: &DeliverableRecord) -> Table {
        let mut builder = Builder::default();
        builder.push_record(["Option", "Name", "Kind", "Total", "Strengths", "Weaknesses"]);
        for option in &record.options {
            builder.push_record([
                option.id.to_string(),
                option.name.clone(),
                option.kind.as_str().to_string(),
                option.total().to_string(),
                option.advantages.join(", "),
                option.disadvantages.join(", "),
            ]);
        }
        builder.build()
    }

    fn claims_table(&self, record: &DeliverableRecord) -> Table {
        let mut builder = Builder::default();
        builder.push_record(["ID", "Origin", "Proof", "Test", "Status", "Claim"]);
        for claim in record.claims.iter() {
            builder.push_record([
                claim.id.to_string(),
                claim.origin.to_string(),
                claim.proof_level.to_string(),
                claim.testability.to_string(),
                claim.status.to_string(),
                claim.text.clone(),
            ]);
        }
        builder.build()
    }

    fn stages_table(&self, record: &DeliverableRecord) -> Table {
        let mut builder = Builder::default();
        builder.push_record(["Stage", "Gate", "Issues", "Warnings", "Repairs", "Degraded"]);
        for stage in &record.validation.stages {
            let (gate, issues, warnings) = match stage.final_gate() {
                Some(g) if g.passed() => ("pass", g.issues().len(), g.warnings().len()),
                Some(g) => ("fail", g.issues().len(), g.warnings().len()),
                None => ("-", 0, 0),
            };
            let repairs = stage.repair.as_ref().map(|r| r.attempts).unwrap_or(0);
            builder.push_record([
                stage.stage.to_string(),
                gate.to_string(),
                issues.to_string(),
                warnings.to_string(),
                repairs.to_string(),
                if stage.degraded { "yes" } else { "no" }.to_string(),
            ]);
        }
        builder.build()
    }

    fn parameters_table(&self, params: &ControlParameters) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        let rows = vec![
            ("mode", params.mode.to_string()),
            ("budget", params.budget.to_string()),
            ("evidence", params.evidence.to_string()),
            ("divergence", params.divergence.to_string()),
            ("cross", on_off(params.cross)),
            ("pcx", on_off(params.pcx)),
            ("nest", on_off(params.nest)),
            ("auto_gov", on_off(params.auto_gov)),
            ("auto_tools", on_off(params.auto_tools)),
            ("auto_tune", on_off(params.auto_tune)),
            ("auto_correct", on_off(params.auto_correct)),
            ("repair_max", params.repair_max.to_string()),
            ("show", params.show.to_string()),
            ("as_code", params.as_code.to_string()),
            ("moderation", params.moderation.to_string()),
        ];
        self.key_value_table(&rows)
    }

    fn key_value_table(&self, rows: &[(&str, String)]) -> String {
        let mut builder = Builder::default();
        for (key, value) in rows {
            builder.push_record([key.to_string(), value.clone()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    fn termination(&self, code: TerminationCode) -> String {
        let color = match code {
            TerminationCode::Delivered => "green",
            TerminationCode::Partial => "yellow",
            TerminationCode::Protocol => "blue",
            TerminationCode::Refused => "red",
        };
        self.colorize(code.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn section(out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(format!("## {}", title));
    out.push(String::new());
}

fn bullets(out: &mut Vec<String>, items: &[String]) {
    if items.is_empty() {
        out.push("None.".to_string());
    }
    out.extend(items.iter().map(|item| format!("- {}", item)));
}

fn markdown(mut table: Table) -> String {
    table.with(Style::markdown());
    table.to_string()
}

fn rounded(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Every fatal issue and warning of the gated stages, prefixed by stage
fn findings(record: &DeliverableRecord) -> Vec<String> {
    record
        .validation
        .stages
        .iter()
        .filter_map(|s| s.final_gate().map(|g| (s.stage, g)))
        .flat_map(|(stage, gate)| {
            gate.issues()
                .iter()
                .map(move |f| format!("{} fatal: {}", stage, f))
                .chain(
                    gate.warnings()
                        .iter()
                        .map(move |f| format!("{} warning: {}", stage, f)),
                )
        })
        .collect()
}
