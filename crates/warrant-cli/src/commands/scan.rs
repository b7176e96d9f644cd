//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use tracing::{info, warn};
use warrant_scanner::{Baseline, RuleSet, Scanner};

/// Execute the scan command.
///
/// Returns whether the scan passed. With `--create-baseline` the current
/// violations are written to the baseline file and the scan counts as
/// passed.
pub fn execute_scan(args: ScanArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let settings = &config.scan;
    let mode = args.mode.unwrap_or(settings.mode);
    let rules = match args.rules.as_ref().or(settings.rules.as_ref()) {
        Some(path) => RuleSet::with_file(path)?,
        None => RuleSet::builtin()?,
    };
    let baseline_path = args
        .baseline_file()
        .cloned()
        .unwrap_or_else(|| settings.baseline.clone());
    let mut scanner = Scanner::new(rules)?;

    if args.create_baseline {
        let report = scanner.scan_paths(&args.paths, mode)?;
        Baseline::from_violations(&report.violations).save(&baseline_path)?;
        info!(
            path = %baseline_path.display(),
            violations = report.violations.len(),
            "baseline written"
        );
        println!(
            "{}",
            formatter.success(&format!(
                "Baseline of {} violation(s) written to {}",
                report.violations.len(),
                baseline_path.display()
            ))
        );
        return Ok(true);
    }

    if args.baseline.is_some() {
        match Baseline::load(&baseline_path)? {
            Some(baseline) => scanner = scanner.with_baseline(baseline),
            None => warn!(path = %baseline_path.display(), "baseline file not found"),
        }
    }

    let report = scanner.scan_paths(&args.paths, mode)?;
    let rendered = formatter.format_scan(&report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            let message = format!("Scan report written to {}", path.display());
            if report.passed() {
                println!("{}", formatter.success(&message));
            } else {
                println!("{}", formatter.warning(&message));
            }
        }
        None => println!("{}", rendered),
    }

    Ok(report.passed())
}
