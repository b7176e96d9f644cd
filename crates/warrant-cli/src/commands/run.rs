//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::load_input;
use crate::output::Formatter;
use std::fs;
use tracing::info;
use warrant_domain::TerminationCode;
use warrant_pipeline::Pipeline;

/// Execute the run command.
///
/// Flag overrides are folded into the input's own overrides so that they
/// take precedence over both the input and the config file.
pub fn execute_run(
    args: RunArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<TerminationCode> {
    let mut input = load_input(&args.input)?;
    input.overrides = input.overrides.merge(&args.overrides.to_overrides());

    let record = Pipeline::new(config.pipeline_config()).run(input)?;
    info!(
        run_id = %record.run_id,
        termination = %record.termination,
        "review finished"
    );

    let rendered = formatter.format_record(&record)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "{} written to {}",
                    record.termination,
                    path.display()
                ))
            );
        }
        None => println!("{}", rendered),
    }

    Ok(record.termination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OverrideArgs;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_run_writes_report() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("project.toml");
        fs::write(
            &input,
            "objective = \"Do something illegal\"\n[signals.risk]\nillegal = true\n",
        )
        .unwrap();
        let output = dir.path().join("report.json");

        let args = RunArgs {
            input,
            output: Some(output.clone()),
            overrides: OverrideArgs::default(),
        };
        let formatter = Formatter::new(OutputFormat::Json, false);
        let code = execute_run(args, &Config::default(), &formatter).unwrap();

        assert_eq!(code, TerminationCode::Refused);
        let report = fs::read_to_string(output).unwrap();
        assert!(report.contains("\"termination\": \"REFUSED\""));
    }

    #[test]
    fn test_flags_beat_input_overrides() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("project.toml");
        fs::write(
            &input,
            "objective = \"Write an onboarding guide\"\n[overrides]\ndivergence = \"high\"\n",
        )
        .unwrap();
        let output = dir.path().join("report.json");

        let args = RunArgs {
            input,
            output: Some(output.clone()),
            overrides: OverrideArgs {
                divergence: Some(warrant_tuner::Divergence::Low),
                ..OverrideArgs::default()
            },
        };
        let formatter = Formatter::new(OutputFormat::Json, false);
        execute_run(args, &Config::default(), &formatter).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(report["parameters"]["divergence"], "low");
        assert_eq!(report["options"].as_array().unwrap().len(), 2);
    }
}
