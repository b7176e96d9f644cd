//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::load_input;
use crate::output::Formatter;
use warrant_pipeline::derive_signals;
use warrant_tuner::{TuneRequest, Tuner, TuningResult};

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let tuning = classify(&args, config)?;
    println!("{}", formatter.format_tuning(&tuning)?);
    Ok(())
}

/// Signals, classes and parameters of an input, without running the stages
fn classify(args: &ClassifyArgs, config: &Config) -> Result<TuningResult> {
    let input = load_input(&args.input)?;
    input.validate()?;

    let signals = derive_signals(&input);
    let tuner = Tuner::new(config.overrides.merge(&input.overrides));
    Ok(tuner.tune(&TuneRequest {
        objective: input.objective.clone(),
        deliverable: input.deliverable.clone().unwrap_or_default(),
        risk: signals.risk,
        complexity: signals.complexity,
        has_important_claims: signals.has_important_claims,
    }))
}
