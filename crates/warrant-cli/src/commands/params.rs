//! Params command implementation.

use crate::cli::ParamsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use warrant_domain::Profile;
use warrant_tuner::ControlParameters;

/// Execute the params command.
pub fn execute_params(args: ParamsArgs, formatter: &Formatter) -> Result<()> {
    let profile = Profile::parse(&args.profile).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown profile '{}' (expected simple, standard, complex or projet)",
            args.profile
        ))
    })?;
    let params = ControlParameters::for_profile(profile, args.important);
    println!("{}", formatter.format_parameters(profile, &params)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_unknown_profile() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = ParamsArgs {
            profile: "enormous".to_string(),
            important: false,
        };
        assert!(matches!(
            execute_params(args, &formatter),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_known_profile() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = ParamsArgs {
            profile: "Standard".to_string(),
            important: true,
        };
        assert!(execute_params(args, &formatter).is_ok());
    }
}
