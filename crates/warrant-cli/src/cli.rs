//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use warrant_scanner::ScanMode;
use warrant_tuner::{
    AsCode, Budget, Divergence, EvidenceLevel, Mode, Moderation, ParameterOverrides, ShowMode,
};

/// Warrant - fail-closed review of a project description.
#[derive(Debug, Parser)]
#[command(name = "warrant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WARRANT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Markdown report (default)
    Markdown,
    /// JSON record
    Json,
    /// Tables
    Table,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full review on an input file
    Run(RunArgs),

    /// Classify an input without running the stages
    Classify(ClassifyArgs),

    /// Show the control parameters of a profile
    Params(ParamsArgs),

    /// Lint Markdown and YAML documents and extract their claim ledger
    Scan(ScanArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Input file (.toml or .json)
    pub input: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Parameter overrides given on the command line.
///
/// These win over the input's `[overrides]` and the config file.
#[derive(Debug, Default, clap::Args)]
pub struct OverrideArgs {
    /// Run depth (light, max, maxcap, projet)
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Time budget (short, medium, long)
    #[arg(long)]
    pub budget: Option<Budget>,

    /// Evidence demanded (low, mid, high)
    #[arg(long)]
    pub evidence: Option<EvidenceLevel>,

    /// Alternatives explored (low, mid, high)
    #[arg(long)]
    pub divergence: Option<Divergence>,

    /// Repair attempts per stage
    #[arg(long)]
    pub repair_max: Option<u32>,

    /// Record exposure (off, state)
    #[arg(long)]
    pub show: Option<ShowMode>,

    /// Code artefacts (off, on, auto)
    #[arg(long)]
    pub as_code: Option<AsCode>,

    /// Moderation (strict, off)
    #[arg(long)]
    pub moderation: Option<Moderation>,

    /// Do not run the repair loop
    #[arg(long)]
    pub no_auto_correct: bool,

    /// Do not call the evidence collaborator
    #[arg(long)]
    pub no_auto_tools: bool,

    /// Use the baseline parameters instead of the profile table
    #[arg(long)]
    pub no_auto_tune: bool,
}

impl OverrideArgs {
    /// Convert to parameter overrides; unset flags stay unset
    pub fn to_overrides(&self) -> ParameterOverrides {
        let off = |flag: bool| flag.then_some(false);
        ParameterOverrides {
            mode: self.mode,
            budget: self.budget,
            evidence: self.evidence,
            divergence: self.divergence,
            repair_max: self.repair_max,
            show: self.show,
            as_code: self.as_code,
            moderation: self.moderation,
            auto_correct: off(self.no_auto_correct),
            auto_tools: off(self.no_auto_tools),
            auto_tune: off(self.no_auto_tune),
            ..ParameterOverrides::default()
        }
    }
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Input file (.toml or .json)
    pub input: PathBuf,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Scan depth (light, max)
    #[arg(long)]
    pub mode: Option<ScanMode>,

    /// Suppress violations recorded in a baseline file (default from config)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub baseline: Option<Option<PathBuf>>,

    /// Record every current violation in the baseline file instead of reporting
    #[arg(long)]
    pub create_baseline: bool,

    /// Extra rules (TOML), merged over the built-in ones
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ScanArgs {
    /// Baseline file named on the command line, if any
    pub fn baseline_file(&self) -> Option<&PathBuf> {
        self.baseline.as_ref().and_then(Option::as_ref)
    }
}

/// Arguments for the params command.
#[derive(Debug, Parser)]
pub struct ParamsArgs {
    /// Profile (simple, standard, complex, projet)
    pub profile: String,

    /// Treat the input as carrying important claims
    #[arg(long)]
    pub important: bool,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Markdown => crate::config::OutputFormat::Markdown,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}
