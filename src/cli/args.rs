//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::config::{AnalysisConfig, InputWarning, RawParameters, RawValue};

#[derive(Parser, Debug)]
#[command(
    name = "faultkit",
    version,
    about = "Predict slip on randomly oriented fault planes from a principal stress tensor",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v warnings, -vv info, -vvv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table on a terminal, CSV when piped
    #[default]
    Auto,
    Table,
    Csv,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample fault planes and classify their predicted slip
    Analyze(AnalyzeArgs),

    /// Show the principal axes and the stress tensor
    Tensor(TensorArgs),

    /// Resolve the stress tensor on a single plane
    Plane(PlaneArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Stress state shared by all commands
///
/// Values are taken as text so that malformed numbers fall back to their
/// defaults instead of aborting the run.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StressArgs {
    /// σ1 azimuth (degrees clockwise from North) [default: 45]
    #[arg(long, env = "FAULTKIT_SIGMA1_AZIMUTH", value_name = "DEG", allow_hyphen_values = true)]
    pub sigma1_azimuth: Option<String>,

    /// σ1 dip (degrees below horizontal) [default: 30]
    #[arg(long, env = "FAULTKIT_SIGMA1_DIP", value_name = "DEG", allow_hyphen_values = true)]
    pub sigma1_dip: Option<String>,

    /// σ3 azimuth (degrees clockwise from North) [default: 315]
    #[arg(long, env = "FAULTKIT_SIGMA3_AZIMUTH", value_name = "DEG", allow_hyphen_values = true)]
    pub sigma3_azimuth: Option<String>,

    /// σ3 dip (degrees below horizontal) [default: 0]
    #[arg(long, env = "FAULTKIT_SIGMA3_DIP", value_name = "DEG", allow_hyphen_values = true)]
    pub sigma3_dip: Option<String>,

    /// Stress ratio R = (σ1 - σ2) / (σ1 - σ3), clamped to [0, 1] [default: 0.5]
    #[arg(long, short = 'r', env = "FAULTKIT_RATIO", allow_hyphen_values = true)]
    pub ratio: Option<String>,

    /// Dips below this many degrees count as horizontal [default: 1e-6]
    #[arg(long, value_name = "DEG")]
    pub andersonian_tolerance: Option<String>,

    /// YAML file with default parameters (flags override it)
    #[arg(long, short = 'c', env = "FAULTKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl StressArgs {
    /// Parameters given on the command line
    pub fn raw_parameters(&self) -> RawParameters {
        let text = |v: &Option<String>| v.as_deref().map(RawValue::from);
        RawParameters {
            sigma1_azimuth: text(&self.sigma1_azimuth),
            sigma1_dip: text(&self.sigma1_dip),
            sigma3_azimuth: text(&self.sigma3_azimuth),
            sigma3_dip: text(&self.sigma3_dip),
            stress_ratio: text(&self.ratio),
            andersonian_tolerance: text(&self.andersonian_tolerance),
            ..Default::default()
        }
    }

    /// Config file values overlaid with command-line values
    pub fn collect(&self, overrides: RawParameters) -> Result<RawParameters> {
        let file = match &self.config {
            Some(path) => RawParameters::load(path).into_diagnostic()?,
            None => RawParameters::default(),
        };
        Ok(file.merge(self.raw_parameters()).merge(overrides))
    }

    /// Resolve into a validated config
    pub fn resolve(&self) -> Result<(AnalysisConfig, Vec<InputWarning>)> {
        Ok(self.collect(RawParameters::default())?.resolve())
    }
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub stress: StressArgs,

    /// Number of fault planes to sample [default: 50]
    #[arg(long, short = 'n', env = "FAULTKIT_COUNT", allow_hyphen_values = true)]
    pub count: Option<String>,

    /// Random seed for reproducible sampling [default: 42]
    #[arg(long, env = "FAULTKIT_SEED", conflicts_with = "unseeded", allow_hyphen_values = true)]
    pub seed: Option<String>,

    /// Draw the seed from OS entropy
    #[arg(long)]
    pub unseeded: bool,

    /// Write all records to a CSV file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Rows shown in table output (0 shows all)
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

impl AnalyzeArgs {
    pub fn resolve(&self) -> Result<(AnalysisConfig, Vec<InputWarning>)> {
        let overrides = RawParameters {
            fault_count: self.count.as_deref().map(RawValue::from),
            seed: self.seed.as_deref().map(RawValue::from),
            ..Default::default()
        };
        let (mut config, warnings) = self.stress.collect(overrides)?.resolve();
        if self.unseeded {
            config.seed = None;
        }
        Ok((config, warnings))
    }
}

#[derive(clap::Args, Debug)]
pub struct TensorArgs {
    #[command(flatten)]
    pub stress: StressArgs,
}

#[derive(clap::Args, Debug)]
pub struct PlaneArgs {
    #[command(flatten)]
    pub stress: StressArgs,

    /// Strike azimuth of the plane (degrees); the plane dips towards azimuth - 90
    #[arg(long, short = 'a', allow_hyphen_values = true)]
    pub azimuth: f64,

    /// Dip of the plane (degrees, 0 horizontal to 90 vertical)
    #[arg(long, short = 'd')]
    pub dip: f64,
}

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
