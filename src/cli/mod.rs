//! Command-line parsing for the bias/variance demonstrations.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! sampling/fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelChoice, TrueFunction, XLayout};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bv", version, about = "Model bias & variance demonstrations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run every demonstration step in order (default).
    Demo(DemoArgs),
    /// Fit a single model to the training sample and score it on the holdout sample.
    Fit(FitArgs),
    /// Fit every polynomial degree up to a maximum and compare training vs holdout RSS.
    Sweep(SweepArgs),
    /// Estimate bias², variance and noise over many replicate samples.
    Decompose(DecomposeArgs),
}

/// Options describing how samples are drawn.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// True function the data is drawn around.
    #[arg(short = 'f', long, value_enum, default_value_t = TrueFunction::Sine)]
    pub function: TrueFunction,

    /// Layout of x across the range.
    #[arg(long, value_enum, default_value_t = XLayout::Uniform)]
    pub layout: XLayout,

    /// Number of observations per sample.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub n_points: usize,

    /// Standard deviation of the Gaussian noise.
    #[arg(long, default_value_t = 0.3)]
    pub noise: f64,

    /// Lower end of the x range.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Upper end of the x range.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Random seed (every sample stream is derived from it).
    #[arg(long, env = "BV_SEED", default_value_t = 42)]
    pub seed: u64,
}

/// Options controlling terminal plots, chart files and exports.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 18)]
    pub height: usize,

    /// Write one SVG chart per step into this directory.
    #[arg(long, value_name = "DIR")]
    pub charts: Option<PathBuf>,

    /// Export the run (config, samples, fits, sweep, decomposition) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export every step's observed/true/predicted rows to CSV.
    #[arg(long = "export-tables", value_name = "CSV")]
    pub export_tables: Option<PathBuf>,
}

/// Options for the full demonstration.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Degree of the well-chosen polynomial step.
    #[arg(long, default_value_t = 3)]
    pub degree: usize,

    /// Degree of the overfitting step.
    #[arg(long, default_value_t = 15)]
    pub overfit_degree: usize,

    /// Highest degree in the sweep.
    #[arg(long, default_value_t = 15)]
    pub max_degree: usize,

    /// Replicate samples for the decomposition (0 disables it).
    #[arg(long, default_value_t = 200)]
    pub replicates: usize,

    /// Evaluation grid size for the decomposition.
    #[arg(long, default_value_t = 101)]
    pub grid_points: usize,
}

/// Options for fitting a single model.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Model family to fit.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelChoice::Poly)]
    pub model: ModelChoice,

    /// Polynomial degree (used with `--model poly`).
    #[arg(short = 'd', long, default_value_t = 3)]
    pub degree: usize,
}

/// Options for the degree sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Highest degree in the sweep.
    #[arg(long, default_value_t = 15)]
    pub max_degree: usize,
}

/// Options for the bias/variance decomposition.
#[derive(Debug, Args, Clone)]
pub struct DecomposeArgs {
    #[command(flatten)]
    pub sample: SampleArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Polynomial degrees to decompose (0 = mean-only).
    #[arg(long, value_delimiter = ',', default_values_t = [0usize, 1, 3, 9])]
    pub degrees: Vec<usize>,

    /// Number of replicate samples.
    #[arg(long, default_value_t = 200)]
    pub replicates: usize,

    /// Evaluation grid size.
    #[arg(long, default_value_t = 101)]
    pub grid_points: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_shared_options() {
        let cli = Cli::parse_from(["bv", "fit", "-m", "linear", "-n", "50", "--seed", "7", "--no-plot"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.model, ModelChoice::Linear);
        assert_eq!(args.sample.n_points, 50);
        assert_eq!(args.sample.seed, 7);
        assert!(args.output.no_plot);
    }

    #[test]
    fn parses_degree_list() {
        let cli = Cli::parse_from(["bv", "decompose", "--degrees", "0,2,12", "--x-min", "-1"]);
        let Command::Decompose(args) = cli.command else {
            panic!("expected decompose");
        };
        assert_eq!(args.degrees, vec![0, 2, 12]);
        assert_eq!(args.sample.x_min, -1.0);
    }
}
