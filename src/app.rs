//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the requested pipeline
//! - prints reports/plots
//! - writes optional charts and exports

use clap::Parser;

use crate::cli::{Command, DecomposeArgs, DemoArgs, FitArgs, OutputArgs, SampleArgs, SweepArgs};
use crate::domain::{DemoConfig, ModelKind, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

use pipeline::DemoOutput;

/// Entry point for the `bv` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry BV_SEED and RUST_LOG; it is optional.
    dotenvy::dotenv().ok();
    env_logger::init();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Demo(args) => handle_demo(args),
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Decompose(args) => handle_decompose(args),
    }
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = DemoConfig {
        degree: args.degree,
        overfit_degree: args.overfit_degree,
        max_degree: args.max_degree,
        replicates: args.replicates,
        grid_points: args.grid_points,
        ..base_config(&args.sample, &args.output)
    };
    let output = pipeline::run_demo(&config)?;
    present(&config, &output)
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = base_config(&args.sample, &args.output);
    let kind = args.model.to_kind(args.degree);
    let output = pipeline::run_fit(&config, kind)?;
    present(&config, &output)
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = DemoConfig {
        max_degree: args.max_degree,
        ..base_config(&args.sample, &args.output)
    };
    let output = pipeline::run_sweep(&config)?;
    present(&config, &output)
}

fn handle_decompose(args: DecomposeArgs) -> Result<(), AppError> {
    if args.degrees.is_empty() {
        return Err(AppError::usage("At least one degree is required."));
    }
    let config = DemoConfig {
        replicates: args.replicates,
        grid_points: args.grid_points,
        ..base_config(&args.sample, &args.output)
    };
    let kinds: Vec<ModelKind> = args.degrees.iter().map(|&d| ModelKind::from_degree(d)).collect();
    let output = pipeline::run_decompose(&config, &kinds)?;
    present(&config, &output)
}

/// Print every available section, then write charts and exports.
fn present(config: &DemoConfig, output: &DemoOutput) -> Result<(), AppError> {
    println!("{}", crate::report::format_run_header(config));

    for step in &output.steps {
        println!("{}", crate::report::format_step(step));
        if config.plot {
            let plot = crate::plot::render_step_plot(
                step,
                config.sample.function,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    if let Some(sweep) = &output.sweep {
        println!("{}", crate::report::format_sweep(sweep));
    }
    if !output.decomposition.is_empty() {
        println!("{}", crate::report::format_decomposition(&output.decomposition));
    }

    if let Some(dir) = &config.charts_dir {
        for (i, step) in output.steps.iter().enumerate() {
            crate::plot::write_step_svg(dir, i, step, config.sample.function)?;
        }
    }
    if let Some(path) = &config.export_summary {
        crate::io::write_summary_json(path, config, output)?;
    }
    if let Some(path) = &config.export_tables {
        crate::io::write_tables_csv(path, &output.steps)?;
    }

    Ok(())
}

/// Build the shared part of the run configuration from CLI flags.
pub fn base_config(sample: &SampleArgs, output: &OutputArgs) -> DemoConfig {
    DemoConfig {
        sample: SampleConfig {
            function: sample.function,
            layout: sample.layout,
            n_points: sample.n_points,
            noise_sd: sample.noise,
            x_min: sample.x_min,
            x_max: sample.x_max,
            seed: sample.seed,
        },
        plot: !output.no_plot,
        plot_width: output.width,
        plot_height: output.height,
        charts_dir: output.charts.clone(),
        export_summary: output.export.clone(),
        export_tables: output.export_tables.clone(),
        ..DemoConfig::default()
    }
}

/// Rewrite argv so `bv` defaults to `bv demo`.
///
/// Rules:
/// - `bv`                      -> `bv demo`
/// - `bv -n 50 ...`            -> `bv demo -n 50 ...`
/// - `bv --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("demo".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "demo" | "fit" | "sweep" | "decompose");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "demo".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_demo() {
        assert_eq!(rewrite_args(args(&["bv"])), args(&["bv", "demo"]));
        assert_eq!(
            rewrite_args(args(&["bv", "-n", "40"])),
            args(&["bv", "demo", "-n", "40"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["bv", "sweep"])), args(&["bv", "sweep"]));
        assert_eq!(rewrite_args(args(&["bv", "--help"])), args(&["bv", "--help"]));
    }

    #[test]
    fn base_config_maps_sample_flags() {
        let cli = crate::cli::Cli::parse_from(args(&[
            "bv", "fit", "--noise", "0.5", "--layout", "grid", "--no-plot", "--seed", "9",
        ]));
        let Command::Fit(fit) = cli.command else {
            panic!("expected fit");
        };
        let config = base_config(&fit.sample, &fit.output);
        assert_eq!(config.sample.noise_sd, 0.5);
        assert_eq!(config.sample.layout, crate::domain::XLayout::Grid);
        assert_eq!(config.sample.seed, 9);
        assert!(!config.plot);
    }
}
