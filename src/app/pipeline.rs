//! Shared demonstration pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! draw samples -> fit -> score on training and holdout -> sweep -> decompose
//!
//! The CLI front-end can then focus on presentation (printing, charts, exports).

use serde::{Deserialize, Serialize};

use crate::data::{HOLDOUT_STREAM, TRAIN_STREAM, generate_sample};
use crate::domain::{DemoConfig, DemoStep, ModelKind, Sample};
use crate::error::AppError;
use crate::fit::{Decomposition, DegreeSweep, decompose, degree_sweep, evaluate, fit_with_quality};
use crate::report::build_table;

/// All computed outputs of a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoOutput {
    pub train: Sample,
    pub holdout: Sample,
    pub steps: Vec<DemoStep>,
    pub sweep: Option<DegreeSweep>,
    pub decomposition: Vec<Decomposition>,
}

/// Run the full demonstration sequence.
///
/// 1. draw the training and holdout samples
/// 2. mean-only fit
/// 3. linear fit
/// 4. polynomial fit of `config.degree`
/// 5. polynomial fit of `config.overfit_degree`
/// 6. degree sweep up to `config.max_degree`
/// 7. bias/variance decomposition when `config.replicates > 0`
pub fn run_demo(config: &DemoConfig) -> Result<DemoOutput, AppError> {
    let (train, holdout) = draw_samples(config)?;

    let plan = [
        ("Mean-only model".to_string(), ModelKind::Mean),
        ("Linear model".to_string(), ModelKind::Linear),
        (
            format!("Polynomial of degree {}", config.degree),
            ModelKind::from_degree(config.degree),
        ),
        (
            format!("Polynomial of degree {} (overfit)", config.overfit_degree),
            ModelKind::from_degree(config.overfit_degree),
        ),
    ];

    let mut steps = Vec::with_capacity(plan.len());
    for (title, kind) in plan {
        steps.push(build_step(title, kind, &train, &holdout)?);
    }

    log::info!("sweeping degrees 0..={}", config.max_degree);
    let sweep = degree_sweep(&train, &holdout, config.max_degree)?;

    let decomposition = if config.replicates > 0 {
        decompose(
            &config.sample,
            &decomposition_kinds(config),
            config.replicates,
            config.grid_points,
        )?
    } else {
        Vec::new()
    };

    Ok(DemoOutput {
        train,
        holdout,
        steps,
        sweep: Some(sweep),
        decomposition,
    })
}

/// Fit a single model kind and score it on both samples.
pub fn run_fit(config: &DemoConfig, kind: ModelKind) -> Result<DemoOutput, AppError> {
    let (train, holdout) = draw_samples(config)?;
    let step = build_step(kind.display_name(), kind, &train, &holdout)?;
    Ok(DemoOutput {
        train,
        holdout,
        steps: vec![step],
        sweep: None,
        decomposition: Vec::new(),
    })
}

/// Sweep degrees `0..=config.max_degree`.
pub fn run_sweep(config: &DemoConfig) -> Result<DemoOutput, AppError> {
    let (train, holdout) = draw_samples(config)?;
    let sweep = degree_sweep(&train, &holdout, config.max_degree)?;
    Ok(DemoOutput {
        train,
        holdout,
        steps: Vec::new(),
        sweep: Some(sweep),
        decomposition: Vec::new(),
    })
}

/// Decompose the expected error of each of `kinds` over replicate samples.
pub fn run_decompose(config: &DemoConfig, kinds: &[ModelKind]) -> Result<DemoOutput, AppError> {
    let (train, holdout) = draw_samples(config)?;
    let decomposition = decompose(&config.sample, kinds, config.replicates, config.grid_points)?;
    Ok(DemoOutput {
        train,
        holdout,
        steps: Vec::new(),
        sweep: None,
        decomposition,
    })
}

fn draw_samples(config: &DemoConfig) -> Result<(Sample, Sample), AppError> {
    let train = generate_sample(&config.sample, TRAIN_STREAM)?;
    let holdout = generate_sample(&config.sample, HOLDOUT_STREAM)?;
    log::info!(
        "drew training and holdout samples (n={}, seed={})",
        train.len(),
        config.sample.seed
    );
    Ok((train, holdout))
}

fn build_step(title: String, kind: ModelKind, train: &Sample, holdout: &Sample) -> Result<DemoStep, AppError> {
    let fit = fit_with_quality(kind, &train.x, &train.y_obs)?;
    let holdout_quality = evaluate(&fit.model, &holdout.x, &holdout.y_obs)?;
    log::info!(
        "{title}: train rss={:.4} holdout rss={:.4}",
        fit.quality.rss,
        holdout_quality.rss
    );

    let train_table = build_table(train, &fit.model)?;
    let holdout_table = build_table(holdout, &fit.model)?;

    Ok(DemoStep {
        title,
        fit,
        train: train_table,
        holdout: holdout_table,
        holdout_quality,
    })
}

fn decomposition_kinds(config: &DemoConfig) -> Vec<ModelKind> {
    let mut kinds = vec![
        ModelKind::Mean,
        ModelKind::Linear,
        ModelKind::from_degree(config.degree),
        ModelKind::from_degree(config.overfit_degree),
    ];
    kinds.sort_by_key(|k| k.degree());
    kinds.dedup();
    kinds
}
