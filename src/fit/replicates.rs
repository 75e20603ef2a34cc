//! Bias/variance decomposition over replicate samples.
//!
//! Each model kind is fit on many independent samples of the same true
//! function. On an evaluation grid `g_1..g_m`:
//!
//! ```text
//! bias²    = mean_j ( E_r[ŷ_r(g_j)] - f(g_j) )²
//! variance = mean_j   E_r[ (ŷ_r(g_j) - E_r[ŷ_r(g_j)])² ]
//! expected squared error on a fresh observation = bias² + variance + σ²
//! ```
//!
//! Replicates are drawn and fit in parallel; each one owns its random stream
//! and results are reduced in replicate order, so output is deterministic.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{generate_sample, linspace, REPLICATE_STREAM_BASE};
use crate::domain::{ModelKind, Sample, SampleConfig};
use crate::error::AppError;
use crate::fit::fitter::fit_model;
use crate::models::predict_all;

/// Decomposition result for one model kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    pub kind: ModelKind,
    pub replicates: usize,
    pub bias_sq: f64,
    pub variance: f64,
    pub noise: f64,
    pub expected_mse: f64,
    /// Average training RSS per observation across replicates.
    pub mean_train_mse: f64,
}

/// Decompose the expected error of each `kind` into bias², variance and noise.
pub fn decompose(
    config: &SampleConfig,
    kinds: &[ModelKind],
    replicates: usize,
    grid_points: usize,
) -> Result<Vec<Decomposition>, AppError> {
    if replicates < 2 {
        return Err(AppError::usage("Decomposition needs at least 2 replicates."));
    }
    if grid_points < 2 {
        return Err(AppError::usage("Evaluation grid needs at least 2 points."));
    }

    let samples: Vec<Sample> = (0..replicates)
        .into_par_iter()
        .map(|r| generate_sample(config, REPLICATE_STREAM_BASE + r as u64))
        .collect::<Result<_, _>>()?;

    let grid = linspace(config.x_min, config.x_max, grid_points);
    let truth: Vec<f64> = grid.iter().map(|&x| config.function.eval(x)).collect();
    let noise = config.noise_sd * config.noise_sd;

    let mut out = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let fits: Vec<(Vec<f64>, f64)> = samples
            .par_iter()
            .map(|s| -> Result<(Vec<f64>, f64), AppError> {
                let fit = fit_model(kind, &s.x, &s.y_obs)?;
                Ok((predict_all(&fit.model, &grid), fit.rss / s.len() as f64))
            })
            .collect::<Result<_, AppError>>()?;

        let (bias_sq, variance) = bias_variance(&fits, &truth)?;
        let mean_train_mse = fits.iter().map(|(_, mse)| mse).sum::<f64>() / fits.len() as f64;

        log::info!(
            "{}: bias²={bias_sq:.5} variance={variance:.5} over {replicates} replicates",
            kind.display_name()
        );

        out.push(Decomposition {
            kind,
            replicates,
            bias_sq,
            variance,
            noise,
            expected_mse: bias_sq + variance + noise,
            mean_train_mse,
        });
    }

    Ok(out)
}

fn bias_variance(fits: &[(Vec<f64>, f64)], truth: &[f64]) -> Result<(f64, f64), AppError> {
    let r = fits.len() as f64;
    let m = truth.len();

    let mut bias_sq = 0.0;
    let mut variance = 0.0;
    for (j, &f) in truth.iter().enumerate() {
        let avg = fits.iter().map(|(p, _)| p[j]).sum::<f64>() / r;
        let var = fits.iter().map(|(p, _)| (p[j] - avg) * (p[j] - avg)).sum::<f64>() / r;
        bias_sq += (avg - f) * (avg - f);
        variance += var;
    }
    bias_sq /= m as f64;
    variance /= m as f64;

    if !(bias_sq.is_finite() && variance.is_finite()) {
        return Err(AppError::numeric("Non-finite bias/variance estimate."));
    }
    Ok((bias_sq, variance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds() -> Vec<ModelKind> {
        vec![ModelKind::Mean, ModelKind::Linear, ModelKind::Polynomial(3), ModelKind::Polynomial(9)]
    }

    #[test]
    fn simple_models_are_biased_complex_models_vary() {
        let config = SampleConfig::default();
        let out = decompose(&config, &kinds(), 100, 51).unwrap();
        let by_kind = |k: ModelKind| out.iter().find(|d| d.kind == k).unwrap();

        let mean_only = by_kind(ModelKind::Mean);
        let linear = by_kind(ModelKind::Linear);
        let cubic = by_kind(ModelKind::Polynomial(3));
        let nonic = by_kind(ModelKind::Polynomial(9));

        // sin(2πx) averages to ~0 over [0, 1], so the mean-only bias² is ~E[sin²] = 0.5.
        assert!(mean_only.bias_sq > 0.3, "mean bias² {}", mean_only.bias_sq);
        assert!(cubic.bias_sq < 0.1, "cubic bias² {}", cubic.bias_sq);
        assert!(linear.bias_sq > cubic.bias_sq);

        assert!(nonic.variance > linear.variance);
        assert!(nonic.variance > mean_only.variance);
    }

    #[test]
    fn components_add_up() {
        let config = SampleConfig::default();
        let out = decompose(&config, &[ModelKind::Polynomial(3)], 20, 11).unwrap();
        let d = &out[0];
        assert!((d.noise - 0.09).abs() < 1e-12);
        assert!((d.expected_mse - (d.bias_sq + d.variance + d.noise)).abs() < 1e-12);
        assert!(d.bias_sq >= 0.0 && d.variance >= 0.0);
    }

    #[test]
    fn decomposition_is_deterministic() {
        let config = SampleConfig::default();
        let a = decompose(&config, &[ModelKind::Polynomial(5)], 16, 21).unwrap();
        let b = decompose(&config, &[ModelKind::Polynomial(5)], 16, 21).unwrap();
        assert_eq!(a[0].bias_sq, b[0].bias_sq);
        assert_eq!(a[0].variance, b[0].variance);
    }

    #[test]
    fn too_few_replicates_is_a_usage_error() {
        let err = decompose(&SampleConfig::default(), &[ModelKind::Mean], 1, 11).unwrap_err();
        assert_eq!(err.exit_code(), AppError::USAGE);
    }

    #[test]
    fn underdetermined_kind_fails_the_run() {
        let config = SampleConfig {
            n_points: 5,
            ..SampleConfig::default()
        };
        let err = decompose(&config, &[ModelKind::Polynomial(8)], 4, 11).unwrap_err();
        assert_eq!(err.exit_code(), AppError::INSUFFICIENT_DATA);
    }
}
