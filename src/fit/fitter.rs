//! Low-level fitting routines for a single model kind.
//!
//! Given observations `(x_i, y_i)` we produce:
//! - the fitted coefficients (mean, or OLS in the Legendre basis)
//! - the resulting residual sum of squares and derived diagnostics

use nalgebra::{DMatrix, DVector};

use crate::domain::{CurveModel, FitQuality, FitResult, ModelKind};
use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::models::{fill_design_row, predict};

/// Best fit for a single model kind.
#[derive(Debug, Clone)]
pub struct ModelFit {
    pub model: CurveModel,
    pub rss: f64,
}

/// Fit `kind` to `(x, y)` by least squares.
///
/// The mean-only model is the arithmetic mean of `y` (the least squares
/// solution for a constant), computed directly rather than through the solver.
pub fn fit_model(kind: ModelKind, x: &[f64], y: &[f64]) -> Result<ModelFit, AppError> {
    validate_observations(x, y)?;

    let n = x.len();
    let k = kind.param_count();
    if n < k {
        return Err(AppError::insufficient_data(format!(
            "Underdetermined fit for {}: n={n} < k={k}.",
            kind.display_name()
        )));
    }

    let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let coefficients = match kind {
        ModelKind::Mean => vec![mean(y)],
        ModelKind::Linear | ModelKind::Polynomial(_) => {
            let mut design = DMatrix::<f64>::zeros(n, k);
            let mut row = vec![0.0; k];
            for (i, &xi) in x.iter().enumerate() {
                fill_design_row(kind, xi, (x_min, x_max), &mut row);
                for (j, &v) in row.iter().enumerate() {
                    design[(i, j)] = v;
                }
            }
            let rhs = DVector::from_column_slice(y);
            let beta = solve_least_squares(&design, &rhs).ok_or_else(|| {
                AppError::numeric(format!(
                    "Least squares solve failed for {}.",
                    kind.display_name()
                ))
            })?;
            beta.iter().copied().collect()
        }
    };

    let model = CurveModel {
        kind,
        display_name: kind.display_name(),
        coefficients,
        x_domain: (x_min, x_max),
    };

    let predicted: Vec<f64> = x.iter().map(|&xi| predict(&model, xi)).collect();
    let rss = rss(y, &predicted);
    if !rss.is_finite() {
        return Err(AppError::numeric(format!(
            "Non-finite residuals for {}.",
            kind.display_name()
        )));
    }

    Ok(ModelFit { model, rss })
}

/// Residual sum of squares `Σ (predicted_i - observed_i)²`.
pub fn rss(observed: &[f64], predicted: &[f64]) -> f64 {
    observed
        .iter()
        .zip(predicted.iter())
        .map(|(o, p)| (p - o) * (p - o))
        .sum()
}

/// Arithmetic mean (NaN for an empty slice).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Derive diagnostics from an RSS measured on `observed`.
///
/// - `rmse = sqrt(rss / n)`
/// - `r² = 1 - rss / tss` (1.0 when `observed` has no spread and the fit is exact)
/// - `bic = n ln(rss / n) + k ln(n)`
pub fn fit_quality(rss: f64, k: usize, observed: &[f64]) -> FitQuality {
    let n = observed.len();
    let n_f = n.max(1) as f64;

    let y_bar = mean(observed);
    let tss: f64 = observed.iter().map(|y| (y - y_bar) * (y - y_bar)).sum();
    let r_squared = if tss > 0.0 {
        1.0 - rss / tss
    } else if rss <= 0.0 {
        1.0
    } else {
        0.0
    };

    FitQuality {
        rss,
        rmse: (rss / n_f).sqrt(),
        r_squared,
        bic: bic(n, rss, k),
        n,
    }
}

/// Fit a model and package it with its training diagnostics.
pub fn fit_with_quality(kind: ModelKind, x: &[f64], y: &[f64]) -> Result<FitResult, AppError> {
    let fit = fit_model(kind, x, y)?;
    let quality = fit_quality(fit.rss, kind.param_count(), y);
    Ok(FitResult {
        model: fit.model,
        quality,
    })
}

/// Quality of an existing fit measured against a different sample.
pub fn evaluate(model: &CurveModel, x: &[f64], y: &[f64]) -> Result<FitQuality, AppError> {
    validate_observations(x, y)?;
    let predicted: Vec<f64> = x.iter().map(|&xi| predict(model, xi)).collect();
    if predicted.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numeric(format!(
            "Non-finite prediction from {}.",
            model.display_name
        )));
    }
    Ok(fit_quality(rss(y, &predicted), model.kind.param_count(), y))
}

fn bic(n: usize, rss: f64, k: usize) -> f64 {
    let n_f = n.max(1) as f64;
    let rss_per = (rss / n_f).max(1e-12);
    n_f * rss_per.ln() + (k as f64) * n_f.ln()
}

fn validate_observations(x: &[f64], y: &[f64]) -> Result<(), AppError> {
    if x.is_empty() {
        return Err(AppError::insufficient_data("No data points to fit."));
    }
    if x.len() != y.len() {
        return Err(AppError::usage(format!(
            "Length mismatch: {} x values vs {} y values.",
            x.len(),
            y.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::usage("Observations must be finite."));
    }
    Ok(())
}
