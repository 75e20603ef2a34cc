//! Model evaluation for mean-only, linear and polynomial fits.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given `x` (for OLS)
//! - predict `y(x)` given the fitted coefficients (for residuals/plots)

use crate::domain::{CurveModel, ModelKind};
use crate::math::{legendre_eval, legendre_row, normalize};

/// Fill a design row for the given model kind over `x_domain`.
///
/// Column 0 is the constant term.
///
/// # Panics
/// Panics if `out` does not have length `kind.param_count()`.
pub fn fill_design_row(kind: ModelKind, x: f64, x_domain: (f64, f64), out: &mut [f64]) {
    assert_eq!(out.len(), kind.param_count(), "design row length mismatch");
    let u = normalize(x, x_domain.0, x_domain.1);
    legendre_row(u, out);
}

/// Predict `y(x)` for a fitted model.
pub fn predict(model: &CurveModel, x: f64) -> f64 {
    match model.kind {
        ModelKind::Mean => model.coefficients.first().copied().unwrap_or(f64::NAN),
        ModelKind::Linear | ModelKind::Polynomial(_) => {
            let u = normalize(x, model.x_domain.0, model.x_domain.1);
            legendre_eval(u, &model.coefficients)
        }
    }
}

/// Predict at every `x`.
pub fn predict_all(model: &CurveModel, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| predict(model, x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_model_is_affine_in_x() {
        // On [0, 2], u = x - 1, so c0 + c1*u = (c0 - c1) + c1*x.
        let model = CurveModel {
            kind: ModelKind::Linear,
            display_name: ModelKind::Linear.display_name(),
            coefficients: vec![5.0, 2.0],
            x_domain: (0.0, 2.0),
        };
        assert!((predict(&model, 0.0) - 3.0).abs() < 1e-12);
        assert!((predict(&model, 1.5) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn mean_model_ignores_x() {
        let model = CurveModel {
            kind: ModelKind::Mean,
            display_name: ModelKind::Mean.display_name(),
            coefficients: vec![0.75],
            x_domain: (0.0, 1.0),
        };
        let ys = predict_all(&model, &[-10.0, 0.0, 0.3, 42.0]);
        assert!(ys.iter().all(|&y| y == 0.75));
    }

    #[test]
    fn design_row_starts_with_intercept() {
        let mut row = vec![0.0; 4];
        fill_design_row(ModelKind::Polynomial(3), 0.25, (0.0, 1.0), &mut row);
        assert_eq!(row[0], 1.0);
        assert!((row[1] + 0.5).abs() < 1e-12);
    }
}
