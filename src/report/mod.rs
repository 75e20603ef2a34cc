//! Reporting utilities: demonstration tables and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{CurveModel, DemoTable, Sample};
use crate::error::AppError;
use crate::models::predict;

/// Pair each observation of `sample` with its true and predicted value.
pub fn build_table(sample: &Sample, model: &CurveModel) -> Result<DemoTable, AppError> {
    let mut predicted = Vec::with_capacity(sample.len());
    for &x in &sample.x {
        let y_fit = predict(model, x);
        if !y_fit.is_finite() {
            return Err(AppError::numeric(
                "Non-finite model prediction while building demo table.",
            ));
        }
        predicted.push(y_fit);
    }

    Ok(DemoTable {
        x: sample.x.clone(),
        observed: sample.y_obs.clone(),
        truth: sample.y_true.clone(),
        predicted,
    })
}

/// Residuals `observed - predicted` for each row.
pub fn residuals(table: &DemoTable) -> Vec<f64> {
    table
        .observed
        .iter()
        .zip(table.predicted.iter())
        .map(|(o, p)| o - p)
        .collect()
}
