//! Degree sweep: training fit vs. holdout error for every polynomial degree.
//!
//! For each degree `0..=max_degree` the tool fits the training sample and computes:
//! - training RSS / RMSE / R²
//! - BIC = n * ln(RSS/n) + k * ln(n)
//! - RSS / RMSE of the same fit on the independent holdout sample
//!
//! Selection rules:
//! 1. Skip underdetermined degrees (`n < k`)
//! 2. "Best by holdout" is the degree with minimum holdout RSS
//! 3. "Best by BIC" is the minimum BIC, except that a simpler degree within
//!    2 BIC points is preferred

use serde::{Deserialize, Serialize};

use crate::domain::{FitQuality, FitResult, ModelKind, Sample};
use crate::error::AppError;
use crate::fit::fitter::{evaluate, fit_with_quality};

/// Minimum ΔBIC a more complex model must win by.
const BIC_SIMPLICITY_MARGIN: f64 = 2.0;

/// One degree of the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRow {
    pub degree: usize,
    pub fit: FitResult,
    pub holdout: FitQuality,
}

/// Output of a degree sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeSweep {
    pub rows: Vec<SweepRow>,
    pub best_by_holdout: usize,
    pub best_by_bic: usize,
    /// Degrees that were skipped and why (for diagnostics).
    pub skipped: Vec<(usize, String)>,
}

impl DegreeSweep {
    pub fn row(&self, degree: usize) -> Option<&SweepRow> {
        self.rows.iter().find(|r| r.degree == degree)
    }
}

/// Fit every degree up to `max_degree` on `train` and score it on `holdout`.
pub fn degree_sweep(train: &Sample, holdout: &Sample, max_degree: usize) -> Result<DegreeSweep, AppError> {
    let n = train.len();
    let mut rows = Vec::with_capacity(max_degree + 1);
    let mut skipped = Vec::new();

    for degree in 0..=max_degree {
        let kind = ModelKind::from_degree(degree);
        let k = kind.param_count();
        if n < k {
            let reason = format!("Underdetermined: n={n} < k={k}");
            log::warn!("skipping degree {degree}: {reason}");
            skipped.push((degree, reason));
            continue;
        }

        let fit = fit_with_quality(kind, &train.x, &train.y_obs)?;
        let holdout_quality = evaluate(&fit.model, &holdout.x, &holdout.y_obs)?;
        log::debug!(
            "degree {degree}: train rss={:.6} holdout rss={:.6}",
            fit.quality.rss,
            holdout_quality.rss
        );
        rows.push(SweepRow {
            degree,
            fit,
            holdout: holdout_quality,
        });
    }

    if rows.is_empty() {
        return Err(AppError::insufficient_data(
            "Insufficient data to fit any degree in the sweep.",
        ));
    }

    let best_by_holdout = select_by_holdout(&rows);
    let best_by_bic = select_by_bic(&rows);

    Ok(DegreeSweep {
        rows,
        best_by_holdout,
        best_by_bic,
        skipped,
    })
}

fn select_by_holdout(rows: &[SweepRow]) -> usize {
    let mut best = &rows[0];
    for r in &rows[1..] {
        if r.holdout.rss < best.holdout.rss {
            best = r;
        }
    }
    best.degree
}

fn select_by_bic(rows: &[SweepRow]) -> usize {
    let mut best = &rows[0];
    for r in &rows[1..] {
        if r.fit.quality.bic < best.fit.quality.bic {
            best = r;
        }
    }

    // Rows are ordered by increasing degree: the first one close enough wins.
    let best_bic = best.fit.quality.bic;
    rows.iter()
        .find(|r| r.fit.quality.bic <= best_bic + BIC_SIMPLICITY_MARGIN)
        .map(|r| r.degree)
        .unwrap_or(best.degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_sample, HOLDOUT_STREAM, TRAIN_STREAM};
    use crate::domain::{CurveModel, SampleConfig, TrueFunction};

    fn row(degree: usize, bic: f64, holdout_rss: f64) -> SweepRow {
        let kind = ModelKind::from_degree(degree);
        let quality = |rss: f64, bic: f64| FitQuality {
            rss,
            rmse: 0.0,
            r_squared: 0.0,
            bic,
            n: 50,
        };
        SweepRow {
            degree,
            fit: FitResult {
                model: CurveModel {
                    kind,
                    display_name: kind.display_name(),
                    coefficients: vec![],
                    x_domain: (0.0, 1.0),
                },
                quality: quality(1.0, bic),
            },
            holdout: quality(holdout_rss, 0.0),
        }
    }

    #[test]
    fn bic_prefers_simpler_when_close() {
        let rows = vec![row(0, 30.0, 9.0), row(1, 11.5, 5.0), row(2, 10.0, 4.0)];
        assert_eq!(select_by_bic(&rows), 1);
        assert_eq!(select_by_holdout(&rows), 2);
    }

    #[test]
    fn sweep_shows_overfitting_on_sine() {
        let config = SampleConfig::default();
        let train = generate_sample(&config, TRAIN_STREAM).unwrap();
        let holdout = generate_sample(&config, HOLDOUT_STREAM).unwrap();

        let sweep = degree_sweep(&train, &holdout, 15).unwrap();
        assert_eq!(sweep.rows.len(), 16);
        assert!(sweep.skipped.is_empty());

        // Training RSS keeps falling, holdout RSS does not follow it to the end.
        let first = sweep.row(0).unwrap();
        let last = sweep.row(15).unwrap();
        assert!(last.fit.quality.rss < first.fit.quality.rss);
        assert!(last.holdout.rss > last.fit.quality.rss);
        assert!(sweep.best_by_holdout >= 3 && sweep.best_by_holdout < 15);
        assert!(sweep.best_by_bic >= 3);
    }

    #[test]
    fn sweep_picks_linear_for_linear_truth() {
        let config = SampleConfig {
            function: TrueFunction::Linear,
            n_points: 60,
            noise_sd: 0.2,
            ..SampleConfig::default()
        };
        let train = generate_sample(&config, TRAIN_STREAM).unwrap();
        let holdout = generate_sample(&config, HOLDOUT_STREAM).unwrap();

        let sweep = degree_sweep(&train, &holdout, 6).unwrap();
        assert!((1..=2).contains(&sweep.best_by_bic), "picked {}", sweep.best_by_bic);
    }

    #[test]
    fn sweep_skips_underdetermined_degrees() {
        let config = SampleConfig {
            n_points: 4,
            ..SampleConfig::default()
        };
        let train = generate_sample(&config, TRAIN_STREAM).unwrap();
        let holdout = generate_sample(&config, HOLDOUT_STREAM).unwrap();

        let sweep = degree_sweep(&train, &holdout, 6).unwrap();
        assert_eq!(sweep.rows.len(), 4);
        assert_eq!(
            sweep.skipped.iter().map(|(d, _)| *d).collect::<Vec<_>>(),
            vec![4, 5, 6]
        );
    }
}
