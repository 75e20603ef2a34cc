//! Plain-text formatting of run results for the terminal.
//!
//! We keep formatting code in one place so the math/fitting code stays clean
//! and output changes are localized.

use crate::domain::{DemoConfig, DemoStep, FitQuality};
use crate::fit::{Decomposition, DegreeSweep};

/// Header describing the data-generating setup.
pub fn format_run_header(config: &DemoConfig) -> String {
    let s = &config.sample;
    let mut out = String::new();
    out.push_str("=== bv - model bias & variance ===\n");
    out.push_str(&format!("True function: f(x) = {}\n", s.function.display_name()));
    out.push_str(&format!(
        "Sample: n={} | x=[{:.3}, {:.3}] ({:?}) | noise sd={:.3} | seed={}\n",
        s.n_points, s.x_min, s.x_max, s.layout, s.noise_sd, s.seed
    ));
    out
}

/// One demonstration step: model, coefficients, training and holdout quality.
pub fn format_step(step: &DemoStep) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n--- {} ---\n", step.title));
    out.push_str(&format!(
        "- model: {} (k={})\n",
        step.fit.model.display_name,
        step.fit.model.kind.param_count()
    ));
    out.push_str(&format!("- legendre coefficients: {}\n", fmt_vec(&step.fit.model.coefficients)));
    out.push_str(&format!("- train  : {}\n", fmt_quality(&step.fit.quality)));
    out.push_str(&format!("- holdout: {}\n", fmt_quality(&step.holdout_quality)));
    out
}

/// Degree sweep table; `*` marks the best holdout degree, `b` the BIC choice.
pub fn format_sweep(sweep: &DegreeSweep) -> String {
    let mut out = String::new();
    out.push_str("\nDegree sweep (train vs holdout):\n");
    out.push_str("   deg    train RSS  holdout RSS          BIC\n");
    for row in &sweep.rows {
        let holdout_mark = if row.degree == sweep.best_by_holdout { '*' } else { ' ' };
        let bic_mark = if row.degree == sweep.best_by_bic { 'b' } else { ' ' };
        out.push_str(&format!(
            "{holdout_mark}{bic_mark} {:>3} {:>12.4} {:>12.4} {:>12.3}\n",
            row.degree, row.fit.quality.rss, row.holdout.rss, row.fit.quality.bic
        ));
    }
    for (degree, reason) in &sweep.skipped {
        out.push_str(&format!("  (skipped degree {degree}) {reason}\n"));
    }
    out.push_str(&format!(
        "Best by holdout RSS: degree {} | best by BIC: degree {}\n",
        sweep.best_by_holdout, sweep.best_by_bic
    ));
    out
}

/// Bias² / variance / noise table.
pub fn format_decomposition(rows: &[Decomposition]) -> String {
    let mut out = String::new();
    let Some(first) = rows.first() else {
        return out;
    };
    out.push_str(&format!(
        "\nBias/variance decomposition ({} replicates):\n",
        first.replicates
    ));
    out.push_str("model                 bias²   variance      noise   exp. MSE  train MSE\n");
    for d in rows {
        out.push_str(&format!(
            "{:<16} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5}\n",
            d.kind.display_name(),
            d.bias_sq,
            d.variance,
            d.noise,
            d.expected_mse,
            d.mean_train_mse
        ));
    }
    out
}

fn fmt_quality(q: &FitQuality) -> String {
    format!(
        "RSS={:.4} RMSE={:.4} R²={:.4} BIC={:.3} (n={})",
        q.rss, q.rmse, q.r_squared, q.bic, q.n
    )
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
    format!("[{}]", parts.join(", "))
}
