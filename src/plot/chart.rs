//! SVG charts for demonstration steps, drawn with Plotters.
//!
//! Plotters is built without font support, so charts carry no text: a frame,
//! the observed training points (black dots), the true function (green) and
//! the fitted model (blue).

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::data::linspace;
use crate::domain::{DemoStep, TrueFunction};
use crate::error::AppError;
use crate::models::predict;

/// Pixel size of written charts.
pub const CHART_SIZE: (u32, u32) = (640, 400);

/// Render one step to an SVG document.
pub fn render_step_svg(step: &DemoStep, function: TrueFunction, size: (u32, u32)) -> Result<String, AppError> {
    let points: Vec<(f64, f64)> = step
        .train
        .x
        .iter()
        .zip(step.train.observed.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    let (x0, x1) = step.fit.model.x_domain;
    let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 - 0.5, x0 + 0.5) };
    let xs = linspace(x0, x1, 200);
    let truth: Vec<(f64, f64)> = xs.iter().map(|&x| (x, function.eval(x))).collect();

    // Keep the y-axis on the data; the fitted curve is clipped when it runs off.
    let (y0, y1) = y_bounds(points.iter().chain(truth.iter()).map(|&(_, y)| y));
    let fitted: Vec<(f64, f64)> = xs
        .iter()
        .map(|&x| (x, predict(&step.fit.model, x)))
        .filter(|&(_, y)| y.is_finite() && y >= y0 && y <= y1)
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(chart_err)?;

        chart
            .draw_series(std::iter::once(Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1))))
            .map_err(chart_err)?;
        chart
            .draw_series(LineSeries::new(truth.iter().copied(), &GREEN))
            .map_err(chart_err)?;
        chart
            .draw_series(LineSeries::new(fitted.iter().copied(), &BLUE))
            .map_err(chart_err)?;
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, BLACK.filled())))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

/// Write `step` as `<dir>/step_<index>.svg` and return the path.
pub fn write_step_svg(
    dir: &Path,
    index: usize,
    step: &DemoStep,
    function: TrueFunction,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::usage(format!("Failed to create chart dir '{}': {e}", dir.display()))
    })?;
    let path = dir.join(format!("step_{:02}.svg", index + 1));
    let svg = render_step_svg(step, function, CHART_SIZE)?;
    fs::write(&path, svg)
        .map_err(|e| AppError::usage(format!("Failed to write chart '{}': {e}", path.display())))?;
    log::info!("wrote chart {}", path.display());
    Ok(path)
}

fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for y in values.filter(|y| y.is_finite()) {
        lo = lo.min(y);
        hi = hi.max(y);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}

fn chart_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::numeric(format!("Chart rendering failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fit;
    use crate::domain::{DemoConfig, ModelKind};

    #[test]
    fn svg_contains_points_and_curves() {
        let config = DemoConfig::default();
        let out = run_fit(&config, ModelKind::Polynomial(3)).unwrap();

        let svg = render_step_svg(&out.steps[0], config.sample.function, (320, 200)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), config.sample.n_points);
    }

    #[test]
    fn y_bounds_pads_and_handles_empty_input() {
        assert_eq!(y_bounds(std::iter::empty()), (0.0, 1.0));
        let (lo, hi) = y_bounds([0.0, 10.0, f64::NAN].into_iter());
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }
}
