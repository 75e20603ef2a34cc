//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed training points: `o`
//! - fitted curve: `-` line
//! - true function: `.` line

use crate::data::linspace;
use crate::domain::{CurveModel, DemoStep, TrueFunction};
use crate::models::predict;

/// Render a demonstration step: training points, fitted curve and true curve.
pub fn render_step_plot(step: &DemoStep, function: TrueFunction, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = step
        .train
        .x
        .iter()
        .zip(step.train.observed.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    let (x_min, x_max) = x_range(&points).unwrap_or(step.fit.model.x_domain);
    let xs = linspace(x_min, x_max, width.max(2));
    let fitted = sample_model(&step.fit.model, &xs);
    let truth: Vec<(f64, f64)> = xs.iter().map(|&x| (x, function.eval(x))).collect();

    render_plot(&points, &fitted, &truth, x_min, x_max, width, height)
}

fn render_plot(
    points: &[(f64, f64)],
    fitted: &[(f64, f64)],
    truth: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    // The y-range follows the data and the true curve; a wild overfit curve is
    // clipped at the edges instead of squashing everything else flat.
    let (y_min, y_max) = y_range(points, truth).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Fitted curve first, then the true curve fills remaining blanks, then points overlay.
    draw_curve(&mut grid, fitted, x_min, x_max, y_min, y_max, '-');
    draw_curve(&mut grid, truth, x_min, x_max, y_min, y_max, '.');

    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}] | o=observed -=fitted .=true\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn sample_model(model: &CurveModel, xs: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().map(|&x| (x, predict(model, x))).collect()
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[(f64, f64)], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points.iter().chain(curve.iter()) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

/// Row index for `y`, or `None` when it falls outside the plotted range.
fn map_y_checked(y: f64, y_min: f64, y_max: f64, height: usize) -> Option<usize> {
    if !(y.is_finite() && y >= y_min && y <= y_max) {
        return None;
    }
    Some(map_y(y, y_min, y_max, height))
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    // Segments leaving the plotted y-range are dropped, not clamped to the border.
    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let Some(row) = map_y_checked(y, y_min, y_max, height) else {
            prev = None;
            continue;
        };
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DemoTable, FitQuality, FitResult, ModelKind};

    fn quality() -> FitQuality {
        FitQuality {
            rss: 0.0,
            rmse: 0.0,
            r_squared: 1.0,
            bic: 0.0,
            n: 2,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let step = DemoStep {
            title: "linear".to_string(),
            fit: FitResult {
                model: CurveModel {
                    kind: ModelKind::Mean,
                    display_name: ModelKind::Mean.display_name(),
                    coefficients: vec![1.0],
                    x_domain: (0.0, 1.0),
                },
                quality: quality(),
            },
            train: DemoTable {
                x: vec![0.0, 1.0],
                observed: vec![1.0, 3.0],
                truth: vec![1.0, 3.0],
                predicted: vec![1.0, 1.0],
            },
            holdout: DemoTable::default(),
            holdout_quality: quality(),
        };

        // True function 1 + 2x runs corner to corner, the mean-only fit along the bottom.
        let txt = render_step_plot(&step, TrueFunction::Linear, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 1.000] | y=[0.90, 3.10] | o=observed -=fitted .=true\n",
            "         o\n",
            "      ... \n",
            "    ..    \n",
            " ...      \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn out_of_range_curve_is_not_drawn_on_the_border() {
        let mut grid = vec![vec![' '; 10]; 5];
        let curve = vec![(0.0, 100.0), (1.0, 100.0)];
        draw_curve(&mut grid, &curve, 0.0, 1.0, 0.0, 1.0, '-');
        assert!(grid.iter().all(|row| row.iter().all(|&c| c == ' ')));
    }
}
