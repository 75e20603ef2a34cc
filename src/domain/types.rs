//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while a demonstration step runs
//! - exported to JSON/CSV at the end of a run

use std::f64::consts::PI;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The known data-generating function `f(x)` that samples are drawn around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrueFunction {
    /// `sin(2πx)`: needs a few polynomial terms, so low degrees are visibly biased.
    Sine,
    /// `1 + 2x`
    Linear,
    /// `1 - 4x + 4x²`
    Quadratic,
    /// `20 (x - 0.2)(x - 0.5)(x - 0.9)`
    Cubic,
}

impl TrueFunction {
    pub fn eval(self, x: f64) -> f64 {
        match self {
            TrueFunction::Sine => (2.0 * PI * x).sin(),
            TrueFunction::Linear => 1.0 + 2.0 * x,
            TrueFunction::Quadratic => 1.0 - 4.0 * x + 4.0 * x * x,
            TrueFunction::Cubic => 20.0 * (x - 0.2) * (x - 0.5) * (x - 0.9),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TrueFunction::Sine => "sin(2πx)",
            TrueFunction::Linear => "1 + 2x",
            TrueFunction::Quadratic => "1 - 4x + 4x²",
            TrueFunction::Cubic => "20(x-0.2)(x-0.5)(x-0.9)",
        }
    }
}

/// How the independent variable is laid out across `[x_min, x_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum XLayout {
    /// Evenly spaced, both endpoints included.
    Grid,
    /// Independent uniform draws, sorted ascending.
    Uniform,
}

/// Model family selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    Mean,
    Linear,
    Poly,
}

impl ModelChoice {
    /// Resolve to a concrete kind; `degree` only matters for `Poly`.
    pub fn to_kind(self, degree: usize) -> ModelKind {
        match self {
            ModelChoice::Mean => ModelKind::Mean,
            ModelChoice::Linear => ModelKind::Linear,
            ModelChoice::Poly => ModelKind::from_degree(degree),
        }
    }
}

/// Concrete fitted model kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "degree", rename_all = "lowercase")]
pub enum ModelKind {
    /// Predicts the sample mean everywhere.
    Mean,
    /// Straight line (degree 1).
    Linear,
    /// Polynomial of the given degree (>= 2 when built via `from_degree`).
    Polynomial(usize),
}

impl ModelKind {
    /// Canonical kind for a polynomial degree.
    pub fn from_degree(degree: usize) -> Self {
        match degree {
            0 => ModelKind::Mean,
            1 => ModelKind::Linear,
            d => ModelKind::Polynomial(d),
        }
    }

    pub fn degree(self) -> usize {
        match self {
            ModelKind::Mean => 0,
            ModelKind::Linear => 1,
            ModelKind::Polynomial(d) => d,
        }
    }

    /// Number of fitted coefficients (used by information criteria).
    pub fn param_count(self) -> usize {
        self.degree() + 1
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> String {
        match self {
            ModelKind::Mean => "mean-only".to_string(),
            ModelKind::Linear => "linear".to_string(),
            ModelKind::Polynomial(d) => format!("poly(deg={d})"),
        }
    }
}

/// One synthetic draw: `y_obs = f(x) + ε`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// Random stream the sample was drawn from (0 = training, 1 = holdout).
    pub stream: u64,
    pub x: Vec<f64>,
    pub y_true: Vec<f64>,
    pub y_obs: Vec<f64>,
}

impl Sample {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Observed, true and predicted values side by side for one sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoTable {
    pub x: Vec<f64>,
    pub observed: Vec<f64>,
    pub truth: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl DemoTable {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub rss: f64,
    pub rmse: f64,
    pub r_squared: f64,
    pub bic: f64,
    pub n: usize,
}

/// Fitted model parameters.
///
/// Polynomial coefficients are expressed in the Legendre basis over
/// `x_domain` (mapped onto `[-1, 1]`), which keeps high-degree fits well
/// conditioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveModel {
    pub kind: ModelKind,
    pub display_name: String,
    pub coefficients: Vec<f64>,
    pub x_domain: (f64, f64),
}

/// Fit output for a single model on its training sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: CurveModel,
    pub quality: FitQuality,
}

/// One step of the demonstration sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoStep {
    pub title: String,
    pub fit: FitResult,
    pub train: DemoTable,
    pub holdout: DemoTable,
    /// Quality of the training fit evaluated on the holdout sample.
    pub holdout_quality: FitQuality,
}

/// Everything needed to draw samples reproducibly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    pub function: TrueFunction,
    pub layout: XLayout,
    pub n_points: usize,
    pub noise_sd: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            function: TrueFunction::Sine,
            layout: XLayout::Uniform,
            n_points: 20,
            noise_sd: 0.3,
            x_min: 0.0,
            x_max: 1.0,
            seed: 42,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub sample: SampleConfig,
    /// Degree of the "reasonable" polynomial step.
    pub degree: usize,
    /// Degree of the overfitting step.
    pub overfit_degree: usize,
    /// Highest degree visited by the sweep.
    pub max_degree: usize,
    /// Replicate samples for the bias/variance decomposition (0 disables it).
    pub replicates: usize,
    /// Evaluation grid size for the decomposition and charts.
    pub grid_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub charts_dir: Option<PathBuf>,

    pub export_summary: Option<PathBuf>,
    pub export_tables: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sample: SampleConfig::default(),
            degree: 3,
            overfit_degree: 15,
            max_degree: 15,
            replicates: 200,
            grid_points: 101,
            plot: true,
            plot_width: 72,
            plot_height: 18,
            charts_dir: None,
            export_summary: None,
            export_tables: None,
        }
    }
}
