//! Model fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit a single model kind and score it (`fitter`)
//! - sweep polynomial degrees against a holdout sample (`selection`)
//! - decompose expected error into bias² and variance over replicates (`replicates`)

pub mod fitter;
pub mod replicates;
pub mod selection;

pub use fitter::*;
pub use replicates::*;
pub use selection::*;
