//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - sample configuration (`TrueFunction`, `XLayout`, `SampleConfig`)
//! - model kinds (`ModelKind`, `ModelChoice`)
//! - fit outputs and demonstration tables (`FitResult`, `DemoTable`, `DemoStep`)

pub mod types;

pub use types::*;
