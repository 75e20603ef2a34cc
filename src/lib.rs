//! `bias-variance` library crate.
//!
//! The binary (`bv`) is a thin wrapper around this library so that:
//!
//! - sampling, fitting and decomposition are testable without spawning processes
//! - the demonstration steps can be driven from other code (notebooks, benches)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
