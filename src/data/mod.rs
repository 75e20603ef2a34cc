//! Data sources.
//!
//! All data in this tool is synthetic: samples are drawn around a known true
//! function so that bias and variance can be measured against it.

pub mod sample;

pub use sample::*;
