//! Charts: fixed-size ASCII plots for the terminal and SVG files via Plotters.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
