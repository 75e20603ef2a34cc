//! Output helpers.
//!
//! - step tables to CSV (`export`)
//! - run summary to JSON (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
