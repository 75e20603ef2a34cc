//! JSON summary of a run.
//!
//! The summary is the portable record of a run: configuration, both samples,
//! every step's fit and tables, the degree sweep and the decomposition.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::app::pipeline::DemoOutput;
use crate::domain::DemoConfig;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Local>,
    pub config: &'a DemoConfig,
    #[serde(flatten)]
    pub output: &'a DemoOutput,
}

impl<'a> RunSummary<'a> {
    pub fn new(config: &'a DemoConfig, output: &'a DemoOutput) -> Self {
        Self {
            tool: "bv",
            generated_at: Local::now(),
            config,
            output,
        }
    }
}

/// Write the run summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, config: &DemoConfig, output: &DemoOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(BufWriter::new(file), &RunSummary::new(config, output))
        .map_err(|e| AppError::usage(format!("Failed to write summary JSON: {e}")))?;

    log::info!("wrote run summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_sweep;

    #[test]
    fn summary_serializes_flattened_output() {
        let config = DemoConfig {
            max_degree: 4,
            ..DemoConfig::default()
        };
        let output = run_sweep(&config).unwrap();

        let value = serde_json::to_value(RunSummary::new(&config, &output)).unwrap();
        assert_eq!(value["tool"], "bv");
        assert_eq!(value["config"]["max_degree"], 4);
        assert_eq!(value["sweep"]["rows"].as_array().unwrap().len(), 5);
        assert_eq!(value["sweep"]["rows"][1]["fit"]["model"]["kind"]["kind"], "linear");
        assert!(value["steps"].as_array().unwrap().is_empty());
    }
}
