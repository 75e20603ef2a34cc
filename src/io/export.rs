//! Export demonstration tables to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{DemoStep, DemoTable};
use crate::error::AppError;
use crate::report::residuals;

/// Write every step's training and holdout rows to a CSV file.
pub fn write_tables_csv(path: &Path, steps: &[DemoStep]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_tables(&mut out, steps)?;
    out.flush()
        .map_err(|e| AppError::usage(format!("Failed to flush export CSV: {e}")))?;
    log::info!("wrote {} step tables to {}", steps.len(), path.display());
    Ok(())
}

fn write_tables<W: Write>(out: &mut W, steps: &[DemoStep]) -> Result<(), AppError> {
    writeln!(out, "step,model,sample,x,observed,truth,predicted,residual")
        .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for (i, step) in steps.iter().enumerate() {
        for (label, table) in [("train", &step.train), ("holdout", &step.holdout)] {
            write_rows(out, i + 1, &step.fit.model.display_name, label, table)?;
        }
    }
    Ok(())
}

fn write_rows<W: Write>(
    out: &mut W,
    step: usize,
    model: &str,
    label: &str,
    table: &DemoTable,
) -> Result<(), AppError> {
    let residual = residuals(table);
    for i in 0..table.len() {
        writeln!(
            out,
            "{},{},{},{:.10},{:.10},{:.10},{:.10},{:.10}",
            step,
            model,
            label,
            table.x[i],
            table.observed[i],
            table.truth[i],
            table.predicted[i],
            residual[i],
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fit;
    use crate::domain::{DemoConfig, ModelKind};

    #[test]
    fn csv_has_a_row_per_observation() {
        let config = DemoConfig::default();
        let out = run_fit(&config, ModelKind::Linear).unwrap();

        let mut buf = Vec::new();
        write_tables(&mut buf, &out.steps).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "step,model,sample,x,observed,truth,predicted,residual");
        assert_eq!(lines.len(), 1 + 2 * config.sample.n_points);
        assert!(lines[1].starts_with("1,linear,train,"));
        assert!(lines.last().unwrap().starts_with("1,linear,holdout,"));
    }
}
