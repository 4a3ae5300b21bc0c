//! Export span-sweep results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SweepRow;
use crate::error::AppError;

/// Write per-span sweep results to a CSV file.
pub fn write_sweep_csv(path: &Path, diameter: f64, rows: &[SweepRow]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to create sweep CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(
        file,
        "diameter,span,a,b,error,converged,area,mid_radius,mid_dip,mid_gap"
    )
    .map_err(|e| AppError::invalid_input(format!("Failed to write sweep CSV header: {e}")))?;

    for row in rows {
        writeln!(
            file,
            "{diameter:.10},{:.10},{:.10},{:.10},{:.10e},{},{:.10},{:.10},{:.10},{:.10}",
            row.span,
            row.outcome.params.a,
            row.outcome.params.b,
            row.outcome.error,
            row.outcome.converged,
            row.properties.area,
            row.properties.mid_radius,
            row.properties.mid_dip,
            row.properties.mid_gap,
        )
        .map_err(|e| AppError::invalid_input(format!("Failed to write sweep CSV row: {e}")))?;
    }

    Ok(())
}
