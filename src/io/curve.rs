//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - boundary spec + fitted parameters
//! - convergence flag and final boundary error
//! - derived properties
//! - a precomputed grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{BoundarySpec, CurveFile, CurveGrid, CurveProperties, FitOutcome};
use crate::error::AppError;
use crate::geometry::sample_curve;

/// Number of grid samples stored in a curve file.
const GRID_POINTS: usize = 101;

/// Build the portable representation of a completed fit.
pub fn curve_file_from_fit(
    spec: &BoundarySpec,
    outcome: &FitOutcome,
    properties: &CurveProperties,
) -> CurveFile {
    let samples = sample_curve(&outcome.params, 0.0, spec.span, GRID_POINTS);
    let (x, y) = samples.into_iter().unzip();

    CurveFile {
        tool: "bubble".to_string(),
        spec: *spec,
        params: outcome.params,
        converged: outcome.converged,
        fit_error: outcome.error,
        properties: *properties,
        grid: CurveGrid { x, y },
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to create curve JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::invalid_input(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::invalid_input(format!(
            "Failed to open curve JSON '{}': {e}",
            path.display()
        ))
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::invalid_input(format!("Invalid curve JSON: {e}")))?;

    // Fail fast on files whose boundary spec could not have produced a fit.
    curve.spec.validate()?;

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurveParams;

    #[test]
    fn curve_file_grid_spans_the_boundary() {
        let spec = BoundarySpec::new(1.068, 0.6).unwrap();
        let outcome = FitOutcome {
            params: CurveParams { a: 0.16, b: 0.3 },
            error: 1e-9,
            converged: true,
            levels: 20,
        };
        let props = crate::geometry::properties(&outcome.params, &spec).unwrap();

        let file = curve_file_from_fit(&spec, &outcome, &props);
        assert_eq!(file.grid.x.len(), GRID_POINTS);
        assert_eq!(file.grid.y.len(), GRID_POINTS);
        assert_eq!(file.grid.x[0], 0.0);
        assert_eq!(file.grid.x[GRID_POINTS - 1], 0.6);
        assert!(file.converged);
    }
}
