//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The two boundary conditions of a fit: both endpoints of the curve sit at
/// height `diameter / 2`, horizontally `span` apart.
///
/// Physically this is a soap film stretched between two hoops of diameter `d`
/// whose planes are `l` apart; the film's profile is a catenary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec {
    /// Hoop diameter `d` (twice the endpoint height). Strictly positive.
    pub diameter: f64,
    /// Horizontal distance `l` between the hoops. Strictly positive.
    pub span: f64,
}

impl BoundarySpec {
    pub fn new(diameter: f64, span: f64) -> Result<Self, AppError> {
        let spec = Self { diameter, span };
        spec.validate()?;
        Ok(spec)
    }

    /// Reject physically degenerate boundary conditions before any search runs.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.diameter.is_finite() && self.diameter > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid diameter {}: must be finite and > 0.",
                self.diameter
            )));
        }
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid span {}: must be finite and > 0.",
                self.span
            )));
        }
        Ok(())
    }

    /// Target height `d/2` shared by both endpoints.
    pub fn endpoint_height(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Fitted catenary parameters for `y = a·cosh((x−b)/a)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Shape parameter. Must stay `> 0` for the curve to sag rather than invert.
    pub a: f64,
    /// Horizontal shift. `b = span/2` for any exact fit, by symmetry.
    pub b: f64,
}

impl CurveParams {
    /// Evaluate the curve at `x`.
    pub fn height(&self, x: f64) -> f64 {
        crate::geometry::catenary_height(self.a, self.b, x)
    }
}

/// Result of a parameter search.
///
/// Non-convergence is a *flag*, not an error: the best-effort parameters are
/// always returned so the caller can decide how to proceed (loosen the
/// precision, report to the user, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub params: CurveParams,
    /// Boundary error of `params` (sum of absolute endpoint deviations).
    pub error: f64,
    /// `true` when `error <= precision`.
    pub converged: bool,
    /// Refinement levels spent by the winning search pass.
    pub levels: usize,
}

/// Closed-form properties of a fitted curve. Derived once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveProperties {
    /// Area enclosed between the curve and the x-axis over `[0, span]`.
    pub area: f64,
    /// Curve height at mid-span, `a·cosh((l/2 − b)/a)`.
    pub mid_radius: f64,
    /// Sag below the endpoint height: `d/2 − mid_radius` (positive when the
    /// curve dips below the hoops).
    pub mid_dip: f64,
    /// Vertical gap at the centre, `2·mid_radius` (the neck diameter).
    pub mid_gap: f64,
}

/// One row of a span sweep (`bubble sweep`).
#[derive(Debug, Clone, Copy)]
pub struct SweepRow {
    pub span: f64,
    pub outcome: FitOutcome,
    pub properties: CurveProperties,
}

/// A full run's configuration as understood by the pipeline.
///
/// All search knobs are explicit configuration with documented defaults —
/// there is no ambient module-level state.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Target boundary error. The search stops once the best error is at or
    /// below this value.
    pub precision: f64,
    /// Refinement-level budget per search pass (deterministic, not time-based).
    pub max_levels: usize,
    /// Lattice points per parameter per level.
    pub grid_steps: usize,
    /// Factor by which each region half-width shrinks per level.
    pub shrink_factor: f64,
    /// Lower clamp for `a`; keeps the cosh argument finite during refinement.
    pub a_floor: f64,
    /// Upper seed bound for `a`, as a multiple of the span.
    pub a_max_factor: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_curve: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            precision: 1e-7,
            max_levels: 64,
            grid_steps: 21,
            shrink_factor: 2.0,
            a_floor: 1e-9,
            a_max_factor: 4.0,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            export_curve: None,
        }
    }
}

impl FitConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid precision {}: must be finite and > 0.",
                self.precision
            )));
        }
        if self.max_levels == 0 {
            return Err(AppError::invalid_input("max_levels must be >= 1."));
        }
        if self.grid_steps < 3 {
            return Err(AppError::invalid_input("grid_steps must be >= 3."));
        }
        if !(self.shrink_factor.is_finite() && self.shrink_factor > 1.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid shrink_factor {}: must be finite and > 1.",
                self.shrink_factor
            )));
        }
        if !(self.a_floor.is_finite() && self.a_floor > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid a_floor {}: must be finite and > 0.",
                self.a_floor
            )));
        }
        if !(self.a_max_factor.is_finite() && self.a_max_factor > 0.0) {
            return Err(AppError::invalid_input(format!(
                "Invalid a_max_factor {}: must be finite and > 0.",
                self.a_max_factor
            )));
        }
        Ok(())
    }
}

/// A saved curve file (JSON).
///
/// The "portable" representation of a fitted curve: boundary spec, parameters,
/// derived properties, and a precomputed grid for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub spec: BoundarySpec,
    pub params: CurveParams,
    pub converged: bool,
    pub fit_error: f64,
    pub properties: CurveProperties,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_spec_rejects_non_positive() {
        assert!(BoundarySpec::new(0.0, 0.6).is_err());
        assert!(BoundarySpec::new(1.0, -0.1).is_err());
        assert!(BoundarySpec::new(f64::NAN, 0.6).is_err());
        assert!(BoundarySpec::new(1.068, 0.6).is_ok());
    }

    #[test]
    fn default_config_is_valid() {
        FitConfig::default().validate().unwrap();
    }

    #[test]
    fn config_rejects_bad_shrink() {
        let cfg = FitConfig {
            shrink_factor: 1.0,
            ..FitConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
