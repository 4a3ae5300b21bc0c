//! Coarse-to-fine lattice search over `(a, b)`.
//!
//! Why a lattice search?
//! - The objective is an L1 residual: non-smooth, non-convex, with a valley
//!   on each side of the cosh symmetry point. Gradient methods are a poor fit.
//! - It is deterministic given the same inputs/knobs.
//! - With two parameters, a modest lattice per level is fast enough to refit
//!   live in the TUI.
//!
//! Branch selection. Any exact fit has `b = l/2` (the endpoints are symmetric
//! around the curve's vertex), which leaves `a·cosh(l/(2a)) = d/2` with up to
//! two roots for `a`, one on each side of `a* = l/(2u*)` where `u*` is the
//! root of `u·tanh(u) = 1` (the minimum of `a·cosh(l/(2a))`). We prefer the
//! tighter sag — the smaller root — so the first search pass caps the seed
//! region at `a*`; only if that pass misses the precision target do we rerun
//! over the full seed range. Below `d = l·cosh(u*)/u*` no real catenary meets
//! the boundary conditions at all; the search then reports its best effort
//! with `converged = false` instead of looping.
//!
//! The per-level lattice scan runs in parallel, but the reduction walks the
//! scores in lattice order with an explicit tie-break (near-equal error:
//! smaller `a`, then smaller `b`), so results are bit-for-bit reproducible
//! regardless of evaluation order.

use rayon::prelude::*;

use crate::domain::{BoundarySpec, CurveParams, FitConfig, FitOutcome};
use crate::error::AppError;
use crate::fit::evaluator::boundary_error;

/// Root of `u·tanh(u) = 1`; the argument at which `a·cosh(l/(2a))` bottoms out.
const SAG_BRANCH_ROOT: f64 = 1.199_678_640_257_733_8;

/// Errors within this tolerance of the incumbent count as ties.
const TIE_EPS: f64 = 1e-12;

/// Largest `a` on the tight-sag branch: `l / (2u*)`.
pub fn sag_branch_limit(span: f64) -> f64 {
    span / (2.0 * SAG_BRANCH_ROOT)
}

/// Smallest diameter for which a real catenary can meet both hoops at span
/// `l`: `d_min = l·cosh(u*)/u*` (≈ `1.508880·l`). Below it every fit is
/// best-effort.
pub fn min_feasible_diameter(span: f64) -> f64 {
    span * SAG_BRANCH_ROOT.cosh() / SAG_BRANCH_ROOT
}

/// Fit catenary parameters to the boundary conditions.
///
/// Returns the best `(a, b)` found together with its boundary error and a
/// convergence flag; see [`FitOutcome`]. Fails fast on malformed input, never
/// on non-convergence.
pub fn fit(spec: &BoundarySpec, config: &FitConfig) -> Result<FitOutcome, AppError> {
    spec.validate()?;
    config.validate()?;

    // Pass 1: tight-sag branch only (preferred, smaller a).
    let tight = run_pass(spec, config, sag_branch_limit(spec.span));
    if tight.error <= config.precision {
        return Ok(tight);
    }

    // Pass 2: full seed range. Keeps the tight result on ties.
    let wide = run_pass(spec, config, config.a_max_factor * spec.span);
    let best = if wide.error < tight.error { wide } else { tight };

    Ok(FitOutcome {
        converged: best.error <= config.precision,
        ..best
    })
}

/// Mutable search state for one pass. Created fresh per fit, discarded on
/// return.
struct SearchState {
    center_a: f64,
    center_b: f64,
    half_a: f64,
    half_b: f64,
    /// Hard bounds on `a` for this pass.
    a_floor: f64,
    a_cap: f64,
    best_a: f64,
    best_b: f64,
    best_error: f64,
}

impl SearchState {
    fn seed(spec: &BoundarySpec, config: &FitConfig, a_cap: f64) -> Self {
        let a_floor = config.a_floor;
        let a_cap = a_cap.max(a_floor);
        Self {
            center_a: 0.5 * (a_floor + a_cap),
            center_b: 0.5 * spec.span,
            half_a: 0.5 * (a_cap - a_floor),
            half_b: 0.5 * spec.span,
            a_floor,
            a_cap,
            best_a: f64::INFINITY,
            best_b: f64::INFINITY,
            best_error: f64::INFINITY,
        }
    }

    /// Current lattice bounds, clamped so `a` never reaches zero or leaves
    /// the pass's branch cap.
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let a_lo = (self.center_a - self.half_a).max(self.a_floor);
        let a_hi = (self.center_a + self.half_a).min(self.a_cap).max(a_lo);
        let b_lo = self.center_b - self.half_b;
        let b_hi = self.center_b + self.half_b;
        (a_lo, a_hi, b_lo, b_hi)
    }

    fn recenter(&mut self, shrink: f64) {
        self.center_a = self.best_a;
        self.center_b = self.best_b;
        self.half_a /= shrink;
        self.half_b /= shrink;
    }
}

fn run_pass(spec: &BoundarySpec, config: &FitConfig, a_cap: f64) -> FitOutcome {
    let mut state = SearchState::seed(spec, config, a_cap);

    let mut levels = config.max_levels;
    for level in 1..=config.max_levels {
        let (a, b, error) = scan_level(&state, spec, config.grid_steps);
        if candidate_beats(error, a, b, state.best_error, state.best_a, state.best_b) {
            state.best_a = a;
            state.best_b = b;
            state.best_error = error;
        }
        if state.best_error <= config.precision {
            levels = level;
            break;
        }
        state.recenter(config.shrink_factor);
    }

    FitOutcome {
        params: CurveParams {
            a: state.best_a,
            b: state.best_b,
        },
        error: state.best_error,
        converged: state.best_error <= config.precision,
        levels,
    }
}

/// Evaluate one `steps × steps` lattice over the current region and return
/// its best point.
fn scan_level(state: &SearchState, spec: &BoundarySpec, steps: usize) -> (f64, f64, f64) {
    let (a_lo, a_hi, b_lo, b_hi) = state.bounds();
    let n = steps * steps;

    // Each candidate is independent and side-effect-free, so the scoring can
    // fan out across threads. `collect` on an indexed iterator preserves
    // lattice order.
    let scores: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|idx| {
            let (a, b) = lattice_point(idx, steps, a_lo, a_hi, b_lo, b_hi);
            boundary_error(a, b, spec)
        })
        .collect();

    // Sequential reduction in lattice order keeps the result independent of
    // evaluation order.
    let (mut best_a, mut best_b) = lattice_point(0, steps, a_lo, a_hi, b_lo, b_hi);
    let mut best_error = scores[0];
    for (idx, &error) in scores.iter().enumerate().skip(1) {
        let (a, b) = lattice_point(idx, steps, a_lo, a_hi, b_lo, b_hi);
        if candidate_beats(error, a, b, best_error, best_a, best_b) {
            best_a = a;
            best_b = b;
            best_error = error;
        }
    }

    (best_a, best_b, best_error)
}

fn lattice_point(
    idx: usize,
    steps: usize,
    a_lo: f64,
    a_hi: f64,
    b_lo: f64,
    b_hi: f64,
) -> (f64, f64) {
    let ia = idx / steps;
    let ib = idx % steps;
    let u = ia as f64 / (steps as f64 - 1.0);
    let v = ib as f64 / (steps as f64 - 1.0);
    (a_lo + u * (a_hi - a_lo), b_lo + v * (b_hi - b_lo))
}

/// Deterministic candidate comparison.
///
/// Strictly smaller error wins. Within floating-point tolerance of the
/// incumbent, smaller `a` wins (tighter sag), then smaller `b`. This rule is
/// part of the output contract: identical inputs must yield identical fits.
fn candidate_beats(error: f64, a: f64, b: f64, best_error: f64, best_a: f64, best_b: f64) -> bool {
    if error.is_infinite() || best_error.is_infinite() {
        if error.is_infinite() && best_error.is_infinite() {
            return a < best_a || (a == best_a && b < best_b);
        }
        return best_error.is_infinite();
    }

    let tol = TIE_EPS * (1.0 + error.min(best_error).abs());
    if error < best_error - tol {
        return true;
    }
    if error > best_error + tol {
        return false;
    }
    if a != best_a {
        return a < best_a;
    }
    b < best_b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(d: f64, l: f64) -> BoundarySpec {
        BoundarySpec::new(d, l).unwrap()
    }

    #[test]
    fn reference_scenario_converges_on_sag_branch() {
        let s = spec(1.068, 0.6);
        let cfg = FitConfig::default();
        let out = fit(&s, &cfg).unwrap();

        assert!(out.converged);
        assert!(out.error <= cfg.precision);
        // Re-score through the evaluator rather than trusting the reported error.
        assert!(boundary_error(out.params.a, out.params.b, &s) <= cfg.precision);
        // The documented preference: the tighter-sag root.
        assert!(out.params.a > 0.0 && out.params.a <= sag_branch_limit(0.6) + 1e-9);
        // Exact fits are symmetric.
        assert!((out.params.b - 0.3).abs() < 1e-6);
    }

    #[test]
    fn boundary_heights_match_on_the_curve_itself() {
        // Assert on curve evaluation, not the error function, to catch
        // evaluator bugs.
        let s = spec(1.068, 0.6);
        let out = fit(&s, &FitConfig::default()).unwrap();
        let y0 = out.params.height(0.0);
        let y1 = out.params.height(0.6);
        assert!((y0 - 0.534).abs() < 1e-6, "y(0)={y0}");
        assert!((y1 - 0.534).abs() < 1e-6, "y(l)={y1}");
    }

    #[test]
    fn fit_is_bitwise_deterministic() {
        let s = spec(1.068, 0.6);
        let cfg = FitConfig::default();
        let one = fit(&s, &cfg).unwrap();
        let two = fit(&s, &cfg).unwrap();
        assert_eq!(one.params.a.to_bits(), two.params.a.to_bits());
        assert_eq!(one.params.b.to_bits(), two.params.b.to_bits());
        assert_eq!(one.error.to_bits(), two.error.to_bits());
    }

    #[test]
    fn invalid_spec_is_rejected_before_searching() {
        let bad = BoundarySpec {
            diameter: 0.0,
            span: 0.6,
        };
        assert!(fit(&bad, &FitConfig::default()).is_err());
    }

    #[test]
    fn unfittable_geometry_reports_best_effort() {
        // d = 1, l = 1 sits below the feasibility bound (~1.5089): no real
        // catenary meets both hoops. The search must stop at its level budget
        // and flag non-convergence, not loop or panic.
        let s = spec(1.0, 1.0);
        let cfg = FitConfig::default();
        let out = fit(&s, &cfg).unwrap();
        assert!(!out.converged);
        assert!(out.error.is_finite());
        assert!(out.error > cfg.precision);
        assert!(out.params.a > 0.0);
    }

    #[test]
    fn feasibility_bound_matches_catenoid_constant() {
        let bound = min_feasible_diameter(1.0);
        assert!((bound - 1.508_880).abs() < 1e-5, "bound={bound}");
    }

    #[test]
    fn mid_dip_grows_with_diameter_at_fixed_span() {
        let cfg = FitConfig::default();
        let mut last_dip = f64::NEG_INFINITY;
        for d in [1.1, 1.4, 1.8, 2.4] {
            let s = spec(d, 0.6);
            let out = fit(&s, &cfg).unwrap();
            assert!(out.converged, "d={d} should be solvable");
            let props = crate::geometry::properties(&out.params, &s).unwrap();
            assert!(
                props.mid_dip > last_dip,
                "dip must grow with d: d={d} dip={} last={last_dip}",
                props.mid_dip
            );
            last_dip = props.mid_dip;
        }
    }
}
