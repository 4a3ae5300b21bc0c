//! Boundary error evaluator: the objective the search minimizes.
//!
//! For a candidate `(a, b)` the error is the sum of absolute deviations of
//! the curve from the endpoint height `d/2` at `x = 0` and `x = l`:
//!
//! `error = |a·cosh((0−b)/a) − d/2| + |a·cosh((l−b)/a) − d/2|`
//!
//! This is an L1 residual, so the surface is non-smooth and (because cosh is
//! symmetric around `b`) non-convex; the search must not assume otherwise.
//!
//! The evaluator never fails. Degenerate candidates (`a <= 0`, non-finite
//! inputs, an overflowing cosh) cost `f64::INFINITY`, which keeps the
//! search's comparison logic trivial.

use crate::domain::BoundarySpec;
use crate::geometry::catenary_height;

/// Score a candidate `(a, b)` against the boundary conditions.
///
/// Returns a non-negative error, `0.0` exactly at a perfect fit, or
/// `f64::INFINITY` for candidates the curve equation cannot represent.
pub fn boundary_error(a: f64, b: f64, spec: &BoundarySpec) -> f64 {
    if !(a.is_finite() && b.is_finite()) || a <= 0.0 {
        return f64::INFINITY;
    }

    let target = spec.endpoint_height();
    let e0 = catenary_height(a, b, 0.0) - target;
    let e1 = catenary_height(a, b, spec.span) - target;
    let error = e0.abs() + e1.abs();

    if error.is_finite() { error } else { f64::INFINITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(d: f64, l: f64) -> BoundarySpec {
        BoundarySpec::new(d, l).unwrap()
    }

    #[test]
    fn exact_fit_scores_zero() {
        // Construct boundary conditions that (a=0.5, b=0.3) satisfies exactly:
        // endpoints at x=0 and x=0.6 are symmetric around b, so
        // d = 2 * 0.5 * cosh(0.3/0.5).
        let a: f64 = 0.5;
        let b: f64 = 0.3;
        let l = 0.6;
        let d = 2.0 * a * (b / a).cosh();
        let err = boundary_error(a, b, &spec(d, l));
        assert!(err < 1e-12, "err={err}");
    }

    #[test]
    fn error_is_positive_off_fit() {
        let s = spec(1.068, 0.6);
        let err = boundary_error(1.0, 1.0, &s);
        assert!(err.is_finite() && err > 0.0);
    }

    #[test]
    fn degenerate_a_is_penalized_not_propagated() {
        let s = spec(1.068, 0.6);
        assert_eq!(boundary_error(0.0, 0.3, &s), f64::INFINITY);
        assert_eq!(boundary_error(-1.0, 0.3, &s), f64::INFINITY);
        assert_eq!(boundary_error(f64::NAN, 0.3, &s), f64::INFINITY);
        assert_eq!(boundary_error(1.0, f64::NAN, &s), f64::INFINITY);
    }

    #[test]
    fn cosh_overflow_is_penalized() {
        // Tiny a with b far away overflows cosh; the evaluator must return
        // infinity rather than NaN.
        let s = spec(1.068, 0.6);
        let err = boundary_error(1e-9, 1e6, &s);
        assert_eq!(err, f64::INFINITY);
    }
}
