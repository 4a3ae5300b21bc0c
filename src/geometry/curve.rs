//! The catenary equation and curve sampling.

use crate::domain::CurveParams;

/// Height of the catenary `y = a·cosh((x−b)/a)` at `x`.
///
/// Callers are expected to have validated `a`; a non-positive or non-finite
/// `a` simply propagates a non-finite result, which the fit evaluator
/// penalizes and the property calculator rejects.
pub fn catenary_height(a: f64, b: f64, x: f64) -> f64 {
    a * ((x - b) / a).cosh()
}

/// Sample the curve on `n` evenly spaced points over `[x0, x1]`.
///
/// Used by the plotters/ASCII renderers and the curve-JSON export.
pub fn sample_curve(params: &CurveParams, x0: f64, x1: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        out.push((x, params.height(x)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_at_vertex_is_a() {
        let y = catenary_height(0.5, 0.3, 0.3);
        assert!((y - 0.5).abs() < 1e-15);
    }

    #[test]
    fn sample_includes_both_endpoints() {
        let params = CurveParams { a: 0.5, b: 0.3 };
        let pts = sample_curve(&params, 0.0, 0.6, 11);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0].0, 0.0);
        assert_eq!(pts[10].0, 0.6);
        assert!((pts[0].1 - catenary_height(0.5, 0.3, 0.0)).abs() < 1e-15);
    }
}
