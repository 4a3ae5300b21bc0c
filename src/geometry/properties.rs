//! Closed-form properties of a converged fit.
//!
//! Everything here is a pure analytical formula over `(a, b, d, l)`; no
//! numerical integration, no iteration. Inputs are the *result* of a search;
//! validation is therefore limited to failing fast on malformed boundary
//! specs and on parameters the curve equation cannot represent.

use crate::domain::{BoundarySpec, CurveParams, CurveProperties};
use crate::error::AppError;
use crate::geometry::catenary_height;

/// Area enclosed between the curve and the x-axis over `[0, l]`:
///
/// `∫ a·cosh((x−b)/a) dx = a²·[sinh((l−b)/a) − sinh((0−b)/a)]`
pub fn total_area(params: &CurveParams, spec: &BoundarySpec) -> f64 {
    let CurveParams { a, b } = *params;
    a * a * (((spec.span - b) / a).sinh() - ((0.0 - b) / a).sinh())
}

/// Mid-span quantities: `(mid_radius, mid_dip, mid_gap)`.
///
/// - `mid_radius = a·cosh((l/2 − b)/a)`: the curve height at centre
/// - `mid_dip = d/2 − mid_radius`: positive when the curve sags below the
///   hoops (a best-effort fit on unfittable geometry can make it negative)
/// - `mid_gap = 2·mid_radius`: the vertical gap at centre, i.e. the neck
///   diameter of the film
pub fn mid_properties(params: &CurveParams, spec: &BoundarySpec) -> (f64, f64, f64) {
    let mid_radius = catenary_height(params.a, params.b, spec.span / 2.0);
    let mid_dip = spec.endpoint_height() - mid_radius;
    let mid_gap = 2.0 * mid_radius;
    (mid_radius, mid_dip, mid_gap)
}

/// Bundle all derived properties of a fitted curve.
pub fn properties(params: &CurveParams, spec: &BoundarySpec) -> Result<CurveProperties, AppError> {
    spec.validate()?;
    if !(params.a.is_finite() && params.a > 0.0) || !params.b.is_finite() {
        return Err(AppError::new(
            3,
            format!(
                "Cannot derive properties from degenerate parameters (a={}, b={}).",
                params.a, params.b
            ),
        ));
    }

    let (mid_radius, mid_dip, mid_gap) = mid_properties(params, spec);
    Ok(CurveProperties {
        area: total_area(params, spec),
        mid_radius,
        mid_dip,
        mid_gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitConfig;
    use crate::fit::fit;

    fn spec(d: f64, l: f64) -> BoundarySpec {
        BoundarySpec::new(d, l).unwrap()
    }

    /// Trapezoid reference integral for the area formula.
    fn trapezoid_area(params: &CurveParams, l: f64, n: usize) -> f64 {
        let h = l / n as f64;
        let mut sum = 0.5 * (params.height(0.0) + params.height(l));
        for i in 1..n {
            sum += params.height(i as f64 * h);
        }
        sum * h
    }

    #[test]
    fn area_matches_reference_integral() {
        let params = CurveParams { a: 0.425, b: 0.3 };
        let s = spec(1.068, 0.6);
        let closed = total_area(&params, &s);
        let reference = trapezoid_area(&params, 0.6, 100_000);
        assert!(
            ((closed - reference) / reference).abs() < 1e-6,
            "closed={closed} reference={reference}"
        );
    }

    #[test]
    fn mid_gap_is_twice_mid_radius() {
        let params = CurveParams { a: 0.16, b: 0.3 };
        let s = spec(1.068, 0.6);
        let (mid_radius, _, mid_gap) = mid_properties(&params, &s);
        assert!((mid_gap - 2.0 * mid_radius).abs() < 1e-12);
    }

    #[test]
    fn reference_scenario_properties() {
        // d = 1.068, l = 0.6: the curve sags inward, so the dip is positive
        // and the enclosed area is below the bounding rectangle d·l.
        let s = spec(1.068, 0.6);
        let out = fit(&s, &FitConfig::default()).unwrap();
        assert!(out.converged);

        let props = properties(&out.params, &s).unwrap();
        assert!(props.mid_dip > 0.0, "mid_dip={}", props.mid_dip);
        assert!(props.mid_radius > 0.0);
        assert!(props.area > 0.0);
        assert!(
            props.area < s.diameter * s.span,
            "area={} bound={}",
            props.area,
            s.diameter * s.span
        );
    }

    #[test]
    fn properties_reject_degenerate_params() {
        let s = spec(1.068, 0.6);
        assert!(properties(&CurveParams { a: 0.0, b: 0.3 }, &s).is_err());
        assert!(properties(&CurveParams { a: f64::NAN, b: 0.3 }, &s).is_err());
        assert!(
            properties(
                &CurveParams {
                    a: 0.16,
                    b: f64::INFINITY
                },
                &s
            )
            .is_err()
        );
    }

    #[test]
    fn properties_reject_invalid_spec() {
        let params = CurveParams { a: 0.16, b: 0.3 };
        let bad = BoundarySpec {
            diameter: -1.0,
            span: 0.6,
        };
        assert!(properties(&params, &bad).is_err());
    }
}
