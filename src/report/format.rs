//! Terminal summaries for fits and span sweeps.

use crate::domain::{BoundarySpec, CurveProperties, FitConfig, FitOutcome, SweepRow};
use crate::fit::min_feasible_diameter;

/// Format the full fit summary (boundary conditions + search diagnostics +
/// derived properties).
pub fn format_fit_summary(
    spec: &BoundarySpec,
    config: &FitConfig,
    outcome: &FitOutcome,
    props: &CurveProperties,
) -> String {
    let mut out = String::new();

    out.push_str("=== bubble - Catenary Boundary Fit ===\n");
    out.push_str(&format!(
        "Boundary: d={:.4} | l={:.4} (endpoint height d/2={:.4})\n",
        spec.diameter,
        spec.span,
        spec.endpoint_height()
    ));
    out.push_str(&format!(
        "Search: precision={:.1e} | levels={}/{} | converged: {}\n",
        config.precision,
        outcome.levels,
        config.max_levels,
        if outcome.converged { "yes" } else { "no" }
    ));

    let feasible_min = min_feasible_diameter(spec.span);
    if spec.diameter < feasible_min {
        out.push_str(&format!(
            "Note: d={:.4} is below the feasible minimum {:.4} for this span; \
             no exact catenary exists and the fit is best-effort.\n",
            spec.diameter, feasible_min
        ));
    }

    out.push_str(&format!(
        "Params: a={:.7} b={:.7}\n",
        outcome.params.a, outcome.params.b
    ));
    out.push_str(&format!("Boundary error: {:.3e}\n", outcome.error));

    out.push_str("\nProperties:\n");
    out.push_str(&format!(
        "- area      : {:.7} (bounding rectangle d*l = {:.7})\n",
        props.area,
        spec.diameter * spec.span
    ));
    out.push_str(&format!("- mid radius: {:.7}\n", props.mid_radius));
    out.push_str(&format!("- mid dip   : {:.7}\n", props.mid_dip));
    out.push_str(&format!("- mid gap   : {:.7}\n", props.mid_gap));

    out
}

/// Format a span sweep as a fixed-width table.
pub fn format_sweep(diameter: f64, rows: &[SweepRow]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== bubble - Span Sweep (d={diameter:.4}) ===\n"));
    out.push_str(&format!(
        "Feasible spans: l <= {:.4}\n\n",
        diameter / (min_feasible_diameter(1.0))
    ));

    out.push_str(&format!(
        "{:>10} {:>12} {:>12} {:>12} {:>5} {:>12} {:>12}\n",
        "span", "a", "b", "error", "conv", "mid_dip", "area"
    ));
    out.push_str(&format!(
        "{:->10} {:->12} {:->12} {:->12} {:->5} {:->12} {:->12}\n",
        "", "", "", "", "", "", ""
    ));

    for row in rows {
        out.push_str(&format!(
            "{:>10.4} {:>12.7} {:>12.7} {:>12.3e} {:>5} {:>12.7} {:>12.7}\n",
            row.span,
            row.outcome.params.a,
            row.outcome.params.b,
            row.outcome.error,
            if row.outcome.converged { "yes" } else { "no" },
            row.properties.mid_dip,
            row.properties.area,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveParams, CurveProperties};

    fn sample_outcome() -> FitOutcome {
        FitOutcome {
            params: CurveParams { a: 0.16, b: 0.3 },
            error: 3.2e-9,
            converged: true,
            levels: 22,
        }
    }

    fn sample_props() -> CurveProperties {
        CurveProperties {
            area: 0.163,
            mid_radius: 0.16,
            mid_dip: 0.374,
            mid_gap: 0.32,
        }
    }

    #[test]
    fn summary_mentions_params_and_properties() {
        let spec = BoundarySpec::new(1.068, 0.6).unwrap();
        let text = format_fit_summary(
            &spec,
            &FitConfig::default(),
            &sample_outcome(),
            &sample_props(),
        );
        assert!(text.contains("converged: yes"));
        assert!(text.contains("a=0.1600000"));
        assert!(text.contains("mid dip"));
        assert!(!text.contains("below the feasible minimum"));
    }

    #[test]
    fn summary_warns_on_unfittable_geometry() {
        // d = 1 with l = 1 is below the catenoid bound.
        let spec = BoundarySpec::new(1.0, 1.0).unwrap();
        let outcome = FitOutcome {
            converged: false,
            ..sample_outcome()
        };
        let text = format_fit_summary(&spec, &FitConfig::default(), &outcome, &sample_props());
        assert!(text.contains("converged: no"));
        assert!(text.contains("below the feasible minimum"));
    }

    #[test]
    fn sweep_table_has_one_line_per_row() {
        let rows = vec![
            SweepRow {
                span: 0.3,
                outcome: sample_outcome(),
                properties: sample_props(),
            },
            SweepRow {
                span: 0.6,
                outcome: sample_outcome(),
                properties: sample_props(),
            },
        ];
        let text = format_sweep(1.068, &rows);
        let data_lines = text
            .lines()
            .filter(|l| l.trim_start().starts_with("0."))
            .count();
        assert_eq!(data_lines, 2);
    }
}
