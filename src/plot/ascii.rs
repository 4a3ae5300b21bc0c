//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - hoop endpoints: `o`
//! - fitted curve: `-` line
//! - chord at the endpoint height `d/2`: `.`
//! - curve midpoint (the film's neck): `+`

use crate::domain::{BoundarySpec, CurveFile, CurveParams};
use crate::geometry::{catenary_height, sample_curve};

/// Render a plot for an in-memory fit result.
pub fn render_fit_plot(
    spec: &BoundarySpec,
    params: &CurveParams,
    width: usize,
    height: usize,
) -> String {
    let curve = sample_curve(params, 0.0, spec.span, width.max(2));
    let mid = (
        spec.span / 2.0,
        catenary_height(params.a, params.b, spec.span / 2.0),
    );
    render_plot(spec, &curve, Some(mid), width, height)
}

/// Render a plot from a saved curve JSON file.
pub fn render_curve_file_plot(curve: &CurveFile, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = curve
        .grid
        .x
        .iter()
        .zip(curve.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    let mid = (curve.spec.span / 2.0, curve.properties.mid_radius);
    render_plot(&curve.spec, &points, Some(mid), width, height)
}

fn render_plot(
    spec: &BoundarySpec,
    curve: &[(f64, f64)],
    mid: Option<(f64, f64)>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let x_min = 0.0;
    let x_max = spec.span;
    let chord = spec.endpoint_height();

    // Y-range covers the curve plus the chord (the chord can sit above the
    // whole curve when the fit sags, or below it on best-effort fits).
    let (y_min, y_max) = y_range(curve, chord).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Chord first, then the curve, then markers, so each layer can overlay
    // the previous one.
    let chord_row = map_y(chord, y_min, y_max, height);
    for cell in grid[chord_row].iter_mut() {
        if *cell == ' ' {
            *cell = '.';
        }
    }

    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    if let Some((mx, my)) = mid {
        let x = map_x(mx, x_min, x_max, width);
        let y = map_y(my, y_min, y_max, height);
        grid[y][x] = '+';
    }
    for x_endpoint in [x_min, x_max] {
        let x = map_x(x_endpoint, x_min, x_max, width);
        grid[chord_row][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.4}, {y_max:.4}] | chord d/2={chord:.4}\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(curve: &[(f64, f64)], chord: f64) -> Option<(f64, f64)> {
    let mut min_y = chord;
    let mut max_y = chord;
    for &(_, y) in curve {
        if !y.is_finite() {
            continue;
        }
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, cx, cy, '-');
        } else {
            grid[cy][cx] = '-';
        }
        prev = Some((cx, cy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && matches!(grid[y0 as usize][x0 as usize], ' ' | '.')
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> (BoundarySpec, CurveParams) {
        // Near the reference-scenario fit; exactness does not matter for
        // raster structure.
        (
            BoundarySpec::new(1.068, 0.6).unwrap(),
            CurveParams { a: 0.16, b: 0.3 },
        )
    }

    #[test]
    fn plot_has_expected_raster_shape() {
        let (spec, params) = fitted();
        let txt = render_fit_plot(&spec, &params, 40, 12);

        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 13); // header + rows
        assert!(lines[0].starts_with("Plot: x=[0.000, 0.600]"));
        for row in &lines[1..] {
            assert_eq!(row.chars().count(), 40);
        }
    }

    #[test]
    fn plot_marks_both_hoops_and_the_neck() {
        let (spec, params) = fitted();
        let txt = render_fit_plot(&spec, &params, 40, 12);

        // Count over the raster rows only; the header text contains 'o's of
        // its own.
        let raster: String = txt.lines().skip(1).collect();
        let hoops = raster.chars().filter(|&c| c == 'o').count();
        let necks = raster.chars().filter(|&c| c == '+').count();
        assert_eq!(hoops, 2);
        assert_eq!(necks, 1);
        assert!(raster.contains('-'), "curve line missing");
        assert!(raster.contains('.'), "chord missing");
    }

    #[test]
    fn plot_is_deterministic() {
        let (spec, params) = fitted();
        let one = render_fit_plot(&spec, &params, 60, 20);
        let two = render_fit_plot(&spec, &params, 60, 20);
        assert_eq!(one, two);
    }
}
