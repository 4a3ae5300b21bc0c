//! Plotters-powered catenary chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call, so `render()` only draws.
pub struct CatenaryChart<'a> {
    /// Line series for the fitted catenary.
    pub curve: &'a [(f64, f64)],
    /// The two hoop attachment points at height d/2.
    pub hoops: &'a [(f64, f64); 2],
    /// The neck of the film (midpoint, minimum radius).
    pub neck: (f64, f64),
    /// Height of the chord through the hoops (d/2).
    pub chord: f64,
    /// X bounds (span axis).
    pub x_bounds: [f64; 2],
    /// Y bounds (height axis).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for CatenaryChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels, mesh lines disabled to reduce clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.2}"))
                .y_label_formatter(&|v| format!("{v:.3}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let curve_color = RGBColor(0, 255, 255); // cyan
            let chord_color = RGBColor(128, 128, 128); // gray
            let hoop_color = RGBColor(0, 255, 0); // green
            let neck_color = RGBColor(255, 0, 0); // red

            // 1) Chord through the hoop rims at height d/2.
            chart.draw_series(LineSeries::new(
                [(x0, self.chord), (x1, self.chord)],
                &chord_color,
            ))?;

            // 2) Fitted catenary profile.
            chart.draw_series(LineSeries::new(self.curve.iter().copied(), &curve_color))?;

            // 3) Markers: hoop attachments and the neck.
            //
            // We intentionally avoid `Circle` markers here. The underlying
            // `plotters-ratatui-backend` currently maps circle radii incorrectly
            // (pixel radius -> normalized canvas units), producing huge circles.
            //
            // A colored `Pixel` gives a clean dot that looks good in terminals
            // and reliably overrides the curve line underneath.
            chart.draw_series(
                self.hoops
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), hoop_color)),
            )?;
            chart.draw_series(std::iter::once(Pixel::new(self.neck, neck_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
