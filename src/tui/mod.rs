//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive-widget layer of the original hoop experiment:
//! the diameter and span act as sliders, every nudge refits the curve, and
//! the chart shows the resulting film profile between the hoops. It is a
//! thin adapter over the same `fit` + `properties` pipeline the CLI uses.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::RunOutput;
use crate::cli::FitArgs;
use crate::domain::{BoundarySpec, FitConfig};
use crate::error::AppError;
use crate::fit::min_feasible_diameter;

mod plotters_chart;

use plotters_chart::CatenaryChart;

/// Slider increments cycled on the "Step" row.
const STEP_SIZES: [f64; 3] = [0.1, 0.01, 0.001];

/// Smallest diameter/span the sliders will go down to.
const SLIDER_FLOOR: f64 = 0.001;

/// Start the TUI.
pub fn run(args: FitArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: FitConfig,
    diameter: f64,
    span: f64,
    step_idx: usize,
    selected_field: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: FitArgs) -> Result<Self, AppError> {
        let mut app = Self {
            config: crate::app::fit_config_from_args(&args),
            diameter: args.diameter,
            span: args.span,
            step_idx: 1,
            selected_field: 0,
            status: "Fitting...".to_string(),
            run: None,
        };
        app.refit();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 2 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1.0),
            KeyCode::Right => self.adjust_field(1.0),
            KeyCode::Char('r') => {
                self.refit();
            }
            KeyCode::Char('e') => {
                self.export_curve();
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, sign: f64) {
        match self.selected_field {
            0 => {
                self.diameter = (self.diameter + sign * self.step()).max(SLIDER_FLOOR);
                self.refit();
            }
            1 => {
                self.span = (self.span + sign * self.step()).max(SLIDER_FLOOR);
                self.refit();
            }
            2 => {
                let n = STEP_SIZES.len();
                self.step_idx = if sign >= 0.0 {
                    (self.step_idx + 1) % n
                } else {
                    (self.step_idx + n - 1) % n
                };
                self.status = format!("step: {}", self.step());
            }
            _ => {}
        }
    }

    fn step(&self) -> f64 {
        STEP_SIZES[self.step_idx]
    }

    fn refit(&mut self) {
        let spec = match BoundarySpec::new(self.diameter, self.span) {
            Ok(spec) => spec,
            Err(err) => {
                self.status = format!("Invalid boundary: {err}");
                return;
            }
        };
        match crate::app::pipeline::run_fit(&spec, &self.config) {
            Ok(run) => {
                self.status = if run.outcome.converged {
                    format!("Converged: error={:.2e}", run.outcome.error)
                } else {
                    format!(
                        "Best effort (error={:.2e}); feasible d >= {:.4} at this span",
                        run.outcome.error,
                        min_feasible_diameter(self.span)
                    )
                };
                self.run = Some(run);
            }
            Err(err) => {
                self.status = format!("Fit failed: {err}");
            }
        }
    }

    fn export_curve(&mut self) {
        let Some(run) = &self.run else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        let path = std::path::Path::new("bubble-curve.json");
        let curve = crate::io::curve::curve_file_from_fit(&run.spec, &run.outcome, &run.properties);
        match crate::io::curve::write_curve_json(path, &curve) {
            Ok(()) => self.status = format!("Wrote {}", path.display()),
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("bubble", Style::default().fg(Color::Cyan)),
            Span::raw(" — catenary between two hoops"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "d: {:.4} | l: {:.4} | step: {} | precision: {:.1e}",
                self.diameter,
                self.span,
                self.step(),
                self.config.precision,
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            lines.push(Line::from(Span::styled(
                format!(
                    "a={:.7} b={:.7} | error={:.2e} | dip={:.5} gap={:.5} area={:.5}",
                    run.outcome.params.a,
                    run.outcome.params.b,
                    run.outcome.error,
                    run.properties.mid_dip,
                    run.properties.mid_gap,
                    run.properties.area,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Film profile").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for first fit...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let (hoops, neck, x_bounds, y_bounds) = chart_series(run);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = CatenaryChart {
            curve: &run.curve,
            hoops: &hoops,
            neck,
            chord: run.spec.endpoint_height(),
            x_bounds,
            y_bounds,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Diameter: {:.4}", self.diameter)),
            ListItem::new(format!("Span: {:.4}", self.span)),
            ListItem::new(format!("Step: {}", self.step())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Sliders").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  r refit  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters.
fn chart_series(run: &RunOutput) -> ([(f64, f64); 2], (f64, f64), [f64; 2], [f64; 2]) {
    let half = run.spec.endpoint_height();
    let hoops = [(0.0, half), (run.spec.span, half)];
    let neck = (run.spec.span / 2.0, run.properties.mid_radius);

    let x_bounds = [0.0, run.spec.span];

    let (mut y_min, mut y_max) = (half, half);
    for &(_, y) in &run.curve {
        if !y.is_finite() {
            continue;
        }
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (hoops, neck, x_bounds, y_bounds)
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.2}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.3}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("x (span)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("y (height)")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
