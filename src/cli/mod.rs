//! Command-line parsing for the catenary boundary fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bubble", version, about = "Catenary boundary fitter (soap film between two hoops)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a catenary to one (diameter, span) pair, print the derived
    /// properties, and optionally plot/export.
    Fit(FitArgs),
    /// Fit a range of spans against one diameter and tabulate the results.
    Sweep(SweepArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying fit pipeline as `bubble fit`, but lets
    /// you nudge the diameter and span live and watch the curve refit.
    Tui(FitArgs),
}

/// Common options for fitting. The defaults reproduce the reference hoop
/// experiment (d = 1.068, l = 0.6).
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Hoop diameter d (twice the endpoint height).
    #[arg(short = 'd', long, default_value_t = 1.068)]
    pub diameter: f64,

    /// Horizontal span l between the hoops.
    #[arg(short = 'l', long, default_value_t = 0.6)]
    pub span: f64,

    /// Target boundary error.
    #[arg(long, default_value_t = 1e-7)]
    pub precision: f64,

    /// Refinement-level budget per search pass.
    #[arg(long, default_value_t = 64)]
    pub max_levels: usize,

    /// Lattice points per parameter per refinement level.
    #[arg(long, default_value_t = 21)]
    pub grid_steps: usize,

    /// Region shrink factor per refinement level.
    #[arg(long, default_value_t = 2.0)]
    pub shrink: f64,

    /// Upper seed bound for `a`, as a multiple of the span.
    #[arg(long, default_value_t = 4.0)]
    pub a_max_factor: f64,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the fitted curve (spec + params + properties + grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for sweeping the span at a fixed diameter.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Hoop diameter d held fixed across the sweep.
    #[arg(short = 'd', long, default_value_t = 1.0)]
    pub diameter: f64,

    /// Smallest span to fit.
    #[arg(long, default_value_t = 0.01)]
    pub span_min: f64,

    /// Largest span to fit (defaults to the diameter, which deliberately
    /// includes the unfittable tail beyond the catenoid bound).
    #[arg(long)]
    pub span_max: Option<f64>,

    /// Number of spans in the sweep.
    #[arg(long, default_value_t = 100)]
    pub steps: usize,

    /// Target boundary error per fit.
    #[arg(long, default_value_t = 1e-7)]
    pub precision: f64,

    /// Export per-span results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `bubble fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
