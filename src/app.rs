//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit (or sweep) pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, PlotArgs, SweepArgs};
use crate::domain::{BoundarySpec, FitConfig, SweepRow};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bubble` binary.
pub fn run() -> Result<(), AppError> {
    // We want `bubble` and `bubble -d 1.068 -l 0.6` to behave like
    // `bubble tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sweep(args) => handle_sweep(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let spec = BoundarySpec::new(args.diameter, args.span)?;
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&spec, &config)?;

    println!(
        "{}",
        crate::report::format_fit_summary(&spec, &config, &run.outcome, &run.properties)
    );

    if config.plot {
        let plot = crate::plot::render_fit_plot(
            &spec,
            &run.outcome.params,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_curve {
        let curve = crate::io::curve::curve_file_from_fit(&spec, &run.outcome, &run.properties);
        crate::io::curve::write_curve_json(path, &curve)?;
    }

    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let span_max = args.span_max.unwrap_or(args.diameter);
    if !(args.span_min.is_finite() && args.span_min > 0.0 && span_max > args.span_min) {
        return Err(AppError::invalid_input(format!(
            "Invalid sweep range: span_min={}, span_max={span_max} (must be finite, >0, and max>min).",
            args.span_min
        )));
    }
    if args.steps < 2 {
        return Err(AppError::invalid_input("Sweep steps must be >= 2."));
    }

    let config = FitConfig {
        precision: args.precision,
        plot: false,
        ..FitConfig::default()
    };

    let mut rows = Vec::with_capacity(args.steps);
    for i in 0..args.steps {
        let u = i as f64 / (args.steps as f64 - 1.0);
        let span = args.span_min + u * (span_max - args.span_min);
        let spec = BoundarySpec::new(args.diameter, span)?;
        let run = pipeline::run_fit(&spec, &config)?;
        rows.push(SweepRow {
            span,
            outcome: run.outcome,
            properties: run.properties,
        });
    }

    println!("{}", crate::report::format_sweep(args.diameter, &rows));

    if let Some(path) = &args.export {
        crate::io::export::write_sweep_csv(path, args.diameter, &rows)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_curve_file_plot(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

fn handle_tui(args: FitArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        precision: args.precision,
        max_levels: args.max_levels,
        grid_steps: args.grid_steps,
        shrink_factor: args.shrink,
        a_floor: FitConfig::default().a_floor,
        a_max_factor: args.a_max_factor,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_curve: args.export_curve.clone(),
    }
}

/// Rewrite argv so `bubble` defaults to `bubble tui`.
///
/// Rules:
/// - `bubble`                    -> `bubble tui`
/// - `bubble -d 1.0 ...`         -> `bubble tui -d 1.0 ...`
/// - `bubble --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "sweep" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_tui() {
        assert_eq!(rewrite_args(argv(&["bubble"])), argv(&["bubble", "tui"]));
    }

    #[test]
    fn leading_flag_becomes_tui_flags() {
        assert_eq!(
            rewrite_args(argv(&["bubble", "-d", "1.068"])),
            argv(&["bubble", "tui", "-d", "1.068"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["bubble", "fit", "-l", "0.6"])),
            argv(&["bubble", "fit", "-l", "0.6"])
        );
        assert_eq!(rewrite_args(argv(&["bubble", "--help"])), argv(&["bubble", "--help"]));
    }
}
