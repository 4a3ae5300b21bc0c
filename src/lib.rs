//! `bubble-cosh` library crate.
//!
//! Fits a catenary `y = a·cosh((x−b)/a)` to the two hoop boundary points
//! `(0, d/2)` and `(l, d/2)` and derives closed-form properties of the
//! fitted curve (area, mid radius, mid dip, mid gap).
//!
//! The binary (`bubble`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows
//!
//! The two entry points the shell cares about are [`fit::fit`] and
//! [`geometry::properties`]; everything else is presentation.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
