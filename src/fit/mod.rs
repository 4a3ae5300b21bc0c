//! Parameter fitting.
//!
//! Responsibilities:
//!
//! - score candidate `(a, b)` pairs against the boundary conditions
//! - run the coarse-to-fine lattice search that drives the score to zero
//! - report non-convergence via a flag, never by looping forever

pub mod evaluator;
pub mod search;

pub use evaluator::*;
pub use search::*;
