//! File input/output: curve JSON and sweep CSV exports.

pub mod curve;
pub mod export;
