//! Terminal plotting of fitted curves.

pub mod ascii;

pub use ascii::*;
