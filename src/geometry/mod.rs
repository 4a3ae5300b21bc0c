//! Curve evaluation and closed-form properties of a fitted catenary.

pub mod curve;
pub mod properties;

pub use curve::*;
pub use properties::*;
