//! CLI library components for the rigidity validator.

pub mod check;
pub mod logging;
