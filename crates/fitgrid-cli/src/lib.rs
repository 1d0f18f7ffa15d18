//! CLI library components for fitgrid.

pub mod logging;
pub mod pipeline;
pub mod types;
