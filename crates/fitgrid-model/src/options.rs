//! Configuration options for a pipeline run.

use serde::{Deserialize, Serialize};

/// Input timestamp pattern: month/day/year with a 12-hour clock and meridiem.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Scope of the median used to fill heart rate on synthesized minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateFill {
    /// Median of the subject's own observed heart-rate values.
    #[default]
    SubjectMedian,
    /// Median of every observed heart-rate value in the merged table.
    GlobalMedian,
}

/// Options controlling the alignment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    pub heart_rate_fill: HeartRateFill,
    /// chrono format string every input timestamp must match exactly.
    pub timestamp_format: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            heart_rate_fill: HeartRateFill::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_heart_rate_fill(mut self, fill: HeartRateFill) -> Self {
        self.heart_rate_fill = fill;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}
