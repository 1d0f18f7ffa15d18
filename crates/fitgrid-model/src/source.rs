//! The three input streams and their fixed per-source semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An independently sampled input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Sleep,
    Steps,
    HeartRate,
}

impl Source {
    /// All sources, in join order (steps, sleep, heart rate).
    pub const ALL: [Source; 3] = [Source::Steps, Source::Sleep, Source::HeartRate];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Steps => "steps",
            Self::HeartRate => "heart_rate",
        }
    }

    /// File name looked up in the input folder when no override is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Sleep => "minuteSleep_merged.csv",
            Self::Steps => "minuteStepsNarrow_merged.csv",
            Self::HeartRate => "heartrate_seconds_merged.csv",
        }
    }

    /// Reducer used when several samples fall into the same minute.
    pub fn reducer(self) -> Reducer {
        match self {
            // Sleep state is ordinal; the highest state in a minute dominates.
            Self::Sleep => Reducer::Max,
            Self::Steps => Reducer::Sum,
            Self::HeartRate => Reducer::Mean,
        }
    }

    /// What a value that fails numeric coercion becomes.
    pub fn coercion_policy(self) -> CoercionPolicy {
        match self {
            Self::Sleep | Self::Steps => CoercionPolicy::DefaultZero,
            Self::HeartRate => CoercionPolicy::LeaveNull,
        }
    }

    pub fn schema(self) -> SourceSchema {
        match self {
            Self::Sleep => SourceSchema::new("Id", "date", "value"),
            Self::Steps => SourceSchema::new("Id", "ActivityMinute", "Steps"),
            Self::HeartRate => SourceSchema::new("Id", "Time", "Value"),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-specific column names mapped onto the common
/// `(subject id, timestamp, value)` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSchema {
    pub subject_column: String,
    pub time_column: String,
    pub value_column: String,
}

impl SourceSchema {
    pub fn new(
        subject_column: impl Into<String>,
        time_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            subject_column: subject_column.into(),
            time_column: time_column.into(),
            value_column: value_column.into(),
        }
    }

    pub fn columns(&self) -> [&str; 3] {
        [
            self.subject_column.as_str(),
            self.time_column.as_str(),
            self.value_column.as_str(),
        ]
    }
}

/// Per-minute aggregation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    Max,
    Sum,
    Mean,
}

impl Reducer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Mean => "mean",
        }
    }
}

/// Defaulting applied when a value cannot be coerced to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Substitute `0`.
    DefaultZero,
    /// Keep the value unresolved; the resampler fills it later.
    LeaveNull,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reducers_are_fixed_per_source() {
        assert_eq!(Source::Sleep.reducer(), Reducer::Max);
        assert_eq!(Source::Steps.reducer(), Reducer::Sum);
        assert_eq!(Source::HeartRate.reducer(), Reducer::Mean);
    }

    #[test]
    fn heart_rate_has_no_safe_default() {
        assert_eq!(Source::HeartRate.coercion_policy(), CoercionPolicy::LeaveNull);
        assert_eq!(Source::Steps.coercion_policy(), CoercionPolicy::DefaultZero);
    }
}
