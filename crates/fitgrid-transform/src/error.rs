use thiserror::Error;

/// Per-field parse failure.
///
/// Never fatal for a run: callers either drop the row or substitute the
/// column's default.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,

    #[error("timestamp '{value}' does not match format '{format}': {source}")]
    Timestamp {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("'{value}' is not a number")]
    Numeric { value: String },

    #[error("'{value}' is not a finite number")]
    NonFinite { value: String },
}
