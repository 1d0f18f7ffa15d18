//! Error types for record reading.

use std::path::PathBuf;

use fitgrid_model::Source;
use thiserror::Error;

/// Why a source could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    NotFound,
    Unreadable(String),
    MissingColumn(String),
}

impl std::fmt::Display for MissingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("file not found"),
            Self::Unreadable(message) => write!(f, "unreadable: {message}"),
            Self::MissingColumn(column) => write!(f, "required column '{column}' not found"),
        }
    }
}

/// Errors that can occur while reading sources.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A required source could not be located or read. Fatal for the run.
    #[error("{source_kind} source missing at {path}: {reason}")]
    MissingSource {
        source_kind: Source,
        path: PathBuf,
        reason: MissingReason,
    },
}

impl IngestError {
    pub fn missing(source_kind: Source, path: impl Into<PathBuf>, reason: MissingReason) -> Self {
        Self::MissingSource {
            source_kind,
            path: path.into(),
            reason,
        }
    }

    pub fn source_kind(&self) -> Source {
        match self {
            Self::MissingSource { source_kind, .. } => *source_kind,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::missing(
            Source::Sleep,
            "/data/minuteSleep_merged.csv",
            MissingReason::NotFound,
        );
        assert_eq!(
            err.to_string(),
            "sleep source missing at /data/minuteSleep_merged.csv: file not found"
        );
    }

    #[test]
    fn test_missing_column_display() {
        let err = IngestError::missing(
            Source::HeartRate,
            "hr.csv",
            MissingReason::MissingColumn("Value".to_string()),
        );
        assert!(err.to_string().contains("required column 'Value' not found"));
        assert_eq!(err.source_kind(), Source::HeartRate);
    }
}
