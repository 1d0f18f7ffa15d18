//! Timestamp normalization.
//!
//! Input timestamps carry no zone designator. They are parsed against a single
//! fixed pattern and pinned to UTC, so minute bucketing is unambiguous. A row
//! whose timestamp does not parse has no recoverable minute key and is dropped.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use fitgrid_model::{NormalizedRecord, SourceTable, TimedRecord};

use crate::error::ParseError;

/// Parses `value` against `format` exactly and returns the UTC instant.
///
/// # Examples
///
/// ```
/// use fitgrid_model::DEFAULT_TIMESTAMP_FORMAT;
/// use fitgrid_transform::parse_timestamp;
///
/// let time = parse_timestamp("4/12/2016 7:21:05 PM", DEFAULT_TIMESTAMP_FORMAT).unwrap();
/// assert_eq!(time.to_rfc3339(), "2016-04-12T19:21:05+00:00");
/// assert!(parse_timestamp("2016-04-12 19:21:05", DEFAULT_TIMESTAMP_FORMAT).is_err());
/// ```
pub fn parse_timestamp(value: &str, format: &str) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    NaiveDateTime::parse_from_str(trimmed, format)
        .map(|naive| naive.and_utc())
        .map_err(|source| ParseError::Timestamp {
            value: trimmed.to_string(),
            format: format.to_string(),
            source,
        })
}

/// Truncates an instant to the start of its minute.
pub fn floor_to_minute(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Parses every row's timestamp, dropping rows that fail.
///
/// Returns the timed table and the number of rows dropped.
pub fn normalize_timestamps(
    table: SourceTable<NormalizedRecord>,
    format: &str,
) -> (SourceTable<TimedRecord>, usize) {
    let source = table.source;
    let mut dropped = 0usize;
    let mut records = Vec::with_capacity(table.records.len());
    for record in table.records {
        match parse_timestamp(&record.raw_time, format) {
            Ok(time) => records.push(TimedRecord {
                subject_id: record.subject_id,
                time,
                raw_value: record.raw_value,
            }),
            Err(error) => {
                tracing::trace!(source = %source, %error, "dropping row with unparsable timestamp");
                dropped += 1;
            }
        }
    }
    (SourceTable::new(source, records), dropped)
}
