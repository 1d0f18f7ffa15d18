//! Type coercion of raw values.
//!
//! Parsing and defaulting are kept apart: [`parse_numeric`] reports failure,
//! and [`coerce_values`] applies the source's [`CoercionPolicy`].

use fitgrid_model::{CoercionPolicy, RawCell, SourceTable, TimedRecord, TypedRecord};

use crate::error::ParseError;

/// Parses a raw cell as a finite `f64`.
pub fn parse_numeric(cell: &RawCell) -> Result<f64, ParseError> {
    let value = match cell {
        RawCell::Missing => return Err(ParseError::Empty),
        RawCell::Int(v) => *v as f64,
        RawCell::Float(v) => *v,
        RawCell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ParseError::Empty);
            }
            trimmed.parse::<f64>().map_err(|_| ParseError::Numeric {
                value: trimmed.to_string(),
            })?
        }
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite {
            value: cell.to_text(),
        })
    }
}

/// Applies a coercion policy to a parse result.
pub fn apply_policy(parsed: Result<f64, ParseError>, policy: CoercionPolicy) -> Option<f64> {
    match (parsed, policy) {
        (Ok(value), _) => Some(value),
        (Err(_), CoercionPolicy::DefaultZero) => Some(0.0),
        (Err(_), CoercionPolicy::LeaveNull) => None,
    }
}

/// Coerces every value with the table's source policy.
///
/// Returns the typed table and the number of values that failed to parse.
pub fn coerce_values(table: SourceTable<TimedRecord>) -> (SourceTable<TypedRecord>, usize) {
    let source = table.source;
    let policy = source.coercion_policy();
    let mut failed = 0usize;
    let records = table
        .records
        .into_iter()
        .map(|record| {
            let parsed = parse_numeric(&record.raw_value);
            if parsed.is_err() {
                failed += 1;
            }
            TypedRecord {
                subject_id: record.subject_id,
                time: record.time,
                value: apply_policy(parsed, policy),
            }
        })
        .collect();
    (SourceTable::new(source, records), failed)
}
