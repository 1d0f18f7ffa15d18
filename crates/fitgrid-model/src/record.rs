//! Row types for each pipeline stage.
//!
//! | stage | row |
//! |---|---|
//! | reader | [`RawRecord`] |
//! | schema normalizer | [`NormalizedRecord`] |
//! | timestamp normalizer | [`TimedRecord`] |
//! | type coercer | [`TypedRecord`] |
//! | deduplicator | [`DedupedTable`] |
//! | merger | [`MergedRow`] |
//! | resampler | [`AlignedRow`] |
//! | finalizer | [`FinalRow`] |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RawCell, Source, SubjectId};

/// Alignment key: a subject and a timestamp truncated to the start of its minute.
pub type MinuteKey = (SubjectId, DateTime<Utc>);

/// A table of rows from a single source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable<R> {
    pub source: Source,
    pub records: Vec<R>,
}

impl<R> SourceTable<R> {
    pub fn new(source: Source, records: Vec<R>) -> Self {
        Self { source, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A row as read from a source file, already relabelled onto the common shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub subject_id: String,
    pub raw_time: String,
    pub raw_value: RawCell,
}

impl RawRecord {
    pub fn new(
        subject_id: impl Into<String>,
        raw_time: impl Into<String>,
        raw_value: impl Into<RawCell>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            raw_time: raw_time.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// A raw row whose subject id has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub subject_id: SubjectId,
    pub raw_time: String,
    pub raw_value: RawCell,
}

/// A row with a parsed, UTC-normalized timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRecord {
    pub subject_id: SubjectId,
    pub time: DateTime<Utc>,
    pub raw_value: RawCell,
}

/// A row with its value coerced to the canonical numeric type.
///
/// `value` is `None` only for sources whose coercion policy leaves failures
/// unresolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    pub subject_id: SubjectId,
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

/// One value per `(subject, minute)` for a single source.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupedTable {
    pub source: Source,
    pub rows: BTreeMap<MinuteKey, Option<f64>>,
}

impl DedupedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &MinuteKey) -> Option<Option<f64>> {
        self.rows.get(key).copied()
    }
}

/// A minute observed by all three sources.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub subject_id: SubjectId,
    pub minute: DateTime<Utc>,
    pub steps: f64,
    pub sleep: f64,
    pub heart_rate: Option<f64>,
}

/// A row on a subject's contiguous one-minute grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    pub subject_id: SubjectId,
    pub minute: DateTime<Utc>,
    pub steps: f64,
    pub sleep: f64,
    /// `None` when the fill value for this subject is undefined.
    pub heart_rate: Option<f64>,
}

/// Output contract: a fully resolved grid row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRow {
    pub subject_id: SubjectId,
    pub minute: DateTime<Utc>,
    pub steps: i64,
    pub sleep: f64,
    pub heart_rate: f64,
}

impl FinalRow {
    pub fn key(&self) -> (&SubjectId, DateTime<Utc>) {
        (&self.subject_id, self.minute)
    }
}

/// The three raw source tables read for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSources {
    pub sleep: SourceTable<RawRecord>,
    pub steps: SourceTable<RawRecord>,
    pub heart_rate: SourceTable<RawRecord>,
}

impl RawSources {
    pub fn into_tables(self) -> [SourceTable<RawRecord>; 3] {
        [self.steps, self.sleep, self.heart_rate]
    }
}
