//! Schema normalization.
//!
//! The reader has already relabelled source columns onto
//! `(subject id, timestamp, value)`. This stage turns the subject id text into
//! a [`SubjectId`] and performs no value transformation.

use fitgrid_model::{NormalizedRecord, RawRecord, SourceTable, SubjectId};

/// Validates subject ids. Returns the normalized table and the number of rows
/// dropped for a blank subject id.
pub fn normalize_schema(
    table: SourceTable<RawRecord>,
) -> (SourceTable<NormalizedRecord>, usize) {
    let source = table.source;
    let mut dropped = 0usize;
    let mut records = Vec::with_capacity(table.records.len());
    for record in table.records {
        match SubjectId::new(record.subject_id) {
            Ok(subject_id) => records.push(NormalizedRecord {
                subject_id,
                raw_time: record.raw_time,
                raw_value: record.raw_value,
            }),
            Err(_) => dropped += 1,
        }
    }
    (SourceTable::new(source, records), dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitgrid_model::{RawCell, Source};

    #[test]
    fn keeps_values_untouched() {
        let table = SourceTable::new(
            Source::Steps,
            vec![RawRecord::new(" 42 ", "4/12/2016 9:00:00 AM", "not-a-number")],
        );
        let (normalized, dropped) = normalize_schema(table);
        assert_eq!(dropped, 0);
        assert_eq!(normalized.records[0].subject_id.as_str(), "42");
        assert_eq!(normalized.records[0].raw_time, "4/12/2016 9:00:00 AM");
        assert_eq!(
            normalized.records[0].raw_value,
            RawCell::Text("not-a-number".to_string())
        );
    }

    #[test]
    fn drops_blank_subjects() {
        let table = SourceTable::new(
            Source::Sleep,
            vec![
                RawRecord::new("", "4/12/2016 9:00:00 AM", 1_i64),
                RawRecord::new("A", "4/12/2016 9:00:00 AM", 1_i64),
            ],
        );
        let (normalized, dropped) = normalize_schema(table);
        assert_eq!(dropped, 1);
        assert_eq!(normalized.len(), 1);
    }
}
