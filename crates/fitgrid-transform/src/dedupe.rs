//! Per-source deduplication to one value per `(subject, minute)`.

use std::collections::BTreeMap;

use fitgrid_model::{DedupedTable, MinuteKey, Reducer, SourceTable, TypedRecord};

use crate::datetime::floor_to_minute;

/// Running aggregate for one reducer.
///
/// Null inputs are skipped: a mean or max over no present values is null,
/// a sum over no present values is zero.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Accumulator {
    reducer: Reducer,
    present: usize,
    sum: f64,
    max: f64,
}

impl Accumulator {
    pub(crate) fn new(reducer: Reducer) -> Self {
        Self {
            reducer,
            present: 0,
            sum: 0.0,
            max: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.present += 1;
            self.sum += value;
            self.max = self.max.max(value);
        }
    }

    pub(crate) fn finish(&self) -> Option<f64> {
        match self.reducer {
            Reducer::Sum => Some(self.sum),
            Reducer::Max if self.present > 0 => Some(self.max),
            Reducer::Mean if self.present > 0 => Some(self.sum / self.present as f64),
            Reducer::Max | Reducer::Mean => None,
        }
    }
}

/// Reduces a typed source table with the source's fixed reducer.
///
/// A minute with no contributing rows has no entry; absence is never
/// turned into an explicit zero here.
pub fn dedupe_source(table: SourceTable<TypedRecord>) -> DedupedTable {
    let source = table.source;
    let reducer = source.reducer();
    let mut buckets: BTreeMap<MinuteKey, Accumulator> = BTreeMap::new();
    for record in table.records {
        let key = (record.subject_id, floor_to_minute(record.time));
        buckets
            .entry(key)
            .or_insert_with(|| Accumulator::new(reducer))
            .push(record.value);
    }
    let rows = buckets
        .into_iter()
        .map(|(key, acc)| (key, acc.finish()))
        .collect();
    DedupedTable { source, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use fitgrid_model::{Source, SubjectId};

    fn at(m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 4, 12, 9, m, s).unwrap()
    }

    fn typed(subject: &str, time: DateTime<Utc>, value: Option<f64>) -> TypedRecord {
        TypedRecord {
            subject_id: SubjectId::new(subject).unwrap(),
            time,
            value,
        }
    }

    fn key(subject: &str, m: u32) -> MinuteKey {
        (SubjectId::new(subject).unwrap(), at(m, 0))
    }

    #[test]
    fn heart_rate_averages_within_minute() {
        let table = SourceTable::new(
            Source::HeartRate,
            vec![
                typed("A", at(0, 5), Some(70.0)),
                typed("A", at(0, 10), Some(74.0)),
                typed("A", at(0, 15), None),
                typed("A", at(1, 0), Some(90.0)),
            ],
        );
        let deduped = dedupe_source(table);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped.get(&key("A", 0)), Some(Some(72.0)));
        assert_eq!(deduped.get(&key("A", 1)), Some(Some(90.0)));
    }

    #[test]
    fn all_null_heart_rate_minute_keeps_a_null_row() {
        let table = SourceTable::new(Source::HeartRate, vec![typed("A", at(0, 5), None)]);
        let deduped = dedupe_source(table);
        assert_eq!(deduped.get(&key("A", 0)), Some(None));
    }

    #[test]
    fn steps_sum_and_sleep_max() {
        let rows = vec![
            typed("A", at(0, 0), Some(2.0)),
            typed("A", at(0, 30), Some(3.0)),
            typed("B", at(0, 0), Some(1.0)),
        ];
        let steps = dedupe_source(SourceTable::new(Source::Steps, rows.clone()));
        let sleep = dedupe_source(SourceTable::new(Source::Sleep, rows));
        assert_eq!(steps.get(&key("A", 0)), Some(Some(5.0)));
        assert_eq!(sleep.get(&key("A", 0)), Some(Some(3.0)));
        assert_eq!(steps.get(&key("B", 0)), Some(Some(1.0)));
    }

    #[test]
    fn absent_minutes_have_no_row() {
        let table = SourceTable::new(Source::Steps, vec![typed("A", at(0, 0), Some(0.0))]);
        let deduped = dedupe_source(table);
        assert_eq!(deduped.get(&key("A", 1)), None);
        assert_eq!(deduped.get(&key("A", 0)), Some(Some(0.0)));
    }
}
