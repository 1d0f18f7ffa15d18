//! Inner join of the three deduplicated sources.

use std::collections::BTreeMap;

use fitgrid_model::{DedupedTable, MergedRow, Source};

/// Result of the merge stage.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutput {
    /// Rows ordered by `(subject, minute)`.
    pub rows: Vec<MergedRow>,
    /// Per-source count of keys that had no partner in every other source.
    pub join_dropped: BTreeMap<Source, usize>,
}

/// Keeps only `(subject, minute)` keys present in all three tables.
///
/// The join is on exact key equality, so the result does not depend on the
/// order the tables are combined in.
pub fn merge_sources(
    steps: DedupedTable,
    mut sleep: DedupedTable,
    mut heart_rate: DedupedTable,
) -> MergeOutput {
    debug_assert_eq!(steps.source, Source::Steps);
    debug_assert_eq!(sleep.source, Source::Sleep);
    debug_assert_eq!(heart_rate.source, Source::HeartRate);

    let sizes = [
        (Source::Steps, steps.len()),
        (Source::Sleep, sleep.len()),
        (Source::HeartRate, heart_rate.len()),
    ];

    let mut rows = Vec::new();
    for (key, steps_value) in steps.rows {
        let (Some(sleep_value), Some(heart_rate_value)) =
            (sleep.rows.remove(&key), heart_rate.rows.remove(&key))
        else {
            continue;
        };
        let (subject_id, minute) = key;
        rows.push(MergedRow {
            subject_id,
            minute,
            // Steps and sleep are never null after coercion.
            steps: steps_value.unwrap_or(0.0),
            sleep: sleep_value.unwrap_or(0.0),
            heart_rate: heart_rate_value,
        });
    }

    let join_dropped = sizes
        .into_iter()
        .map(|(source, size)| (source, size - rows.len()))
        .collect();
    MergeOutput { rows, join_dropped }
}
