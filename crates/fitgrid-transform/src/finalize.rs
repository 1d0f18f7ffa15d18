//! Null removal, integer casting and final ordering.

use fitgrid_model::{AlignedRow, FinalRow};

/// Result of the finalize stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeOutput {
    /// Rows sorted by `(subject, minute)`.
    pub rows: Vec<FinalRow>,
    /// Rows dropped because their heart rate stayed undefined.
    pub dropped: usize,
}

/// Drops rows with an undefined heart rate, casts steps to an integer and
/// sorts by subject then minute.
pub fn finalize(rows: Vec<AlignedRow>) -> FinalizeOutput {
    let total = rows.len();
    let mut kept: Vec<FinalRow> = rows
        .into_iter()
        .filter_map(|row| {
            let heart_rate = row.heart_rate?;
            Some(FinalRow {
                subject_id: row.subject_id,
                minute: row.minute,
                steps: cast_steps(row.steps),
                sleep: row.sleep,
                heart_rate,
            })
        })
        .collect();
    kept.sort_by(|a, b| {
        a.subject_id
            .cmp(&b.subject_id)
            .then_with(|| a.minute.cmp(&b.minute))
    });
    let dropped = total - kept.len();
    FinalizeOutput {
        rows: kept,
        dropped,
    }
}

/// Rounds a step sum to the nearest integer; sums of integral counts are
/// exact already.
fn cast_steps(steps: f64) -> i64 {
    // `as` saturates on out-of-range values.
    steps.round() as i64
}
