//! Minute-grid resampling.
//!
//! Each subject is resampled on its own grid, spanning the first to the last
//! minute that subject was observed in the merged table. Subjects share no
//! state, so they are resampled in parallel.
//!
//! Fill policy for a grid minute with no merged row:
//!
//! | column | fill |
//! |---|---|
//! | steps | `0` |
//! | sleep | `0` |
//! | heart rate | median of observed heart rate ([`HeartRateFill`] picks the scope) |
//!
//! An observed minute whose heart rate is null gets the same median.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use rayon::prelude::*;
use tracing::{debug, trace};

use fitgrid_model::{AlignedRow, HeartRateFill, MergedRow, Reducer, ResampleStats, SubjectId};

use crate::datetime::floor_to_minute;
use crate::dedupe::Accumulator;

/// Result of the resample stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleOutput {
    /// Grid rows grouped by subject; no ordering is promised across subjects.
    pub rows: Vec<AlignedRow>,
    pub stats: ResampleStats,
    pub subjects: usize,
    /// Subjects whose heart-rate fill value is undefined.
    pub undefined_fill: Vec<SubjectId>,
}

/// Median of the given values, or `None` when there are none.
///
/// An even count yields the mean of the two middle values.
///
/// # Examples
///
/// ```
/// use fitgrid_transform::median;
///
/// assert_eq!(median([80.0, 70.0]), Some(75.0));
/// assert_eq!(median([3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(std::iter::empty()), None);
/// ```
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Resamples every subject onto a contiguous one-minute grid.
pub fn resample(rows: Vec<MergedRow>, fill: HeartRateFill) -> ResampleOutput {
    let mut groups: BTreeMap<SubjectId, Vec<MergedRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.subject_id.clone()).or_default().push(row);
    }

    let global_fill = match fill {
        HeartRateFill::GlobalMedian => {
            median(groups.values().flatten().filter_map(|row| row.heart_rate))
        }
        HeartRateFill::SubjectMedian => None,
    };

    let subjects = groups.len();
    let groups: Vec<(SubjectId, Vec<MergedRow>)> = groups.into_iter().collect();
    let grids: Vec<SubjectGrid> = groups
        .into_par_iter()
        .map(|(subject, rows)| {
            let fill_value = match fill {
                HeartRateFill::SubjectMedian => median(rows.iter().filter_map(|r| r.heart_rate)),
                HeartRateFill::GlobalMedian => global_fill,
            };
            resample_subject(subject, rows, fill_value)
        })
        .collect();

    let mut output = ResampleOutput {
        rows: Vec::with_capacity(grids.iter().map(|g| g.rows.len()).sum()),
        stats: ResampleStats::default(),
        subjects,
        undefined_fill: Vec::new(),
    };
    for grid in grids {
        if grid.fill.is_none() {
            output.undefined_fill.push(grid.subject);
        }
        output.stats.absorb(grid.stats);
        output.rows.extend(grid.rows);
    }
    output
}

/// One subject's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectGrid {
    pub subject: SubjectId,
    /// Heart-rate value used for synthesized and null minutes.
    pub fill: Option<f64>,
    pub rows: Vec<AlignedRow>,
    pub stats: ResampleStats,
}

/// Per-minute aggregate using the same reducers as deduplication.
struct MinuteBucket {
    steps: Accumulator,
    sleep: Accumulator,
    heart_rate: Accumulator,
    rows: usize,
}

impl MinuteBucket {
    fn new() -> Self {
        Self {
            steps: Accumulator::new(Reducer::Sum),
            sleep: Accumulator::new(Reducer::Max),
            heart_rate: Accumulator::new(Reducer::Mean),
            rows: 0,
        }
    }

    fn push(&mut self, row: &MergedRow) {
        self.steps.push(Some(row.steps));
        self.sleep.push(Some(row.sleep));
        self.heart_rate.push(row.heart_rate);
        self.rows += 1;
    }
}

/// Resamples a single subject's rows with a precomputed heart-rate fill.
///
/// Rows belonging to another subject are not expected; grouping is the
/// caller's job.
pub fn resample_subject(
    subject: SubjectId,
    rows: Vec<MergedRow>,
    fill: Option<f64>,
) -> SubjectGrid {
    let mut stats = ResampleStats::default();

    // Merged rows are unique per minute; any duplicates reduce like dedup.
    let mut buckets: BTreeMap<DateTime<Utc>, MinuteBucket> = BTreeMap::new();
    for row in rows {
        buckets
            .entry(floor_to_minute(row.minute))
            .or_insert_with(MinuteBucket::new)
            .push(&row);
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return SubjectGrid {
            subject,
            fill,
            rows: Vec::new(),
            stats,
        };
    };

    let span = (last - first).num_minutes();
    let mut grid = Vec::with_capacity(usize::try_from(span + 1).unwrap_or(0));
    let mut observed = buckets.into_iter().peekable();
    let mut minute = first;
    while minute <= last {
        let row = match observed.next_if(|(key, _)| *key == minute) {
            Some((_, bucket)) => {
                stats.observed_rows += 1;
                stats.collapsed_duplicates += bucket.rows.saturating_sub(1);
                let heart_rate = match bucket.heart_rate.finish() {
                    Some(value) => Some(value),
                    None => {
                        if fill.is_some() {
                            stats.filled_heart_rate += 1;
                        }
                        fill
                    }
                };
                AlignedRow {
                    subject_id: subject.clone(),
                    minute,
                    steps: bucket.steps.finish().unwrap_or(0.0),
                    sleep: bucket.sleep.finish().unwrap_or(0.0),
                    heart_rate,
                }
            }
            None => {
                stats.synthesized_rows += 1;
                if fill.is_some() {
                    stats.filled_heart_rate += 1;
                }
                AlignedRow {
                    subject_id: subject.clone(),
                    minute,
                    steps: 0.0,
                    sleep: 0.0,
                    heart_rate: fill,
                }
            }
        };
        grid.push(row);
        minute += TimeDelta::minutes(1);
    }
    stats.grid_rows = grid.len();

    debug!(
        grid_rows = stats.grid_rows,
        observed_rows = stats.observed_rows,
        synthesized_rows = stats.synthesized_rows,
        "subject resampled"
    );
    trace!(first = %first, last = %last, fill = ?fill, "subject grid span");

    SubjectGrid {
        subject,
        fill,
        rows: grid,
        stats,
    }
}
