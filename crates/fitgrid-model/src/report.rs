//! Aggregate counts emitted by a pipeline run.
//!
//! These are an observability signal only; they are not part of the output
//! data contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Source;

/// Per-source row accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub rows_read: usize,
    /// Rows dropped because the subject id was blank.
    pub missing_subject: usize,
    /// Rows dropped because the timestamp did not match the input format.
    pub unparsable_timestamp: usize,
    /// Values replaced by the source's coercion default (or left null).
    pub unparsable_value: usize,
    /// Distinct `(subject, minute)` keys after deduplication.
    pub deduped_rows: usize,
    /// Deduplicated keys that did not survive the inner join.
    pub join_dropped: usize,
}

/// Counts produced by the minute-grid resampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampleStats {
    pub grid_rows: usize,
    pub observed_rows: usize,
    pub synthesized_rows: usize,
    /// Grid rows whose heart rate came from the fill value.
    pub filled_heart_rate: usize,
    /// Input rows that shared a minute with an earlier row.
    pub collapsed_duplicates: usize,
}

impl ResampleStats {
    pub fn absorb(&mut self, other: ResampleStats) {
        self.grid_rows += other.grid_rows;
        self.observed_rows += other.observed_rows;
        self.synthesized_rows += other.synthesized_rows;
        self.filled_heart_rate += other.filled_heart_rate;
        self.collapsed_duplicates += other.collapsed_duplicates;
    }
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub sources: BTreeMap<Source, SourceCounts>,
    pub merged_rows: usize,
    pub subjects: usize,
    pub resample: ResampleStats,
    /// Grid rows dropped because the subject's fill value was undefined.
    pub undefined_fill: usize,
    /// Subjects that lost their entire grid to an undefined fill value.
    pub subjects_without_heart_rate: Vec<String>,
    pub final_rows: usize,
}

impl PipelineReport {
    pub fn source(&self, source: Source) -> SourceCounts {
        self.sources.get(&source).copied().unwrap_or_default()
    }

    pub fn source_mut(&mut self, source: Source) -> &mut SourceCounts {
        self.sources.entry(source).or_default()
    }

    /// Total rows dropped or defaulted for any per-row defect.
    pub fn total_defects(&self) -> usize {
        self.sources
            .values()
            .map(|c| c.missing_subject + c.unparsable_timestamp + c.unparsable_value)
            .sum::<usize>()
            + self.undefined_fill
    }
}
