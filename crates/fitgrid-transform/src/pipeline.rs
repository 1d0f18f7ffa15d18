//! End-to-end transform from raw source tables to final rows.

use std::time::Instant;

use tracing::{info, info_span, warn};

use fitgrid_model::{
    DedupedTable, FinalRow, PipelineOptions, PipelineReport, RawRecord, RawSources, Source,
    SourceTable,
};

use crate::datetime::normalize_timestamps;
use crate::dedupe::dedupe_source;
use crate::finalize::finalize;
use crate::merge::merge_sources;
use crate::numeric::coerce_values;
use crate::resample::resample;
use crate::schema::normalize_schema;

/// Output of [`run_pipeline`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Rows sorted by `(subject, minute)`, with no undefined values.
    pub rows: Vec<FinalRow>,
    pub report: PipelineReport,
}

/// Runs every stage on the three raw sources.
///
/// The transform itself cannot fail: per-row defects are dropped or
/// defaulted and counted in the returned report.
pub fn run_pipeline(sources: RawSources, options: &PipelineOptions) -> PipelineOutput {
    let mut report = PipelineReport::default();

    let [steps, sleep, heart_rate] = sources.into_tables();
    let steps = prepare_source(steps, options, &mut report);
    let sleep = prepare_source(sleep, options, &mut report);
    let heart_rate = prepare_source(heart_rate, options, &mut report);

    let merged = {
        let span = info_span!("merge");
        let _guard = span.enter();
        let start = Instant::now();
        let merged = merge_sources(steps, sleep, heart_rate);
        for (source, dropped) in &merged.join_dropped {
            report.source_mut(*source).join_dropped = *dropped;
        }
        report.merged_rows = merged.rows.len();
        info!(
            merged_rows = report.merged_rows,
            duration_ms = start.elapsed().as_millis(),
            "merge complete"
        );
        merged.rows
    };

    let aligned = {
        let span = info_span!("resample", fill = ?options.heart_rate_fill);
        let _guard = span.enter();
        let start = Instant::now();
        let output = resample(merged, options.heart_rate_fill);
        report.subjects = output.subjects;
        report.resample = output.stats;
        info!(
            subjects = output.subjects,
            grid_rows = output.stats.grid_rows,
            synthesized_rows = output.stats.synthesized_rows,
            undefined_fill_subjects = output.undefined_fill.len(),
            duration_ms = start.elapsed().as_millis(),
            "resample complete"
        );
        if !output.undefined_fill.is_empty() {
            warn!(
                subjects = output.undefined_fill.len(),
                "subjects have no observed heart rate; their rows will be dropped"
            );
        }
        report.subjects_without_heart_rate = output
            .undefined_fill
            .iter()
            .map(ToString::to_string)
            .collect();
        output.rows
    };

    let span = info_span!("finalize");
    let _guard = span.enter();
    let start = Instant::now();
    let finalized = finalize(aligned);
    report.undefined_fill = finalized.dropped;
    report.final_rows = finalized.rows.len();
    info!(
        final_rows = report.final_rows,
        dropped = finalized.dropped,
        duration_ms = start.elapsed().as_millis(),
        "finalize complete"
    );

    PipelineOutput {
        rows: finalized.rows,
        report,
    }
}

/// Runs the per-source stages: schema, timestamps, coercion and dedup.
fn prepare_source(
    table: SourceTable<RawRecord>,
    options: &PipelineOptions,
    report: &mut PipelineReport,
) -> DedupedTable {
    let source: Source = table.source;
    let rows_read = table.len();

    let typed = {
        let span = info_span!("normalize", source = %source);
        let _guard = span.enter();
        let start = Instant::now();
        let (normalized, missing_subject) = normalize_schema(table);
        let (timed, unparsable_timestamp) =
            normalize_timestamps(normalized, &options.timestamp_format);
        let (typed, unparsable_value) = coerce_values(timed);

        let counts = report.source_mut(source);
        counts.rows_read = rows_read;
        counts.missing_subject = missing_subject;
        counts.unparsable_timestamp = unparsable_timestamp;
        counts.unparsable_value = unparsable_value;
        info!(
            rows_read,
            missing_subject,
            unparsable_timestamp,
            unparsable_value,
            duration_ms = start.elapsed().as_millis(),
            "normalize complete"
        );
        typed
    };

    let span = info_span!("dedupe", source = %source);
    let _guard = span.enter();
    let start = Instant::now();
    let deduped = dedupe_source(typed);
    report.source_mut(source).deduped_rows = deduped.len();
    info!(
        deduped_rows = deduped.len(),
        duration_ms = start.elapsed().as_millis(),
        "dedupe complete"
    );
    deduped
}
