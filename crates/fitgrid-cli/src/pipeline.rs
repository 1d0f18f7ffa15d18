//! Staged run: ingest, transform, output.
//!
//! Every source is read before any transformation begins, and nothing is
//! written until the transform has produced its final rows. An ingest failure
//! therefore never leaves an output file behind.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use fitgrid_ingest::{SourcePaths, read_sources};
use fitgrid_model::{PipelineOptions, RawSources};
use fitgrid_output::{write_final_rows, write_report_json};
use fitgrid_transform::{PipelineOutput, run_pipeline};

use crate::logging::redact_value;
use crate::types::{RunConfig, RunResult};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(paths: &SourcePaths) -> Result<RawSources> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();
    let sources = read_sources(paths).context("read source files")?;
    info!(duration_ms = start.elapsed().as_millis(), "ingest complete");
    Ok(sources)
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

pub fn transform(sources: RawSources, options: &PipelineOptions) -> PipelineOutput {
    let output = run_pipeline(sources, options);
    for subject in &output.report.subjects_without_heart_rate {
        warn!(
            subject = redact_value(subject),
            "subject dropped: no heart-rate value to fill with"
        );
    }
    output
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Paths written by the output stage.
#[derive(Debug, Default)]
pub struct OutputResult {
    pub table: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Writes the report (when requested) before the table, so a failed report
/// write leaves no table behind.
pub fn output(config: &RunConfig, result: &PipelineOutput) -> Result<OutputResult> {
    let span = info_span!("output", dry_run = config.dry_run);
    let _guard = span.enter();
    if config.dry_run {
        info!(rows = result.rows.len(), "dry run: no files written");
        return Ok(OutputResult::default());
    }
    let start = Instant::now();
    if let Some(path) = &config.report {
        write_report_json(path, &result.report)
            .with_context(|| format!("write {}", path.display()))?;
    }
    write_final_rows(&config.output, &result.rows)
        .with_context(|| format!("write {}", config.output.display()))?;
    info!(
        rows = result.rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(OutputResult {
        table: Some(config.output.clone()),
        report: config.report.clone(),
    })
}

/// Runs all three stages.
pub fn run(config: &RunConfig) -> Result<RunResult> {
    let span = info_span!("run", input = %config.input_dir.display());
    let _guard = span.enter();

    let sources = ingest(&config.sources)?;
    let transformed = transform(sources, &config.options);
    let written = output(config, &transformed)?;

    Ok(RunResult {
        input_dir: config.input_dir.clone(),
        sources: config.sources.clone(),
        output: written.table,
        report_path: written.report,
        report: transformed.report,
        dry_run: config.dry_run,
    })
}
