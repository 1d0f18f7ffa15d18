use std::path::PathBuf;

use fitgrid_ingest::SourcePaths;
use fitgrid_model::{PipelineOptions, PipelineReport};

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub sources: SourcePaths,
    pub output: PathBuf,
    /// Optional JSON copy of the run report.
    pub report: Option<PathBuf>,
    pub options: PipelineOptions,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub sources: SourcePaths,
    /// Cleaned table path; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub report: PipelineReport,
    pub dry_run: bool,
}
