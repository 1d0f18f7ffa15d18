//! CLI argument definitions for fitgrid.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fitgrid_model::HeartRateFill;

#[derive(Parser)]
#[command(
    name = "fitgrid",
    version,
    about = "Align Fitbit sleep, steps and heart-rate exports on a per-subject minute grid",
    long_about = "Align Fitbit sleep, steps and heart-rate exports on a per-subject minute grid.\n\n\
                  Reads the three per-minute exports from an input folder, joins them on\n\
                  (subject, minute), fills gaps and writes one cleaned CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow subject ids in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and align the exports in an input folder.
    Run(RunArgs),

    /// List the expected source files and columns.
    Sources(SourcesArgs),
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// Also check which source files exist in this folder.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Folder containing the source CSV files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output CSV path (default: <INPUT_DIR>/fitbit_clean_final.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Sleep source file, relative to INPUT_DIR unless absolute.
    #[arg(long = "sleep-file", value_name = "FILE")]
    pub sleep_file: Option<PathBuf>,

    /// Steps source file, relative to INPUT_DIR unless absolute.
    #[arg(long = "steps-file", value_name = "FILE")]
    pub steps_file: Option<PathBuf>,

    /// Heart-rate source file, relative to INPUT_DIR unless absolute.
    #[arg(long = "heart-rate-file", value_name = "FILE")]
    pub heart_rate_file: Option<PathBuf>,

    /// Scope of the median used to fill missing heart rate.
    #[arg(long = "heart-rate-fill", value_enum, default_value = "subject")]
    pub heart_rate_fill: HeartRateFillArg,

    /// Input timestamp pattern (chrono strftime syntax).
    #[arg(long = "timestamp-format", value_name = "PATTERN")]
    pub timestamp_format: Option<String>,

    /// Also write the run report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Run the full pipeline and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HeartRateFillArg {
    /// Median of each subject's own observed heart rate.
    Subject,
    /// Median over every subject's observed heart rate.
    Global,
}

impl From<HeartRateFillArg> for HeartRateFill {
    fn from(value: HeartRateFillArg) -> Self {
        match value {
            HeartRateFillArg::Subject => HeartRateFill::SubjectMedian,
            HeartRateFillArg::Global => HeartRateFill::GlobalMedian,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
