use anyhow::{Result, bail};
use comfy_table::Table;

use fitgrid_ingest::SourcePaths;
use fitgrid_model::{PipelineOptions, Source};
use fitgrid_output::DEFAULT_OUTPUT_FILE;

use fitgrid_cli::pipeline::run;
use fitgrid_cli::types::{RunConfig, RunResult};

use crate::cli::{RunArgs, SourcesArgs};
use crate::summary::apply_table_style;

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let missing = args
        .input_dir
        .as_deref()
        .map(|dir| SourcePaths::from_dir(dir).missing());
    let mut header = vec!["Source", "File", "Subject", "Time", "Value", "Reducer"];
    if missing.is_some() {
        header.push("Found");
    }
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for source in Source::ALL {
        let schema = source.schema();
        let [subject, time, value] = schema.columns();
        let mut row = vec![
            source.to_string(),
            source.default_file_name().to_string(),
            subject.to_string(),
            time.to_string(),
            value.to_string(),
            source.reducer().as_str().to_string(),
        ];
        if let Some(missing) = &missing {
            let found = if missing.contains(&source) { "no" } else { "yes" };
            row.push(found.to_string());
        }
        table.add_row(row);
    }
    println!("{table}");
    if let Some(missing) = missing.filter(|m| !m.is_empty()) {
        bail!("{} source file(s) missing", missing.len());
    }
    Ok(())
}

pub fn run_fitgrid(args: &RunArgs) -> Result<RunResult> {
    run(&run_config(args))
}

fn run_config(args: &RunArgs) -> RunConfig {
    let input_dir = args.input_dir.clone();
    let sources = SourcePaths::from_dir(&input_dir)
        .with_override(Source::Sleep, &input_dir, args.sleep_file.as_deref())
        .with_override(Source::Steps, &input_dir, args.steps_file.as_deref())
        .with_override(
            Source::HeartRate,
            &input_dir,
            args.heart_rate_file.as_deref(),
        );
    let mut options = PipelineOptions::new().with_heart_rate_fill(args.heart_rate_fill.into());
    if let Some(format) = &args.timestamp_format {
        options = options.with_timestamp_format(format.clone());
    }
    RunConfig {
        output: args
            .output
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_FILE)),
        input_dir,
        sources,
        report: args.report.clone(),
        options,
        dry_run: args.dry_run,
    }
}
