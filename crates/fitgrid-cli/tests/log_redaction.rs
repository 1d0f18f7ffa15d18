//! Subject ids stay out of the logs unless row-level logging is enabled.
//!
//! Installs a global subscriber, so this file holds a single test.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use fitgrid_cli::logging::{LogConfig, REDACTED_VALUE, init_logging_with_writer};
use fitgrid_cli::pipeline::run;
use fitgrid_cli::types::RunConfig;
use fitgrid_ingest::SourcePaths;
use fitgrid_model::PipelineOptions;
use fitgrid_output::DEFAULT_OUTPUT_FILE;

const KEPT_SUBJECT: &str = "1503960366";
const DROPPED_SUBJECT: &str = "2022484408";

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

fn write_sources(dir: &Path) {
    fs::write(
        dir.join("minuteSleep_merged.csv"),
        format!(
            "Id,date,value,logId\n\
             {KEPT_SUBJECT},4/12/2016 9:00:30 AM,1,1\n\
             {KEPT_SUBJECT},4/12/2016 9:02:30 AM,0,1\n\
             {DROPPED_SUBJECT},4/12/2016 9:00:00 AM,1,2\n"
        ),
    )
    .unwrap();
    fs::write(
        dir.join("minuteStepsNarrow_merged.csv"),
        format!(
            "Id,ActivityMinute,Steps\n\
             {KEPT_SUBJECT},4/12/2016 9:00:00 AM,3\n\
             {KEPT_SUBJECT},4/12/2016 9:02:00 AM,5\n\
             {DROPPED_SUBJECT},4/12/2016 9:00:00 AM,7\n"
        ),
    )
    .unwrap();
    fs::write(
        dir.join("heartrate_seconds_merged.csv"),
        format!(
            "Id,Time,Value\n\
             {KEPT_SUBJECT},4/12/2016 9:00:05 AM,68\n\
             {KEPT_SUBJECT},4/12/2016 9:00:35 AM,72\n\
             {KEPT_SUBJECT},4/12/2016 9:02:10 AM,80\n\
             {DROPPED_SUBJECT},4/12/2016 9:00:10 AM,n/a\n"
        ),
    )
    .unwrap();
}

#[test]
fn trace_logs_redact_subject_ids_by_default() {
    let capture = Capture::default();
    let config = LogConfig {
        use_env_filter: false,
        ..LogConfig::default()
            .with_level_filter(LevelFilter::TRACE)
            .with_ansi(false)
    };
    init_logging_with_writer(&config, capture.clone());

    let dir = tempfile::tempdir().unwrap();
    write_sources(dir.path());
    let result = run(&RunConfig {
        input_dir: dir.path().to_path_buf(),
        sources: SourcePaths::from_dir(dir.path()),
        output: dir.path().join(DEFAULT_OUTPUT_FILE),
        report: None,
        options: PipelineOptions::default(),
        dry_run: false,
    })
    .unwrap();

    assert_eq!(result.report.final_rows, 3);
    assert_eq!(
        result.report.subjects_without_heart_rate,
        vec![DROPPED_SUBJECT.to_string()]
    );

    let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("subject grid span"));
    assert!(logs.contains(REDACTED_VALUE));
    let leaked: Vec<&str> = logs
        .lines()
        .filter(|line| line.contains(KEPT_SUBJECT) || line.contains(DROPPED_SUBJECT))
        .collect();
    assert!(leaked.is_empty(), "subject ids in logs: {leaked:?}");
}
