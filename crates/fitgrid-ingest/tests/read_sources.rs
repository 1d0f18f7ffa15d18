use std::fs;
use std::path::Path;

use fitgrid_ingest::{IngestError, MissingReason, SourcePaths, read_sources};
use fitgrid_model::Source;

fn write_all_sources(dir: &Path) {
    fs::write(
        dir.join("minuteSleep_merged.csv"),
        "Id,date,value,logId\nA,4/12/2016 9:00:00 AM,1,1\n",
    )
    .expect("write sleep");
    fs::write(
        dir.join("minuteStepsNarrow_merged.csv"),
        "Id,ActivityMinute,Steps\nA,4/12/2016 9:00:00 AM,3\n",
    )
    .expect("write steps");
    fs::write(
        dir.join("heartrate_seconds_merged.csv"),
        "Id,Time,Value\nA,4/12/2016 9:00:05 AM,70\nA,4/12/2016 9:00:10 AM,72\n",
    )
    .expect("write heart rate");
}

#[test]
fn reads_all_three_sources() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_all_sources(dir.path());

    let sources = read_sources(&SourcePaths::from_dir(dir.path())).expect("read sources");

    assert_eq!(sources.sleep.len(), 1);
    assert_eq!(sources.steps.len(), 1);
    assert_eq!(sources.heart_rate.len(), 2);
    assert_eq!(sources.heart_rate.records[1].raw_time, "4/12/2016 9:00:10 AM");
}

#[test]
fn missing_source_aborts_read() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_all_sources(dir.path());
    fs::remove_file(dir.path().join("minuteStepsNarrow_merged.csv")).expect("remove steps");

    let err = read_sources(&SourcePaths::from_dir(dir.path())).expect_err("steps is missing");

    let IngestError::MissingSource {
        source_kind,
        reason,
        ..
    } = err;
    assert_eq!(source_kind, Source::Steps);
    assert_eq!(reason, MissingReason::NotFound);
}

#[test]
fn empty_file_is_unreadable() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_all_sources(dir.path());
    fs::write(dir.path().join("heartrate_seconds_merged.csv"), "").expect("truncate");

    let err = read_sources(&SourcePaths::from_dir(dir.path())).expect_err("empty heart rate");

    assert_eq!(err.source_kind(), Source::HeartRate);
}
