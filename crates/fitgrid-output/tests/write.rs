//! Integration tests for the output writers.

use std::fs;

use chrono::{TimeZone, Utc};

use fitgrid_model::{FinalRow, PipelineReport, Source, SubjectId};
use fitgrid_output::{
    DEFAULT_OUTPUT_FILE, rows_to_csv_string, temp_path_for, write_final_rows, write_report_json,
};

fn row(subject: &str, minute: u32, steps: i64, sleep: f64, heart_rate: f64) -> FinalRow {
    FinalRow {
        subject_id: SubjectId::new(subject).unwrap(),
        minute: Utc.with_ymd_and_hms(2016, 4, 12, 9, minute, 0).unwrap(),
        steps,
        sleep,
        heart_rate,
    }
}

fn three_minute_rows() -> Vec<FinalRow> {
    vec![
        row("A", 0, 3, 1.0, 70.0),
        row("A", 1, 0, 0.0, 75.0),
        row("A", 2, 5, 0.0, 80.0),
    ]
}

#[test]
fn csv_layout() {
    let csv = rows_to_csv_string(&three_minute_rows()).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    Id,Time,Steps,Sleep,HeartRate
    A,2016-04-12 09:00:00+00:00,3,1,70.0
    A,2016-04-12 09:01:00+00:00,0,0,75.0
    A,2016-04-12 09:02:00+00:00,5,0,80.0
    ");
}

#[test]
fn writes_file_and_leaves_no_temp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT_FILE);

    let written = write_final_rows(&path, &three_minute_rows()).unwrap();

    assert_eq!(written, 3);
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 4);
    assert!(contents.starts_with("Id,Time,Steps,Sleep,HeartRate\n"));
    assert!(!temp_path_for(&path).exists());
}

#[test]
fn replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_OUTPUT_FILE);
    fs::write(&path, "stale").unwrap();

    write_final_rows(&path, &three_minute_rows()[..1]).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "Id,Time,Steps,Sleep,HeartRate\nA,2016-04-12 09:00:00+00:00,3,1,70.0\n"
    );
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clean.csv");

    write_final_rows(&path, &three_minute_rows()).unwrap();

    assert!(path.exists());
}

#[test]
fn report_is_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let mut report = PipelineReport::default();
    report.source_mut(Source::Steps).rows_read = 2;
    report.final_rows = 3;

    write_report_json(&path, &report).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["final_rows"], 3);
    assert_eq!(value["sources"]["steps"]["rows_read"], 2);
}
