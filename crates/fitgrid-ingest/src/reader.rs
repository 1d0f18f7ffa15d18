//! CSV source reading with Polars.

use std::path::Path;
use std::time::Instant;

use fitgrid_model::{RawRecord, RawSources, Source, SourceSchema, SourceTable};
use polars::prelude::*;
use tracing::{debug, info};

use crate::cell::any_to_cell;
use crate::discovery::SourcePaths;
use crate::error::{IngestError, MissingReason, Result};

/// Reads one source file using its default column layout.
pub fn read_source(path: &Path, source: Source) -> Result<SourceTable<RawRecord>> {
    read_source_with_schema(path, source, &source.schema())
}

/// Reads one source file and relabels its columns onto the common shape.
///
/// Every column is loaded as text so a malformed value in one row never fails
/// the whole file; typing happens later with explicit per-column policy.
/// Columns not named in `schema` are ignored.
pub fn read_source_with_schema(
    path: &Path,
    source: Source,
    schema: &SourceSchema,
) -> Result<SourceTable<RawRecord>> {
    if !path.is_file() {
        return Err(IngestError::missing(source, path, MissingReason::NotFound));
    }
    let start = Instant::now();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| unreadable(source, path, &e))?
        .finish()
        .map_err(|e| unreadable(source, path, &e))?;

    let [subject_name, time_name, value_name] = schema.columns();
    let subject = lookup_column(&df, subject_name, source, path)?;
    let time = lookup_column(&df, time_name, source, path)?;
    let value = lookup_column(&df, value_name, source, path)?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        records.push(RawRecord {
            subject_id: cell_at(subject, idx).to_text(),
            raw_time: cell_at(time, idx).to_text(),
            raw_value: cell_at(value, idx),
        });
    }

    debug!(
        source = %source,
        path = %path.display(),
        columns = df.width(),
        rows = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "source read"
    );
    Ok(SourceTable::new(source, records))
}

/// Reads all three sources, failing on the first one that is missing.
///
/// Nothing downstream runs until every source has loaded.
pub fn read_sources(paths: &SourcePaths) -> Result<RawSources> {
    let start = Instant::now();
    let sleep = read_source(paths.get(Source::Sleep), Source::Sleep)?;
    let steps = read_source(paths.get(Source::Steps), Source::Steps)?;
    let heart_rate = read_source(paths.get(Source::HeartRate), Source::HeartRate)?;
    info!(
        sleep_rows = sleep.len(),
        steps_rows = steps.len(),
        heart_rate_rows = heart_rate.len(),
        duration_ms = start.elapsed().as_millis(),
        "sources read"
    );
    Ok(RawSources {
        sleep,
        steps,
        heart_rate,
    })
}

fn unreadable(source: Source, path: &Path, error: &PolarsError) -> IngestError {
    IngestError::missing(source, path, MissingReason::Unreadable(error.to_string()))
}

/// Finds a column by name, ignoring case, surrounding whitespace, and a BOM.
fn lookup_column<'a>(
    df: &'a DataFrame,
    wanted: &str,
    source: Source,
    path: &Path,
) -> Result<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| normalize_header(column.name()).eq_ignore_ascii_case(wanted.trim()))
        .ok_or_else(|| {
            IngestError::missing(source, path, MissingReason::MissingColumn(wanted.to_string()))
        })
}

fn normalize_header(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}').trim()
}

fn cell_at(column: &Column, idx: usize) -> fitgrid_model::RawCell {
    any_to_cell(column.get(idx).unwrap_or(AnyValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitgrid_model::RawCell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_heart_rate_relabels_columns() {
        let file = create_temp_csv(
            "Id,Time,Value\n2022484408,4/12/2016 7:21:00 AM,97\n2022484408,4/12/2016 7:21:05 AM,102\n",
        );
        let table = read_source(file.path(), Source::HeartRate).unwrap();

        assert_eq!(table.source, Source::HeartRate);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].subject_id, "2022484408");
        assert_eq!(table.records[0].raw_time, "4/12/2016 7:21:00 AM");
        assert_eq!(table.records[1].raw_value, RawCell::Text("102".to_string()));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let file = create_temp_csv("Id,date,value,logId\n1503960366,4/12/2016 2:47:30 AM,3,11380564589\n");
        let table = read_source(file.path(), Source::Sleep).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].raw_value, RawCell::Text("3".to_string()));
    }

    #[test]
    fn test_malformed_value_does_not_fail_file() {
        let file = create_temp_csv("Id,ActivityMinute,Steps\n1,4/12/2016 12:00:00 AM,abc\n1,4/12/2016 12:01:00 AM,\n");
        let table = read_source(file.path(), Source::Steps).unwrap();

        assert_eq!(table.records[0].raw_value, RawCell::Text("abc".to_string()));
        assert!(table.records[1].raw_value.is_missing());
    }

    #[test]
    fn test_missing_file_is_missing_source() {
        let result = read_source(Path::new("/definitely/not/here.csv"), Source::Steps);
        assert!(matches!(
            result,
            Err(IngestError::MissingSource {
                source_kind: Source::Steps,
                reason: MissingReason::NotFound,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_column_is_missing_source() {
        let file = create_temp_csv("Id,Time,Bpm\n1,4/12/2016 7:21:00 AM,97\n");
        let result = read_source(file.path(), Source::HeartRate);
        assert!(matches!(
            result,
            Err(IngestError::MissingSource {
                reason: MissingReason::MissingColumn(_),
                ..
            })
        ));
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let file = create_temp_csv("Id,Time,Value\n");
        let table = read_source(file.path(), Source::HeartRate).unwrap();
        assert!(table.is_empty());
    }
}
