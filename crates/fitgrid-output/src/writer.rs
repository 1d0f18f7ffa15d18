//! CSV and report writers.
//!
//! Every file is written to a sibling `.tmp` path, synced, then renamed over
//! the target. A failed run leaves no partial file behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use fitgrid_model::{FinalRow, PipelineReport};

use crate::error::{OutputError, Result};
use crate::format::{OUTPUT_HEADER, format_row};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "fitbit_clean_final.csv";

/// Writes the header and every row as CSV.
pub fn write_rows<W: Write>(writer: W, rows: &[FinalRow]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(OUTPUT_HEADER)?;
    for row in rows {
        csv.write_record(format_row(row))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders rows to an in-memory CSV string.
pub fn rows_to_csv_string(rows: &[FinalRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, rows)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Atomically writes the cleaned table to `path`. Returns the row count.
pub fn write_final_rows(path: &Path, rows: &[FinalRow]) -> Result<usize> {
    write_atomically(path, |writer| write_rows(writer, rows))?;
    info!(path = %path.display(), rows = rows.len(), "wrote cleaned table");
    Ok(rows.len())
}

/// Atomically writes the run report as pretty JSON.
pub fn write_report_json(path: &Path, report: &PipelineReport) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writer.write_all(b"\n").map_err(io_error("write", path))
    })?;
    info!(path = %path.display(), "wrote run report");
    Ok(())
}

/// `<path>.tmp`, next to the target so the rename stays on one file system.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, write).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| OutputError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        })
    });
    if result.is_err() {
        // Best-effort cleanup of the partial temp file.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<F>(temp_path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(temp_path).map_err(io_error("create", temp_path))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    let file = writer
        .into_inner()
        .map_err(|error| io_error("flush", temp_path)(error.into_error()))?;
    file.sync_all().map_err(io_error("sync", temp_path))?;
    Ok(())
}

fn io_error(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> OutputError {
    let path = path.to_path_buf();
    move |source| OutputError::Io {
        operation,
        path,
        source,
    }
}
