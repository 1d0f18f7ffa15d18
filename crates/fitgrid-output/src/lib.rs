//! Output writers for the fitgrid pipeline.
//!
//! The cleaned table is a CSV with the fixed header
//! `Id,Time,Steps,Sleep,HeartRate`, one row per subject-minute, sorted by
//! subject then minute. Writes are atomic.

mod error;
mod format;
mod writer;

// === Error Types ===
pub use error::{OutputError, Result};

// === Formatting ===
pub use format::{
    OUTPUT_HEADER, OUTPUT_TIME_FORMAT, format_heart_rate, format_row, format_time,
};

// === Writers ===
pub use writer::{
    DEFAULT_OUTPUT_FILE, rows_to_csv_string, temp_path_for, write_final_rows, write_report_json,
    write_rows,
};
