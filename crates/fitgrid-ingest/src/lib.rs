//! Record reading for the fitgrid pipeline.
//!
//! This crate is the only part of the workspace that touches input files. It
//! locates the three source CSVs, reads each one with Polars, and relabels the
//! source-specific columns onto the common `(subject id, timestamp, value)`
//! shape as [`RawRecord`](fitgrid_model::RawRecord)s.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fitgrid_ingest::{SourcePaths, read_sources};
//!
//! let paths = SourcePaths::from_dir(Path::new("data/fitbit"));
//! let sources = read_sources(&paths)?;
//! assert!(!sources.heart_rate.is_empty());
//! ```

mod cell;
mod discovery;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, MissingReason, Result};

// === Cell Conversion ===
pub use cell::any_to_cell;

// === File Discovery ===
pub use discovery::SourcePaths;

// === CSV Reading ===
pub use reader::{read_source, read_source_with_schema, read_sources};
