//! Data model for the fitgrid minute-alignment pipeline.
//!
//! Every pipeline stage owns the table it produces and hands it to the next
//! stage by value. The row types in [`record`] describe the shape of each
//! intermediate table, from the raw cells produced by the reader through to
//! the gap-free [`FinalRow`] output contract.

pub mod cell;
pub mod error;
pub mod ids;
pub mod options;
pub mod record;
pub mod report;
pub mod source;

pub use cell::{RawCell, format_numeric};
pub use error::{ModelError, Result};
pub use ids::SubjectId;
pub use options::{DEFAULT_TIMESTAMP_FORMAT, HeartRateFill, PipelineOptions};
pub use record::{
    AlignedRow, DedupedTable, FinalRow, MergedRow, MinuteKey, NormalizedRecord, RawRecord,
    RawSources, SourceTable, TimedRecord, TypedRecord,
};
pub use report::{PipelineReport, ResampleStats, SourceCounts};
pub use source::{CoercionPolicy, Reducer, Source, SourceSchema};
