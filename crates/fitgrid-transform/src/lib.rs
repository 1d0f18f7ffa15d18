//! Alignment and resampling of per-subject sensor streams.
//!
//! Stages run strictly in order, each consuming the previous table by value:
//!
//! 1. **schema**: validate subject ids on the relabelled rows
//! 2. **datetime**: parse timestamps to UTC instants, dropping unparsable rows
//! 3. **numeric**: coerce values with the source's defaulting policy
//! 4. **dedupe**: reduce each source to one value per `(subject, minute)`
//! 5. **merge**: inner-join the three sources on `(subject, minute)`
//! 6. **resample**: place each subject on a contiguous one-minute grid
//! 7. **finalize**: drop unresolved rows and sort by `(subject, minute)`
//!
//! [`run_pipeline`] drives all of them and returns a [`PipelineOutput`].

mod error;

pub mod datetime;
pub mod dedupe;
pub mod finalize;
pub mod merge;
pub mod numeric;
pub mod pipeline;
pub mod resample;
pub mod schema;

pub use error::ParseError;

pub use datetime::{floor_to_minute, normalize_timestamps, parse_timestamp};
pub use dedupe::dedupe_source;
pub use finalize::{FinalizeOutput, finalize};
pub use merge::{MergeOutput, merge_sources};
pub use numeric::{coerce_values, parse_numeric};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use resample::{ResampleOutput, median, resample};
pub use schema::normalize_schema;
