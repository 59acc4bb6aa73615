//! Cartesian table fusion.
//!
//! Combines the records of two or more tables into one output table by
//! taking the cartesian product of their visible records. Field names are
//! prefixed with their source table's name so they stay unique.
//!
//! # Example
//!
//! ```ignore
//! use fusion_core::{FusionPipeline, FusionRequest, SourceSelection};
//!
//! let summary = FusionPipeline::new(&store).run(&request).await?;
//! ```

pub mod error;
pub mod extract;
pub mod materialize;
pub mod merge;
pub mod options;
pub mod pipeline;
pub mod progress;
pub mod rename;

pub use error::{FusionError, Result, WriteStep};
pub use extract::{extract_table, extract_table_view, normalize_table};
pub use materialize::{ClearReport, WriteReport, clear_table, materialize, write_table};
pub use merge::{fold_tables, merge_tables};
pub use options::{DEFAULT_SEPARATOR, FusionOptions};
pub use pipeline::{FusionPipeline, FusionRequest, FusionSummary, SourceSelection};
pub use progress::{NoopReporter, ProgressReporter, RecordingReporter, Stage};
pub use rename::{ensure_disjoint, rename_fields, rename_fields_with, resolve_prefixes};
