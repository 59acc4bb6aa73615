//! Data model for cartesian table fusion.
//!
//! Host-facing shapes ([`TableMeta`], [`ViewMeta`], [`RecordValue`], ...) are
//! keyed by identifiers; the pipeline's working representation,
//! [`NormalizedTable`], is keyed by field name.

pub mod cell;
pub mod error;
pub mod field;
pub mod host;
pub mod ids;
pub mod table;

pub use cell::CellValue;
pub use error::{ModelError, Result};
pub use field::{FieldConfig, FieldMeta, FieldType};
pub use host::{NewRecord, RecordValue, TableMeta, ViewMeta, ViewType};
pub use ids::{FieldId, RecordId, TableId, ViewId};
pub use table::{NormalizedTable, Record};
