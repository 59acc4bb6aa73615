//! Store error types.
//!
//! Not-found variants are kept apart from rejections so callers can tell a
//! vanished source from a write the host refused.

use std::path::PathBuf;

use fusion_model::{FieldId, RecordId, TableId, ViewId};
use thiserror::Error;

/// Table-store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table not found: {table}")]
    TableNotFound { table: TableId },

    #[error("view {view} not found in table {table}")]
    ViewNotFound { table: TableId, view: ViewId },

    #[error("record {record} not found in table {table}")]
    RecordNotFound { table: TableId, record: RecordId },

    #[error("field {field} not found in table {table}")]
    FieldNotFound { table: TableId, field: FieldId },

    #[error("table {table} already has a field named {name:?}")]
    DuplicateFieldName { table: TableId, name: String },

    /// The host refused the operation (quota, invalid type, ...).
    #[error("{operation} rejected by host: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("failed to {operation} workspace file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workspace file: {path}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// True when the error means a table, view, record or field has vanished.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound { .. }
                | Self::ViewNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::FieldNotFound { .. }
        )
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
