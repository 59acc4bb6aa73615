//! Error types for the fusion pipeline.

use std::fmt;

use fusion_model::{ModelError, TableId};
use fusion_store::StoreError;
use thiserror::Error;

/// The output-table operation that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStep {
    SwitchView,
    ListFields,
    DeleteField,
    ListRecords,
    DeleteRecords,
    AddField { name: String },
    AddRecords,
}

impl fmt::Display for WriteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchView => f.write_str("switch to"),
            Self::ListFields => f.write_str("list fields of"),
            Self::DeleteField => f.write_str("delete a field of"),
            Self::ListRecords => f.write_str("list records of"),
            Self::DeleteRecords => f.write_str("delete records of"),
            Self::AddField { name } => write!(f, "add field {name:?} to"),
            Self::AddRecords => f.write_str("add records to"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FusionError {
    /// Fewer than two sources were selected.
    #[error("at least two source tables are required, got {count}")]
    Validation { count: usize },

    /// A selected table, view or record vanished before it could be read.
    #[error("source data not found")]
    NotFound(#[source] StoreError),

    /// Reading a source failed for a reason other than a missing object.
    #[error("failed to read source data")]
    Read(#[source] StoreError),

    /// The host rejected a change to the output table. Changes made before
    /// the failure are kept.
    #[error("failed to {step} output table {table}")]
    Write {
        step: WriteStep,
        table: TableId,
        #[source]
        source: StoreError,
    },

    /// Two sources produced the same output field name.
    #[error("field {field:?} is produced by more than one source")]
    DuplicateField { field: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl FusionError {
    /// Classifies a store error raised while reading sources.
    pub fn read(source: StoreError) -> Self {
        if source.is_not_found() {
            Self::NotFound(source)
        } else {
            Self::Read(source)
        }
    }

    pub fn write(step: WriteStep, table: &TableId, source: StoreError) -> Self {
        Self::Write {
            step,
            table: table.clone(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, FusionError>;
