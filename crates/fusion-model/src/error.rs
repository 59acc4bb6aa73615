use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidId { kind: &'static str, value: String },

    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    #[error("record {record} references unknown field {field}")]
    UnknownField { record: usize, field: String },

    #[error("field {0} has no metadata")]
    MissingFieldMeta(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
