use serde::{Deserialize, Serialize};

use crate::RecordId;

/// A cell value. The fusion pipeline moves these around without looking
/// inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Checkbox(bool),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
    Link(Vec<RecordId>),
    /// Any other host payload, kept verbatim.
    Raw(serde_json::Value),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Checkbox(value)
    }
}
