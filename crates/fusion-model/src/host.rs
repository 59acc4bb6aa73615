//! Shapes exchanged with the host table store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CellValue, FieldId, RecordId, TableId, ViewId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub id: TableId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Grid,
    Kanban,
    Form,
    Gallery,
    Gantt,
    Calendar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMeta {
    pub id: ViewId,
    pub name: String,
    pub view_type: ViewType,
}

impl ViewMeta {
    pub fn is_grid(&self) -> bool {
        self.view_type == ViewType::Grid
    }
}

/// A stored record keyed by field identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    pub id: RecordId,
    pub fields: BTreeMap<FieldId, CellValue>,
}

/// A record submitted for insertion; the host assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub fields: BTreeMap<FieldId, CellValue>,
}
