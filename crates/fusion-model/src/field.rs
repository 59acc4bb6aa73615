//! Field metadata as reported by the host table store.

use serde::{Deserialize, Serialize};

use crate::FieldId;

/// Field type descriptor.
///
/// The fusion pipeline never branches on the type; it is carried from the
/// source field to the created output field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    SingleSelect,
    MultiSelect,
    DateTime,
    Checkbox,
    User,
    Phone,
    Url,
    Attachment,
    Link,
    Formula,
    Lookup,
    Currency,
    Progress,
    Rating,
    Location,
    /// A host type this crate does not name, kept by its raw code.
    Other(String),
}

/// Metadata of one field: identity, display name, type and type-specific
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
    /// Type-specific configuration (select options, number format, ...).
    #[serde(default)]
    pub property: serde_json::Value,
}

impl FieldMeta {
    pub fn new(id: FieldId, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id,
            name: name.into(),
            field_type,
            property: serde_json::Value::Null,
        }
    }

    pub fn with_property(mut self, property: serde_json::Value) -> Self {
        self.property = property;
        self
    }

    /// Creation config for a copy of this field under `name`.
    pub fn to_config(&self, name: impl Into<String>) -> FieldConfig {
        FieldConfig {
            name: name.into(),
            field_type: self.field_type.clone(),
            property: self.property.clone(),
        }
    }
}

/// Configuration submitted to the host when adding a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub property: serde_json::Value,
}
