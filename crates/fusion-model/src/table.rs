#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{CellValue, FieldMeta, ModelError, TableId};

/// One row of a [`NormalizedTable`], keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) -> Option<CellValue> {
        self.cells.insert(field.into(), value)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Union of two records. Cells of `other` win on a shared key.
    pub fn union(&self, other: &Record) -> Record {
        let mut cells = self.cells.clone();
        cells.extend(other.cells.iter().map(|(k, v)| (k.clone(), v.clone())));
        Record { cells }
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, CellValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// In-memory view of a table's visible schema and records, keyed by field
/// name.
///
/// Every key of every record appears in `field_names` and in `field_meta`,
/// and `field_names` holds no duplicates. Transformations build new tables
/// instead of mutating existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub id: TableId,
    pub name: String,
    pub field_names: Vec<String>,
    pub field_meta: BTreeMap<String, FieldMeta>,
    pub records: Vec<Record>,
}

impl NormalizedTable {
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            field_names: Vec::new(),
            field_meta: BTreeMap::new(),
            records: Vec::new(),
        }
    }

    /// Appends a field, keyed by the metadata's display name.
    pub fn push_field(&mut self, meta: FieldMeta) -> Result<(), ModelError> {
        self.push_field_as(meta.name.clone(), meta)
    }

    /// Appends a field under `name`, which may differ from `meta.name`.
    pub fn push_field_as(
        &mut self,
        name: impl Into<String>,
        meta: FieldMeta,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if self.field_meta.contains_key(&name) {
            return Err(ModelError::DuplicateField(name));
        }
        self.field_names.push(name.clone());
        self.field_meta.insert(name, meta);
        Ok(())
    }

    pub fn push_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn meta(&self, field: &str) -> Option<&FieldMeta> {
        self.field_meta.get(field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.field_meta.contains_key(field)
    }

    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Checks the table invariants and reports the first violation.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for name in &self.field_names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateField(name.clone()));
            }
            if !self.field_meta.contains_key(name) {
                return Err(ModelError::MissingFieldMeta(name.clone()));
            }
        }
        for (index, record) in self.records.iter().enumerate() {
            if let Some(field) = record.fields().find(|field| !seen.contains(field)) {
                return Err(ModelError::UnknownField {
                    record: index,
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldId, FieldType};

    fn meta(id: &str, name: &str) -> FieldMeta {
        FieldMeta::new(FieldId::new(id).unwrap(), name, FieldType::Text)
    }

    #[test]
    fn push_field_rejects_duplicates() {
        let mut table = NormalizedTable::new(TableId::new("t1").unwrap(), "Orders");
        table.push_field(meta("f1", "OrderId")).unwrap();
        let err = table.push_field(meta("f2", "OrderId")).unwrap_err();
        assert_eq!(err, ModelError::DuplicateField("OrderId".to_string()));
        assert_eq!(table.field_names, vec!["OrderId".to_string()]);
    }

    #[test]
    fn validate_flags_unknown_record_keys() {
        let mut table = NormalizedTable::new(TableId::new("t1").unwrap(), "Orders");
        table.push_field(meta("f1", "OrderId")).unwrap();
        table.push_record(Record::from_iter([("OrderId", CellValue::from("A-1"))]));
        table.push_record(Record::from_iter([("Amount", CellValue::from(3.0))]));
        assert_eq!(
            table.validate(),
            Err(ModelError::UnknownField {
                record: 1,
                field: "Amount".to_string()
            })
        );
    }

    #[test]
    fn validate_flags_missing_meta() {
        let mut table = NormalizedTable::new(TableId::new("t1").unwrap(), "Orders");
        table.field_names.push("Ghost".to_string());
        assert_eq!(
            table.validate(),
            Err(ModelError::MissingFieldMeta("Ghost".to_string()))
        );
    }

    #[test]
    fn record_union_keeps_both_sides() {
        let left = Record::from_iter([("a", CellValue::from("1"))]);
        let right = Record::from_iter([("b", CellValue::from("2"))]);
        let merged = left.union(&right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("a"), Some(&CellValue::from("1")));
        assert_eq!(merged.get("b"), Some(&CellValue::from("2")));
    }
}
