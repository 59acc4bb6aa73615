//! Serializable workspace contents backing [`crate::MemoryStore`].
//!
//! A workspace file is the JSON form of [`WorkspaceSnapshot`]:
//!
//! ```text
//! {
//!   "tables": [
//!     {
//!       "id": "tblOrders",
//!       "name": "Orders",
//!       "fields": [{ "id": "fldId", "name": "OrderId", "field_type": "text" }],
//!       "views": [{ "id": "vewGrid", "name": "Grid", "view_type": "grid" }],
//!       "records": [{ "id": "rec1", "fields": { "fldId": { "kind": "text", "value": "A-1" } } }]
//!     }
//!   ]
//! }
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use fusion_model::{
    CellValue, FieldId, FieldMeta, RecordId, RecordValue, TableId, TableMeta, ViewId, ViewMeta,
    ViewType,
};
#[cfg(any(test, feature = "test-fixtures"))]
use fusion_model::FieldType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub tables: Vec<TableSnapshot>,
    /// Table currently shown in the host UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_table: Option<TableId>,
}

impl WorkspaceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableSnapshot) -> Self {
        self.tables.push(table);
        self
    }

    pub fn table(&self, id: &TableId) -> Option<&TableSnapshot> {
        self.tables.iter().find(|table| &table.id == id)
    }

    pub fn table_mut(&mut self, id: &TableId) -> Option<&mut TableSnapshot> {
        self.tables.iter_mut().find(|table| &table.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub id: TableId,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
    #[serde(default)]
    pub views: Vec<ViewSnapshot>,
    #[serde(default)]
    pub records: Vec<RecordValue>,
}

impl TableSnapshot {
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            fields: Vec::new(),
            views: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_view(mut self, view: ViewSnapshot) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_record(mut self, record: RecordValue) -> Self {
        self.records.push(record);
        self
    }

    pub fn meta(&self) -> TableMeta {
        TableMeta {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn view(&self, id: &ViewId) -> Option<&ViewSnapshot> {
        self.views.iter().find(|view| &view.id == id)
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldMeta> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn record(&self, id: &RecordId) -> Option<&RecordValue> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Field names in storage order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.name.clone()).collect()
    }
}

/// Equality filter on one field; a view shows records matching all of its
/// filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: FieldId,
    pub equals: CellValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSort {
    pub field: FieldId,
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub id: ViewId,
    pub name: String,
    pub view_type: ViewType,
    /// Column order; fields not listed follow in storage order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_order: Vec<FieldId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_fields: Vec<FieldId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FieldFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<ViewSort>,
}

impl ViewSnapshot {
    pub fn new(id: ViewId, name: impl Into<String>, view_type: ViewType) -> Self {
        Self {
            id,
            name: name.into(),
            view_type,
            field_order: Vec::new(),
            hidden_fields: Vec::new(),
            filters: Vec::new(),
            sort: None,
        }
    }

    pub fn meta(&self) -> ViewMeta {
        ViewMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            view_type: self.view_type,
        }
    }

    /// Visible fields of `table` in column order.
    pub fn visible_fields<'a>(&self, table: &'a TableSnapshot) -> Vec<&'a FieldMeta> {
        let mut ordered: Vec<&FieldMeta> = self
            .field_order
            .iter()
            .filter_map(|id| table.field(id))
            .collect();
        for field in &table.fields {
            if !self.field_order.contains(&field.id) {
                ordered.push(field);
            }
        }
        ordered.retain(|field| !self.hidden_fields.contains(&field.id));
        ordered
    }

    /// Records of `table` passing every filter, in sort order.
    pub fn visible_records<'a>(&self, table: &'a TableSnapshot) -> Vec<&'a RecordValue> {
        let mut records: Vec<&RecordValue> = table
            .records
            .iter()
            .filter(|record| {
                self.filters
                    .iter()
                    .all(|filter| record.fields.get(&filter.field) == Some(&filter.equals))
            })
            .collect();
        if let Some(sort) = &self.sort {
            records.sort_by(|a, b| {
                let ordering = compare_cells(a.fields.get(&sort.field), b.fields.get(&sort.field));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        records
    }
}

/// Builders for fixtures. Identifiers are given as strings and a blank one
/// panics.
#[cfg(any(test, feature = "test-fixtures"))]
impl TableSnapshot {
    /// Adds a text field.
    ///
    /// # Panics
    ///
    /// Panics if `id` is blank. Intended for fixtures.
    pub fn with_text_field(self, id: &str, name: &str) -> Self {
        self.with_typed_field(id, name, FieldType::Text)
    }

    pub fn with_typed_field(self, id: &str, name: &str, field_type: FieldType) -> Self {
        let id = FieldId::new(id).expect("field id must not be blank");
        self.with_field(FieldMeta::new(id, name, field_type))
    }

    /// Adds a record from `(field id, value)` pairs; panics on blank ids.
    pub fn with_row<I, V>(self, id: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<CellValue>,
    {
        let fields = cells
            .into_iter()
            .map(|(field, value)| {
                (
                    FieldId::new(field).expect("field id must not be blank"),
                    value.into(),
                )
            })
            .collect();
        self.with_record(RecordValue {
            id: RecordId::new(id).expect("record id must not be blank"),
            fields,
        })
    }
}

#[cfg(any(test, feature = "test-fixtures"))]
impl ViewSnapshot {
    /// A grid view; panics on a blank identifier.
    pub fn grid(id: &str, name: &str) -> Self {
        Self::new(
            ViewId::new(id).expect("view id must not be blank"),
            name,
            ViewType::Grid,
        )
    }

    pub fn hiding(mut self, field: &str) -> Self {
        self.hidden_fields
            .push(FieldId::new(field).expect("field id must not be blank"));
        self
    }

    pub fn ordered(mut self, fields: &[&str]) -> Self {
        self.field_order = fields
            .iter()
            .map(|field| FieldId::new(*field).expect("field id must not be blank"))
            .collect();
        self
    }

    pub fn filtered(mut self, field: &str, equals: impl Into<CellValue>) -> Self {
        self.filters.push(FieldFilter {
            field: FieldId::new(field).expect("field id must not be blank"),
            equals: equals.into(),
        });
        self
    }

    pub fn sorted(mut self, field: &str, descending: bool) -> Self {
        self.sort = Some(ViewSort {
            field: FieldId::new(field).expect("field id must not be blank"),
            descending,
        });
        self
    }
}

/// Ascending sort order for view sorting.
///
/// Empty cells come after every value, so a descending sort lists them
/// first. Cells of different kinds order by kind (text, number, checkbox,
/// date-time, link, raw); links and raw payloads compare equal among
/// themselves.
fn compare_cells(left: Option<&CellValue>, right: Option<&CellValue>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match (left, right) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::Checkbox(a), CellValue::Checkbox(b)) => a.cmp(b),
            _ => kind_rank(left).cmp(&kind_rank(right)),
        },
    }
}

fn kind_rank(cell: &CellValue) -> u8 {
    match cell {
        CellValue::Text(_) => 0,
        CellValue::Number(_) => 1,
        CellValue::Checkbox(_) => 2,
        CellValue::DateTime(_) => 3,
        CellValue::Link(_) => 4,
        CellValue::Raw(_) => 5,
    }
}

/// Cells of `record` re-keyed by field name.
pub fn cells_by_name(
    table: &TableSnapshot,
    record: &RecordValue,
) -> BTreeMap<String, CellValue> {
    record
        .fields
        .iter()
        .filter_map(|(id, value)| table.field(id).map(|field| (field.name.clone(), value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> TableSnapshot {
        TableSnapshot::new(TableId::new("tblOrders").unwrap(), "Orders")
            .with_text_field("fldId", "OrderId")
            .with_typed_field("fldAmount", "Amount", FieldType::Number)
            .with_text_field("fldStatus", "Status")
            .with_row(
                "rec1",
                [
                    ("fldId", CellValue::from("A-1")),
                    ("fldAmount", CellValue::from(30.0)),
                    ("fldStatus", CellValue::from("open")),
                ],
            )
            .with_row(
                "rec2",
                [
                    ("fldId", CellValue::from("A-2")),
                    ("fldAmount", CellValue::from(10.0)),
                    ("fldStatus", CellValue::from("closed")),
                ],
            )
            .with_row(
                "rec3",
                [
                    ("fldId", CellValue::from("A-3")),
                    ("fldAmount", CellValue::from(20.0)),
                    ("fldStatus", CellValue::from("open")),
                ],
            )
    }

    #[test]
    fn visible_fields_follow_order_and_hide() {
        let table = orders();
        let view = ViewSnapshot::grid("vew1", "Grid")
            .ordered(&["fldStatus"])
            .hiding("fldAmount");
        let names: Vec<&str> = view
            .visible_fields(&table)
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        assert_eq!(names, vec!["Status", "OrderId"]);
    }

    #[test]
    fn visible_records_filter_then_sort() {
        let table = orders();
        let view = ViewSnapshot::grid("vew1", "Open")
            .filtered("fldStatus", "open")
            .sorted("fldAmount", false);
        let ids: Vec<&str> = view
            .visible_records(&table)
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rec3", "rec1"]);
    }

    #[test]
    fn descending_sort_puts_empty_cells_first() {
        let table = orders().with_row("rec4", [("fldId", CellValue::from("A-4"))]);
        let view = ViewSnapshot::grid("vew1", "Grid").sorted("fldAmount", true);
        let ids: Vec<&str> = view
            .visible_records(&table)
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rec4", "rec1", "rec3", "rec2"]);
    }

    #[test]
    fn mixed_kinds_sort_by_kind() {
        let table = TableSnapshot::new(TableId::new("tblMixed").unwrap(), "Mixed")
            .with_text_field("fldValue", "Value")
            .with_row("rec1", [("fldValue", CellValue::from(true))])
            .with_row("rec2", [("fldValue", CellValue::from("b"))])
            .with_row("rec3", [("fldValue", CellValue::from(2.0))])
            .with_row("rec4", [("fldValue", CellValue::from("a"))])
            .with_row("rec5", [("fldValue", CellValue::from(f64::NAN))])
            .with_row("rec6", [("fldValue", CellValue::from(1.0))]);
        let ids = |descending| -> Vec<String> {
            ViewSnapshot::grid("vew1", "Grid")
                .sorted("fldValue", descending)
                .visible_records(&table)
                .iter()
                .map(|record| record.id.to_string())
                .collect()
        };
        assert_eq!(ids(false), vec!["rec4", "rec2", "rec6", "rec3", "rec5", "rec1"]);
        assert_eq!(ids(true), vec!["rec1", "rec5", "rec3", "rec6", "rec2", "rec4"]);
    }
}
