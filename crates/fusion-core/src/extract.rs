//! Schema and record extraction from a live table.
//!
//! A [`NormalizedTable`] is keyed by field name rather than field id, so
//! tables from different sources can later be renamed and merged without
//! consulting the host again.

use std::collections::BTreeMap;

use fusion_model::{
    FieldId, FieldMeta, NormalizedTable, Record, RecordId, RecordValue, TableId, ViewId,
};
use fusion_store::TableStore;
use futures_util::future::try_join_all;
use tracing::debug;

use crate::error::{FusionError, Result};

/// Reads the fields and records visible in `view`.
///
/// Fields follow the view's column order and records the view's filtered,
/// sorted order. Cells of fields hidden in the view are dropped.
///
/// # Errors
///
/// Returns [`FusionError::NotFound`] when the table, the view or a visible
/// record no longer exists.
pub async fn extract_table_view<S>(
    store: &S,
    table: &TableId,
    view: &ViewId,
) -> Result<NormalizedTable>
where
    S: TableStore + ?Sized,
{
    let name = store.table_name(table).await.map_err(FusionError::read)?;
    let fields = store
        .view_field_meta_list(table, view)
        .await
        .map_err(FusionError::read)?;
    let record_ids = store
        .visible_record_ids(table, view)
        .await
        .map_err(FusionError::read)?;
    let records = fetch_records(store, table, &record_ids).await?;
    debug!(
        table_id = %table,
        view_id = %view,
        table_name = %name,
        field_count = fields.len(),
        record_count = records.len(),
        "extracted view"
    );
    normalize_table(table.clone(), name, fields, records)
}

/// Reads every field and record of `table`, ignoring views.
pub async fn extract_table<S>(store: &S, table: &TableId) -> Result<NormalizedTable>
where
    S: TableStore + ?Sized,
{
    let name = store.table_name(table).await.map_err(FusionError::read)?;
    let fields = store
        .field_meta_list(table)
        .await
        .map_err(FusionError::read)?;
    let record_ids = store
        .record_id_list(table)
        .await
        .map_err(FusionError::read)?;
    let records = fetch_records(store, table, &record_ids).await?;
    normalize_table(table.clone(), name, fields, records)
}

/// Fetches all records concurrently; the result keeps the order of `ids`.
async fn fetch_records<S>(store: &S, table: &TableId, ids: &[RecordId]) -> Result<Vec<RecordValue>>
where
    S: TableStore + ?Sized,
{
    try_join_all(ids.iter().map(|id| store.record_by_id(table, id)))
        .await
        .map_err(FusionError::read)
}

/// Re-keys host records by field name.
///
/// Cells whose field is not among `fields` are dropped.
pub fn normalize_table(
    id: TableId,
    name: String,
    fields: Vec<FieldMeta>,
    records: Vec<RecordValue>,
) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::new(id, name);
    let mut names: BTreeMap<FieldId, String> = BTreeMap::new();
    for field in fields {
        names.insert(field.id.clone(), field.name.clone());
        table.push_field(field)?;
    }
    for record in records {
        let row: Record = record
            .fields
            .into_iter()
            .filter_map(|(field, value)| names.get(&field).map(|name| (name.clone(), value)))
            .collect();
        table.push_record(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use fusion_model::{CellValue, FieldType};

    use super::*;

    #[test]
    fn normalize_drops_cells_of_unlisted_fields() {
        let id = FieldId::new("fldName").unwrap();
        let hidden = FieldId::new("fldSecret").unwrap();
        let record = RecordValue {
            id: RecordId::new("rec1").unwrap(),
            fields: [
                (id.clone(), CellValue::from("Ann")),
                (hidden, CellValue::from("x")),
            ]
            .into_iter()
            .collect(),
        };
        let table = normalize_table(
            TableId::new("tbl").unwrap(),
            "Customers".to_string(),
            vec![FieldMeta::new(id, "Name", FieldType::Text)],
            vec![record],
        )
        .unwrap();

        assert_eq!(table.field_names, vec!["Name".to_string()]);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].len(), 1);
        assert_eq!(table.records[0].get("Name"), Some(&CellValue::from("Ann")));
        assert!(table.validate().is_ok());
    }

    #[test]
    fn normalize_rejects_duplicate_field_names() {
        let fields = vec![
            FieldMeta::new(FieldId::new("f1").unwrap(), "Name", FieldType::Text),
            FieldMeta::new(FieldId::new("f2").unwrap(), "Name", FieldType::Text),
        ];
        let err = normalize_table(
            TableId::new("tbl").unwrap(),
            "T".to_string(),
            fields,
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, FusionError::Model(_)));
    }
}
