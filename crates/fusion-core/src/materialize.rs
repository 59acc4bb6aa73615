//! Output materialization: reset the destination table and write the merged
//! schema and records into it.
//!
//! Neither step is transactional. A failure leaves whatever was already
//! deleted or created in place; re-running the whole pipeline rewrites the
//! destination from scratch.

use std::collections::BTreeMap;

use fusion_model::{FieldId, NewRecord, NormalizedTable, TableId};
use fusion_store::TableStore;
use tracing::{debug, info};

use crate::error::{FusionError, Result, WriteStep};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub fields_deleted: usize,
    pub records_deleted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Created fields in creation order.
    pub fields: Vec<(String, FieldId)>,
    pub records_written: usize,
}

/// Deletes every field, then every record, of `table`.
///
/// The record step is skipped when the table holds no records.
pub async fn clear_table<S>(store: &S, table: &TableId) -> Result<ClearReport>
where
    S: TableStore + ?Sized,
{
    let fields = store
        .field_meta_list(table)
        .await
        .map_err(|source| FusionError::write(WriteStep::ListFields, table, source))?;
    for field in &fields {
        store
            .delete_field(table, &field.id)
            .await
            .map_err(|source| FusionError::write(WriteStep::DeleteField, table, source))?;
    }

    let records = store
        .record_id_list(table)
        .await
        .map_err(|source| FusionError::write(WriteStep::ListRecords, table, source))?;
    if !records.is_empty() {
        store
            .delete_records(table, &records)
            .await
            .map_err(|source| FusionError::write(WriteStep::DeleteRecords, table, source))?;
    }

    debug!(
        table_id = %table,
        fields_deleted = fields.len(),
        records_deleted = records.len(),
        "cleared output table"
    );
    Ok(ClearReport {
        fields_deleted: fields.len(),
        records_deleted: records.len(),
    })
}

/// Creates one field per entry of `source.field_names`, in order, then
/// inserts all records in one bulk call.
///
/// Each field is created from the source field's metadata with the name
/// replaced by the (renamed) field name.
pub async fn write_table<S>(store: &S, table: &TableId, source: &NormalizedTable) -> Result<WriteReport>
where
    S: TableStore + ?Sized,
{
    source.validate()?;

    let mut fields = Vec::with_capacity(source.field_count());
    let mut ids: BTreeMap<&str, FieldId> = BTreeMap::new();
    for name in &source.field_names {
        let meta = source
            .meta(name)
            .ok_or_else(|| fusion_model::ModelError::MissingFieldMeta(name.clone()))?;
        let id = store
            .add_field(table, meta.to_config(name.as_str()))
            .await
            .map_err(|error| {
                FusionError::write(WriteStep::AddField { name: name.clone() }, table, error)
            })?;
        ids.insert(name.as_str(), id.clone());
        fields.push((name.clone(), id));
    }

    let records: Vec<NewRecord> = source
        .records
        .iter()
        .map(|record| NewRecord {
            fields: record
                .iter()
                .filter_map(|(name, value)| ids.get(name).map(|id| (id.clone(), value.clone())))
                .collect(),
        })
        .collect();
    let written = store
        .add_records(table, records)
        .await
        .map_err(|error| FusionError::write(WriteStep::AddRecords, table, error))?;

    info!(
        table_id = %table,
        field_count = fields.len(),
        record_count = written.len(),
        "wrote output table"
    );
    Ok(WriteReport {
        fields,
        records_written: written.len(),
    })
}

/// [`clear_table`] followed by [`write_table`].
pub async fn materialize<S>(
    store: &S,
    table: &TableId,
    source: &NormalizedTable,
) -> Result<(ClearReport, WriteReport)>
where
    S: TableStore + ?Sized,
{
    let cleared = clear_table(store, table).await?;
    let written = write_table(store, table, source).await?;
    Ok((cleared, written))
}
