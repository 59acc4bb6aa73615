//! The host table-store abstraction.
//!
//! Every operation is an independent suspending call against the host. The
//! fusion pipeline receives a store explicitly and never reaches for a
//! global handle, so tests can substitute [`crate::MemoryStore`].

use async_trait::async_trait;
use fusion_model::{
    FieldConfig, FieldId, FieldMeta, NewRecord, RecordId, RecordValue, TableId, TableMeta,
    ViewId, ViewMeta,
};

use crate::error::Result;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// All tables of the workspace, in host order.
    async fn table_list(&self) -> Result<Vec<TableMeta>>;

    async fn table_name(&self, table: &TableId) -> Result<String>;

    /// Every field of the table, regardless of view visibility.
    async fn field_meta_list(&self, table: &TableId) -> Result<Vec<FieldMeta>>;

    async fn view_meta_list(&self, table: &TableId) -> Result<Vec<ViewMeta>>;

    /// Grid views only; these are the views offered as fusion sources.
    async fn grid_views(&self, table: &TableId) -> Result<Vec<ViewMeta>> {
        let views = self.view_meta_list(table).await?;
        Ok(views.into_iter().filter(ViewMeta::is_grid).collect())
    }

    /// Fields visible in the view, in view column order.
    async fn view_field_meta_list(&self, table: &TableId, view: &ViewId)
    -> Result<Vec<FieldMeta>>;

    /// Records visible in the view after filtering, in view sort order.
    async fn visible_record_ids(&self, table: &TableId, view: &ViewId) -> Result<Vec<RecordId>>;

    /// Every record of the table, in storage order.
    async fn record_id_list(&self, table: &TableId) -> Result<Vec<RecordId>>;

    async fn record_by_id(&self, table: &TableId, record: &RecordId) -> Result<RecordValue>;

    /// Creates a field and returns the identifier the host assigned.
    async fn add_field(&self, table: &TableId, config: FieldConfig) -> Result<FieldId>;

    async fn delete_field(&self, table: &TableId, field: &FieldId) -> Result<()>;

    async fn delete_records(&self, table: &TableId, records: &[RecordId]) -> Result<()>;

    /// Bulk insert; returns the new record identifiers in input order.
    async fn add_records(&self, table: &TableId, records: Vec<NewRecord>)
    -> Result<Vec<RecordId>>;

    /// Brings the table into focus in the host UI.
    async fn switch_to_table(&self, table: &TableId) -> Result<()>;
}
