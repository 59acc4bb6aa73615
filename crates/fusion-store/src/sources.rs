//! Enumeration of the (table, view) pairs a user can pick as fusion sources.

use fusion_model::{TableId, ViewId};
use futures_util::future::try_join_all;
use serde::Serialize;

use crate::error::Result;
use crate::store::TableStore;

/// One selectable source: a grid view of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    pub table_id: TableId,
    pub table_name: String,
    pub view_id: ViewId,
    pub view_name: String,
}

impl SourceOption {
    /// Display label, `<table>_<view>`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.table_name, self.view_name)
    }
}

/// Lists every grid view of every table, tables in host order.
pub async fn list_sources<S>(store: &S) -> Result<Vec<SourceOption>>
where
    S: TableStore + ?Sized,
{
    let tables = store.table_list().await?;
    let per_table = try_join_all(tables.iter().map(|table| async move {
        let views = store.grid_views(&table.id).await?;
        Ok::<_, crate::StoreError>(
            views
                .into_iter()
                .map(|view| SourceOption {
                    table_id: table.id.clone(),
                    table_name: table.name.clone(),
                    view_id: view.id,
                    view_name: view.name,
                })
                .collect::<Vec<_>>(),
        )
    }))
    .await?;
    Ok(per_table.into_iter().flatten().collect())
}
