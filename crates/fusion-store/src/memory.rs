//! In-memory [`TableStore`] backed by a [`WorkspaceSnapshot`].
//!
//! Used by the CLI (loaded from and saved to a JSON workspace file) and by
//! tests. Behaves like the host where it matters to fusion: field names are
//! unique per table, views hide fields and filter/sort records, and identifiers
//! are assigned by the store.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use fusion_model::{
    FieldConfig, FieldId, FieldMeta, NewRecord, RecordId, RecordValue, TableId, TableMeta,
    ViewId, ViewMeta,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::snapshot::{TableSnapshot, ViewSnapshot, WorkspaceSnapshot};
use crate::store::TableStore;

/// A mutation applied to the store, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    SwitchTo { table: TableId },
    AddField { table: TableId, name: String },
    DeleteField { table: TableId, field: FieldId },
    DeleteRecords { table: TableId, count: usize },
    AddRecords { table: TableId, count: usize },
}

/// Failures to inject, for exercising partial writes.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Reject every `add_field` call after this many have succeeded.
    pub add_field_limit: Option<usize>,
    /// Reject every `add_records` call.
    pub reject_add_records: bool,
}

#[derive(Debug)]
struct State {
    workspace: WorkspaceSnapshot,
    next_id: u64,
    fields_added: usize,
    journal: Vec<StoreOp>,
}

#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<State>,
    faults: Faults,
}

impl MemoryStore {
    pub fn new(workspace: WorkspaceSnapshot) -> Self {
        Self {
            state: RwLock::new(State {
                workspace,
                next_id: 1,
                fields_added: 0,
                journal: Vec::new(),
            }),
            faults: Faults::default(),
        }
    }

    pub fn with_faults(mut self, faults: Faults) -> Self {
        self.faults = faults;
        self
    }

    /// Loads a workspace file.
    pub fn open(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| StoreError::io("read", path, source))?;
        let workspace: WorkspaceSnapshot =
            serde_json::from_str(&content).map_err(|source| StoreError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), tables = workspace.tables.len(), "loaded workspace");
        Ok(Self::new(workspace))
    }

    /// Writes the current workspace back to a file as pretty JSON.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let workspace = self.snapshot().await;
        let content =
            serde_json::to_string_pretty(&workspace).map_err(|source| StoreError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, content).map_err(|source| StoreError::io("write", path, source))?;
        debug!(path = %path.display(), "saved workspace");
        Ok(())
    }

    /// A copy of the current workspace contents.
    pub async fn snapshot(&self) -> WorkspaceSnapshot {
        self.state.read().await.workspace.clone()
    }

    pub async fn table_snapshot(&self, table: &TableId) -> Option<TableSnapshot> {
        self.state.read().await.workspace.table(table).cloned()
    }

    /// Mutations applied so far.
    pub async fn journal(&self) -> Vec<StoreOp> {
        self.state.read().await.journal.clone()
    }

    async fn read_table<T>(
        &self,
        table: &TableId,
        f: impl FnOnce(&TableSnapshot) -> Result<T> + Send,
    ) -> Result<T> {
        let state = self.state.read().await;
        let snapshot = state
            .workspace
            .table(table)
            .ok_or_else(|| table_not_found(table))?;
        f(snapshot)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(WorkspaceSnapshot::default())
    }
}

fn table_not_found(table: &TableId) -> StoreError {
    StoreError::TableNotFound {
        table: table.clone(),
    }
}

fn view_of<'a>(
    snapshot: &'a TableSnapshot,
    view: &ViewId,
) -> Result<&'a ViewSnapshot> {
    snapshot.view(view).ok_or_else(|| StoreError::ViewNotFound {
        table: snapshot.id.clone(),
        view: view.clone(),
    })
}

/// Identifiers used by any field or record of the table.
fn taken_ids(snapshot: &TableSnapshot) -> HashSet<String> {
    snapshot
        .fields
        .iter()
        .map(|field| field.id.as_str().to_owned())
        .chain(snapshot.records.iter().map(|record| record.id.as_str().to_owned()))
        .collect()
}

/// Next identifier with `prefix` not in `taken`; it is added to `taken`.
fn fresh_id(next_id: &mut u64, taken: &mut HashSet<String>, prefix: &str) -> String {
    loop {
        let candidate = format!("{prefix}{next_id}");
        *next_id += 1;
        if taken.insert(candidate.clone()) {
            return candidate;
        }
    }
}

fn rejected(operation: &'static str, message: impl Into<String>) -> StoreError {
    StoreError::Rejected {
        operation,
        message: message.into(),
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn table_list(&self) -> Result<Vec<TableMeta>> {
        let state = self.state.read().await;
        Ok(state.workspace.tables.iter().map(TableSnapshot::meta).collect())
    }

    async fn table_name(&self, table: &TableId) -> Result<String> {
        self.read_table(table, |t| Ok(t.name.clone())).await
    }

    async fn field_meta_list(&self, table: &TableId) -> Result<Vec<FieldMeta>> {
        self.read_table(table, |t| Ok(t.fields.clone())).await
    }

    async fn view_meta_list(&self, table: &TableId) -> Result<Vec<ViewMeta>> {
        self.read_table(table, |t| Ok(t.views.iter().map(ViewSnapshot::meta).collect()))
            .await
    }

    async fn view_field_meta_list(
        &self,
        table: &TableId,
        view: &ViewId,
    ) -> Result<Vec<FieldMeta>> {
        self.read_table(table, |t| {
            let view = view_of(t, view)?;
            Ok(view.visible_fields(t).into_iter().cloned().collect())
        })
        .await
    }

    async fn visible_record_ids(&self, table: &TableId, view: &ViewId) -> Result<Vec<RecordId>> {
        self.read_table(table, |t| {
            let view = view_of(t, view)?;
            Ok(view
                .visible_records(t)
                .into_iter()
                .map(|record| record.id.clone())
                .collect())
        })
        .await
    }

    async fn record_id_list(&self, table: &TableId) -> Result<Vec<RecordId>> {
        self.read_table(table, |t| Ok(t.records.iter().map(|r| r.id.clone()).collect()))
            .await
    }

    async fn record_by_id(&self, table: &TableId, record: &RecordId) -> Result<RecordValue> {
        self.read_table(table, |t| {
            t.record(record)
                .cloned()
                .ok_or_else(|| StoreError::RecordNotFound {
                    table: t.id.clone(),
                    record: record.clone(),
                })
        })
        .await
    }

    async fn add_field(&self, table: &TableId, config: FieldConfig) -> Result<FieldId> {
        let mut guard = self.state.write().await;
        let State {
            workspace,
            next_id,
            fields_added,
            journal,
        } = &mut *guard;
        let snapshot = workspace
            .table_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        if let Some(limit) = self.faults.add_field_limit
            && *fields_added >= limit
        {
            return Err(rejected("add_field", "field quota exceeded"));
        }
        let name = config.name.trim().to_string();
        if name.is_empty() {
            return Err(rejected("add_field", "field name must not be empty"));
        }
        if snapshot.fields.iter().any(|field| field.name == name) {
            return Err(StoreError::DuplicateFieldName {
                table: table.clone(),
                name,
            });
        }
        let id = FieldId::new(fresh_id(next_id, &mut taken_ids(snapshot), "fld"))
            .map_err(|error| rejected("add_field", error.to_string()))?;
        snapshot.fields.push(FieldMeta {
            id: id.clone(),
            name: name.clone(),
            field_type: config.field_type,
            property: config.property,
        });
        *fields_added += 1;
        journal.push(StoreOp::AddField {
            table: table.clone(),
            name,
        });
        Ok(id)
    }

    async fn delete_field(&self, table: &TableId, field: &FieldId) -> Result<()> {
        let mut guard = self.state.write().await;
        let State {
            workspace, journal, ..
        } = &mut *guard;
        let snapshot = workspace
            .table_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        let before = snapshot.fields.len();
        snapshot.fields.retain(|meta| &meta.id != field);
        if snapshot.fields.len() == before {
            return Err(StoreError::FieldNotFound {
                table: table.clone(),
                field: field.clone(),
            });
        }
        for record in &mut snapshot.records {
            record.fields.remove(field);
        }
        for view in &mut snapshot.views {
            view.field_order.retain(|id| id != field);
            view.hidden_fields.retain(|id| id != field);
            view.filters.retain(|filter| &filter.field != field);
            if view.sort.as_ref().is_some_and(|sort| &sort.field == field) {
                view.sort = None;
            }
        }
        journal.push(StoreOp::DeleteField {
            table: table.clone(),
            field: field.clone(),
        });
        Ok(())
    }

    async fn delete_records(&self, table: &TableId, records: &[RecordId]) -> Result<()> {
        let mut guard = self.state.write().await;
        let State {
            workspace, journal, ..
        } = &mut *guard;
        let snapshot = workspace
            .table_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        let existing: HashSet<&RecordId> =
            snapshot.records.iter().map(|record| &record.id).collect();
        if let Some(missing) = records.iter().find(|id| !existing.contains(id)) {
            return Err(StoreError::RecordNotFound {
                table: table.clone(),
                record: missing.clone(),
            });
        }
        let doomed: HashSet<&RecordId> = records.iter().collect();
        snapshot.records.retain(|record| !doomed.contains(&record.id));
        journal.push(StoreOp::DeleteRecords {
            table: table.clone(),
            count: records.len(),
        });
        Ok(())
    }

    async fn add_records(
        &self,
        table: &TableId,
        records: Vec<NewRecord>,
    ) -> Result<Vec<RecordId>> {
        let mut guard = self.state.write().await;
        let State {
            workspace,
            next_id,
            journal,
            ..
        } = &mut *guard;
        let snapshot = workspace
            .table_mut(table)
            .ok_or_else(|| table_not_found(table))?;
        if self.faults.reject_add_records {
            return Err(rejected("add_records", "bulk insert refused"));
        }
        let known: HashSet<&FieldId> = snapshot.fields.iter().map(|field| &field.id).collect();
        for record in &records {
            if let Some(unknown) = record.fields.keys().find(|id| !known.contains(id)) {
                return Err(StoreError::FieldNotFound {
                    table: table.clone(),
                    field: unknown.clone(),
                });
            }
        }
        let mut taken = taken_ids(snapshot);
        let count = records.len();
        let mut ids = Vec::with_capacity(count);
        for record in records {
            let id = RecordId::new(fresh_id(next_id, &mut taken, "rec"))
                .map_err(|error| rejected("add_records", error.to_string()))?;
            snapshot.records.push(RecordValue {
                id: id.clone(),
                fields: record.fields,
            });
            ids.push(id);
        }
        journal.push(StoreOp::AddRecords {
            table: table.clone(),
            count,
        });
        Ok(ids)
    }

    async fn switch_to_table(&self, table: &TableId) -> Result<()> {
        let mut guard = self.state.write().await;
        if guard.workspace.table(table).is_none() {
            return Err(table_not_found(table));
        }
        guard.workspace.active_table = Some(table.clone());
        guard.journal.push(StoreOp::SwitchTo {
            table: table.clone(),
        });
        Ok(())
    }
}
