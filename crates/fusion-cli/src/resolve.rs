//! Resolution of user-supplied table and view names.
//!
//! Tables and views may be named by identifier or by display name. An
//! identifier always wins; a display name must match exactly one entry.

use std::fmt;
use std::str::FromStr;

use fusion_core::SourceSelection;
use fusion_model::{TableId, TableMeta, ViewMeta};
use fusion_store::{StoreError, TableStore};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no table with id or name `{0}`")]
    UnknownTable(String),
    #[error("table `{table}` has no grid view with id or name `{view}`")]
    UnknownView { table: String, view: String },
    #[error("`{key}` names several {kind}s ({ids}); use an id instead")]
    Ambiguous {
        kind: &'static str,
        key: String,
        ids: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A `TABLE:VIEW` source argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArg {
    pub table: String,
    pub view: String,
}

impl FromStr for SourceArg {
    type Err = String;

    /// Splits on the last `:` so table names may contain colons.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (table, view) = value
            .rsplit_once(':')
            .ok_or_else(|| format!("expected TABLE:VIEW, got `{value}`"))?;
        let (table, view) = (table.trim(), view.trim());
        if table.is_empty() || view.is_empty() {
            return Err(format!("expected TABLE:VIEW, got `{value}`"));
        }
        Ok(Self {
            table: table.to_string(),
            view: view.to_string(),
        })
    }
}

impl fmt::Display for SourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.view)
    }
}

fn pick<'a, T>(
    items: &'a [T],
    key: &str,
    kind: &'static str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Result<Option<&'a T>, ResolveError> {
    if let Some(item) = items.iter().find(|item| id(*item) == key) {
        return Ok(Some(item));
    }
    let named: Vec<&T> = items.iter().filter(|item| name(*item) == key).collect();
    match named.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        several => Err(ResolveError::Ambiguous {
            kind,
            key: key.to_string(),
            ids: several
                .iter()
                .map(|item| id(*item))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

pub async fn resolve_table<S>(store: &S, key: &str) -> Result<TableMeta, ResolveError>
where
    S: TableStore + ?Sized,
{
    let tables = store.table_list().await?;
    pick(&tables, key, "table", |t| t.id.as_str(), |t| t.name.as_str())?
        .cloned()
        .ok_or_else(|| ResolveError::UnknownTable(key.to_string()))
}

/// Resolves a grid view of `table`.
pub async fn resolve_view<S>(store: &S, table: &TableId, key: &str) -> Result<ViewMeta, ResolveError>
where
    S: TableStore + ?Sized,
{
    let views = store.grid_views(table).await?;
    pick(&views, key, "view", |v| v.id.as_str(), |v| v.name.as_str())?
        .cloned()
        .ok_or_else(|| ResolveError::UnknownView {
            table: table.to_string(),
            view: key.to_string(),
        })
}

/// Resolves every argument, keeping argument order.
pub async fn resolve_sources<S>(
    store: &S,
    sources: &[SourceArg],
) -> Result<Vec<SourceSelection>, ResolveError>
where
    S: TableStore + ?Sized,
{
    let mut resolved = Vec::with_capacity(sources.len());
    for source in sources {
        let table = resolve_table(store, &source.table).await?;
        let view = resolve_view(store, &table.id, &source.view).await?;
        resolved.push(SourceSelection::new(table.id, view.id));
    }
    Ok(resolved)
}
