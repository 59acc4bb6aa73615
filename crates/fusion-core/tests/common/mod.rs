//! Shared fixtures for fusion integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use fusion_core::{FusionRequest, SourceSelection};
use fusion_model::{CellValue, FieldType, TableId, ViewId};
use fusion_store::{MemoryStore, TableSnapshot, ViewSnapshot, WorkspaceSnapshot, cells_by_name};

pub fn table_id(id: &str) -> TableId {
    TableId::new(id).unwrap()
}

pub fn source(table: &str, view: &str) -> SourceSelection {
    SourceSelection::new(table_id(table), ViewId::new(view).unwrap())
}

pub fn request(sources: &[(&str, &str)], output: &str) -> FusionRequest {
    FusionRequest {
        sources: sources.iter().map(|(t, v)| source(t, v)).collect(),
        output: table_id(output),
    }
}

pub fn orders() -> TableSnapshot {
    TableSnapshot::new(table_id("tblOrders"), "Orders")
        .with_text_field("fldOrderId", "OrderId")
        .with_typed_field("fldAmount", "Amount", FieldType::Number)
        .with_text_field("fldNote", "Note")
        .with_view(ViewSnapshot::grid("vewAll", "All").hiding("fldNote"))
        .with_view(
            ViewSnapshot::grid("vewBig", "Big")
                .hiding("fldNote")
                .filtered("fldNote", "big"),
        )
        .with_row(
            "recO1",
            [
                ("fldOrderId", CellValue::from("A-1")),
                ("fldAmount", CellValue::from(120.0)),
                ("fldNote", CellValue::from("big")),
            ],
        )
        .with_row(
            "recO2",
            [
                ("fldOrderId", CellValue::from("A-2")),
                ("fldAmount", CellValue::from(80.0)),
                ("fldNote", CellValue::from("small")),
            ],
        )
}

pub fn customers() -> TableSnapshot {
    TableSnapshot::new(table_id("tblCustomers"), "Customers")
        .with_text_field("fldName", "Name")
        .with_view(ViewSnapshot::grid("vewAll", "All"))
        .with_row("recC1", [("fldName", CellValue::from("Ann"))])
        .with_row("recC2", [("fldName", CellValue::from("Bob"))])
        .with_row("recC3", [("fldName", CellValue::from("Cid"))])
}

pub fn regions() -> TableSnapshot {
    TableSnapshot::new(table_id("tblRegions"), "Regions")
        .with_text_field("fldCode", "Code")
        .with_view(ViewSnapshot::grid("vewAll", "All"))
        .with_row("recR1", [("fldCode", CellValue::from("EU"))])
        .with_row("recR2", [("fldCode", CellValue::from("US"))])
}

/// Output table with leftovers from an earlier run.
pub fn result_table() -> TableSnapshot {
    TableSnapshot::new(table_id("tblResult"), "Result")
        .with_text_field("fldStale", "Stale")
        .with_view(ViewSnapshot::grid("vewResult", "Grid"))
        .with_row("recS1", [("fldStale", CellValue::from("old"))])
        .with_row("recS2", [("fldStale", CellValue::from("older"))])
}

pub fn store() -> MemoryStore {
    MemoryStore::new(
        WorkspaceSnapshot::new()
            .with_table(orders())
            .with_table(customers())
            .with_table(regions())
            .with_table(result_table()),
    )
}

/// Output rows keyed by field name, values rendered as text.
pub async fn output_rows(store: &MemoryStore, table: &str) -> Vec<BTreeMap<String, String>> {
    let snapshot = store.table_snapshot(&table_id(table)).await.unwrap();
    snapshot
        .records
        .iter()
        .map(|record| {
            cells_by_name(&snapshot, record)
                .into_iter()
                .map(|(name, value)| (name, render(&value)))
                .collect()
        })
        .collect()
}

pub async fn output_fields(store: &MemoryStore, table: &str) -> Vec<String> {
    store
        .table_snapshot(&table_id(table))
        .await
        .unwrap()
        .field_names()
}

fn render(value: &CellValue) -> String {
    match value {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(number) => number.to_string(),
        other => format!("{other:?}"),
    }
}
