//! Field renaming: every field gets its source's prefix so field names stay
//! unique once sources are merged.

use std::collections::BTreeSet;

use fusion_model::NormalizedTable;
use tracing::warn;

use crate::error::{FusionError, Result};
use crate::options::DEFAULT_SEPARATOR;

/// Renames every field to `<table name>_<field name>`.
pub fn rename_fields(table: &NormalizedTable) -> NormalizedTable {
    rename_fields_with(table, &table.name, DEFAULT_SEPARATOR)
}

/// Renames every field to `<prefix><separator><field name>`.
///
/// A bijection on field names: nothing is merged or dropped, and each
/// record keeps its values under the new names.
pub fn rename_fields_with(table: &NormalizedTable, prefix: &str, separator: &str) -> NormalizedTable {
    let rename = |name: &str| format!("{prefix}{separator}{name}");
    let field_names: Vec<String> = table.field_names.iter().map(|name| rename(name.as_str())).collect();
    let field_meta = table
        .field_names
        .iter()
        .zip(&field_names)
        .filter_map(|(old, new)| table.meta(old).map(|meta| (new.clone(), meta.clone())))
        .collect();
    let records = table
        .records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(name, value)| (rename(name), value.clone()))
                .collect()
        })
        .collect();
    NormalizedTable {
        id: table.id.clone(),
        name: table.name.clone(),
        field_names,
        field_meta,
        records,
    }
}

/// Picks a rename prefix per source, in selection order.
///
/// A source uses its display name unless an earlier source already claimed
/// it, or one of its renamed fields would clash with a field an earlier
/// source produced. It then tries `<name><sep><table id>`, then
/// `<name><sep><table id><sep><position>` (1-based), then that with a
/// `<sep><n>` counter appended until nothing clashes.
pub fn resolve_prefixes(tables: &[NormalizedTable], separator: &str) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut claimed: BTreeSet<String> = BTreeSet::new();
    let mut prefixes = Vec::with_capacity(tables.len());
    for (index, table) in tables.iter().enumerate() {
        let renamed = |prefix: &str| -> Vec<String> {
            table
                .field_names
                .iter()
                .map(|name| format!("{prefix}{separator}{name}"))
                .collect()
        };
        let free = |prefix: &str| {
            !used.contains(prefix) && renamed(prefix).iter().all(|name| !claimed.contains(name))
        };
        let positioned = format!("{}{separator}{}{separator}{}", table.name, table.id, index + 1);
        let mut candidates = [
            table.name.clone(),
            format!("{}{separator}{}", table.name, table.id),
            positioned.clone(),
        ]
        .into_iter();
        let mut counter = 2u64;
        let prefix = loop {
            let candidate = match candidates.next() {
                Some(candidate) => candidate,
                None => {
                    counter += 1;
                    format!("{positioned}{separator}{}", counter - 1)
                }
            };
            if free(&candidate) {
                break candidate;
            }
        };
        if prefix != table.name {
            warn!(
                table_id = %table.id,
                table_name = %table.name,
                prefix = %prefix,
                "source prefix clashes with an earlier source, using disambiguated prefix"
            );
        }
        claimed.extend(renamed(&prefix));
        used.insert(prefix.clone());
        prefixes.push(prefix);
    }
    prefixes
}

/// Fails when a field name occurs in more than one table.
pub fn ensure_disjoint(tables: &[NormalizedTable]) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for table in tables {
        for name in &table.field_names {
            if !seen.insert(name.as_str()) {
                return Err(FusionError::DuplicateField {
                    field: name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use fusion_model::{CellValue, FieldId, FieldMeta, FieldType, Record, TableId};

    use super::*;

    fn table(id: &str, name: &str, fields: &[&str]) -> NormalizedTable {
        let mut table = NormalizedTable::new(TableId::new(id).unwrap(), name);
        for (i, field) in fields.iter().enumerate() {
            let meta = FieldMeta::new(
                FieldId::new(format!("fld{i}")).unwrap(),
                *field,
                FieldType::Text,
            );
            table.push_field(meta).unwrap();
        }
        table
    }

    #[test]
    fn rename_prefixes_names_meta_and_records() {
        let source = table("t1", "Orders", &["OrderId", "Amount"]).with_records(vec![
            Record::from_iter([
                ("OrderId", CellValue::from("A-1")),
                ("Amount", CellValue::from(5.0)),
            ]),
        ]);
        let renamed = rename_fields(&source);

        assert_eq!(
            renamed.field_names,
            vec!["Orders_OrderId".to_string(), "Orders_Amount".to_string()]
        );
        assert_eq!(
            renamed.meta("Orders_Amount").map(|m| m.name.as_str()),
            Some("Amount")
        );
        assert_eq!(
            renamed.records[0].get("Orders_OrderId"),
            Some(&CellValue::from("A-1"))
        );
        assert!(renamed.validate().is_ok());
        // The input is untouched.
        assert_eq!(source.field_names[0], "OrderId");
    }

    #[test]
    fn rename_with_custom_separator() {
        let renamed = rename_fields_with(&table("t1", "Orders", &["Id"]), "O", ".");
        assert_eq!(renamed.field_names, vec!["O.Id".to_string()]);
    }

    #[test]
    fn distinct_names_give_disjoint_fields() {
        let a = rename_fields(&table("t1", "A", &["x", "y"]));
        let b = rename_fields(&table("t2", "B", &["x", "y"]));
        assert!(ensure_disjoint(&[a, b]).is_ok());
    }

    #[test]
    fn same_names_collide_without_disambiguation() {
        let a = rename_fields(&table("t1", "A", &["x"]));
        let b = rename_fields(&table("t2", "A", &["x"]));
        let err = ensure_disjoint(&[a, b]).unwrap_err();
        assert!(matches!(err, FusionError::DuplicateField { field } if field == "A_x"));
    }

    #[test]
    fn prefixes_fall_back_to_id_then_position() {
        let tables = vec![
            table("t1", "Orders", &[]),
            table("t2", "Orders", &[]),
            table("t1", "Orders", &[]),
            table("t1", "Orders", &[]),
            table("t3", "Customers", &[]),
        ];
        assert_eq!(
            resolve_prefixes(&tables, "_"),
            vec![
                "Orders".to_string(),
                "Orders_t2".to_string(),
                "Orders_t1".to_string(),
                "Orders_t1_4".to_string(),
                "Customers".to_string(),
            ]
        );
    }

    #[test]
    fn prefixes_avoid_renamed_field_clashes() {
        let tables = vec![
            table("tA", "A", &["b_c"]),
            table("tAb", "A_b", &["c"]),
        ];
        let prefixes = resolve_prefixes(&tables, "_");
        assert_eq!(prefixes, vec!["A".to_string(), "A_b_tAb".to_string()]);

        let renamed: Vec<NormalizedTable> = tables
            .iter()
            .zip(&prefixes)
            .map(|(table, prefix)| rename_fields_with(table, prefix, "_"))
            .collect();
        assert!(ensure_disjoint(&renamed).is_ok());
        assert_eq!(renamed[1].field_names, vec!["A_b_tAb_c".to_string()]);
    }

    #[test]
    fn prefix_counter_extends_past_position() {
        // The positioned prefix of the third source renames `c` onto a field
        // the first source already produced.
        let tables = vec![
            table("t1", "X", &["t1_3_c", "t1_c"]),
            table("t1", "X", &["t1_3_c"]),
            table("t1", "X", &["c"]),
        ];
        let prefixes = resolve_prefixes(&tables, "_");
        assert_eq!(prefixes[0], "X");
        assert_eq!(prefixes[1], "X_t1");
        assert_eq!(prefixes[2], "X_t1_3_2");
    }
}
