//! Cardinality and ordering properties of the cartesian merge.

use fusion_core::{fold_tables, merge_tables};
use fusion_model::{CellValue, FieldId, FieldMeta, FieldType, NormalizedTable, Record, TableId};
use proptest::prelude::*;

/// Table `prefix` with `width` fields and `rows` records; cell values encode
/// their row index.
fn table(prefix: &str, width: usize, rows: usize) -> NormalizedTable {
    let mut table = NormalizedTable::new(TableId::new(prefix).unwrap(), prefix);
    for column in 0..width {
        table
            .push_field(FieldMeta::new(
                FieldId::new(format!("{prefix}f{column}")).unwrap(),
                format!("{prefix}_{column}"),
                FieldType::Number,
            ))
            .unwrap();
    }
    let records = (0..rows)
        .map(|row| {
            (0..width)
                .map(|column| (format!("{prefix}_{column}"), CellValue::from(row as f64)))
                .collect::<Record>()
        })
        .collect();
    table.with_records(records)
}

fn row_of(record: &Record, field: &str) -> Option<usize> {
    match record.get(field) {
        Some(CellValue::Number(value)) => Some(*value as usize),
        _ => None,
    }
}

proptest! {
    #[test]
    fn merge_has_n_times_m_records(
        n in 0usize..8,
        m in 0usize..8,
        a_width in 1usize..4,
        b_width in 1usize..4,
    ) {
        let a = table("a", a_width, n);
        let b = table("b", b_width, m);
        let merged = merge_tables(&a, &b);

        prop_assert_eq!(merged.record_count(), n * m);
        prop_assert_eq!(merged.field_count(), a_width + b_width);
        prop_assert_eq!(&merged.field_names[..a_width], &a.field_names[..]);
        prop_assert_eq!(&merged.field_names[a_width..], &b.field_names[..]);
        prop_assert_eq!(&merged.id, &a.id);
        prop_assert!(merged.validate().is_ok());
    }

    #[test]
    fn merge_is_row_major(n in 1usize..8, m in 1usize..8) {
        let merged = merge_tables(&table("a", 1, n), &table("b", 1, m));
        for (index, record) in merged.records.iter().enumerate() {
            prop_assert_eq!(row_of(record, "a_0"), Some(index / m));
            prop_assert_eq!(row_of(record, "b_0"), Some(index % m));
            prop_assert_eq!(record.len(), 2);
        }
    }

    #[test]
    fn fold_multiplies_cardinalities(sizes in prop::collection::vec(0usize..5, 2..5)) {
        let tables: Vec<NormalizedTable> = sizes
            .iter()
            .enumerate()
            .map(|(i, rows)| table(&format!("t{i}"), 1, *rows))
            .collect();
        let fused = fold_tables(&tables).unwrap();

        prop_assert_eq!(fused.record_count(), sizes.iter().product::<usize>());
        prop_assert_eq!(fused.field_count(), sizes.len());
        prop_assert_eq!(&fused.id, &tables[0].id);
        // The last table varies fastest.
        if let Some(last) = sizes.last().copied().filter(|&rows| rows > 1) {
            let field = format!("t{}_0", sizes.len() - 1);
            let rows = &fused.records;
            if rows.len() >= 2 {
                prop_assert_eq!(row_of(&rows[0], &field), Some(0));
                prop_assert_eq!(row_of(&rows[1], &field), Some(1 % last));
            }
        }
    }
}
