//! Cartesian merge of normalized tables.

use fusion_model::NormalizedTable;

use crate::error::{FusionError, Result};

/// Cartesian product of `left` and `right`.
///
/// The result keeps `left`'s identity, lists `left`'s fields before
/// `right`'s, and holds one record per ordered pair `(a, b)`: outer loop over
/// `left.records`, inner loop over `right.records`. Record `i * m + j` is the
/// union of `left.records[i]` and `right.records[j]`.
///
/// Field names of the two tables must be disjoint (see
/// [`crate::rename::ensure_disjoint`]); on a shared name `right` wins.
pub fn merge_tables(left: &NormalizedTable, right: &NormalizedTable) -> NormalizedTable {
    debug_assert!(
        right.field_names.iter().all(|name| !left.has_field(name)),
        "merged tables must have disjoint field names"
    );
    let mut field_names = Vec::with_capacity(left.field_count() + right.field_count());
    field_names.extend(left.field_names.iter().cloned());
    field_names.extend(right.field_names.iter().cloned());

    let mut field_meta = left.field_meta.clone();
    field_meta.extend(
        right
            .field_meta
            .iter()
            .map(|(name, meta)| (name.clone(), meta.clone())),
    );

    let records = left
        .records
        .iter()
        .flat_map(|a| right.records.iter().map(move |b| a.union(b)))
        .collect();

    NormalizedTable {
        id: left.id.clone(),
        name: left.name.clone(),
        field_names,
        field_meta,
        records,
    }
}

/// Left fold of [`merge_tables`] over `tables` in order:
/// `merge(merge(merge(T1, T2), T3), ..., Tk)`.
///
/// # Errors
///
/// Returns [`FusionError::Validation`] when fewer than two tables are given.
pub fn fold_tables(tables: &[NormalizedTable]) -> Result<NormalizedTable> {
    let [first, rest @ ..] = tables else {
        return Err(FusionError::Validation { count: 0 });
    };
    if rest.is_empty() {
        return Err(FusionError::Validation { count: 1 });
    }
    Ok(rest
        .iter()
        .fold(first.clone(), |acc, table| merge_tables(&acc, table)))
}
