//! Tests for fusion-model types.

use fusion_model::{
    CellValue, FieldId, FieldMeta, FieldType, NormalizedTable, Record, RecordId, TableId,
};

#[test]
fn normalized_table_serializes() {
    let mut table = NormalizedTable::new(TableId::new("tblOrders").unwrap(), "Orders");
    table
        .push_field(FieldMeta::new(
            FieldId::new("fldId").unwrap(),
            "OrderId",
            FieldType::Text,
        ))
        .unwrap();
    table.push_record(Record::from_iter([("OrderId", CellValue::from("A-1"))]));

    let json = serde_json::to_string(&table).expect("serialize table");
    let round: NormalizedTable = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round, table);
    assert!(round.validate().is_ok());
}

#[test]
fn cell_values_are_tagged() {
    let link = CellValue::Link(vec![RecordId::new("rec1").unwrap()]);
    let json = serde_json::to_value(&link).unwrap();
    assert_eq!(json["kind"], "link");
    assert_eq!(json["value"][0], "rec1");
}

#[test]
fn record_serializes_as_plain_map() {
    let record = Record::from_iter([("Name", CellValue::from("Ann"))]);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["Name"]["kind"], "text");
    assert_eq!(json["Name"]["value"], "Ann");
}
