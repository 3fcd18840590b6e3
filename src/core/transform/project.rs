//! Field allow-list projection

use crate::domain::Record;
use serde_json::Value;
use std::collections::BTreeSet;

/// Projects every record onto `fields`, in that order
///
/// Missing fields become `null`; fields not listed are dropped. An empty
/// allow-list returns the records unchanged.
pub fn project_records(records: Vec<Record>, fields: &[String]) -> Vec<Record> {
    if fields.is_empty() {
        return records;
    }
    records
        .into_iter()
        .map(|record| project_record(&record, fields))
        .collect()
}

/// Projects one record onto `fields`
pub fn project_record(record: &Record, fields: &[String]) -> Record {
    fields
        .iter()
        .map(|field| {
            let value = record.get(field).cloned().unwrap_or(Value::Null);
            (field.clone(), value)
        })
        .collect()
}

/// Column set when no allow-list is configured: sorted union of all keys
pub fn union_of_keys(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
