//! Opaque API records

use serde_json::{Map, Value};

/// One record as returned by the API: field name to JSON value, in the
/// order the fields were received
pub type Record = Map<String, Value>;

/// Pulls the record list out of a decoded response body
///
/// - a JSON array yields its object items
/// - a JSON object yields the array under `data`, `items` or `results`
///   (first match wins), or else the object itself
/// - anything else yields no records
pub fn extract_records(payload: Value) -> Vec<Record> {
    match payload {
        Value::Array(items) => objects_only(items),
        Value::Object(mut object) => {
            for key in ["data", "items", "results"] {
                if matches!(object.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = object.remove(key) {
                        return objects_only(items);
                    }
                }
            }
            vec![object]
        }
        _ => Vec::new(),
    }
}

fn objects_only(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}
