//! Joining secondary sources onto a primary source

use crate::domain::Record;
use serde_json::Value;
use std::collections::HashMap;

/// Joins `secondary` onto `primary` by `merge_key`
///
/// Each primary record with matches yields one combined record per match,
/// with the secondary values taking precedence. Primary records without a
/// match pass through unchanged, and secondary records lacking the key are
/// ignored. Key comparison uses the JSON text of the value, so `"42"` and
/// `42` do not match.
pub fn merge_records(primary: Vec<Record>, secondary: &[Record], merge_key: &str) -> Vec<Record> {
    if secondary.is_empty() {
        return primary;
    }

    let mut lookup: HashMap<String, Vec<&Record>> = HashMap::new();
    for item in secondary {
        if let Some(key) = join_key(item, merge_key) {
            lookup.entry(key).or_default().push(item);
        }
    }

    let mut merged = Vec::with_capacity(primary.len());
    for base in primary {
        let extras = join_key(&base, merge_key).and_then(|key| lookup.get(&key));
        match extras {
            Some(extras) => {
                for extra in extras {
                    let mut combined = base.clone();
                    for (field, value) in extra.iter() {
                        combined.insert(field.clone(), value.clone());
                    }
                    merged.push(combined);
                }
            }
            None => merged.push(base),
        }
    }
    merged
}

fn join_key(record: &Record, merge_key: &str) -> Option<String> {
    match record.get(merge_key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_merge_one_to_one() {
        let primary = records(json!([{"reservation_id": 1, "guest": "Ann"}]));
        let secondary = records(json!([{"reservation_id": 1, "amount": 120.5}]));

        let merged = merge_records(primary, &secondary, "reservation_id");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0]["guest"], json!("Ann"));
        assert_eq!(merged[0]["amount"], json!(120.5));
    }

    #[test]
    fn test_merge_fans_out_and_passes_unmatched() {
        let primary = records(json!([
            {"reservation_id": 1, "guest": "Ann"},
            {"reservation_id": 2, "guest": "Bo"}
        ]));
        let secondary = records(json!([
            {"reservation_id": 1, "line": "room"},
            {"reservation_id": 1, "line": "breakfast"},
            {"line": "orphan"}
        ]));

        let merged = merge_records(primary, &secondary, "reservation_id");
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0]["line"], json!("room"));
        assert_eq!(merged[1]["line"], json!("breakfast"));
        assert_eq!(merged[2]["guest"], json!("Bo"));
        assert!(!merged[2].contains_key("line"));
    }

    #[test]
    fn test_secondary_values_override() {
        let primary = records(json!([{"reservation_id": "A", "status": "new"}]));
        let secondary = records(json!([{"reservation_id": "A", "status": "paid"}]));

        let merged = merge_records(primary, &secondary, "reservation_id");
        assert_eq!(merged[0]["status"], json!("paid"));
    }

    #[test]
    fn test_empty_secondary_returns_primary() {
        let primary = records(json!([{"reservation_id": 1}]));
        let merged = merge_records(primary.clone(), &[], "reservation_id");
        assert_eq!(merged, primary);
    }
}
