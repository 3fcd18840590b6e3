//! Record serialization to CSV and JSON artifacts

use crate::config::OutputFormat;
use crate::core::transform::{project_record, union_of_keys};
use crate::domain::{Artifact, FeedError, Record, Result};
use serde_json::Value;

/// Serializes `records` into the artifact called `name`
///
/// `fields` fixes the column set and order. When it is empty, CSV columns are
/// the sorted union of keys across all records and JSON objects are written
/// as received. An empty record set is not an error: CSV gets a header row
/// only, JSON gets `[]`.
///
/// # Errors
///
/// Returns `FeedError::Serialization` if encoding fails.
pub fn serialize_records(
    name: &str,
    records: &[Record],
    fields: &[String],
    format: OutputFormat,
) -> Result<Artifact> {
    let bytes = match format {
        OutputFormat::Csv => to_csv(records, fields)?,
        OutputFormat::Json => to_json(records, fields)?,
    };

    Ok(Artifact::new(
        name,
        format.extension(),
        format.content_type(),
        bytes,
        records.len(),
    ))
}

fn to_csv(records: &[Record], fields: &[String]) -> Result<Vec<u8>> {
    let header = if fields.is_empty() {
        union_of_keys(records)
    } else {
        fields.to_vec()
    };

    // No columns at all: nothing was configured and nothing came back
    if header.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|field| cell_text(record.get(field))))?;
    }

    writer
        .into_inner()
        .map_err(|e| FeedError::Serialization(format!("Failed to flush CSV: {e}")))
}

fn to_json(records: &[Record], fields: &[String]) -> Result<Vec<u8>> {
    if fields.is_empty() {
        return Ok(serde_json::to_vec_pretty(records)?);
    }
    let projected: Vec<Record> = records
        .iter()
        .map(|record| project_record(record, fields))
        .collect();
    Ok(serde_json::to_vec_pretty(&projected)?)
}

/// CSV cell for a field value
///
/// Missing and `null` are empty, strings are written raw, everything else
/// uses its compact JSON text.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
