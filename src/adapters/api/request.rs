//! Fetch requests and the record source abstraction

use crate::config::SourceConfig;
use crate::domain::{Category, DateWindow, Record, Result};
use async_trait::async_trait;
use serde_json::Value;

/// One source fetch for one category and window
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub category: Category,
    pub window: DateWindow,

    /// Source name within the category's dataset
    pub source: String,

    /// Path appended to the API base URL, starting with `/`
    pub path: String,

    /// Query parameters sent with the first page
    pub params: Vec<(String, String)>,
}

impl FetchRequest {
    /// Builds the request for `source`
    ///
    /// Parameters are, in order: static params, window dates, `per_page`, and
    /// the requested fields (the source's own list, else `dataset_fields`)
    /// when the source names a `fields_param`.
    pub fn for_source(
        category: Category,
        window: DateWindow,
        source: &SourceConfig,
        dataset_fields: &[String],
    ) -> Self {
        let mut params: Vec<(String, String)> = source
            .params
            .iter()
            .map(|(name, value)| (name.clone(), param_text(value)))
            .collect();

        if let Some(name) = &source.date_params.start {
            params.push((name.clone(), window.start_param()));
        }
        if let Some(name) = &source.date_params.end {
            params.push((name.clone(), window.end_param()));
        }
        if let Some(per_page) = source.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }

        let requested: &[String] = if source.fields.is_empty() {
            dataset_fields
        } else {
            &source.fields
        };
        if let Some(name) = &source.fields_param {
            if !requested.is_empty() {
                params.push((name.clone(), requested.join(",")));
            }
        }

        Self {
            category,
            window,
            source: source.name.clone(),
            path: source.effective_path(),
            params,
        }
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Anything that can produce the records for a [`FetchRequest`]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every record for the request, across all pages
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Record>>;
}
