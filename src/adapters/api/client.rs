//! HTTP client for the records API

use super::pagination::next_link;
use super::request::{FetchRequest, RecordSource};
use crate::config::{ApiSettings, HttpConfig, SecretValue};
use crate::domain::{extract_records, ApiError, FeedError, Record, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, LINK};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Longest upstream body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Authenticated client for `API_BASE_URL`
///
/// Every request carries `Accept: application/json` and the token header.
/// Timeouts come from [`HttpConfig`] and are always finite.
///
/// # Example
///
/// ```no_run
/// use hotelfeed::adapters::api::{ApiClient, FetchRequest, RecordSource};
/// use hotelfeed::config::{ApiSettings, HttpConfig, SourceConfig};
/// use hotelfeed::domain::{Category, DateWindow, WindowName};
/// use chrono::NaiveDate;
///
/// # async fn example() -> hotelfeed::domain::Result<()> {
/// let client = ApiClient::new(&ApiSettings::from_env()?, &HttpConfig::default())?;
/// let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
/// let window = DateWindow::new(WindowName::History, day, day)?;
/// let source = SourceConfig::implicit(Category::Rooms);
/// let request = FetchRequest::for_source(Category::Rooms, window, &source, &[]);
/// let records = client.fetch(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    base_url: String,
    client: Client,
    timeout_seconds: u64,
    max_pages: usize,
}

impl ApiClient {
    /// Builds the client
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Configuration` if the token cannot be sent as a
    /// header value or the HTTP client cannot be built.
    pub fn new(api: &ApiSettings, http: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let name = HeaderName::from_bytes(api.token_header.as_bytes()).map_err(|e| {
            FeedError::Configuration(format!("Invalid token header '{}': {e}", api.token_header))
        })?;
        let mut value = HeaderValue::from_str(&auth_header_value(
            &api.token_header,
            api.token.expose_secret(),
        ))
        .map_err(|_| {
            FeedError::Configuration("API_TOKEN contains characters not allowed in a header".into())
        })?;
        value.set_sensitive(true);
        headers.insert(name, value);

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(http.timeout_seconds))
            .connect_timeout(Duration::from_secs(http.connect_timeout_seconds))
            .user_agent(concat!("hotelfeed/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| FeedError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            client,
            timeout_seconds: http.timeout_seconds,
            max_pages: http.max_pages,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|e| FeedError::Configuration(format!("Invalid request URL '{raw}': {e}")))
    }

    /// Fetches one page; returns its records and the raw `next` link
    async fn get_page(
        &self,
        url: &Url,
        params: Option<&[(String, String)]>,
    ) -> Result<(Vec<Record>, Option<String>)> {
        let mut request = self.client.get(url.clone());
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FeedError::Network(format!(
                    "Request to {url} timed out after {}s",
                    self.timeout_seconds
                ))
            } else {
                FeedError::Network(format!("Request to {url} failed: {e}"))
            }
        })?;

        let status = response.status();
        let final_url = response.url().to_string();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            FeedError::Network(format!("Failed to read response from {final_url}: {e}"))
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                url: final_url,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            }
            .into());
        }

        if body.trim().is_empty() {
            return Ok((Vec::new(), next_link(link.as_deref())));
        }

        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
                url: final_url.clone(),
                message: e.to_string(),
            })?;

        Ok((extract_records(payload), next_link(link.as_deref())))
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Record>> {
        let start_url = self.url_for(&request.path)?;
        let mut url = start_url.clone();
        let mut records = Vec::new();
        let mut pages = 0usize;

        loop {
            let params = (pages == 0).then_some(request.params.as_slice());
            let (page, next) = self.get_page(&url, params).await?;
            pages += 1;

            tracing::debug!(
                category = %request.category,
                window = %request.window.name(),
                source = %request.source,
                page = pages,
                count = page.len(),
                "Fetched page"
            );
            records.extend(page);

            let Some(next) = next else {
                break;
            };
            if pages >= self.max_pages {
                return Err(ApiError::TooManyPages {
                    url: start_url.to_string(),
                    max_pages: self.max_pages,
                }
                .into());
            }
            url = url.join(&next).map_err(|e| ApiError::InvalidResponse {
                url: url.to_string(),
                message: format!("Invalid next link '{next}': {e}"),
            })?;
        }

        tracing::info!(
            category = %request.category,
            window = %request.window.name(),
            source = %request.source,
            pages = pages,
            count = records.len(),
            "Fetched records"
        );

        Ok(records)
    }
}

/// Token header value; `Authorization` tokens get a `Bearer ` prefix unless
/// they already carry one
pub fn auth_header_value(header_name: &str, token: &SecretValue) -> String {
    let token_str: &str = token.as_ref();
    if header_name.eq_ignore_ascii_case("authorization")
        && !token.starts_with_ignore_case("bearer ")
    {
        format!("Bearer {token_str}")
    } else {
        token_str.to_string()
    }
}
