//! API connection settings read from the environment

use super::secret::{secret_string, SecretString};
use crate::domain::{FeedError, Result};
use reqwest::header::HeaderName;
use secrecy::ExposeSecret;

pub const API_BASE_URL: &str = "API_BASE_URL";
pub const API_TOKEN: &str = "API_TOKEN";
pub const API_TOKEN_HEADER: &str = "API_TOKEN_HEADER";

/// Base URL and credentials for the records API
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL without a trailing `/`
    pub base_url: String,

    /// Name of the header carrying the token
    pub token_header: String,

    pub token: SecretString,
}

impl ApiSettings {
    /// Reads the settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Configuration` naming every missing or blank
    /// variable, or describing an invalid base URL or header name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = read(API_BASE_URL);
        let token = read(API_TOKEN);
        let token_header = read(API_TOKEN_HEADER);

        let missing: Vec<&str> = [
            (API_BASE_URL, base_url.is_none()),
            (API_TOKEN, token.is_none()),
            (API_TOKEN_HEADER, token_header.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();

        let (Some(base_url), Some(token), Some(token_header)) = (base_url, token, token_header)
        else {
            return Err(FeedError::Configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let settings = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token_header: token_header.trim().to_string(),
            token: secret_string(token.trim().to_string()),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(FeedError::Configuration(format!(
                "{API_BASE_URL} must start with http:// or https://"
            )));
        }

        if HeaderName::from_bytes(self.token_header.as_bytes()).is_err() {
            return Err(FeedError::Configuration(format!(
                "{API_TOKEN_HEADER} '{}' is not a valid HTTP header name",
                self.token_header
            )));
        }

        if self.token.expose_secret().is_empty() {
            return Err(FeedError::Configuration(format!("{API_TOKEN} cannot be empty")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let settings = ApiSettings::from_lookup(lookup(&[
            (API_BASE_URL, "https://pms.example.com/api/"),
            (API_TOKEN, "abc"),
            (API_TOKEN_HEADER, "X-Api-Key"),
        ]))
        .unwrap();

        assert_eq!(settings.base_url, "https://pms.example.com/api");
        assert_eq!(settings.token_header, "X-Api-Key");
        assert_eq!(settings.token.expose_secret().as_ref(), "abc");
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let err = ApiSettings::from_lookup(lookup(&[
            (API_BASE_URL, "https://pms.example.com"),
            (API_TOKEN_HEADER, "Authorization"),
        ]))
        .unwrap_err();

        assert!(matches!(err, FeedError::Configuration(_)));
        assert!(err.to_string().contains("API_TOKEN"));
    }

    #[test]
    fn test_reports_every_missing_variable() {
        let err = ApiSettings::from_lookup(lookup(&[(API_TOKEN, " ")])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(API_BASE_URL));
        assert!(message.contains(API_TOKEN));
        assert!(message.contains(API_TOKEN_HEADER));
    }

    #[test]
    fn test_invalid_base_url_scheme() {
        let result = ApiSettings::from_lookup(lookup(&[
            (API_BASE_URL, "ftp://pms.example.com"),
            (API_TOKEN, "abc"),
            (API_TOKEN_HEADER, "Authorization"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_header_name() {
        let result = ApiSettings::from_lookup(lookup(&[
            (API_BASE_URL, "https://pms.example.com"),
            (API_TOKEN, "abc"),
            (API_TOKEN_HEADER, "Bad Header"),
        ]));
        assert!(result.is_err());
    }
}
