//! Result type alias for hotelfeed

use super::errors::FeedError;

/// Result type alias using [`FeedError`] as the error type
///
/// # Examples
///
/// ```
/// use hotelfeed::domain::result::Result;
/// use hotelfeed::domain::errors::FeedError;
///
/// fn failing_function() -> Result<()> {
///     Err(FeedError::Configuration("missing API_TOKEN".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FeedError>;
