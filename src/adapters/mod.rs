//! External system integrations for hotelfeed.
//!
//! - [`api`] - the property-management records API (reqwest)
//! - [`sink`] - output destinations: local directory and S3
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`api::RecordSource`], [`sink::ArtifactSink`]) so the export pipeline can
//! be tested with in-memory implementations.
//!
//! # API Client
//!
//! ```rust,no_run
//! use hotelfeed::adapters::api::ApiClient;
//! use hotelfeed::config::Settings;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("config.yaml")?;
//! let client = ApiClient::new(&settings.api, &settings.feed.http)?;
//! println!("Fetching from {}", client.base_url());
//! # Ok(())
//! # }
//! ```
//!
//! # Sinks
//!
//! ```rust,no_run
//! use hotelfeed::adapters::sink::create_sinks;
//! use hotelfeed::config::OutputConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sinks = create_sinks(&OutputConfig::default()).await?;
//! for sink in &sinks {
//!     println!("Writing to {}", sink.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod sink;
