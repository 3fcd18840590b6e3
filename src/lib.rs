// Hotelfeed - Hotel records export tool
// Copyright (c) 2025 Hotelfeed Contributors
// Licensed under the MIT License

//! # hotelfeed - hotel records export
//!
//! hotelfeed fetches reservation, sales and room records from a hotel
//! property-management API over two date windows and writes them as CSV or
//! JSON files to a local directory and/or S3.
//!
//! ## Overview
//!
//! A run is a linear pipeline:
//!
//! 1. **Configure**: `API_*` environment variables plus `config.yaml`
//! 2. **Resolve windows**: `history` (default two days ago) and `onhand`
//!    (default yesterday through 178 days ahead)
//! 3. **Fetch**: authenticated GETs per category, source and window,
//!    following `Link: rel="next"` pagination
//! 4. **Shape**: merge secondary sources, project onto the field list
//! 5. **Write**: `<category>_<window>.<csv|json>` to every enabled sink
//!
//! The 3 categories × 2 windows give six independent operations. A failure in
//! one is recorded in the [`core::export::ExportSummary`] and the others
//! still run.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Window resolution, record shaping, export orchestration
//! - [`adapters`] - External integrations (records API, local files, S3)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hotelfeed::config::Settings;
//! use hotelfeed::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load("config.yaml")?;
//!     let coordinator = ExportCoordinator::new(settings).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} records", summary.total_records());
//!     std::process::exit(summary.exit_code());
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::FeedError`]. Configuration errors abort
//! before any request; everything else is scoped to one operation:
//!
//! ```rust,no_run
//! use hotelfeed::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let settings = hotelfeed::config::Settings::load("config.yaml")?;
//!     if settings.feed.output.s3.enabled {
//!         println!("Uploading to S3");
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
