//! Core business logic for hotelfeed.
//!
//! # Modules
//!
//! - [`window`] - date window resolution
//! - [`transform`] - source merge and field projection
//! - [`export`] - serialization, orchestration and the run summary
//!
//! # Export Workflow
//!
//! 1. **Resolve windows**: `history` and `onhand` relative to today
//! 2. **Fetch**: every source of every category, per window
//! 3. **Transform**: merge secondary sources, project onto the field list
//! 4. **Serialize**: CSV or JSON, with a SHA-256 checksum
//! 5. **Write**: hand the artifact to every enabled sink
//! 6. **Report**: summarize all six operations
//!
//! # Example
//!
//! ```rust,no_run
//! use hotelfeed::config::Settings;
//! use hotelfeed::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("config.yaml")?;
//! let coordinator = ExportCoordinator::new(settings).await?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Successful: {}", summary.successful_operations());
//! println!("Failed: {}", summary.failed_operations());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod transform;
pub mod window;
