//! Domain models and types for hotelfeed.
//!
//! The domain layer provides:
//! - **Categories and windows** ([`Category`], [`WindowName`], [`DateWindow`])
//! - **Records** ([`Record`]) as opaque ordered JSON maps
//! - **Artifacts** ([`Artifact`]) as serialized datasets with a checksum
//! - **Error types** ([`FeedError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FeedError>`]:
//!
//! ```rust
//! use hotelfeed::domain::{DateWindow, Result, WindowName};
//! use chrono::NaiveDate;
//!
//! fn example() -> Result<DateWindow> {
//!     let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
//!     DateWindow::new(WindowName::History, day, day)
//! }
//! ```

pub mod artifact;
pub mod category;
pub mod errors;
pub mod record;
pub mod result;
pub mod window;

pub use artifact::{checksum_bytes, Artifact};
pub use category::{artifact_name, Category, WindowName};
pub use errors::{ApiError, FeedError};
pub use record::{extract_records, Record};
pub use result::Result;
pub use window::{DateWindow, DATE_FORMAT};
