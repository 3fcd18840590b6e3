//! Record shaping between fetch and export
//!
//! - [`project`] - field allow-list projection
//! - [`merge`] - joining secondary sources onto the primary one

pub mod merge;
pub mod project;

pub use merge::merge_records;
pub use project::{project_record, project_records, union_of_keys};
