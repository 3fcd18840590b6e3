//! Output destinations
//!
//! This module provides a trait-based abstraction over where artifacts go,
//! so the export coordinator can hand each artifact to every enabled
//! destination without knowing what they are.

pub mod factory;
pub mod local;
pub mod s3;
pub mod traits;

pub use factory::create_sinks;
pub use local::LocalSink;
pub use s3::{s3_key, S3Sink};
pub use traits::ArtifactSink;
