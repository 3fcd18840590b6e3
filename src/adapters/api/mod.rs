//! Records API integration
//!
//! - [`client`] - authenticated reqwest client with `Link` pagination
//! - [`request`] - per-source fetch requests and the [`RecordSource`] trait
//! - [`pagination`] - `Link` header parsing

pub mod client;
pub mod pagination;
pub mod request;

pub use client::ApiClient;
pub use pagination::{next_link, parse_link_header};
pub use request::{FetchRequest, RecordSource};
