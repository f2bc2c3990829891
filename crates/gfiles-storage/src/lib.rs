//! # gfiles-storage
//!
//! HTTP client for the external CDN storage zone. The zone holds the
//! actual file tree; this crate only lists directories and provisions
//! folders — uploads and downloads go through the CDN directly.

pub mod client;
pub mod types;

pub use client::{CdnStorage, CdnStorageClient};
pub use types::CdnEntry;
