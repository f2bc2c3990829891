//! Scan orchestration: run the scanner and persist the result.

pub mod service;

pub use service::{ScanFileRequest, ScanService};
