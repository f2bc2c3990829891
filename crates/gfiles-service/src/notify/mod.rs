//! Contact notification dispatch.

pub mod service;

pub use service::ShareEmailService;
