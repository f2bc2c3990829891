//! Compliance report aggregation and persistence.

pub mod aggregate;
pub mod service;

pub use aggregate::build_report_payload;
pub use service::ReportService;
