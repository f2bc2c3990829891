//! GDPR compliance report entity and payload contract.

pub mod model;
pub mod payload;

pub use model::{CreateGdprReport, GdprReport, ReportStatus};
pub use payload::{
    BlockedFileEntry, ReportPayload, ReportSummary, RiskLevelBucket, UserStatistics,
};
