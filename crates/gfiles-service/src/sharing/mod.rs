//! The sharing authorization gate and share-link generation.

pub mod gate;
pub mod link;

pub use gate::{
    BlockedShare, ComplianceCheck, ShareOutcome, ShareRequest, SharingGateService,
    evaluate_compliance,
};
pub use link::LinkService;
