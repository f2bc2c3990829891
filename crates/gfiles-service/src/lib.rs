//! # gfiles-service
//!
//! Business services for G-FILES: the sharing authorization gate, scan
//! orchestration, compliance report aggregation, contact notification
//! dispatch, and CDN folder provisioning.
//!
//! Every service method receives an explicit [`context::RequestContext`]
//! identifying the acting user; there is no ambient request state.

pub mod cdn;
pub mod context;
pub mod notify;
pub mod report;
pub mod scan;
pub mod sharing;

pub use context::RequestContext;
