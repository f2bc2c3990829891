//! # gfiles-worker
//!
//! Background jobs: the `JobHandler` registry and the cron scheduler that
//! triggers the periodic compliance report.

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use scheduler::CronScheduler;
