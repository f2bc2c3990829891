//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background job worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the background worker is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Cron expression for the periodic compliance report.
    #[serde(default = "default_report_schedule")]
    pub report_schedule: String,
}

fn default_enabled() -> bool {
    true
}

fn default_report_schedule() -> String {
    // 03:00 every Monday
    "0 0 3 * * Mon".to_string()
}
