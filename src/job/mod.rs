//! Job and component tracking types
//!
//! Everything in this module is persisted through the job store, so the
//! serde wire names are stable.

pub mod plan;
pub mod record;
pub mod status;

pub use plan::{InstallPlan, PlanEntry};
pub use record::{ComponentRecord, Job, JobErrorDetail};
pub use status::{ComponentStatus, InstallAction, JobStatus};

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as epoch milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
