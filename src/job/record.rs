//! Persisted job and component records

use serde::{Deserialize, Serialize};

use crate::domain::ComponentKind;
use crate::job::plan::InstallPlan;
use crate::job::status::{ComponentStatus, JobStatus};
use crate::job::now_millis;

/// Error detail attached to a job
///
/// Install, uninstall and rollback failures are tracked in separate slots
/// on the job so a rollback error never hides the install error that
/// triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobErrorDetail {
    /// Stable error code (diagnostic code of the originating error)
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl JobErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// One install or uninstall operation for a bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job id
    pub id: String,
    /// Bundle identifier this job operates on
    pub bundle: String,
    /// Bundle version being installed (or the installed version on uninstall)
    pub version: String,
    /// Overall status
    pub status: JobStatus,
    /// Start time, epoch milliseconds
    pub started_at: u64,
    /// Finish time, set when a terminal status is reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<u64>,
    /// Machine-readable record of per-unit actions, set before execution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_plan: Option<InstallPlan>,
    /// True if any unit was skipped or overridden rather than freshly created
    #[serde(default)]
    pub custom_installation: bool,
    /// Install failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_error: Option<JobErrorDetail>,
    /// Uninstall failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uninstall_error: Option<JobErrorDetail>,
    /// Rollback failure detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_error: Option<JobErrorDetail>,
}

impl Job {
    /// Create a job in its initial status
    pub fn new(
        id: impl Into<String>,
        bundle: impl Into<String>,
        version: impl Into<String>,
        status: JobStatus,
    ) -> Self {
        Self {
            id: id.into(),
            bundle: bundle.into(),
            version: version.into(),
            status,
            started_at: now_millis(),
            finished_at: None,
            install_plan: None,
            custom_installation: false,
            install_error: None,
            uninstall_error: None,
            rollback_error: None,
        }
    }
}

/// A persisted record of one installed or uninstalled artifact instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Unique record id
    pub id: String,
    /// Parent job id
    pub job_id: String,
    /// Bundle the component belongs to
    pub bundle: String,
    /// Artifact kind
    pub kind: ComponentKind,
    /// Artifact key, unique within its kind
    pub code: String,
    /// Checksum of the artifact's canonical serialized form
    pub checksum: String,
    /// Unit status
    pub status: ComponentStatus,
    /// Error message if the unit failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Start time, epoch milliseconds
    pub started_at: u64,
    /// Finish time, set when the unit completes or fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<u64>,
}

impl ComponentRecord {
    /// Create a record for a unit that is about to execute
    pub fn new(
        job_id: impl Into<String>,
        bundle: impl Into<String>,
        kind: ComponentKind,
        code: impl Into<String>,
        checksum: impl Into<String>,
        status: ComponentStatus,
    ) -> Self {
        let job_id = job_id.into();
        let code = code.into();
        let id = format!("{}:{}:{}", job_id, kind, code);
        Self {
            id,
            job_id,
            bundle: bundle.into(),
            kind,
            code,
            checksum: checksum.into(),
            status,
            error_message: None,
            started_at: now_millis(),
            finished_at: None,
        }
    }
}
