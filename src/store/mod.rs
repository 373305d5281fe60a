//! Job store contract and implementations
//!
//! The engine only ever talks to [`JobStore`]; the persistence engine
//! behind it is replaceable. Two implementations ship here: an in-memory
//! store for tests and a write-through JSON file store for the CLI.
//!
//! The "installed components" view is derived from record history: the
//! latest record per (bundle, kind, code) decides whether the artifact is
//! currently installed, so rollbacks and uninstalls naturally retire prior
//! installs without a second bookkeeping table. A removal that failed does
//! not retire the key; the artifact is still on the platform.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::domain::ComponentKind;
use crate::error::Result;
use crate::job::{ComponentRecord, ComponentStatus, Job};

/// Read/write contract the job tracker needs from the persistence engine
///
/// Every write must hit durable state before returning, so a crash mid-job
/// leaves the store consistent with "last completed unit".
pub trait JobStore: Send + Sync {
    /// Persist a newly created job
    fn create_job(&self, job: &Job) -> Result<()>;

    /// Persist the current state of an existing job
    fn update_job(&self, job: &Job) -> Result<()>;

    /// Fetch a job by id
    fn get_job(&self, id: &str) -> Result<Option<Job>>;

    /// All jobs, in creation order
    fn list_jobs(&self) -> Result<Vec<Job>>;

    /// The non-terminal job for a bundle, if one exists
    ///
    /// At most one may exist at a time; this is what lets a second request
    /// join a running job instead of starting a duplicate.
    fn find_non_terminal(&self, bundle: &str) -> Result<Option<Job>>;

    /// Create or update a component record (keyed by record id)
    fn save_record(&self, record: &ComponentRecord) -> Result<()>;

    /// All component records belonging to a job, in creation order
    fn records_for_job(&self, job_id: &str) -> Result<Vec<ComponentRecord>>;

    /// The currently-installed record for an artifact key, if any
    fn find_installed(
        &self,
        bundle: &str,
        kind: ComponentKind,
        code: &str,
    ) -> Result<Option<ComponentRecord>>;

    /// All currently-installed records for a bundle
    fn installed_for(&self, bundle: &str) -> Result<Vec<ComponentRecord>>;

    /// Generate a fresh job id for a bundle
    fn next_job_id(&self, bundle: &str) -> String;
}

/// Derive the installed view from record history
///
/// Records must be in creation order; the last record per (bundle, kind,
/// code) decides. An `INSTALL_COMPLETED` resting status counts as
/// installed. A failed removal (`UNINSTALL_ERROR`, `INSTALL_ROLLBACK_ERROR`)
/// left the artifact on the platform, so the key stays installed under its
/// last completed install record; a retry can then reach it again.
pub(crate) fn derive_installed(records: &[ComponentRecord], bundle: &str) -> Vec<ComponentRecord> {
    let mut keys: Vec<(ComponentKind, &str)> = Vec::new();
    for record in records.iter().filter(|r| r.bundle == bundle) {
        if !keys
            .iter()
            .any(|(kind, code)| *kind == record.kind && *code == record.code)
        {
            keys.push((record.kind, &record.code));
        }
    }

    keys.into_iter()
        .filter_map(|(kind, code)| {
            let history: Vec<&ComponentRecord> = records
                .iter()
                .filter(|r| r.bundle == bundle && r.kind == kind && r.code == code)
                .collect();

            match history.last()?.status {
                ComponentStatus::InstallCompleted => Some((*history.last()?).clone()),
                ComponentStatus::UninstallError | ComponentStatus::InstallRollbackError => history
                    .iter()
                    .rev()
                    .find(|r| r.status == ComponentStatus::InstallCompleted)
                    .map(|r| (*r).clone()),
                _ => None,
            }
        })
        .collect()
}
