//! Write-through job tracking
//!
//! Every job and component transition is persisted before execution
//! continues, so the store never claims more progress than actually
//! happened. A failed write here is fatal to the job: the scheduler
//! aborts rather than drift away from the recorded state.

use crate::error::Result;
use crate::job::{ComponentRecord, ComponentStatus, Job, JobStatus, now_millis};
use crate::store::JobStore;

pub struct JobTracker<'a> {
    store: &'a dyn JobStore,
}

impl<'a> JobTracker<'a> {
    pub fn new(store: &'a dyn JobStore) -> Self {
        Self { store }
    }

    /// Persist a unit's record just before it executes
    pub fn start_tracking(&self, record: &mut ComponentRecord) -> Result<()> {
        record.started_at = now_millis();
        self.store.save_record(record)
    }

    /// Persist a unit's final state
    pub fn stop_tracking(
        &self,
        record: &mut ComponentRecord,
        status: ComponentStatus,
        error: Option<String>,
    ) -> Result<()> {
        record.status = status;
        record.error_message = error;
        record.finished_at = Some(now_millis());
        self.store.save_record(record)
    }

    /// Persist a job status transition
    ///
    /// Terminal transitions also stamp the finish time.
    pub fn update_job_status(&self, job: &mut Job, status: JobStatus) -> Result<()> {
        job.status = status;
        if status.is_terminal() {
            job.finished_at = Some(now_millis());
        }
        self.store.update_job(job)
    }
}
