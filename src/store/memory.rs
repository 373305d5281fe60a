//! In-memory job store
//!
//! Backs unit tests and doubles as the reference implementation of the
//! store contract. Concurrent writes are serialized by the inner mutex.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ComponentKind;
use crate::error::{Result, store};
use crate::job::{ComponentRecord, Job, now_millis};
use crate::store::{JobStore, derive_installed};

#[derive(Debug, Default)]
struct Inner {
    jobs: Vec<Job>,
    records: Vec<ComponentRecord>,
}

/// Mutex-backed in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| store::read_failed("store lock poisoned"))
    }
}

impl JobStore for MemoryStore {
    fn create_job(&self, job: &Job) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.jobs.iter().any(|j| j.id == job.id) {
            return Err(store::write_failed(format!(
                "job '{}' already exists",
                job.id
            )));
        }
        inner.jobs.push(job.clone());
        Ok(())
    }

    fn update_job(&self, job: &Job) -> Result<()> {
        let mut inner = self.lock()?;
        let slot = inner
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| store::write_failed(format!("job '{}' does not exist", job.id)))?;
        *slot = job.clone();
        Ok(())
    }

    fn get_job(&self, id: &str) -> Result<Option<Job>> {
        Ok(self.lock()?.jobs.iter().find(|j| j.id == id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.lock()?.jobs.clone())
    }

    fn find_non_terminal(&self, bundle: &str) -> Result<Option<Job>> {
        Ok(self
            .lock()?
            .jobs
            .iter()
            .find(|j| j.bundle == bundle && !j.status.is_terminal())
            .cloned())
    }

    fn save_record(&self, record: &ComponentRecord) -> Result<()> {
        let mut inner = self.lock()?;
        if let Some(slot) = inner.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
        } else {
            inner.records.push(record.clone());
        }
        Ok(())
    }

    fn records_for_job(&self, job_id: &str) -> Result<Vec<ComponentRecord>> {
        Ok(self
            .lock()?
            .records
            .iter()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect())
    }

    fn find_installed(
        &self,
        bundle: &str,
        kind: ComponentKind,
        code: &str,
    ) -> Result<Option<ComponentRecord>> {
        let inner = self.lock()?;
        Ok(derive_installed(&inner.records, bundle)
            .into_iter()
            .find(|r| r.kind == kind && r.code == code))
    }

    fn installed_for(&self, bundle: &str) -> Result<Vec<ComponentRecord>> {
        let inner = self.lock()?;
        Ok(derive_installed(&inner.records, bundle))
    }

    fn next_job_id(&self, bundle: &str) -> String {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}-{}", bundle, now_millis(), seq)
    }
}
