//! Write-through JSON file store
//!
//! Persists every mutation to disk before returning, so job state survives
//! process exits and a crash mid-job leaves the file consistent with the
//! last completed unit. The file layout mirrors the in-memory shape.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::domain::ComponentKind;
use crate::error::{Result, store};
use crate::job::{ComponentRecord, Job, now_millis};
use crate::store::{JobStore, derive_installed};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    jobs: Vec<Job>,
    records: Vec<ComponentRecord>,
}

/// JSON-file-backed job store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<StoreFile>,
    seq: AtomicU64,
}

impl FileStore {
    /// Open a store file, creating an empty one if it does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| store::read_failed(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str(&content)
                .map_err(|e| store::read_failed(format!("{}: {}", path.display(), e)))?
        } else {
            StoreFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
            seq: AtomicU64::new(0),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreFile>> {
        self.state
            .lock()
            .map_err(|_| store::read_failed("store lock poisoned"))
    }

    /// Flush the whole state to disk
    ///
    /// Called with the lock held by every mutating method, so writers
    /// cannot interleave partial states.
    fn flush(&self, state: &StoreFile) -> Result<()> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| store::write_failed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| store::write_failed(format!("{}: {}", parent.display(), e)))?;
        }

        fs::write(&self.path, content)
            .map_err(|e| store::write_failed(format!("{}: {}", self.path.display(), e)))
    }
}

impl JobStore for FileStore {
    fn create_job(&self, job: &Job) -> Result<()> {
        let mut state = self.lock()?;
        if state.jobs.iter().any(|j| j.id == job.id) {
            return Err(store::write_failed(format!(
                "job '{}' already exists",
                job.id
            )));
        }
        state.jobs.push(job.clone());
        self.flush(&state)
    }

    fn update_job(&self, job: &Job) -> Result<()> {
        let mut state = self.lock()?;
        let slot = state
            .jobs
            .iter_mut()
            .find(|j| j.id == job.id)
            .ok_or_else(|| store::write_failed(format!("job '{}' does not exist", job.id)))?;
        *slot = job.clone();
        self.flush(&state)
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
        let mut state = self.lock()?;
        if let Some(slot) = state.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
        } else {
            state.records.push(record.clone());
        }
        self.flush(&state)
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
        let state = self.lock()?;
        Ok(derive_installed(&state.records, bundle)
            .into_iter()
            .find(|r| r.kind == kind && r.code == code))
    }

    fn installed_for(&self, bundle: &str) -> Result<Vec<ComponentRecord>> {
        let state = self.lock()?;
        Ok(derive_installed(&state.records, bundle))
    }

    fn next_job_id(&self, bundle: &str) -> String {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}-{}", bundle, now_millis(), seq)
    }
}
