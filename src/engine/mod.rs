//! Bundle install and uninstall engine
//!
//! [`BundleService`] is the entry point: it turns a manifest into ordered
//! installable units with resolved actions, creates the job, and drives
//! the scheduler to a terminal status. Job creation is serialized per
//! process so at most one non-terminal job exists per bundle; a second
//! request joins the running job instead of starting a duplicate.

pub mod priority;
pub mod processors;
pub mod readiness;
pub mod rollback;
pub mod scheduler;
#[cfg(test)]
pub mod testing;
pub mod tracker;
pub mod unit;

pub use readiness::{DriftStatus, ReadinessProbe, ServiceDrift};
pub use unit::{InstallableUnit, UnitOutcome};

use std::sync::Mutex;

use miette::Diagnostic;

use crate::clients::{ClusterClient, EngineClient};
use crate::error::{PagodaError, Result, job as job_error, store as store_error};
use crate::hash::{checksum_of, verify_checksum};
use crate::job::{
    ComponentRecord, ComponentStatus, InstallAction, InstallPlan, Job, JobErrorDetail, JobStatus,
    PlanEntry,
};
use crate::manifest::BundleManifest;
use crate::store::JobStore;

use self::processors::{ComponentProcessor, PlatformContext, ProcessorRegistry};
use self::scheduler::JobScheduler;
use self::tracker::JobTracker;

pub struct BundleService<'a> {
    store: &'a dyn JobStore,
    engine: &'a dyn EngineClient,
    cluster: &'a dyn ClusterClient,
    registry: ProcessorRegistry,
    readiness: ReadinessProbe,
    parallelism: usize,
    creation: Mutex<()>,
}

impl<'a> BundleService<'a> {
    pub fn new(
        store: &'a dyn JobStore,
        engine: &'a dyn EngineClient,
        cluster: &'a dyn ClusterClient,
    ) -> Self {
        Self {
            store,
            engine,
            cluster,
            registry: ProcessorRegistry::builtins(),
            readiness: ReadinessProbe::default(),
            parallelism: 1,
            creation: Mutex::new(()),
        }
    }

    pub fn with_readiness(mut self, probe: ReadinessProbe) -> Self {
        self.readiness = probe;
        self
    }

    /// Allow units of one priority class to fan out onto worker threads
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers.max(1);
        self
    }

    /// Handle that cancels in-flight readiness waits when set
    pub fn cancel_flag(&self) -> std::sync::Arc<std::sync::atomic::AtomicBool> {
        self.readiness.cancel_flag()
    }

    fn context(&self) -> PlatformContext<'_> {
        PlatformContext {
            engine: self.engine,
            cluster: self.cluster,
            readiness: &self.readiness,
        }
    }

    /// Install a bundle, or join its already-running job
    ///
    /// Runs synchronously to a terminal status and returns the final job.
    /// When a non-terminal job already exists for the bundle, that job is
    /// returned as-is and nothing new is started.
    pub fn install(&self, manifest: &BundleManifest) -> Result<Job> {
        let mut job = {
            let _guard = self.creation_guard()?;
            if let Some(existing) = self.store.find_non_terminal(&manifest.bundle)? {
                return Ok(existing);
            }
            let job = Job::new(
                self.store.next_job_id(&manifest.bundle),
                &manifest.bundle,
                &manifest.version,
                JobStatus::InstallCreated,
            );
            self.store.create_job(&job)?;
            job
        };

        match self.run_install(&mut job, manifest) {
            Ok(()) => Ok(job),
            Err(error) => {
                self.abort(&mut job, &error);
                Err(error)
            }
        }
    }

    /// Uninstall a bundle, or join its already-running job
    ///
    /// Removal units come from the installed-record view and run in
    /// reverse install priority order.
    pub fn uninstall(&self, bundle: &str) -> Result<Job> {
        let (mut job, installed) = {
            let _guard = self.creation_guard()?;
            if let Some(existing) = self.store.find_non_terminal(bundle)? {
                return Ok(existing);
            }
            let installed = self.store.installed_for(bundle)?;
            if installed.is_empty() {
                return Err(job_error::not_installed(bundle));
            }
            let job = Job::new(
                self.store.next_job_id(bundle),
                bundle,
                self.installed_version(bundle)?,
                JobStatus::UninstallCreated,
            );
            self.store.create_job(&job)?;
            (job, installed)
        };

        match self.run_uninstall(&mut job, installed) {
            Ok(()) => Ok(job),
            Err(error) => {
                self.abort(&mut job, &error);
                Err(error)
            }
        }
    }

    /// Resolve per-unit actions without creating a job or touching state
    pub fn plan(&self, manifest: &BundleManifest) -> Result<InstallPlan> {
        let units = self.resolve_units("plan", manifest)?;
        Ok(InstallPlan::new(units.iter().map(plan_entry).collect()))
    }

    /// Compare the manifest's services against installed and live state
    pub fn service_drift(&self, manifest: &BundleManifest) -> Result<Vec<ServiceDrift>> {
        readiness::analyze_services(&manifest.services, &manifest.bundle, self.store, self.cluster)
    }

    /// A job with its component records
    pub fn job_status(&self, id: &str) -> Result<(Job, Vec<ComponentRecord>)> {
        let job = self
            .store
            .get_job(id)?
            .ok_or_else(|| job_error::not_found(id))?;
        let records = self.store.records_for_job(id)?;
        Ok((job, records))
    }

    /// All jobs, in creation order
    pub fn jobs(&self) -> Result<Vec<Job>> {
        self.store.list_jobs()
    }

    /// Currently-installed records for a bundle
    pub fn installed(&self, bundle: &str) -> Result<Vec<ComponentRecord>> {
        self.store.installed_for(bundle)
    }

    fn creation_guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.creation
            .lock()
            .map_err(|_| store_error::read_failed("job creation lock poisoned"))
    }

    fn run_install(&self, job: &mut Job, manifest: &BundleManifest) -> Result<()> {
        let units = self.resolve_units(&job.id, manifest)?;

        let plan = InstallPlan::new(units.iter().map(plan_entry).collect());
        job.custom_installation = plan.is_custom();
        job.install_plan = Some(plan);
        self.store.update_job(job)?;

        let tracker = JobTracker::new(self.store);
        let ctx = self.context();
        JobScheduler::new(&tracker, &ctx)
            .with_parallelism(self.parallelism)
            .run_install(job, units)?;
        Ok(())
    }

    fn run_uninstall(&self, job: &mut Job, installed: Vec<ComponentRecord>) -> Result<()> {
        let mut units = Vec::with_capacity(installed.len());
        for record in installed {
            let processor = self.registry.get(record.kind)?;
            let removal = ComponentRecord::new(
                &job.id,
                &job.bundle,
                record.kind,
                &record.code,
                &record.checksum,
                ComponentStatus::UninstallInProgress,
            );
            units.push(InstallableUnit::for_removal(processor, removal));
        }
        priority::order_for_uninstall(&mut units);

        let tracker = JobTracker::new(self.store);
        let ctx = self.context();
        JobScheduler::new(&tracker, &ctx).run_uninstall(job, units)?;
        Ok(())
    }

    /// Expand the manifest into ordered units with resolved actions
    fn resolve_units(&self, job_id: &str, manifest: &BundleManifest) -> Result<Vec<InstallableUnit>> {
        let ctx = self.context();
        let mut units = Vec::new();

        for processor in self.registry.ordered() {
            for descriptor in processor.process(manifest) {
                let checksum = checksum_of(&descriptor)?;
                let action = self.resolve_action(
                    &manifest.bundle,
                    processor.as_ref(),
                    &descriptor,
                    &checksum,
                    &ctx,
                )?;
                let record = ComponentRecord::new(
                    job_id,
                    &manifest.bundle,
                    descriptor.kind(),
                    descriptor.code(),
                    &checksum,
                    ComponentStatus::InstallInProgress,
                );
                units.push(InstallableUnit::for_install(
                    processor.clone(),
                    descriptor,
                    action,
                    record,
                ));
            }
        }

        priority::order_for_install(&mut units);
        Ok(units)
    }

    /// Resolve how one unit will be applied
    ///
    /// No prior record means CREATE; a prior record with a different
    /// checksum means OVERRIDE. Equal checksums still go through a live
    /// check: an artifact that was deleted or altered on the platform
    /// behind the store's back is reinstalled rather than skipped.
    fn resolve_action(
        &self,
        bundle: &str,
        processor: &dyn ComponentProcessor,
        descriptor: &crate::domain::ArtifactDescriptor,
        checksum: &str,
        ctx: &PlatformContext<'_>,
    ) -> Result<InstallAction> {
        let Some(prior) = self
            .store
            .find_installed(bundle, descriptor.kind(), descriptor.code())?
        else {
            return Ok(InstallAction::Create);
        };

        if !verify_checksum(&prior.checksum, checksum) {
            return Ok(InstallAction::Override);
        }
        if processor.verify_live(descriptor, ctx)? {
            Ok(InstallAction::Skip)
        } else {
            Ok(InstallAction::Override)
        }
    }

    /// Version recorded by the bundle's latest completed install
    fn installed_version(&self, bundle: &str) -> Result<String> {
        Ok(self
            .store
            .list_jobs()?
            .into_iter()
            .rev()
            .find(|job| job.bundle == bundle && job.status == JobStatus::InstallCompleted)
            .map(|job| job.version)
            .unwrap_or_else(|| "unknown".to_string()))
    }

    /// Best-effort terminal marking after an infrastructure failure
    ///
    /// The store is usually the thing that failed, so a second failure
    /// here is swallowed; the original error is what propagates.
    fn abort(&self, job: &mut Job, error: &PagodaError) {
        let code = error
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "pagoda::error".to_string());
        let detail = JobErrorDetail::new(code, error.to_string());
        let status = if job.status.is_uninstall() {
            job.uninstall_error = Some(detail);
            JobStatus::UninstallError
        } else {
            job.install_error = Some(detail);
            JobStatus::InstallError
        };
        let tracker = JobTracker::new(self.store);
        let _ = tracker.update_job_status(job, status);
    }
}

fn plan_entry(unit: &InstallableUnit) -> PlanEntry {
    PlanEntry {
        kind: unit.kind,
        code: unit.code.clone(),
        action: unit.action,
    }
}
