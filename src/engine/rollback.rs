//! Rollback coordination
//!
//! When a unit fails, everything the job actually changed is compensated
//! in exact reverse order of application, the failed unit included (it may
//! have been partially applied). Skipped units changed nothing: they are
//! left out and their records keep their resting status, so the installed
//! view still shows the pre-existing artifact.
//!
//! Rollback keeps going past its own failures, compensating as much as it
//! can; any failure along the way turns the terminal status into
//! `INSTALL_ROLLBACK_ERROR`.

use crate::engine::processors::PlatformContext;
use crate::engine::tracker::JobTracker;
use crate::engine::unit::{InstallableUnit, UnitOutcome};
use crate::error::Result;
use crate::job::{ComponentStatus, InstallAction, Job, JobErrorDetail, JobStatus};

pub struct RollbackCoordinator<'a> {
    tracker: &'a JobTracker<'a>,
    ctx: &'a PlatformContext<'a>,
}

impl<'a> RollbackCoordinator<'a> {
    pub fn new(tracker: &'a JobTracker<'a>, ctx: &'a PlatformContext<'a>) -> Self {
        Self { tracker, ctx }
    }

    /// Compensate the applied units of a failed install job
    ///
    /// `history` is the processed stack in application order and is
    /// drained from the top. Returns the terminal status reached.
    pub fn run(&self, job: &mut Job, mut history: Vec<InstallableUnit>) -> Result<JobStatus> {
        self.tracker
            .update_job_status(job, JobStatus::InstallRollbackInProgress)?;

        let mut first_code: Option<String> = None;
        let mut messages: Vec<String> = Vec::new();

        while let Some(mut unit) = history.pop() {
            if unit.action == InstallAction::Skip {
                // The artifact predates this job; nothing to undo
                continue;
            }

            match unit.uninstall(self.ctx) {
                UnitOutcome::Completed => {
                    // Keep the original failure message on the failed
                    // unit's record for forensics
                    let message = unit.record.error_message.take();
                    self.tracker.stop_tracking(
                        &mut unit.record,
                        ComponentStatus::InstallRollback,
                        message,
                    )?;
                }
                UnitOutcome::Failed { code, message } => {
                    self.tracker.stop_tracking(
                        &mut unit.record,
                        ComponentStatus::InstallRollbackError,
                        Some(message.clone()),
                    )?;
                    if first_code.is_none() {
                        first_code = Some(code);
                    }
                    messages.push(message);
                }
            }
        }

        let terminal = match first_code {
            Some(code) => {
                job.rollback_error = Some(JobErrorDetail::new(code, messages.join("; ")));
                JobStatus::InstallRollbackError
            }
            None => JobStatus::InstallRollback,
        };
        self.tracker.update_job_status(job, terminal)?;
        Ok(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::readiness::ReadinessProbe;
    use crate::engine::testing::{RecordingPlatform, units_for, widget};
    use crate::store::{JobStore, MemoryStore};

    fn context<'a>(
        platform: &'a RecordingPlatform,
        probe: &'a ReadinessProbe,
    ) -> PlatformContext<'a> {
        PlatformContext {
            engine: platform,
            cluster: platform,
            readiness: probe,
        }
    }

    #[test]
    fn test_rollback_is_reverse_of_application() {
        let store = MemoryStore::new();
        let platform = RecordingPlatform::new();
        let probe = ReadinessProbe::default();
        let ctx = context(&platform, &probe);
        let tracker = JobTracker::new(&store);

        let mut job = Job::new("j1", "acme", "1.0.0", JobStatus::InstallInProgress);
        store.create_job(&job).unwrap();

        let units = units_for(
            "j1",
            "acme",
            crate::job::InstallAction::Create,
            vec![widget("alpha"), widget("beta"), widget("gamma")],
        );

        let terminal = RollbackCoordinator::new(&tracker, &ctx)
            .run(&mut job, units)
            .unwrap();
        assert_eq!(terminal, JobStatus::InstallRollback);
        assert_eq!(
            platform.calls(),
            vec![
                "uninstall:widget:gamma",
                "uninstall:widget:beta",
                "uninstall:widget:alpha",
            ]
        );

        for record in store.records_for_job("j1").unwrap() {
            assert_eq!(record.status, ComponentStatus::InstallRollback);
        }
    }

    #[test]
    fn test_skipped_units_are_not_compensated() {
        let store = MemoryStore::new();
        let platform = RecordingPlatform::new();
        let probe = ReadinessProbe::default();
        let ctx = context(&platform, &probe);
        let tracker = JobTracker::new(&store);

        let mut job = Job::new("j1", "acme", "1.0.0", JobStatus::InstallInProgress);
        store.create_job(&job).unwrap();

        let mut units = units_for(
            "j1",
            "acme",
            crate::job::InstallAction::Create,
            vec![widget("applied")],
        );
        units.extend(units_for(
            "j1",
            "acme",
            crate::job::InstallAction::Skip,
            vec![widget("preexisting")],
        ));

        RollbackCoordinator::new(&tracker, &ctx)
            .run(&mut job, units)
            .unwrap();
        assert_eq!(platform.calls(), vec!["uninstall:widget:applied"]);
    }

    #[test]
    fn test_rollback_continues_past_failures() {
        let store = MemoryStore::new();
        let platform = RecordingPlatform::new();
        platform.fail_on("uninstall:widget:beta");
        let probe = ReadinessProbe::default();
        let ctx = context(&platform, &probe);
        let tracker = JobTracker::new(&store);

        let mut job = Job::new("j1", "acme", "1.0.0", JobStatus::InstallInProgress);
        store.create_job(&job).unwrap();

        let units = units_for(
            "j1",
            "acme",
            crate::job::InstallAction::Create,
            vec![widget("alpha"), widget("beta"), widget("gamma")],
        );

        let terminal = RollbackCoordinator::new(&tracker, &ctx)
            .run(&mut job, units)
            .unwrap();
        assert_eq!(terminal, JobStatus::InstallRollbackError);
        // alpha is still compensated after beta's failure
        assert!(platform.call_index("uninstall:widget:alpha").is_some());

        let detail = job.rollback_error.unwrap();
        assert_eq!(detail.code, "pagoda::client::call_failed");
        assert!(detail.message.contains("injected failure"));

        let records = store.records_for_job("j1").unwrap();
        let beta = records.iter().find(|r| r.code == "beta").unwrap();
        assert_eq!(beta.status, ComponentStatus::InstallRollbackError);
    }
}
