//! Job scheduling
//!
//! Units execute as a FIFO queue grouped into priority classes; a class
//! must fully settle before the next one starts. Everything that ran is
//! pushed onto a LIFO history stack, which is exactly what rollback drains
//! when a unit fails.
//!
//! Within one class, units may optionally fan out onto scoped worker
//! threads. Records are started before the class runs and outcomes are
//! written back in submission order, so the persisted order is stable no
//! matter how workers interleave.

use std::collections::VecDeque;
use std::thread;

use crate::engine::processors::PlatformContext;
use crate::engine::rollback::RollbackCoordinator;
use crate::engine::tracker::JobTracker;
use crate::engine::unit::{InstallableUnit, UnitOutcome};
use crate::error::Result;
use crate::job::{ComponentStatus, Job, JobErrorDetail, JobStatus};

pub struct JobScheduler<'a> {
    tracker: &'a JobTracker<'a>,
    ctx: &'a PlatformContext<'a>,
    parallelism: usize,
}

impl<'a> JobScheduler<'a> {
    pub fn new(tracker: &'a JobTracker<'a>, ctx: &'a PlatformContext<'a>) -> Self {
        Self {
            tracker,
            ctx,
            parallelism: 1,
        }
    }

    /// Allow up to `workers` units of one priority class to run at once
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers.max(1);
        self
    }

    /// Run an install job to a terminal status
    ///
    /// A unit failure stops dequeuing, records the failure on the job and
    /// hands the processed history to the rollback coordinator. Only
    /// infrastructure failures (store writes) surface as `Err`; the job is
    /// then aborted as-is, with no rollback attempt, because compensation
    /// could not be recorded either.
    pub fn run_install(&self, job: &mut Job, units: Vec<InstallableUnit>) -> Result<JobStatus> {
        self.tracker
            .update_job_status(job, JobStatus::InstallInProgress)?;

        let mut queue: VecDeque<InstallableUnit> = units.into();
        let mut history: Vec<InstallableUnit> = Vec::new();
        let mut failure: Option<JobErrorDetail> = None;

        while failure.is_none() {
            let class = Self::take_class(&mut queue);
            if class.is_empty() {
                break;
            }
            failure = self.run_class(class, &mut history)?;
        }

        match failure {
            None => {
                self.tracker
                    .update_job_status(job, JobStatus::InstallCompleted)?;
                Ok(JobStatus::InstallCompleted)
            }
            Some(detail) => {
                job.install_error = Some(detail);
                RollbackCoordinator::new(self.tracker, self.ctx).run(job, history)
            }
        }
    }

    /// Run an uninstall job to a terminal status
    ///
    /// There is nothing to roll back to: a failed removal leaves the job
    /// in `UNINSTALL_ERROR` with the remaining units untouched, so a retry
    /// can pick up where this one stopped.
    pub fn run_uninstall(&self, job: &mut Job, units: Vec<InstallableUnit>) -> Result<JobStatus> {
        self.tracker
            .update_job_status(job, JobStatus::UninstallInProgress)?;

        for mut unit in units {
            self.tracker.start_tracking(&mut unit.record)?;
            match unit.uninstall(self.ctx) {
                UnitOutcome::Completed => {
                    self.tracker.stop_tracking(
                        &mut unit.record,
                        ComponentStatus::UninstallCompleted,
                        None,
                    )?;
                }
                UnitOutcome::Failed { code, message } => {
                    self.tracker.stop_tracking(
                        &mut unit.record,
                        ComponentStatus::UninstallError,
                        Some(message.clone()),
                    )?;
                    job.uninstall_error = Some(JobErrorDetail::new(code, message));
                    self.tracker
                        .update_job_status(job, JobStatus::UninstallError)?;
                    return Ok(JobStatus::UninstallError);
                }
            }
        }

        self.tracker
            .update_job_status(job, JobStatus::UninstallCompleted)?;
        Ok(JobStatus::UninstallCompleted)
    }

    /// Pop the front units sharing the front unit's priority class
    fn take_class(queue: &mut VecDeque<InstallableUnit>) -> Vec<InstallableUnit> {
        let mut class = Vec::new();
        let Some(first) = queue.pop_front() else {
            return class;
        };
        let priority = first.priority;
        class.push(first);

        while queue.front().is_some_and(|unit| unit.priority == priority) {
            if let Some(unit) = queue.pop_front() {
                class.push(unit);
            }
        }
        class
    }

    /// Execute one priority class; returns the first failure, if any
    fn run_class(
        &self,
        class: Vec<InstallableUnit>,
        history: &mut Vec<InstallableUnit>,
    ) -> Result<Option<JobErrorDetail>> {
        if self.parallelism > 1 && class.len() > 1 {
            self.run_class_parallel(class, history)
        } else {
            self.run_class_sequential(class, history)
        }
    }

    fn run_class_sequential(
        &self,
        class: Vec<InstallableUnit>,
        history: &mut Vec<InstallableUnit>,
    ) -> Result<Option<JobErrorDetail>> {
        for mut unit in class {
            self.tracker.start_tracking(&mut unit.record)?;
            let outcome = unit.install(self.ctx);
            let failure = self.record_outcome(&mut unit, outcome)?;
            history.push(unit);
            if failure.is_some() {
                // Units after this one never started; they have no records
                return Ok(failure);
            }
        }
        Ok(None)
    }

    fn run_class_parallel(
        &self,
        mut class: Vec<InstallableUnit>,
        history: &mut Vec<InstallableUnit>,
    ) -> Result<Option<JobErrorDetail>> {
        for unit in &mut class {
            self.tracker.start_tracking(&mut unit.record)?;
        }

        let ctx = self.ctx;
        let outcomes: Vec<UnitOutcome> = thread::scope(|scope| {
            let handles: Vec<_> = class
                .iter()
                .map(|unit| scope.spawn(move || unit.install(ctx)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| UnitOutcome::Failed {
                        code: "pagoda::error".to_string(),
                        message: "unit worker panicked".to_string(),
                    })
                })
                .collect()
        });

        let mut first_failure = None;
        for (mut unit, outcome) in class.into_iter().zip(outcomes) {
            let failure = self.record_outcome(&mut unit, outcome)?;
            history.push(unit);
            if first_failure.is_none() {
                first_failure = failure;
            }
        }
        Ok(first_failure)
    }

    fn record_outcome(
        &self,
        unit: &mut InstallableUnit,
        outcome: UnitOutcome,
    ) -> Result<Option<JobErrorDetail>> {
        match outcome {
            UnitOutcome::Completed => {
                self.tracker.stop_tracking(
                    &mut unit.record,
                    ComponentStatus::InstallCompleted,
                    None,
                )?;
                Ok(None)
            }
            UnitOutcome::Failed { code, message } => {
                self.tracker.stop_tracking(
                    &mut unit.record,
                    ComponentStatus::InstallError,
                    Some(message.clone()),
                )?;
                Ok(Some(JobErrorDetail::new(code, message)))
            }
        }
    }
}
