//! Installable units
//!
//! A unit is one artifact's worth of work: its descriptor (for installs),
//! its resolved action, its priority class and its persisted record. Unit
//! failures are ordinary data for the scheduler: they fail the job and
//! trigger rollback, but only infrastructure failures (store writes)
//! surface as `Err` further up.

use std::sync::Arc;

use miette::Diagnostic;

use crate::domain::{ArtifactDescriptor, ComponentKind};
use crate::engine::priority::InstallPriority;
use crate::engine::processors::{ComponentProcessor, PlatformContext};
use crate::error::PagodaError;
use crate::job::{ComponentRecord, InstallAction};

/// Result of executing one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Completed,
    Failed { code: String, message: String },
}

impl UnitOutcome {
    /// Failure outcome carrying the error's diagnostic code and message
    pub fn failure_of(error: &PagodaError) -> Self {
        let code = error
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "pagoda::error".to_string());
        UnitOutcome::Failed {
            code,
            message: error.to_string(),
        }
    }

}

/// One unit of install or uninstall work
#[derive(Debug)]
pub struct InstallableUnit {
    processor: Arc<dyn ComponentProcessor>,
    /// Present for install units; removal units only carry the key
    descriptor: Option<ArtifactDescriptor>,
    pub kind: ComponentKind,
    pub code: String,
    pub action: InstallAction,
    pub priority: InstallPriority,
    pub record: ComponentRecord,
}

impl InstallableUnit {
    /// Unit that applies one manifest descriptor
    pub fn for_install(
        processor: Arc<dyn ComponentProcessor>,
        descriptor: ArtifactDescriptor,
        action: InstallAction,
        record: ComponentRecord,
    ) -> Self {
        let kind = descriptor.kind();
        Self {
            processor,
            kind,
            code: descriptor.code().to_string(),
            descriptor: Some(descriptor),
            action,
            priority: InstallPriority::of(kind),
            record,
        }
    }

    /// Unit that removes one persisted artifact
    pub fn for_removal(processor: Arc<dyn ComponentProcessor>, record: ComponentRecord) -> Self {
        Self {
            processor,
            descriptor: None,
            kind: record.kind,
            code: record.code.clone(),
            // Removal always applies changes
            action: InstallAction::Override,
            priority: InstallPriority::of(record.kind),
            record,
        }
    }

    /// Apply this unit to the platform
    ///
    /// A resolved SKIP completes without any platform call; the
    /// consistency check already happened during action resolution.
    pub fn install(&self, ctx: &PlatformContext<'_>) -> UnitOutcome {
        if self.action == InstallAction::Skip {
            return UnitOutcome::Completed;
        }

        match &self.descriptor {
            Some(descriptor) => match self.processor.install(descriptor, ctx) {
                Ok(()) => UnitOutcome::Completed,
                Err(error) => UnitOutcome::failure_of(&error),
            },
            None => UnitOutcome::Failed {
                code: "pagoda::error".to_string(),
                message: format!("install unit {} '{}' has no descriptor", self.kind, self.code),
            },
        }
    }

    /// Remove this unit's artifact from the platform
    pub fn uninstall(&self, ctx: &PlatformContext<'_>) -> UnitOutcome {
        match self.processor.uninstall(&self.code, ctx) {
            Ok(()) => UnitOutcome::Completed,
            Err(error) => UnitOutcome::failure_of(&error),
        }
    }
}
