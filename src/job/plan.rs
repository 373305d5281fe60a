//! Install plans

use serde::{Deserialize, Serialize};

use crate::domain::ComponentKind;
use crate::job::status::InstallAction;

/// One planned unit action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub kind: ComponentKind,
    pub code: String,
    pub action: InstallAction,
}

/// Machine-readable record of the per-unit actions of one install job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallPlan {
    pub entries: Vec<PlanEntry>,
}

impl InstallPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// True if any unit deviates from a fresh CREATE
    ///
    /// This is what marks a job as a "custom installation".
    pub fn is_custom(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.action != InstallAction::Create)
    }
}
