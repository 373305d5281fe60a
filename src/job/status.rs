//! Job and component status vocabulary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall status of an install or uninstall job
///
/// Wire names are stable and shared with external consumers of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    InstallCreated,
    InstallInProgress,
    InstallCompleted,
    InstallError,
    InstallRollback,
    InstallRollbackInProgress,
    InstallRollbackError,
    UninstallCreated,
    UninstallInProgress,
    UninstallCompleted,
    UninstallError,
}

impl JobStatus {
    /// Whether a job in this status will never change again
    ///
    /// `InstallError` is terminal: it is only left as the resting status
    /// when a fatal abort (e.g. a store-write failure) prevented rollback
    /// from being recorded; the ordinary unit-failure path continues into
    /// the rollback statuses.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::InstallCompleted
                | JobStatus::InstallError
                | JobStatus::InstallRollback
                | JobStatus::InstallRollbackError
                | JobStatus::UninstallCompleted
                | JobStatus::UninstallError
        )
    }

    /// Whether this is an uninstall-side status
    pub fn is_uninstall(&self) -> bool {
        matches!(
            self,
            JobStatus::UninstallCreated
                | JobStatus::UninstallInProgress
                | JobStatus::UninstallCompleted
                | JobStatus::UninstallError
        )
    }

    /// Stable wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::InstallCreated => "INSTALL_CREATED",
            JobStatus::InstallInProgress => "INSTALL_IN_PROGRESS",
            JobStatus::InstallCompleted => "INSTALL_COMPLETED",
            JobStatus::InstallError => "INSTALL_ERROR",
            JobStatus::InstallRollback => "INSTALL_ROLLBACK",
            JobStatus::InstallRollbackInProgress => "INSTALL_ROLLBACK_IN_PROGRESS",
            JobStatus::InstallRollbackError => "INSTALL_ROLLBACK_ERROR",
            JobStatus::UninstallCreated => "UNINSTALL_CREATED",
            JobStatus::UninstallInProgress => "UNINSTALL_IN_PROGRESS",
            JobStatus::UninstallCompleted => "UNINSTALL_COMPLETED",
            JobStatus::UninstallError => "UNINSTALL_ERROR",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single component record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentStatus {
    InstallInProgress,
    InstallCompleted,
    InstallError,
    InstallRollback,
    InstallRollbackError,
    UninstallInProgress,
    UninstallCompleted,
    UninstallError,
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentStatus::InstallInProgress => "INSTALL_IN_PROGRESS",
            ComponentStatus::InstallCompleted => "INSTALL_COMPLETED",
            ComponentStatus::InstallError => "INSTALL_ERROR",
            ComponentStatus::InstallRollback => "INSTALL_ROLLBACK",
            ComponentStatus::InstallRollbackError => "INSTALL_ROLLBACK_ERROR",
            ComponentStatus::UninstallInProgress => "UNINSTALL_IN_PROGRESS",
            ComponentStatus::UninstallCompleted => "UNINSTALL_COMPLETED",
            ComponentStatus::UninstallError => "UNINSTALL_ERROR",
        };
        f.write_str(name)
    }
}

/// How a unit will be applied, resolved from checksums before execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallAction {
    /// No prior record: install fresh
    Create,
    /// Prior record with a different checksum, or live-platform drift
    Override,
    /// Prior record with an identical checksum and a consistent platform
    Skip,
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallAction::Create => "CREATE",
            InstallAction::Override => "OVERRIDE",
            InstallAction::Skip => "SKIP",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&JobStatus::InstallRollbackInProgress).unwrap();
        assert_eq!(json, "\"INSTALL_ROLLBACK_IN_PROGRESS\"");

        let json = serde_json::to_string(&ComponentStatus::UninstallCompleted).unwrap();
        assert_eq!(json, "\"UNINSTALL_COMPLETED\"");

        let json = serde_json::to_string(&InstallAction::Override).unwrap();
        assert_eq!(json, "\"OVERRIDE\"");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::InstallCompleted.is_terminal());
        assert!(JobStatus::InstallRollback.is_terminal());
        assert!(JobStatus::InstallRollbackError.is_terminal());
        assert!(JobStatus::UninstallCompleted.is_terminal());
        assert!(JobStatus::UninstallError.is_terminal());

        assert!(!JobStatus::InstallCreated.is_terminal());
        assert!(!JobStatus::InstallInProgress.is_terminal());
        assert!(!JobStatus::InstallRollbackInProgress.is_terminal());
        assert!(!JobStatus::UninstallInProgress.is_terminal());
    }

    #[test]
    fn test_uninstall_side() {
        assert!(JobStatus::UninstallCreated.is_uninstall());
        assert!(!JobStatus::InstallRollback.is_uninstall());
    }
}
