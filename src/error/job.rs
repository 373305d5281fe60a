//! Job lifecycle errors

use super::PagodaError;

/// Creates a job not found error
pub fn not_found(id: impl Into<String>) -> PagodaError {
    PagodaError::JobNotFound { id: id.into() }
}

/// Creates a bundle not installed error
pub fn not_installed(bundle: impl Into<String>) -> PagodaError {
    PagodaError::BundleNotInstalled {
        bundle: bundle.into(),
    }
}

/// Creates a missing processor error
pub fn missing_processor(kind: impl Into<String>) -> PagodaError {
    PagodaError::MissingProcessor { kind: kind.into() }
}

/// Creates a duplicate processor error
pub fn duplicate_processor(kind: impl Into<String>) -> PagodaError {
    PagodaError::DuplicateProcessor { kind: kind.into() }
}
