//! Bundle manifest errors

use super::PagodaError;

/// Creates a manifest read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PagodaError {
    PagodaError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PagodaError {
    PagodaError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
