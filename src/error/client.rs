//! Platform client errors

use super::PagodaError;

/// Creates a client call failed error
pub fn call_failed(
    kind: impl Into<String>,
    code: impl Into<String>,
    reason: impl Into<String>,
) -> PagodaError {
    PagodaError::ClientCallFailed {
        kind: kind.into(),
        code: code.into(),
        reason: reason.into(),
    }
}

/// Creates a readiness timeout error
pub fn readiness_timeout(service: impl Into<String>, waited_ms: u64) -> PagodaError {
    PagodaError::ReadinessTimeout {
        service: service.into(),
        waited_ms,
    }
}

/// Creates a wait cancelled error
pub fn wait_cancelled(service: impl Into<String>) -> PagodaError {
    PagodaError::WaitCancelled {
        service: service.into(),
    }
}
