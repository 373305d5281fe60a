//! Job store errors

use super::PagodaError;

/// Creates a store read failed error
pub fn read_failed(reason: impl Into<String>) -> PagodaError {
    PagodaError::StoreReadFailed {
        reason: reason.into(),
    }
}

/// Creates a store write failed error
pub fn write_failed(reason: impl Into<String>) -> PagodaError {
    PagodaError::StoreWriteFailed {
        reason: reason.into(),
    }
}

/// Creates a serialization failed error
pub fn serialize_failed(reason: impl Into<String>) -> PagodaError {
    PagodaError::SerializeFailed {
        reason: reason.into(),
    }
}
