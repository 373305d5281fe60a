//! Error types and handling for Pagoda
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Bundle manifest errors
//! - [`job`]: Job lifecycle errors
//! - [`store`]: Job store errors
//! - [`client`]: Platform client errors
//! - [`fs`]: File system errors

pub mod client;
pub mod fs;
pub mod job;
pub mod manifest;
pub mod store;

#[allow(unused_imports)]
pub use client::{
    call_failed as client_call_failed, readiness_timeout, wait_cancelled,
};
#[allow(unused_imports)]
pub use fs::{read_failed as file_read_failed, write_failed as file_write_failed};
#[allow(unused_imports)]
pub use job::{
    duplicate_processor, missing_processor, not_found as job_not_found,
    not_installed as bundle_not_installed,
};
#[allow(unused_imports)]
pub use manifest::{parse_failed as manifest_parse_failed, read_failed as manifest_read_failed};
#[allow(unused_imports)]
pub use store::{
    read_failed as store_read_failed, serialize_failed, write_failed as store_write_failed,
};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Pagoda operations
#[derive(Error, Diagnostic, Debug)]
pub enum PagodaError {
    // Manifest errors
    #[error("Failed to read bundle manifest: {path}")]
    #[diagnostic(code(pagoda::manifest::read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to parse bundle manifest: {path}")]
    #[diagnostic(
        code(pagoda::manifest::parse_failed),
        help("The manifest must be valid YAML with a 'bundle' and 'version' field")
    )]
    ManifestParseFailed { path: String, reason: String },

    // Job errors
    #[error("Job '{id}' not found")]
    #[diagnostic(code(pagoda::job::not_found))]
    JobNotFound { id: String },

    #[error("Bundle '{bundle}' has no completed installation")]
    #[diagnostic(
        code(pagoda::job::not_installed),
        help("Run 'pagoda install' for this bundle first")
    )]
    BundleNotInstalled { bundle: String },

    #[error("No processor registered for component kind '{kind}'")]
    #[diagnostic(
        code(pagoda::job::missing_processor),
        help(
            "A persisted component record references a kind this build cannot handle; \
             the store was likely written by a newer version"
        )
    )]
    MissingProcessor { kind: String },

    #[error("A processor for component kind '{kind}' is already registered")]
    #[diagnostic(code(pagoda::job::duplicate_processor))]
    DuplicateProcessor { kind: String },

    // Store errors
    #[error("Failed to read job store: {reason}")]
    #[diagnostic(code(pagoda::store::read_failed))]
    StoreReadFailed { reason: String },

    #[error("Failed to persist job state: {reason}")]
    #[diagnostic(
        code(pagoda::store::write_failed),
        help(
            "Job tracking could not be written through; the job was aborted so the \
             store never disagrees with what actually ran"
        )
    )]
    StoreWriteFailed { reason: String },

    #[error("Failed to serialize component descriptor: {reason}")]
    #[diagnostic(code(pagoda::store::serialize_failed))]
    SerializeFailed { reason: String },

    // Platform client errors
    #[error("Platform call failed for {kind} '{code}': {reason}")]
    #[diagnostic(code(pagoda::client::call_failed))]
    ClientCallFailed {
        kind: String,
        code: String,
        reason: String,
    },

    #[error("Service '{service}' did not become ready within {waited_ms}ms")]
    #[diagnostic(
        code(pagoda::client::readiness_timeout),
        help("The deployment was requested but never reported healthy; it will be rolled back")
    )]
    ReadinessTimeout { service: String, waited_ms: u64 },

    #[error("Readiness wait for '{service}' was cancelled")]
    #[diagnostic(code(pagoda::client::wait_cancelled))]
    WaitCancelled { service: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(pagoda::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(pagoda::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pagoda::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PagodaError {
    fn from(err: std::io::Error) -> Self {
        PagodaError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PagodaError {
    fn from(err: serde_json::Error) -> Self {
        PagodaError::SerializeFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PagodaError>;
