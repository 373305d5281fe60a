//! Readiness waits and service drift analysis
//!
//! Linking a service only means the cluster accepted the request; the
//! deployment becomes serviceable some time later. [`ReadinessProbe`]
//! turns that gap into a bounded, cancellable polling loop. The drift
//! helpers compare a bundle's requested services against what is actually
//! installed and deployed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::clients::ClusterClient;
use crate::domain::{ComponentKind, ServiceDescriptor};
use crate::error::{Result, client as client_error};
use crate::store::JobStore;

/// Bounded, cancellable polling of a readiness endpoint
#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    interval: Duration,
    timeout: Duration,
    cancel: Arc<AtomicBool>,
}

impl Default for ReadinessProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(300))
    }
}

impl ReadinessProbe {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that aborts any in-flight wait when set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Poll `probe` until it reports ready
    ///
    /// Fails with a timeout error once the ceiling is reached, with a
    /// cancellation error if the cancel flag is raised between polls, and
    /// immediately if the probe itself errors. The probe is consulted at
    /// least once even with a zero timeout.
    pub fn wait_until_ready<F>(&self, service: &str, probe: F) -> Result<()>
    where
        F: Fn() -> Result<bool>,
    {
        let started = Instant::now();

        loop {
            if self.cancel.load(Ordering::SeqCst) {
                return Err(client_error::wait_cancelled(service));
            }
            if probe()? {
                return Ok(());
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                return Err(client_error::readiness_timeout(
                    service,
                    elapsed.as_millis() as u64,
                ));
            }
            thread::sleep(self.interval.min(self.timeout - elapsed));
        }
    }
}

/// How a requested service compares to the installed and deployed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriftStatus {
    /// Nothing installed or deployed under this code
    New,
    /// Installed and the deployment matches the requested version marker
    Equal,
    /// Installed but diverged, or inconsistent between record and cluster
    Diff,
}

impl fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriftStatus::New => "NEW",
            DriftStatus::Equal => "EQUAL",
            DriftStatus::Diff => "DIFF",
        };
        f.write_str(name)
    }
}

/// Drift verdict for one service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDrift {
    pub code: String,
    pub status: DriftStatus,
}

/// Compare a bundle's requested services against installed state
///
/// A record without a live deployment behind it (or the reverse) is
/// reported as `DIFF`, never `EQUAL`: reinstalling must heal it.
pub fn analyze_services(
    services: &[ServiceDescriptor],
    bundle: &str,
    store: &dyn JobStore,
    cluster: &dyn ClusterClient,
) -> Result<Vec<ServiceDrift>> {
    let mut drifts = Vec::with_capacity(services.len());

    for service in services {
        let installed = store.find_installed(bundle, ComponentKind::Service, &service.code)?;
        let linked = cluster.is_linked(&service.code)?;

        let status = if installed.is_none() && !linked {
            DriftStatus::New
        } else if installed.is_some()
            && linked
            && cluster.deployed_digest(&service.code)?.as_deref() == Some(service.image_digest())
        {
            DriftStatus::Equal
        } else {
            DriftStatus::Diff
        };

        drifts.push(ServiceDrift {
            code: service.code.clone(),
            status,
        });
    }

    Ok(drifts)
}
