//! Backend service processor
//!
//! The only processor that talks to the cluster instead of the engine.
//! Linking a service is asynchronous on the cluster side, so install
//! blocks on the readiness probe until the deployment reports healthy;
//! a timeout fails the unit like any other unit failure and triggers
//! rollback upstream.

use crate::domain::{ArtifactDescriptor, ComponentKind};
use crate::engine::processors::{ComponentProcessor, PlatformContext, kind_mismatch};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct ServiceProcessor;

impl ComponentProcessor for ServiceProcessor {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Service
    }

    fn install(&self, descriptor: &ArtifactDescriptor, ctx: &PlatformContext<'_>) -> Result<()> {
        let ArtifactDescriptor::Service(service) = descriptor else {
            return Err(kind_mismatch(self.kind(), descriptor));
        };

        ctx.cluster.link_service(service)?;
        ctx.readiness
            .wait_until_ready(&service.code, || ctx.cluster.is_ready(&service.code))
    }

    fn uninstall(&self, code: &str, ctx: &PlatformContext<'_>) -> Result<()> {
        // Ingress first, so a half-finished removal never routes traffic
        // to a vanishing deployment
        ctx.cluster.remove_ingress(code)?;
        ctx.cluster.unlink(code)
    }

    fn verify_live(
        &self,
        descriptor: &ArtifactDescriptor,
        ctx: &PlatformContext<'_>,
    ) -> Result<bool> {
        let ArtifactDescriptor::Service(service) = descriptor else {
            return Err(kind_mismatch(self.kind(), descriptor));
        };

        if !ctx.cluster.is_linked(&service.code)? {
            return Ok(false);
        }
        Ok(ctx.cluster.deployed_digest(&service.code)?.as_deref()
            == Some(service.image_digest()))
    }
}
