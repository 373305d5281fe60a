//! Platform client contracts
//!
//! The engine applies artifacts through these traits and never names a
//! concrete client. [`EngineClient`] covers the CMS engine artifacts;
//! [`ClusterClient`] covers backend service deployments managed by an
//! orchestrator. Both must be idempotent on retry of the same descriptor.

pub mod local;

pub use local::LocalPlatform;

use crate::domain::{
    AssetDescriptor, ComponentKind, ContentTemplateDescriptor, ContentTypeDescriptor,
    DirectoryDescriptor, FragmentDescriptor, LabelDescriptor, PageDescriptor,
    PageTemplateDescriptor, ServiceDescriptor, WidgetDescriptor, WidgetPlacement,
};
use crate::error::Result;

/// Client for the CMS engine, one registration method per artifact kind
pub trait EngineClient: Send + Sync {
    fn register_directory(&self, descriptor: &DirectoryDescriptor) -> Result<()>;
    fn register_label(&self, descriptor: &LabelDescriptor) -> Result<()>;
    fn register_asset(&self, descriptor: &AssetDescriptor) -> Result<()>;
    fn register_widget(&self, descriptor: &WidgetDescriptor) -> Result<()>;
    fn register_content_type(&self, descriptor: &ContentTypeDescriptor) -> Result<()>;
    fn register_content_template(&self, descriptor: &ContentTemplateDescriptor) -> Result<()>;
    fn register_fragment(&self, descriptor: &FragmentDescriptor) -> Result<()>;
    fn register_page_template(&self, descriptor: &PageTemplateDescriptor) -> Result<()>;

    /// Register a page composition without its widget wiring
    fn register_page(&self, descriptor: &PageDescriptor) -> Result<()>;

    /// Wire one widget into a frame of an already-registered page
    fn set_page_widget(&self, page: &str, placement: &WidgetPlacement) -> Result<()>;

    /// Remove an artifact; must succeed if the artifact is already gone
    fn delete_artifact(&self, kind: ComponentKind, code: &str) -> Result<()>;

    /// Whether the platform currently has an artifact under this key
    fn artifact_exists(&self, kind: ComponentKind, code: &str) -> Result<bool>;
}

/// Client for the cluster orchestrator that runs backend services
pub trait ClusterClient: Send + Sync {
    /// Request the deployment and linking of a service
    ///
    /// Returns once the request is accepted; readiness is observed
    /// separately through [`ClusterClient::is_ready`].
    fn link_service(&self, descriptor: &ServiceDescriptor) -> Result<()>;

    /// Whether a linked service currently reports healthy
    fn is_ready(&self, code: &str) -> Result<bool>;

    /// Tear down a service deployment; must succeed if already gone
    fn unlink(&self, code: &str) -> Result<()>;

    /// Remove the ingress exposure of a service, keeping the deployment
    fn remove_ingress(&self, code: &str) -> Result<()>;

    /// Whether a deployment exists for this service code
    fn is_linked(&self, code: &str) -> Result<bool>;

    /// Content-addressed version marker of the live deployment, if any
    fn deployed_digest(&self, code: &str) -> Result<Option<String>>;
}
