//! Component processors
//!
//! One processor per artifact kind. A processor expands the manifest
//! entries of its kind into descriptors (pure, no platform calls) and
//! knows how to apply and remove a single artifact through the platform
//! clients. The registry maps persisted component kinds back to their
//! processor, which is what makes uninstall work from records alone.
//!
//! Most kinds are a single engine registration call and are generated by
//! [`impl_engine_processor!`]. Services ([`service::ServiceProcessor`])
//! and pages ([`page::PageProcessor`]) have hand-written processors.

pub mod asset;
pub mod content_template;
pub mod content_type;
pub mod directory;
pub mod fragment;
pub mod label;
pub mod page;
pub mod page_template;
pub mod service;
pub mod widget;

pub use page::PageProcessor;
pub use service::ServiceProcessor;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::clients::{ClusterClient, EngineClient};
use crate::domain::{ArtifactDescriptor, ComponentKind};
use crate::engine::readiness::ReadinessProbe;
use crate::error::{PagodaError, Result, client as client_error, job as job_error};
use crate::manifest::BundleManifest;

/// Everything a processor may touch while applying or removing a unit
pub struct PlatformContext<'a> {
    pub engine: &'a dyn EngineClient,
    pub cluster: &'a dyn ClusterClient,
    pub readiness: &'a ReadinessProbe,
}

/// Per-kind install and uninstall behavior
pub trait ComponentProcessor: Send + Sync + fmt::Debug {
    /// The component kind this processor handles
    fn kind(&self) -> ComponentKind;

    /// Expand manifest entries of this kind into descriptors
    ///
    /// Pure and order-preserving; no platform calls happen here.
    fn process(&self, manifest: &BundleManifest) -> Vec<ArtifactDescriptor> {
        manifest.descriptors_of(self.kind())
    }

    /// Apply one descriptor to the platform
    fn install(&self, descriptor: &ArtifactDescriptor, ctx: &PlatformContext<'_>) -> Result<()>;

    /// Remove one artifact from the platform; must tolerate it being gone
    fn uninstall(&self, code: &str, ctx: &PlatformContext<'_>) -> Result<()> {
        ctx.engine.delete_artifact(self.kind(), code)
    }

    /// Whether the live platform still agrees with an installed record
    ///
    /// Consulted before a unit may be skipped: a matching checksum with a
    /// negative answer here forces an OVERRIDE, so manually deleted or
    /// altered artifacts heal on reinstall.
    fn verify_live(
        &self,
        descriptor: &ArtifactDescriptor,
        ctx: &PlatformContext<'_>,
    ) -> Result<bool> {
        ctx.engine.artifact_exists(self.kind(), descriptor.code())
    }
}

/// Error for an install call handed a descriptor of another kind
pub(crate) fn kind_mismatch(expected: ComponentKind, got: &ArtifactDescriptor) -> PagodaError {
    client_error::call_failed(
        expected.to_string(),
        got.code(),
        format!("expected a {} descriptor, got {}", expected, got.kind()),
    )
}

/// Implements a processor whose install is a single engine registration
macro_rules! impl_engine_processor {
    ($name:ident, $kind:ident, $register:ident) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl $crate::engine::processors::ComponentProcessor for $name {
            fn kind(&self) -> $crate::domain::ComponentKind {
                $crate::domain::ComponentKind::$kind
            }

            fn install(
                &self,
                descriptor: &$crate::domain::ArtifactDescriptor,
                ctx: &$crate::engine::processors::PlatformContext<'_>,
            ) -> $crate::error::Result<()> {
                match descriptor {
                    $crate::domain::ArtifactDescriptor::$kind(inner) => ctx.engine.$register(inner),
                    other => Err($crate::engine::processors::kind_mismatch(self.kind(), other)),
                }
            }
        }
    };
}
pub(crate) use impl_engine_processor;

/// Registry of processors keyed by component kind
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    processors: HashMap<ComponentKind, Arc<dyn ComponentProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a processor for every built-in component kind
    pub fn builtins() -> Self {
        let mut processors: HashMap<ComponentKind, Arc<dyn ComponentProcessor>> = HashMap::new();
        for processor in [
            Arc::new(ServiceProcessor) as Arc<dyn ComponentProcessor>,
            Arc::new(directory::DirectoryProcessor),
            Arc::new(label::LabelProcessor),
            Arc::new(asset::AssetProcessor),
            Arc::new(widget::WidgetProcessor),
            Arc::new(content_type::ContentTypeProcessor),
            Arc::new(content_template::ContentTemplateProcessor),
            Arc::new(fragment::FragmentProcessor),
            Arc::new(page_template::PageTemplateProcessor),
            Arc::new(PageProcessor),
        ] {
            processors.insert(processor.kind(), processor);
        }
        Self { processors }
    }

    /// Add a processor; each kind may be registered once
    pub fn register(&mut self, processor: Arc<dyn ComponentProcessor>) -> Result<()> {
        let kind = processor.kind();
        if self.processors.contains_key(&kind) {
            return Err(job_error::duplicate_processor(kind.to_string()));
        }
        self.processors.insert(kind, processor);
        Ok(())
    }

    /// The processor for a kind
    ///
    /// Missing processors are an error rather than a skip: a persisted
    /// record naming an unhandled kind means the store and the binary
    /// disagree about the world.
    pub fn get(&self, kind: ComponentKind) -> Result<Arc<dyn ComponentProcessor>> {
        self.processors
            .get(&kind)
            .cloned()
            .ok_or_else(|| job_error::missing_processor(kind.to_string()))
    }

    /// All registered processors, in install priority order
    pub fn ordered(&self) -> Vec<Arc<dyn ComponentProcessor>> {
        ComponentKind::ALL
            .iter()
            .filter_map(|kind| self.processors.get(kind).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_cover_every_kind() {
        let registry = ProcessorRegistry::builtins();
        for kind in ComponentKind::ALL {
            assert_eq!(registry.get(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_ordered_follows_install_priority() {
        let registry = ProcessorRegistry::builtins();
        let kinds: Vec<ComponentKind> = registry.ordered().iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, ComponentKind::ALL);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ProcessorRegistry::builtins();
        let result = registry.register(Arc::new(widget::WidgetProcessor));
        assert!(matches!(
            result.unwrap_err(),
            PagodaError::DuplicateProcessor { .. }
        ));
    }

    #[test]
    fn test_empty_registry_reports_missing_processor() {
        let registry = ProcessorRegistry::new();
        assert!(matches!(
            registry.get(ComponentKind::Widget).unwrap_err(),
            PagodaError::MissingProcessor { .. }
        ));
    }
}
