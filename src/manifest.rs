//! Bundle manifest type and loader
//!
//! The manifest lists the artifact descriptors a bundle carries, one
//! section per component kind. Full descriptor schema validation happens
//! upstream of this engine; the loader only deserializes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    ArtifactDescriptor, AssetDescriptor, ComponentKind, ContentTemplateDescriptor,
    ContentTypeDescriptor, DirectoryDescriptor, FragmentDescriptor, LabelDescriptor,
    PageDescriptor, PageTemplateDescriptor, ServiceDescriptor, WidgetDescriptor,
};
use crate::error::{PagodaError, Result};

/// A parsed bundle manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BundleManifest {
    /// Bundle identifier
    pub bundle: String,
    /// Bundle version
    pub version: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<DirectoryDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<LabelDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<AssetDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widgets: Vec<WidgetDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_types: Vec<ContentTypeDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_templates: Vec<ContentTemplateDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fragments: Vec<FragmentDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_templates: Vec<PageTemplateDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageDescriptor>,
}

impl BundleManifest {
    /// Load a manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PagodaError::ManifestReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PagodaError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// All descriptors of one kind, preserving manifest order
    pub fn descriptors_of(&self, kind: ComponentKind) -> Vec<ArtifactDescriptor> {
        match kind {
            ComponentKind::Service => self
                .services
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Service)
                .collect(),
            ComponentKind::Directory => self
                .directories
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Directory)
                .collect(),
            ComponentKind::Label => self
                .labels
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Label)
                .collect(),
            ComponentKind::Asset => self
                .assets
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Asset)
                .collect(),
            ComponentKind::Widget => self
                .widgets
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Widget)
                .collect(),
            ComponentKind::ContentType => self
                .content_types
                .iter()
                .cloned()
                .map(ArtifactDescriptor::ContentType)
                .collect(),
            ComponentKind::ContentTemplate => self
                .content_templates
                .iter()
                .cloned()
                .map(ArtifactDescriptor::ContentTemplate)
                .collect(),
            ComponentKind::Fragment => self
                .fragments
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Fragment)
                .collect(),
            ComponentKind::PageTemplate => self
                .page_templates
                .iter()
                .cloned()
                .map(ArtifactDescriptor::PageTemplate)
                .collect(),
            ComponentKind::Page => self
                .pages
                .iter()
                .cloned()
                .map(ArtifactDescriptor::Page)
                .collect(),
        }
    }

    /// Total number of descriptors across all kinds
    pub fn descriptor_count(&self) -> usize {
        ComponentKind::ALL
            .iter()
            .map(|kind| self.descriptors_of(*kind).len())
            .sum()
    }
}
