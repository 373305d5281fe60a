//! Artifact descriptors
//!
//! One struct per component kind, mirroring the manifest sections. Maps use
//! `BTreeMap` so the canonical serialized form (and therefore the checksum)
//! does not depend on insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ComponentKind;

/// A backend microservice deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceDescriptor {
    /// Service code, unique within the platform
    pub code: String,
    /// Container image reference, digest-pinned (e.g. `repo/orders@sha256:…`)
    pub image: String,
    /// Ingress path to expose, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_path: Option<String>,
    /// Health endpoint polled during readiness waits
    #[serde(default = "ServiceDescriptor::default_health_path")]
    pub health_path: String,
    /// Whether to expose the service under its canonical path
    #[serde(default)]
    pub canonical_path: bool,
}

impl ServiceDescriptor {
    fn default_health_path() -> String {
        "/health".to_string()
    }

    /// The content-addressed version marker of this service
    ///
    /// For digest-pinned images this is the digest; otherwise the whole
    /// image reference stands in as the version marker.
    pub fn image_digest(&self) -> &str {
        self.image
            .split_once('@')
            .map_or(self.image.as_str(), |(_, digest)| digest)
    }
}

/// A filesystem directory for static resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DirectoryDescriptor {
    /// Directory path relative to the platform's resource root
    pub path: String,
}

/// A localized label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelDescriptor {
    /// Label key
    pub key: String,
    /// Language code to localized text
    pub titles: BTreeMap<String, String>,
}

/// A static asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetDescriptor {
    /// Asset code, unique within the platform
    pub code: String,
    /// Path of the asset file inside the bundle
    pub path: String,
    /// Owning group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A UI widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetDescriptor {
    /// Widget code, unique within the platform
    pub code: String,
    /// Language code to localized title
    pub titles: BTreeMap<String, String>,
    /// Owning group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Custom UI markup, if the widget ships its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_ui: Option<String>,
}

/// An attribute of a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentAttribute {
    /// Attribute code
    pub code: String,
    /// Attribute type (e.g. `Text`, `Date`, `Image`)
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Whether content must provide a value
    #[serde(default)]
    pub mandatory: bool,
}

/// A data-model / content-type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentTypeDescriptor {
    /// Content type code
    pub code: String,
    /// Display name
    pub name: String,
    /// Attribute definitions, in declaration order
    #[serde(default)]
    pub attributes: Vec<ContentAttribute>,
}

/// A rendering template for a content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentTemplateDescriptor {
    /// Template code
    pub code: String,
    /// Content type this template renders
    pub content_type: String,
    /// Template markup
    pub markup: String,
}

/// A reusable GUI fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FragmentDescriptor {
    /// Fragment code
    pub code: String,
    /// Fragment markup
    pub markup: String,
}

/// A page layout template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageTemplateDescriptor {
    /// Template code
    pub code: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Layout markup with numbered widget frames
    pub template: String,
    /// Number of widget frames the layout exposes
    pub frames: u32,
}

/// A widget placed into a page frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetPlacement {
    /// Frame index within the page template
    pub frame: u32,
    /// Code of the widget to place
    pub code: String,
}

/// A page composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageDescriptor {
    /// Page code, unique within the platform
    pub code: String,
    /// Language code to localized title
    pub titles: BTreeMap<String, String>,
    /// Page template the page is built on
    pub template: String,
    /// Parent page code, if not a root page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Widgets wired onto the page, one per frame
    #[serde(default)]
    pub widgets: Vec<WidgetPlacement>,
}

/// Any artifact a bundle may carry
///
/// The engine works over this enum; per-kind behavior lives in the
/// component processors and the platform clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ArtifactDescriptor {
    Service(ServiceDescriptor),
    Directory(DirectoryDescriptor),
    Label(LabelDescriptor),
    Asset(AssetDescriptor),
    Widget(WidgetDescriptor),
    ContentType(ContentTypeDescriptor),
    ContentTemplate(ContentTemplateDescriptor),
    Fragment(FragmentDescriptor),
    PageTemplate(PageTemplateDescriptor),
    Page(PageDescriptor),
}

impl ArtifactDescriptor {
    /// The component kind of this descriptor
    pub fn kind(&self) -> ComponentKind {
        match self {
            ArtifactDescriptor::Service(_) => ComponentKind::Service,
            ArtifactDescriptor::Directory(_) => ComponentKind::Directory,
            ArtifactDescriptor::Label(_) => ComponentKind::Label,
            ArtifactDescriptor::Asset(_) => ComponentKind::Asset,
            ArtifactDescriptor::Widget(_) => ComponentKind::Widget,
            ArtifactDescriptor::ContentType(_) => ComponentKind::ContentType,
            ArtifactDescriptor::ContentTemplate(_) => ComponentKind::ContentTemplate,
            ArtifactDescriptor::Fragment(_) => ComponentKind::Fragment,
            ArtifactDescriptor::PageTemplate(_) => ComponentKind::PageTemplate,
            ArtifactDescriptor::Page(_) => ComponentKind::Page,
        }
    }

    /// The unique key of this artifact within its kind
    pub fn code(&self) -> &str {
        match self {
            ArtifactDescriptor::Service(d) => &d.code,
            ArtifactDescriptor::Directory(d) => &d.path,
            ArtifactDescriptor::Label(d) => &d.key,
            ArtifactDescriptor::Asset(d) => &d.code,
            ArtifactDescriptor::Widget(d) => &d.code,
            ArtifactDescriptor::ContentType(d) => &d.code,
            ArtifactDescriptor::ContentTemplate(d) => &d.code,
            ArtifactDescriptor::Fragment(d) => &d.code,
            ArtifactDescriptor::PageTemplate(d) => &d.code,
            ArtifactDescriptor::Page(d) => &d.code,
        }
    }
}
