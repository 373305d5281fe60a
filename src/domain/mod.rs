//! Domain models for Pagoda
//!
//! Pure domain objects representing bundle artifacts. These types carry no
//! I/O; everything here is data produced by manifest deserialization and
//! consumed by the engine.

pub mod descriptor;
pub mod kind;

pub use descriptor::{
    ArtifactDescriptor, AssetDescriptor, ContentAttribute, ContentTemplateDescriptor,
    ContentTypeDescriptor, DirectoryDescriptor, FragmentDescriptor, LabelDescriptor,
    PageDescriptor, PageTemplateDescriptor, ServiceDescriptor, WidgetDescriptor, WidgetPlacement,
};
pub use kind::ComponentKind;
