//! Filesystem-backed sandbox platform
//!
//! Implements both client traits against a directory tree, giving the CLI
//! a concrete target to install bundles into and tests a platform whose
//! state can be inspected with plain file operations. Artifacts live as
//! JSON files under `<root>/<kind>/`; service deployments use the same
//! layout under the `service` kind directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::clients::{ClusterClient, EngineClient};
use crate::domain::{
    AssetDescriptor, ComponentKind, ContentTemplateDescriptor, ContentTypeDescriptor,
    DirectoryDescriptor, FragmentDescriptor, LabelDescriptor, PageDescriptor,
    PageTemplateDescriptor, ServiceDescriptor, WidgetDescriptor, WidgetPlacement,
};
use crate::error::{Result, fs as fs_error};

/// A local platform rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalPlatform {
    root: PathBuf,
}

impl LocalPlatform {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// File path for an artifact key
    ///
    /// Directory paths may contain separators, so codes are flattened
    /// before becoming file names.
    fn artifact_path(&self, kind: ComponentKind, code: &str) -> PathBuf {
        let flat = code.replace(['/', '\\'], "__");
        self.root.join(kind.as_str()).join(format!("{}.json", flat))
    }

    fn write_artifact<T: Serialize>(&self, kind: ComponentKind, code: &str, value: &T) -> Result<()> {
        let path = self.artifact_path(kind, code);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| fs_error::write_failed(parent.display().to_string(), e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
    }

    fn remove_artifact(&self, kind: ComponentKind, code: &str) -> Result<()> {
        let path = self.artifact_path(kind, code);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))?;
        }
        Ok(())
    }

    /// All (kind, code) pairs currently present on the platform
    pub fn scan(&self) -> Vec<(ComponentKind, String)> {
        let mut found = Vec::new();

        for kind in ComponentKind::ALL {
            let dir = self.root.join(kind.as_str());
            if !dir.is_dir() {
                continue;
            }

            let mut entries: Vec<_> = WalkDir::new(&dir)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|e| {
                    e.path()
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().replace("__", "/"))
                })
                .collect();
            entries.sort();

            found.extend(entries.into_iter().map(|code| (kind, code)));
        }

        found
    }

    fn read_service(&self, code: &str) -> Result<Option<ServiceDescriptor>> {
        let path = self.artifact_path(ComponentKind::Service, code);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;
        let descriptor = serde_json::from_str(&content)?;
        Ok(Some(descriptor))
    }
}

impl EngineClient for LocalPlatform {
    fn register_directory(&self, descriptor: &DirectoryDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Directory, &descriptor.path, descriptor)
    }

    fn register_label(&self, descriptor: &LabelDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Label, &descriptor.key, descriptor)
    }

    fn register_asset(&self, descriptor: &AssetDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Asset, &descriptor.code, descriptor)
    }

    fn register_widget(&self, descriptor: &WidgetDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Widget, &descriptor.code, descriptor)
    }

    fn register_content_type(&self, descriptor: &ContentTypeDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::ContentType, &descriptor.code, descriptor)
    }

    fn register_content_template(&self, descriptor: &ContentTemplateDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::ContentTemplate, &descriptor.code, descriptor)
    }

    fn register_fragment(&self, descriptor: &FragmentDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Fragment, &descriptor.code, descriptor)
    }

    fn register_page_template(&self, descriptor: &PageTemplateDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::PageTemplate, &descriptor.code, descriptor)
    }

    fn register_page(&self, descriptor: &PageDescriptor) -> Result<()> {
        // Widget wiring happens frame by frame via set_page_widget
        let mut bare = descriptor.clone();
        bare.widgets.clear();
        self.write_artifact(ComponentKind::Page, &descriptor.code, &bare)
    }

    fn set_page_widget(&self, page: &str, placement: &WidgetPlacement) -> Result<()> {
        let path = self.artifact_path(ComponentKind::Page, page);
        let content = fs::read_to_string(&path)
            .map_err(|e| fs_error::read_failed(path.display().to_string(), e.to_string()))?;
        let mut descriptor: PageDescriptor = serde_json::from_str(&content)?;

        descriptor.widgets.retain(|w| w.frame != placement.frame);
        descriptor.widgets.push(placement.clone());
        descriptor.widgets.sort_by_key(|w| w.frame);

        self.write_artifact(ComponentKind::Page, page, &descriptor)
    }

    fn delete_artifact(&self, kind: ComponentKind, code: &str) -> Result<()> {
        self.remove_artifact(kind, code)
    }

    fn artifact_exists(&self, kind: ComponentKind, code: &str) -> Result<bool> {
        Ok(self.artifact_path(kind, code).exists())
    }
}

impl ClusterClient for LocalPlatform {
    fn link_service(&self, descriptor: &ServiceDescriptor) -> Result<()> {
        self.write_artifact(ComponentKind::Service, &descriptor.code, descriptor)
    }

    fn is_ready(&self, code: &str) -> Result<bool> {
        // A sandbox deployment is serviceable as soon as it is linked
        self.is_linked(code)
    }

    fn unlink(&self, code: &str) -> Result<()> {
        self.remove_artifact(ComponentKind::Service, code)
    }

    fn remove_ingress(&self, code: &str) -> Result<()> {
        if let Some(mut descriptor) = self.read_service(code)? {
            descriptor.ingress_path = None;
            self.write_artifact(ComponentKind::Service, code, &descriptor)?;
        }
        Ok(())
    }

    fn is_linked(&self, code: &str) -> Result<bool> {
        Ok(self.artifact_path(ComponentKind::Service, code).exists())
    }

    fn deployed_digest(&self, code: &str) -> Result<Option<String>> {
        Ok(self
            .read_service(code)?
            .map(|d| d.image_digest().to_string()))
    }
}
