//! Test doubles for engine tests
//!
//! [`RecordingPlatform`] is an in-memory platform that logs every call and
//! fails on demand, which is how unit-failure and rollback-order behavior
//! gets exercised without a real platform. [`FlakyStore`] injects store
//! write failures to exercise the fatal-abort path.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::clients::{ClusterClient, EngineClient};
use crate::domain::{
    ArtifactDescriptor, AssetDescriptor, ComponentKind, ContentTemplateDescriptor,
    ContentTypeDescriptor, DirectoryDescriptor, FragmentDescriptor, LabelDescriptor,
    PageDescriptor, PageTemplateDescriptor, ServiceDescriptor, WidgetDescriptor, WidgetPlacement,
};
use crate::engine::priority::order_for_install;
use crate::engine::processors::ProcessorRegistry;
use crate::engine::unit::InstallableUnit;
use crate::error::{Result, client as client_error, store as store_error};
use crate::hash::checksum_of;
use crate::job::{ComponentRecord, ComponentStatus, InstallAction, Job};
use crate::store::{JobStore, MemoryStore};

/// In-memory platform that records calls and can fail on demand
///
/// Failure keys use the same shape as log entries:
/// `install:<kind>:<code>` and `uninstall:<kind>:<code>`.
#[derive(Debug)]
pub struct RecordingPlatform {
    log: Mutex<Vec<String>>,
    fail: Mutex<HashSet<String>>,
    present: Mutex<HashSet<String>>,
    digests: Mutex<HashMap<String, String>>,
    ready: AtomicBool,
}

impl Default for RecordingPlatform {
    fn default() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fail: Mutex::new(HashSet::new()),
            present: Mutex::new(HashSet::new()),
            digests: Mutex::new(HashMap::new()),
            ready: AtomicBool::new(true),
        }
    }
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named call fail with an injected client error
    pub fn fail_on(&self, key: &str) {
        self.fail.lock().unwrap().insert(key.to_string());
    }

    /// Let a previously failing call succeed again
    pub fn clear_failure(&self, key: &str) {
        self.fail.lock().unwrap().remove(key);
    }

    /// Control what the readiness endpoint reports
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Snapshot of all calls, in order
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Position of a call in the log
    pub fn call_index(&self, key: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == key)
    }

    /// Whether an artifact is currently present
    pub fn has(&self, kind: ComponentKind, code: &str) -> bool {
        self.present
            .lock()
            .unwrap()
            .contains(&format!("{}:{}", kind, code))
    }

    fn apply(&self, op: &str, kind: ComponentKind, code: &str) -> Result<()> {
        let key = format!("{}:{}:{}", op, kind, code);
        self.log.lock().unwrap().push(key.clone());
        if self.fail.lock().unwrap().contains(&key) {
            return Err(client_error::call_failed(
                kind.to_string(),
                code,
                "injected failure",
            ));
        }

        let artifact = format!("{}:{}", kind, code);
        match op {
            "install" => {
                self.present.lock().unwrap().insert(artifact);
            }
            "uninstall" => {
                self.present.lock().unwrap().remove(&artifact);
            }
            _ => {}
        }
        Ok(())
    }
}

impl EngineClient for RecordingPlatform {
    fn register_directory(&self, d: &DirectoryDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Directory, &d.path)
    }

    fn register_label(&self, d: &LabelDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Label, &d.key)
    }

    fn register_asset(&self, d: &AssetDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Asset, &d.code)
    }

    fn register_widget(&self, d: &WidgetDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Widget, &d.code)
    }

    fn register_content_type(&self, d: &ContentTypeDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::ContentType, &d.code)
    }

    fn register_content_template(&self, d: &ContentTemplateDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::ContentTemplate, &d.code)
    }

    fn register_fragment(&self, d: &FragmentDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Fragment, &d.code)
    }

    fn register_page_template(&self, d: &PageTemplateDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::PageTemplate, &d.code)
    }

    fn register_page(&self, d: &PageDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Page, &d.code)
    }

    fn set_page_widget(&self, page: &str, placement: &WidgetPlacement) -> Result<()> {
        let key = format!("wire:{}:{}:{}", page, placement.frame, placement.code);
        self.log.lock().unwrap().push(key.clone());
        if self.fail.lock().unwrap().contains(&key) {
            return Err(client_error::call_failed(
                ComponentKind::Page.to_string(),
                page,
                "injected failure",
            ));
        }
        Ok(())
    }

    fn delete_artifact(&self, kind: ComponentKind, code: &str) -> Result<()> {
        self.apply("uninstall", kind, code)
    }

    fn artifact_exists(&self, kind: ComponentKind, code: &str) -> Result<bool> {
        Ok(self.has(kind, code))
    }
}

impl ClusterClient for RecordingPlatform {
    fn link_service(&self, d: &ServiceDescriptor) -> Result<()> {
        self.apply("install", ComponentKind::Service, &d.code)?;
        self.digests
            .lock()
            .unwrap()
            .insert(d.code.clone(), d.image_digest().to_string());
        Ok(())
    }

    fn is_ready(&self, _code: &str) -> Result<bool> {
        Ok(self.ready.load(Ordering::SeqCst))
    }

    fn unlink(&self, code: &str) -> Result<()> {
        self.apply("uninstall", ComponentKind::Service, code)?;
        self.digests.lock().unwrap().remove(code);
        Ok(())
    }

    fn remove_ingress(&self, code: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("unroute:{}", code));
        Ok(())
    }

    fn is_linked(&self, code: &str) -> Result<bool> {
        Ok(self.has(ComponentKind::Service, code))
    }

    fn deployed_digest(&self, code: &str) -> Result<Option<String>> {
        Ok(self.digests.lock().unwrap().get(code).cloned())
    }
}

/// Store that delegates to [`MemoryStore`] but fails record saves after a
/// set number of calls
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    saves_left: AtomicU64,
}

impl FlakyStore {
    pub fn failing_after(saves: u64) -> Self {
        Self {
            inner: MemoryStore::new(),
            saves_left: AtomicU64::new(saves),
        }
    }
}

impl JobStore for FlakyStore {
    fn create_job(&self, job: &Job) -> Result<()> {
        self.inner.create_job(job)
    }

    fn update_job(&self, job: &Job) -> Result<()> {
        self.inner.update_job(job)
    }

    fn get_job(&self, id: &str) -> Result<Option<Job>> {
        self.inner.get_job(id)
    }

    fn list_jobs(&self) -> Result<Vec<Job>> {
        self.inner.list_jobs()
    }

    fn find_non_terminal(&self, bundle: &str) -> Result<Option<Job>> {
        self.inner.find_non_terminal(bundle)
    }

    fn save_record(&self, record: &ComponentRecord) -> Result<()> {
        if self.saves_left.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
            left.checked_sub(1)
        }) == Err(0)
        {
            return Err(store_error::write_failed("injected write failure"));
        }
        self.inner.save_record(record)
    }

    fn records_for_job(&self, job_id: &str) -> Result<Vec<ComponentRecord>> {
        self.inner.records_for_job(job_id)
    }

    fn find_installed(
        &self,
        bundle: &str,
        kind: ComponentKind,
        code: &str,
    ) -> Result<Option<ComponentRecord>> {
        self.inner.find_installed(bundle, kind, code)
    }

    fn installed_for(&self, bundle: &str) -> Result<Vec<ComponentRecord>> {
        self.inner.installed_for(bundle)
    }

    fn next_job_id(&self, bundle: &str) -> String {
        self.inner.next_job_id(bundle)
    }
}

/// Build install units for descriptors with a uniform action, in install
/// priority order
pub fn units_for(
    job_id: &str,
    bundle: &str,
    action: InstallAction,
    descriptors: Vec<ArtifactDescriptor>,
) -> Vec<InstallableUnit> {
    let registry = ProcessorRegistry::builtins();
    let mut units: Vec<InstallableUnit> = descriptors
        .into_iter()
        .map(|descriptor| {
            let checksum = checksum_of(&descriptor).unwrap();
            let record = ComponentRecord::new(
                job_id,
                bundle,
                descriptor.kind(),
                descriptor.code(),
                checksum,
                ComponentStatus::InstallInProgress,
            );
            InstallableUnit::for_install(
                registry.get(descriptor.kind()).unwrap(),
                descriptor,
                action,
                record,
            )
        })
        .collect();
    order_for_install(&mut units);
    units
}

/// Shorthand descriptor constructors used across engine tests
pub fn widget(code: &str) -> ArtifactDescriptor {
    ArtifactDescriptor::Widget(WidgetDescriptor {
        code: code.to_string(),
        titles: Default::default(),
        group: None,
        custom_ui: None,
    })
}

pub fn page(code: &str, placements: &[(u32, &str)]) -> ArtifactDescriptor {
    ArtifactDescriptor::Page(PageDescriptor {
        code: code.to_string(),
        titles: Default::default(),
        template: "hero".to_string(),
        parent: None,
        widgets: placements
            .iter()
            .map(|(frame, widget)| WidgetPlacement {
                frame: *frame,
                code: widget.to_string(),
            })
            .collect(),
    })
}

pub fn service(code: &str) -> ArtifactDescriptor {
    ArtifactDescriptor::Service(ServiceDescriptor {
        code: code.to_string(),
        image: format!("acme/{}@sha256:aaa", code),
        ingress_path: Some(format!("/{}", code)),
        health_path: "/health".to_string(),
        canonical_path: false,
    })
}
