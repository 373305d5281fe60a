//! Page processor
//!
//! Pages are the one composite artifact: the page itself is registered
//! bare, then each widget placement is wired into its frame with a
//! separate call. A failure partway through wiring fails the whole unit;
//! rollback removes the page, widgets included.

use crate::domain::{ArtifactDescriptor, ComponentKind};
use crate::engine::processors::{ComponentProcessor, PlatformContext, kind_mismatch};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct PageProcessor;

impl ComponentProcessor for PageProcessor {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Page
    }

    fn install(&self, descriptor: &ArtifactDescriptor, ctx: &PlatformContext<'_>) -> Result<()> {
        let ArtifactDescriptor::Page(page) = descriptor else {
            return Err(kind_mismatch(self.kind(), descriptor));
        };

        ctx.engine.register_page(page)?;
        for placement in &page.widgets {
            ctx.engine.set_page_widget(&page.code, placement)?;
        }
        Ok(())
    }
}
