//! Content template processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(
    ContentTemplateProcessor,
    ContentTemplate,
    register_content_template
);
