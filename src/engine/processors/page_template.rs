//! Page template processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(PageTemplateProcessor, PageTemplate, register_page_template);
