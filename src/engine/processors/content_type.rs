//! Content type processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(ContentTypeProcessor, ContentType, register_content_type);
