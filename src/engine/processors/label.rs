//! Localized label processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(LabelProcessor, Label, register_label);
