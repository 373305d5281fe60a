//! Resource directory processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(DirectoryProcessor, Directory, register_directory);
