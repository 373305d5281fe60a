//! Static asset processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(AssetProcessor, Asset, register_asset);
