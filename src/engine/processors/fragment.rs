//! GUI fragment processor

use crate::engine::processors::impl_engine_processor;

impl_engine_processor!(FragmentProcessor, Fragment, register_fragment);
