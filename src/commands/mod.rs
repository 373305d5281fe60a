//! Command implementations

pub mod completions;
pub mod helpers;
pub mod install;
pub mod list;
pub mod plan;
pub mod status;
pub mod uninstall;
pub mod version;
