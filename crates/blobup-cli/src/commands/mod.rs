//! Command implementations for blobup

pub mod show_config;
pub mod upload;

pub use show_config::show_config;
pub use upload::{exit_status, upload};
