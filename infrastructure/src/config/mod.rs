//! Configuration loading.

pub mod file_config;
pub mod loader;

pub use file_config::{AssistantConfig, FileConfig, StoreConfig};
pub use loader::ConfigLoader;
