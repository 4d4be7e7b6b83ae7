//! Infrastructure layer for waypost.
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, including configuration file loading.

pub mod config;
pub mod gateway;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use config::{AssistantConfig, ConfigLoader, FileConfig, StoreConfig};
pub use gateway::{RetryingGateway, ScriptedGateway};
pub use schema::JsonSchemaToolConverter;
pub use store::MemoryAssetStore;
