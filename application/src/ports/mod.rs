//! Application ports — interfaces implemented by infrastructure adapters.

pub mod asset_store;
pub mod llm_gateway;
pub mod tool_schema;

pub use asset_store::{AssetStore, StoreError};
pub use llm_gateway::{AssistantGateway, GatewayError, GatewayReply};
pub use tool_schema::ToolSchemaPort;
