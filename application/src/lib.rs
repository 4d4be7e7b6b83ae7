//! Application layer for waypost.
//!
//! Use cases orchestrate the domain (selector resolution, tool execution,
//! the assistant session loop) and depend on external collaborators only
//! through the ports defined here.

pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use ports::{
    AssetStore, AssistantGateway, GatewayError, GatewayReply, StoreError, ToolSchemaPort,
};
pub use use_cases::{
    AssistSession, FALLBACK_MESSAGE, SelectorResolver, SessionError, SessionPhase, ToolExecutor,
    ToolProposal, TurnReply,
};
