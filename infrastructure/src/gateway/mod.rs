//! Gateway adapters.

pub mod retry;
pub mod scripted;

pub use retry::RetryingGateway;
pub use scripted::ScriptedGateway;
