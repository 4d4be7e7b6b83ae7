//! Application use cases.

pub mod assist_session;
pub mod execute_tool;
pub mod resolve_selector;

pub use assist_session::{
    AssistSession, FALLBACK_MESSAGE, SessionError, SessionPhase, ToolProposal, TurnReply,
};
pub use execute_tool::ToolExecutor;
pub use resolve_selector::SelectorResolver;
