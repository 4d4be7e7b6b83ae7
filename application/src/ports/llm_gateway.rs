//! Assistant gateway port.
//!
//! Defines how the application layer talks to the language model. The adapter
//! owns prompt construction and transport, and its contract includes exactly
//! one retry on transport failure before surfacing [`GatewayError::Exhausted`];
//! the orchestrator itself never retries.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use waypost_domain::{Message, ToolCall};

/// Errors that can occur during gateway operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("transport failed after retry: {0}")]
    Exhausted(String),
}

/// Parsed model reply: zero or more text lines plus zero or more tool calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayReply {
    pub text_messages: Vec<String>,
    pub tool_calls: Vec<ToolCall>,
}

impl GatewayReply {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text_messages: vec![text.into()],
            tool_calls: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_messages.push(text.into());
        self
    }

    pub fn with_tool_call(mut self, call: ToolCall) -> Self {
        self.tool_calls.push(call);
        self
    }
}

/// Gateway for assistant conversations.
///
/// The full tool catalogue schema is passed on every call so the model's
/// replies stay schema-consistent across turns.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    async fn send_conversation(
        &self,
        prompt: &str,
        history: &[Message],
        tool_schemas: &[Value],
    ) -> Result<GatewayReply, GatewayError>;
}
