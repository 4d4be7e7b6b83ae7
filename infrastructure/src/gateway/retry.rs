//! Retrying gateway decorator.
//!
//! The retry contract lives entirely in this adapter: exactly one retry on a
//! transport failure, then [`GatewayError::Exhausted`]. Request-level failures
//! (the provider answered, unhappily) are never retried, and the layers above
//! never retry on their own.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use waypost_application::ports::llm_gateway::{AssistantGateway, GatewayError, GatewayReply};
use waypost_domain::Message;

/// Wraps another gateway with the single-retry transport policy.
pub struct RetryingGateway<G> {
    inner: G,
}

impl<G> RetryingGateway<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

#[async_trait]
impl<G: AssistantGateway> AssistantGateway for RetryingGateway<G> {
    async fn send_conversation(
        &self,
        prompt: &str,
        history: &[Message],
        tool_schemas: &[Value],
    ) -> Result<GatewayReply, GatewayError> {
        match self.inner.send_conversation(prompt, history, tool_schemas).await {
            Err(GatewayError::Transport(first)) => {
                warn!(error = %first, "transport failure; retrying once");
                match self.inner.send_conversation(prompt, history, tool_schemas).await {
                    Ok(reply) => Ok(reply),
                    Err(GatewayError::Transport(second)) => {
                        Err(GatewayError::Exhausted(second))
                    }
                    Err(other) => Err(other),
                }
            }
            other => other,
        }
    }
}
