//! Scripted gateway adapter.
//!
//! Replays a fixed queue of replies and errors instead of talking to a real
//! model provider. Backs the CLI demo and integration tests; a live provider
//! adapter would implement the same port.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use waypost_application::ports::llm_gateway::{AssistantGateway, GatewayError, GatewayReply};
use waypost_domain::Message;

/// Gateway that pops one scripted step per conversation turn.
#[derive(Default)]
pub struct ScriptedGateway {
    steps: Mutex<VecDeque<Result<GatewayReply, GatewayError>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    // The queue holds no invariant a panicked holder could break, so a
    // poisoned lock is still replayable.
    fn steps(&self) -> MutexGuard<'_, VecDeque<Result<GatewayReply, GatewayError>>> {
        self.steps.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_reply(&self, reply: GatewayReply) {
        self.steps().push_back(Ok(reply));
    }

    pub fn push_error(&self, error: GatewayError) {
        self.steps().push_back(Err(error));
    }

    pub fn remaining(&self) -> usize {
        self.steps().len()
    }
}

#[async_trait]
impl AssistantGateway for ScriptedGateway {
    async fn send_conversation(
        &self,
        prompt: &str,
        _history: &[Message],
        _tool_schemas: &[Value],
    ) -> Result<GatewayReply, GatewayError> {
        debug!(%prompt, "scripted gateway turn");
        self.steps()
            .pop_front()
            .unwrap_or_else(|| {
                Err(GatewayError::RequestFailed(
                    "no scripted reply remaining".into(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_fails() {
        let gateway = ScriptedGateway::new();
        gateway.push_reply(GatewayReply::from_text("first"));
        gateway.push_error(GatewayError::Transport("mid-script outage".into()));

        let reply = gateway.send_conversation("a", &[], &[]).await.unwrap();
        assert_eq!(reply.text_messages, vec!["first"]);

        let err = gateway.send_conversation("b", &[], &[]).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));

        let err = gateway.send_conversation("c", &[], &[]).await.unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(_)));
    }
}
