//! Assistant conversation orchestrator.
//!
//! Drives the per-session request/response loop with the language model:
//! sends the user's utterance plus transcript history and the full tool
//! catalogue schema, interprets the reply as plain text or a tool proposal,
//! and accumulates partial create information into the session draft across
//! turns. Tool proposals are never executed without explicit confirmation.
//!
//! Turns are strictly serialized by exclusive ownership (`&mut self`); the
//! phase doubles as a busy signal for callers that render state.

use crate::ports::llm_gateway::{AssistantGateway, GatewayReply};
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::execute_tool::ToolExecutor;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use waypost_domain::{
    DraftIntent, ExecutionOutcome, FieldMap, Message, RoadDraft, ToolCall,
    tool::catalog::CREATE_ROAD,
};

/// Fixed text surfaced when the gateway fails after its single retry.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't reach the assistant right now. Please try again.";

const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant for a road and vehicle \
asset inventory. Use the provided tools to create, update, delete and find \
records. Ask for missing required fields instead of guessing.";

const DEFAULT_MAX_HISTORY_TURNS: usize = 20;

/// Where the session currently is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Ready for the next utterance.
    Idle,
    /// A request to the model is in flight.
    Sending,
    /// A tool proposal is awaiting user confirmation.
    ToolProposed,
    /// A confirmed proposal is being executed.
    Applying,
}

/// Errors the orchestrator reports to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("no proposal is awaiting confirmation")]
    NoProposal,
}

/// A resolved tool call surfaced for explicit confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolProposal {
    pub call: ToolCall,
    /// Human-readable one-liner, e.g. `update_road_by — Main Street`.
    pub summary: String,
}

/// What one submitted turn produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReply {
    pub messages: Vec<String>,
    pub proposal: Option<ToolProposal>,
}

/// One assistant session. Owns its draft, transcript, and pending proposal
/// exclusively; the orchestrator serializes turns so no two can interleave.
pub struct AssistSession {
    gateway: Arc<dyn AssistantGateway>,
    executor: Arc<ToolExecutor>,
    tool_schemas: Vec<Value>,
    system_prompt: String,
    max_history_turns: usize,
    history: Vec<Message>,
    messages: Vec<String>,
    draft: RoadDraft,
    proposal: Option<ToolProposal>,
    phase: SessionPhase,
}

impl AssistSession {
    pub fn new(
        gateway: Arc<dyn AssistantGateway>,
        executor: Arc<ToolExecutor>,
        schema: &dyn ToolSchemaPort,
    ) -> Self {
        let tool_schemas = schema.catalogue_schema(executor.catalogue());
        let system_prompt = DEFAULT_SYSTEM_PROMPT.to_string();
        Self {
            gateway,
            executor,
            tool_schemas,
            history: vec![Message::system(system_prompt.clone())],
            system_prompt,
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
            messages: Vec::new(),
            draft: RoadDraft::new(),
            proposal: None,
            phase: SessionPhase::Idle,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self.history = vec![Message::system(self.system_prompt.clone())];
        self
    }

    /// Cap on user/assistant exchanges retained in the transcript sent to
    /// the gateway. The system prompt never counts against it.
    pub fn with_max_history_turns(mut self, turns: usize) -> Self {
        self.max_history_turns = turns;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Busy signal: true while a send or an apply is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SessionPhase::Sending | SessionPhase::Applying)
    }

    pub fn draft(&self) -> &RoadDraft {
        &self.draft
    }

    pub fn proposal(&self) -> Option<&ToolProposal> {
        self.proposal.as_ref()
    }

    /// All assistant-visible lines surfaced so far this session.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Merge the user's own form edits into the draft (same channel as
    /// model-provided fields; strict arrival order).
    pub fn merge_draft_fields(&mut self, fields: &FieldMap) {
        self.draft.merge_fields(fields);
    }

    /// Send one utterance to the model and interpret the reply.
    pub async fn submit(&mut self, utterance: &str) -> Result<TurnReply, SessionError> {
        let prompt = utterance.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        // A new utterance supersedes any unconfirmed proposal.
        if self.proposal.take().is_some() {
            debug!("pending proposal superseded by new utterance");
        }

        self.phase = SessionPhase::Sending;
        self.history.push(Message::user(prompt));
        self.trim_history();

        let reply = self
            .gateway
            .send_conversation(prompt, &self.history, &self.tool_schemas)
            .await;

        match reply {
            Ok(reply) => Ok(self.apply_reply(reply)),
            Err(e) => {
                // Fails closed: the gateway already did its one retry.
                warn!(error = %e, "gateway failed; surfacing fallback");
                self.surface(FALLBACK_MESSAGE.to_string());
                self.phase = SessionPhase::Idle;
                Ok(TurnReply {
                    messages: vec![FALLBACK_MESSAGE.to_string()],
                    proposal: None,
                })
            }
        }
    }

    fn apply_reply(&mut self, reply: GatewayReply) -> TurnReply {
        let mut out = TurnReply::default();

        for text in reply.text_messages {
            self.surface(text.clone());
            out.messages.push(text);
        }

        let mut calls = reply.tool_calls.into_iter();
        if let Some(first) = calls.next() {
            let discarded = calls.count();
            if discarded > 0 {
                // Observed first-call-wins policy; extras are dropped.
                warn!(discarded, "model proposed multiple tool calls; keeping the first");
            }
            self.consider_call(first, &mut out);
        }

        if out.proposal.is_none() {
            self.phase = SessionPhase::Idle;
        }
        out
    }

    /// Turn one model tool call into either a confirmable proposal or, for
    /// an incomplete create, another increment of the session draft.
    fn consider_call(&mut self, call: ToolCall, out: &mut TurnReply) {
        if call.name == CREATE_ROAD {
            // Every create call feeds the draft first, so fields gathered on
            // earlier turns survive and complete this one.
            self.draft.merge_fields(&call.arguments);
            self.draft.set_intent(DraftIntent::Create);

            let validation = self.draft.validate_for_create();
            let Some(args) = self.draft.build_create_args() else {
                let mut lines: Vec<String> = vec!["I still need a few details:".into()];
                lines.extend(
                    validation
                        .errors
                        .values()
                        .map(|msg| format!("  - {msg}")),
                );
                let text = lines.join("\n");
                self.surface(text.clone());
                out.messages.push(text);
                return;
            };

            // Propose the full accumulated draft, not just this turn's args.
            let complete = ToolCall {
                name: CREATE_ROAD.into(),
                arguments: args.into_fields(),
            };
            self.propose(complete, out);
            return;
        }

        self.propose(call, out);
    }

    fn propose(&mut self, call: ToolCall, out: &mut TurnReply) {
        let summary = proposal_summary(&call);
        info!(tool = %call.name, %summary, "tool proposed");
        let proposal = ToolProposal { call, summary };
        self.proposal = Some(proposal.clone());
        self.phase = SessionPhase::ToolProposed;
        out.proposal = Some(proposal);
    }

    /// Execute the pending proposal. The proposal is cleared whether or not
    /// execution succeeds; there is no automatic retry at this layer.
    pub async fn confirm(&mut self) -> Result<ExecutionOutcome, SessionError> {
        let proposal = self.proposal.take().ok_or(SessionError::NoProposal)?;
        self.phase = SessionPhase::Applying;

        let outcome = self.executor.execute(&proposal.call).await;
        self.surface(outcome.message.clone());
        if outcome.success && proposal.call.name == CREATE_ROAD {
            // The draft served its purpose once the create lands.
            self.draft.clear();
        }
        self.phase = SessionPhase::Idle;
        Ok(outcome)
    }

    /// Drop the pending proposal without executing it.
    pub fn dismiss(&mut self) {
        if self.proposal.take().is_some() {
            debug!("proposal dismissed");
        }
        if self.phase == SessionPhase::ToolProposed {
            self.phase = SessionPhase::Idle;
        }
    }

    /// Unconditional reset: clears draft, proposal, messages and transcript.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.proposal = None;
        self.messages.clear();
        self.history = vec![Message::system(self.system_prompt.clone())];
        self.phase = SessionPhase::Idle;
    }

    fn surface(&mut self, text: String) {
        self.history.push(Message::assistant(text.clone()));
        self.messages.push(text);
    }

    /// Keep the transcript bounded: the system prompt plus at most
    /// `max_history_turns` user/assistant exchanges, oldest dropped first.
    fn trim_history(&mut self) {
        let keep = self.max_history_turns.saturating_mul(2);
        let excess = self.history.len().saturating_sub(keep + 1);
        if excess > 0 {
            self.history.drain(1..1 + excess);
        }
    }
}

/// Short human-readable label for a proposal: tool name plus the most
/// descriptive argument available.
fn proposal_summary(call: &ToolCall) -> String {
    for key in ["name", "value", "id"] {
        if let Some(Value::String(s)) = call.arguments.get(key) {
            if !s.is_empty() {
                return format!("{} — {}", call.name, truncate_chars(s, 50));
            }
        }
    }
    call.name.clone()
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
