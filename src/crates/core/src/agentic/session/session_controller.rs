use agentchat_core_types::{
    AgentRequest, ChatRequest, DecisionType, ResumeDecision, ResumePayload, ResumeRequest,
    StreamEvent,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::agentic::core::{Message, ReconciliationState};
use crate::agentic::events::{reduce, RenderIntent, RenderSink};
use crate::util::errors::{AgentChatError, AgentChatResult};

/// Where the controller is in the turn lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    Sending,
    Receiving,
    Paused,
}

/// Per-turn send options.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub internet_search: bool,
}

/// Owns the reconciliation state for the active turn and sequences the
/// send / receive / interrupt / resume protocol.
///
/// One controller handles exactly one in-flight stream at a time. The
/// request returned by [`start_turn`](Self::start_turn) /
/// [`submit_decision`](Self::submit_decision) goes to the request-sender
/// collaborator; the decoded events of the response stream come back
/// through [`on_event`](Self::on_event). Render intents flow out through
/// the [`RenderSink`] passed into each call.
///
/// The long-lived session id is owned by the caller and only threaded
/// through into outbound requests.
pub struct SessionController {
    phase: TurnPhase,
    state: ReconciliationState,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::Idle,
            state: ReconciliationState::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Correlation state of the turn in flight, for inspection only.
    pub fn state(&self) -> &ReconciliationState {
        &self.state
    }

    /// Open a new turn on a user query.
    ///
    /// Valid from `Idle`, or from `Paused` when the pending interrupt is
    /// being abandoned for a fresh query. A second invocation while a
    /// turn is in flight (double-submit race) is rejected, not queued.
    pub fn start_turn(
        &mut self,
        query: &str,
        session_id: &str,
        options: &SendOptions,
        sink: &mut dyn RenderSink,
    ) -> AgentChatResult<AgentRequest> {
        if !matches!(self.phase, TurnPhase::Idle | TurnPhase::Paused) {
            return Err(AgentChatError::InvalidPhase {
                operation: "start_turn",
                phase: self.phase,
            });
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(AgentChatError::EmptyQuery);
        }
        if self.phase == TurnPhase::Paused {
            debug!("Abandoning pending interrupt for a fresh turn");
        }

        // Correlation state never crosses turns, id reuse included.
        self.state = ReconciliationState::new();

        sink.apply(RenderIntent::CreateMessage {
            message: Message::user_text(query),
        });
        self.phase = TurnPhase::Sending;

        Ok(AgentRequest::Query(ChatRequest {
            query: query.to_string(),
            session_id: session_id.to_string(),
            internet_search: options.internet_search,
        }))
    }

    /// Answer the pending interrupt. Valid only while `Paused`.
    ///
    /// Clears the interrupt and produces the resume-shaped request that
    /// continues the same turn; live messages and pending tool calls
    /// carry across the pause.
    pub fn submit_decision(
        &mut self,
        decision: DecisionType,
        session_id: &str,
    ) -> AgentChatResult<AgentRequest> {
        if self.phase != TurnPhase::Paused {
            return Err(AgentChatError::InvalidPhase {
                operation: "submit_decision",
                phase: self.phase,
            });
        }

        self.state.interrupt = None;
        self.phase = TurnPhase::Sending;

        Ok(AgentRequest::Resume(ResumeRequest {
            resume: ResumePayload {
                decisions: vec![ResumeDecision { decision }],
            },
            session_id: session_id.to_string(),
        }))
    }

    /// First byte of the response stream arrived.
    pub fn on_stream_start(&mut self) {
        if self.phase == TurnPhase::Sending {
            self.phase = TurnPhase::Receiving;
        }
    }

    /// Feed one decoded event through the reducer and forward its
    /// intents, in order, to the rendering collaborator.
    ///
    /// Events arriving outside an active turn are dropped.
    pub fn on_event(&mut self, event: &StreamEvent, sink: &mut dyn RenderSink) {
        match self.phase {
            // Tolerate a transport that never signalled the first byte.
            TurnPhase::Sending => self.phase = TurnPhase::Receiving,
            TurnPhase::Receiving => {}
            phase => {
                warn!(
                    "Dropping stream event outside an active turn: kind={}, phase={:?}",
                    event.event, phase
                );
                return;
            }
        }

        for intent in reduce(event, &mut self.state) {
            sink.apply(intent);
        }

        if self.state.interrupt.is_some() {
            self.phase = TurnPhase::Paused;
        }
    }

    /// The response stream closed.
    ///
    /// A stream ended by an interrupt leaves the controller `Paused`:
    /// the receive loop is over but the turn still awaits a decision.
    pub fn on_stream_end(&mut self, sink: &mut dyn RenderSink) {
        match self.phase {
            TurnPhase::Paused => {}
            TurnPhase::Sending | TurnPhase::Receiving => self.finish_turn(sink),
            TurnPhase::Idle => debug!("Stream end with no turn in flight"),
        }
    }

    /// The transport failed. Surfaces a visible error message and
    /// abandons the turn.
    pub fn on_stream_error(&mut self, detail: &str, sink: &mut dyn RenderSink) {
        if self.phase == TurnPhase::Idle {
            debug!("Stream error with no turn in flight: {}", detail);
            return;
        }
        sink.apply(RenderIntent::CreateMessage {
            message: Message::agent_error(detail),
        });
        self.finish_turn(sink);
    }

    fn finish_turn(&mut self, sink: &mut dyn RenderSink) {
        // Discard, not clear: the next turn starts from a fresh state
        // value.
        let state = std::mem::take(&mut self.state);
        if state.pending_tool_call_count() > 0 {
            warn!(
                "Turn ended with {} unresolved pending tool call group(s); discarding",
                state.pending_tool_call_count()
            );
        }
        self.phase = TurnPhase::Idle;
        sink.apply(RenderIntent::ResumeReady);
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
