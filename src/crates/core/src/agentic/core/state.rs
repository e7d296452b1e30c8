use agentchat_core_types::ToolInvocation;
use indexmap::IndexMap;
use serde_json::Value;

use super::message::Message;

/// Tool invocations announced under one message id, output still
/// outstanding. Destroyed when an output batch resolves it, or discarded
/// with the turn.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToolCall {
    pub message_id: String,
    pub tool_calls: Vec<ToolInvocation>,
}

/// Correlation state for the turn in flight.
///
/// Created empty at turn start, mutated only through the reducer, and
/// dropped wholesale at turn end; a new turn never inherits correlation
/// state, even if the transport reuses an id value.
///
/// Both maps are insertion-ordered: the `tool_output` matching rule
/// ("earliest-registered pending entry wins") is a property of the
/// container, not extra bookkeeping.
#[derive(Debug, Default)]
pub struct ReconciliationState {
    /// Live transcript units addressable by id. At most one entry per id.
    pub(crate) live_messages: IndexMap<String, Message>,
    /// Announced tool calls not yet matched to output, in arrival order.
    pub(crate) pending_tool_calls: IndexMap<String, PendingToolCall>,
    /// Interrupt payload surfaced by the backend, if the turn is paused.
    pub(crate) interrupt: Option<Value>,
}

impl ReconciliationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_message(&self, message_id: &str) -> Option<&Message> {
        self.live_messages.get(message_id)
    }

    pub fn live_message_count(&self) -> usize {
        self.live_messages.len()
    }

    pub fn pending_tool_call(&self, message_id: &str) -> Option<&PendingToolCall> {
        self.pending_tool_calls.get(message_id)
    }

    pub fn pending_tool_call_count(&self) -> usize {
        self.pending_tool_calls.len()
    }

    pub fn interrupt(&self) -> Option<&Value> {
        self.interrupt.as_ref()
    }
}
