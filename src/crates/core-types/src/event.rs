use serde::Deserialize;
use serde_json::Value;

use crate::tool::{ToolInvocation, ToolOutputEntry};

/// Envelope of one decoded SSE frame from the agent backend.
///
/// `data` stays raw here: the reducer decodes it per event kind, so a
/// frame with an unknown kind or an incomplete payload degrades to a
/// no-op instead of an error.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamEvent {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl StreamEvent {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

/// `event: "token"` payload: one text fragment for the message `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub id: String,
    pub token: String,
}

/// `event: "tool_calls"` payload: invocations announced under one
/// message id, output still outstanding.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallsData {
    pub id: String,
    pub tool_calls: Vec<ToolInvocation>,
}

/// `event: "tool_output"` payload: a batch of resolved outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolOutputData {
    pub tool_output: Vec<ToolOutputEntry>,
}

/// `event: "__interrupt__"` payload. The backend sends either a plain
/// string or a structured object describing the pending decision.
#[derive(Debug, Clone, Deserialize)]
pub struct InterruptData {
    #[serde(rename = "__interrupt__")]
    pub interrupt: Value,
}
