use agentchat_core_types::{InterruptData, StreamEvent, TokenData, ToolCallsData, ToolOutputData};
use indexmap::map::Entry;
use log::{debug, warn};

use crate::agentic::core::{Message, PendingToolCall, ReconciliationState, ToolCardContent};

use super::types::RenderIntent;

/// Apply one decoded stream event to the turn's correlation state.
///
/// Pure state transition: no I/O, no suspension. Returns the render
/// intents the event produced, in emission order. An event whose payload
/// is missing required fields decodes to nothing and leaves the state
/// untouched; the transport is not schema-validated upstream, so this
/// is a no-op, not an error.
pub fn reduce(event: &StreamEvent, state: &mut ReconciliationState) -> Vec<RenderIntent> {
    let mut intents = Vec::new();

    match event.event.as_str() {
        "token" => {
            let data: TokenData = match serde_json::from_value(event.data.clone()) {
                Ok(data) => data,
                Err(e) => {
                    debug!("Ignoring malformed token event: {}", e);
                    return intents;
                }
            };
            on_token(data, state, &mut intents);
        }
        "tool_calls" => {
            let data: ToolCallsData = match serde_json::from_value(event.data.clone()) {
                Ok(data) => data,
                Err(e) => {
                    debug!("Ignoring malformed tool_calls event: {}", e);
                    return intents;
                }
            };
            on_tool_calls(data, state, &mut intents);
        }
        "tool_output" => {
            let data: ToolOutputData = match serde_json::from_value(event.data.clone()) {
                Ok(data) => data,
                Err(e) => {
                    debug!("Ignoring malformed tool_output event: {}", e);
                    return intents;
                }
            };
            on_tool_output(data, state, &mut intents);
        }
        "__interrupt__" => {
            let data: InterruptData = match serde_json::from_value(event.data.clone()) {
                Ok(data) => data,
                Err(e) => {
                    debug!("Ignoring malformed __interrupt__ event: {}", e);
                    return intents;
                }
            };
            on_interrupt(data, state, &mut intents);
        }
        other => {
            debug!("Ignoring unknown stream event kind: {}", other);
        }
    }

    intents
}

/// One text fragment. Appends to the live message under this id, or
/// opens a new agent text message seeded with the fragment.
fn on_token(data: TokenData, state: &mut ReconciliationState, intents: &mut Vec<RenderIntent>) {
    let TokenData { id, token } = data;

    match state.live_messages.entry(id) {
        Entry::Occupied(mut entry) => {
            if entry.get_mut().append_text(&token) {
                intents.push(RenderIntent::AppendText {
                    message_id: entry.key().clone(),
                    token,
                });
            } else {
                // A tool card lives under this id; prose cannot merge
                // into it.
                debug!("Dropping token addressed at tool message: id={}", entry.key());
            }
        }
        Entry::Vacant(entry) => {
            let message = Message::agent_text(entry.key().clone(), token);
            intents.push(RenderIntent::CreateMessage {
                message: message.clone(),
            });
            entry.insert(message);
        }
    }
}

/// Tool invocations announced. Display is deferred until matching output
/// arrives, so no message is created here, only the correlation record.
/// A token message streaming under the same id is superseded and removed.
fn on_tool_calls(
    data: ToolCallsData,
    state: &mut ReconciliationState,
    intents: &mut Vec<RenderIntent>,
) {
    let ToolCallsData { id, tool_calls } = data;

    if tool_calls.is_empty() {
        debug!("Ignoring tool_calls event with no invocations: id={}", id);
        return;
    }

    if state.live_messages.shift_remove(&id).is_some() {
        intents.push(RenderIntent::RemoveMessage {
            message_id: id.clone(),
        });
    }

    state.pending_tool_calls.insert(
        id.clone(),
        PendingToolCall {
            message_id: id,
            tool_calls,
        },
    );
}

/// A batch of resolved outputs. The earliest-registered pending entry
/// containing an invocation id found anywhere in the batch wins, and at
/// most one pending entry is resolved per event; output matching nothing
/// is rendered without identity.
fn on_tool_output(
    data: ToolOutputData,
    state: &mut ReconciliationState,
    intents: &mut Vec<RenderIntent>,
) {
    let ToolOutputData { tool_output } = data;

    if tool_output.is_empty() {
        debug!("Ignoring tool_output event with no entries");
        return;
    }

    let matched = state.pending_tool_calls.iter().find_map(|(message_id, pending)| {
        pending
            .tool_calls
            .iter()
            .find(|call| tool_output.iter().any(|out| out.tool_call_id == call.id))
            .map(|call| (message_id.clone(), call.clone()))
    });

    match matched {
        Some((message_id, invocation)) => {
            state.pending_tool_calls.shift_remove(&message_id);

            let message = Message::tool(
                Some(message_id.clone()),
                ToolCardContent {
                    tool_call: Some(invocation),
                    tool_output,
                },
            );

            // A token run may have reclaimed this id after the announce;
            // the live message is replaced, never duplicated.
            let replaced = state
                .live_messages
                .insert(message_id.clone(), message.clone())
                .is_some();
            if replaced {
                intents.push(RenderIntent::ReplaceMessage {
                    message_id,
                    message,
                });
            } else {
                intents.push(RenderIntent::CreateMessage { message });
            }
        }
        None => {
            warn!("Tool output matched no pending call; rendering without identity");
            let message = Message::tool(
                None,
                ToolCardContent {
                    tool_call: None,
                    tool_output,
                },
            );
            intents.push(RenderIntent::CreateMessage { message });
        }
    }
}

/// Human-in-the-loop pause point. The payload is surfaced for a decision
/// and the backend closes the stream after sending this.
fn on_interrupt(
    data: InterruptData,
    state: &mut ReconciliationState,
    intents: &mut Vec<RenderIntent>,
) {
    state.interrupt = Some(data.interrupt.clone());
    intents.push(RenderIntent::Pause {
        payload: data.interrupt,
    });
}
