use serde_json::Value;

use crate::agentic::core::Message;

/// One mutation the engine asks the rendering collaborator to apply.
///
/// Intents address the render tree by message id only; the engine never
/// inspects it. They are emitted in order and must be applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderIntent {
    /// Insert a new message at the end of the transcript.
    CreateMessage { message: Message },
    /// Append a token run to the text message with this id.
    AppendText { message_id: String, token: String },
    /// Replace the message with this id wholesale.
    ReplaceMessage { message_id: String, message: Message },
    /// Remove the message with this id from the transcript.
    RemoveMessage { message_id: String },
    /// Stop sending, surface the payload, await a human decision.
    Pause { payload: Value },
    /// The turn is over; input can be re-enabled.
    ResumeReady,
}

/// Rendering collaborator seam.
///
/// Implementations must apply intents synchronously, in delivery order;
/// the controller does not move to the next event until every intent of
/// the current one has been applied.
pub trait RenderSink {
    fn apply(&mut self, intent: RenderIntent);
}

/// Collecting sink, used by tests and by callers that batch intents.
impl RenderSink for Vec<RenderIntent> {
    fn apply(&mut self, intent: RenderIntent) {
        self.push(intent);
    }
}
