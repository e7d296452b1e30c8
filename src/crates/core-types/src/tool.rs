use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One tool invocation announced by the agent.
///
/// `id` is the correlation key later matched against
/// [`ToolOutputEntry::tool_call_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    /// Invocation arguments as sent by the backend (free-form JSON).
    #[serde(default)]
    pub args: Value,
}

/// One entry of a `tool_output` batch.
///
/// `content` is either literal text or a structured value; the renderer
/// serializes structured values for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutputEntry {
    pub tool_call_id: String,
    #[serde(default)]
    pub content: Value,
}
