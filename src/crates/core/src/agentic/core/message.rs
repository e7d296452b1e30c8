use agentchat_core_types::{ToolInvocation, ToolOutputEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Agent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Tool,
}

/// Combined tool call + output carried by a tool message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCardContent {
    /// The invocation matched to this output. Absent for orphan output
    /// with no discoverable matching invocation.
    #[serde(default)]
    pub tool_call: Option<ToolInvocation>,
    pub tool_output: Vec<ToolOutputEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Tool(ToolCardContent),
}

/// A renderable transcript unit with stable identity.
///
/// At most one live message exists per non-empty id at any time; a later
/// event carrying the same id mutates or replaces it, never duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Correlation id. Absent for content no later event can address
    /// (user messages, transport errors, orphan tool output).
    pub message_id: Option<String>,
    pub role: MessageRole,
    pub content: MessageContent,
}

impl Message {
    /// The user's side of a turn. Never correlated, so no id.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            message_id: None,
            role: MessageRole::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// An agent text message seeded by the first token of a run.
    pub fn agent_text(message_id: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            role: MessageRole::Agent,
            content: MessageContent::Text(seed.into()),
        }
    }

    /// A visible agent-role error bubble (transport failures).
    pub fn agent_error(detail: &str) -> Self {
        Self {
            message_id: None,
            role: MessageRole::Agent,
            content: MessageContent::Text(format!("Request failed: {detail}")),
        }
    }

    /// A resolved tool card. `message_id` is absent for orphan output.
    pub fn tool(message_id: Option<String>, card: ToolCardContent) -> Self {
        Self {
            message_id,
            role: MessageRole::Agent,
            content: MessageContent::Tool(card),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self.content {
            MessageContent::Text(_) => MessageKind::Text,
            MessageContent::Tool(_) => MessageKind::Tool,
        }
    }

    /// Append a token run to text content. Returns false (and changes
    /// nothing) when the message is a tool card.
    pub fn append_text(&mut self, token: &str) -> bool {
        match &mut self.content {
            MessageContent::Text(text) => {
                text.push_str(token);
                true
            }
            MessageContent::Tool(_) => false,
        }
    }

    /// The text body, if this is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            MessageContent::Tool(_) => None,
        }
    }

    /// The tool card, if this is a tool message.
    pub fn tool_card(&self) -> Option<&ToolCardContent> {
        match &self.content {
            MessageContent::Text(_) => None,
            MessageContent::Tool(card) => Some(card),
        }
    }
}
