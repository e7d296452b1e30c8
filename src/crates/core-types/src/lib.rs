//! AgentChat wire-level DTOs
//!
//! Lowest layer of the workspace: the JSON shapes exchanged with the
//! agent backend over `/agent_chat`. No business logic lives here.

pub mod event;
pub mod request;
pub mod tool;

pub use event::{InterruptData, StreamEvent, TokenData, ToolCallsData, ToolOutputData};
pub use request::{
    AgentRequest, ChatRequest, DecisionType, ResumeDecision, ResumePayload, ResumeRequest,
};
pub use tool::{ToolInvocation, ToolOutputEntry};
