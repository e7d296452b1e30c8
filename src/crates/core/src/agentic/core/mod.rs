//! Core data model module
//!
//! Contains all core data structures and state definitions

pub mod message;
pub mod state;

pub use message::{Message, MessageContent, MessageKind, MessageRole, ToolCardContent};
pub use state::{PendingToolCall, ReconciliationState};
