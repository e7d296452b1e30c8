// AgentChat Core Library - Platform-agnostic stream reconciliation engine
// Two-layer architecture: Util -> Agentic

pub mod agentic; // Agentic engine layer - data model, event reduction, turn lifecycle
pub mod util; // Utility layer - errors

// Export main types
pub use util::errors::*;

// Export Agentic engine core types
pub use agentic::{
    core::{Message, MessageContent, MessageKind, MessageRole, ReconciliationState},
    events::{reduce, RenderIntent, RenderSink},
    session::{SendOptions, SessionController, TurnPhase},
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CORE_NAME: &str = "AgentChat Core";
