use thiserror::Error;

use crate::agentic::session::TurnPhase;

/// Result alias used across the engine.
pub type AgentChatResult<T> = Result<T, AgentChatError>;

#[derive(Debug, Error)]
pub enum AgentChatError {
    /// The requested controller operation is not valid in the current
    /// phase (e.g. a double-submit while a turn is already in flight).
    #[error("{operation} is not valid while the session is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: TurnPhase,
    },

    /// A turn cannot be opened on a blank query.
    #[error("query is empty")]
    EmptyQuery,
}
