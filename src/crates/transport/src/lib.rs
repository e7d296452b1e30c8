/// AgentChat Transport Layer
///
/// Owns the wire so the engine never sees bytes: POSTs chat/resume
/// requests and delivers complete, individually-parsed event objects in
/// arrival order, one per SSE frame.
pub mod client;
pub mod sse;

pub use client::AgentClient;
pub use sse::handle_agent_stream;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
