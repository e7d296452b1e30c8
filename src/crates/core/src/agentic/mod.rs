//! Agentic Engine Layer
//!
//! Stream reconciliation: data model, event reduction and turn lifecycle

pub mod core;
pub mod events;
pub mod session;
