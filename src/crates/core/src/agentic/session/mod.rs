//! Session Management Layer
//!
//! Turn lifecycle and the interrupt/resume protocol

pub mod session_controller;

pub use session_controller::{SendOptions, SessionController, TurnPhase};
