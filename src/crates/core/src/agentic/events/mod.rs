//! Event Layer
//!
//! Reduces decoded stream events into render intents

pub mod reducer;
pub mod types;

pub use reducer::reduce;
pub use types::{RenderIntent, RenderSink};
