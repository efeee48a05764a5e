//! Planck engine - runtime key event processing
//!
//! This module turns raw matrix press/release events into emitted keycodes,
//! layer changes and mode switches: layered keymap resolution, per-key tap
//! counting, leader sequences and one-shot state, all driven by a
//! single-threaded tick loop.

mod dispatch;
mod engine;
mod host;
mod input;
mod layers;
mod leader;
mod oneshot;
mod tap_dance;
mod tap_hold;

pub use engine::PlanckEngine;
pub use host::{Feedback, KeyDirection, Persistence};
pub use input::{KeyEvent, KeyPos};
pub use layers::LayerStack;
pub use leader::{LeaderMatcher, MatchResult};

// Re-export error types
pub use crate::error::{Error, Result};
