//! Layer-tap resolution: tap for a keycode, hold for a momentary layer.
//!
//! At most one layer-tap key can be pending. The transitions that settle it:
//! release of the same key inside the tapping term (tap), deadline expiry
//! (hold), or any other key pressed first (hold, so the interrupting key
//! already resolves through the layer).

use crate::types::{Keycode, LayerId, TimeMs};

use super::input::KeyPos;

/// A pressed layer-tap key that has not settled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHold {
    pub pos: KeyPos,
    pub layer: LayerId,
    pub tap: Keycode,
    pub deadline: TimeMs,
}

#[derive(Debug)]
pub struct TapHold {
    pending: Option<PendingHold>,
}

impl TapHold {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending_pos(&self) -> Option<KeyPos> {
        self.pending.map(|p| p.pos)
    }

    /// Starts tracking a freshly pressed layer-tap key. Returns a previously
    /// pending key, which the caller settles as a hold.
    pub fn begin(&mut self, pending: PendingHold) -> Option<PendingHold> {
        self.pending.replace(pending)
    }

    /// Deadline check: past the tapping term the key settles as a hold.
    pub fn poll(&mut self, now: TimeMs) -> Option<PendingHold> {
        match self.pending {
            Some(p) if now >= p.deadline => self.pending.take(),
            _ => None,
        }
    }

    /// A press on another position settles the pending key as a hold.
    pub fn interrupt(&mut self, pos: KeyPos) -> Option<PendingHold> {
        match self.pending {
            Some(p) if p.pos != pos => self.pending.take(),
            _ => None,
        }
    }

    /// Release of the pending key inside the term: it was a tap.
    pub fn release(&mut self, pos: KeyPos) -> Option<PendingHold> {
        match self.pending {
            Some(p) if p.pos == pos => self.pending.take(),
            _ => None,
        }
    }
}
