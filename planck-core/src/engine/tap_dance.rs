//! Per-key tap counting state machine.
//!
//! One instance exists per tap dance binding. A press starts or extends the
//! count; the dance resolves when the inter-tap window elapses or when a
//! different key interrupts the burst, and the resolved action is dispatched
//! as a single synthetic tap.

use crate::types::{Action, TapDanceDef, TimeMs};

use super::input::KeyPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DanceState {
    Idle,
    Counting {
        pos: KeyPos,
        count: u8,
        deadline: TimeMs,
    },
}

#[derive(Debug)]
pub struct TapDance {
    state: DanceState,
}

impl TapDance {
    pub fn new() -> Self {
        Self { state: DanceState::Idle }
    }

    /// Registers a press on the dance key, starting or extending the count
    /// and re-arming the inter-tap deadline.
    pub fn on_press(&mut self, pos: KeyPos, now: TimeMs, term: TimeMs) {
        let count = match self.state {
            DanceState::Idle => 1,
            DanceState::Counting { count, .. } => count.saturating_add(1),
        };
        self.state = DanceState::Counting { pos, count, deadline: now + term };
    }

    /// Resolves the dance if its inter-tap window has elapsed.
    pub fn poll(&mut self, def: &TapDanceDef, now: TimeMs) -> Option<Action> {
        match self.state {
            DanceState::Counting { count, deadline, .. } if now >= deadline => {
                self.state = DanceState::Idle;
                Some(Self::action_for(def, count))
            }
            _ => None,
        }
    }

    /// Forces resolution because a different key interrupted the burst.
    pub fn interrupt(&mut self, def: &TapDanceDef) -> Option<Action> {
        match self.state {
            DanceState::Counting { count, .. } => {
                self.state = DanceState::Idle;
                Some(Self::action_for(def, count))
            }
            DanceState::Idle => None,
        }
    }

    /// The position this dance is currently counting on, if any.
    pub fn counting_at(&self) -> Option<KeyPos> {
        match self.state {
            DanceState::Counting { pos, .. } => Some(pos),
            DanceState::Idle => None,
        }
    }

    // Counts past the table fall back to the last (highest-count) entry,
    // emitted exactly once.
    fn action_for(def: &TapDanceDef, count: u8) -> Action {
        let idx = usize::from(count).min(def.actions.len());
        def.actions[idx - 1].clone()
    }
}
