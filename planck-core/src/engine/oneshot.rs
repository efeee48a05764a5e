//! One-shot modifier state.

use crate::types::{LayoutOptions, Modifiers, TimeMs};

/// Modifiers armed for exactly the next emitted non-modifier key. Expires on
/// timeout or after too many presses that don't consume it.
#[derive(Debug)]
pub struct OneShotMods {
    armed: Option<Modifiers>,
    deadline: TimeMs,
    intervening: u8,
}

impl OneShotMods {
    pub fn new() -> Self {
        Self {
            armed: None,
            deadline: 0,
            intervening: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Arms the modifier set. Arming again while armed merges the sets, so
    /// chained one-shots (shift then ctrl) wrap a single key together.
    pub fn arm(&mut self, mods: Modifiers, now: TimeMs, opts: &LayoutOptions) {
        let merged = self.armed.map_or(mods, |armed| armed.union(mods));
        self.armed = Some(merged);
        self.deadline = now + opts.oneshot_timeout_ms;
        self.intervening = 0;
        log::debug!("one-shot modifiers armed: {merged:?}");
    }

    /// Takes the armed modifiers for consumption by an emitted key.
    pub fn take(&mut self) -> Option<Modifiers> {
        self.armed.take()
    }

    /// Notes a press that did not consume the modifiers. Past the configured
    /// bound the armed state is dropped.
    pub fn note_intervening(&mut self, opts: &LayoutOptions) {
        if self.armed.is_none() {
            return;
        }
        self.intervening = self.intervening.saturating_add(1);
        if self.intervening > opts.oneshot_tap_limit {
            log::debug!("one-shot modifiers expired after {} intervening taps", self.intervening);
            self.armed = None;
        }
    }

    /// Timeout check.
    pub fn poll(&mut self, now: TimeMs) {
        if self.armed.is_some() && now >= self.deadline {
            log::debug!("one-shot modifiers timed out");
            self.armed = None;
        }
    }
}
