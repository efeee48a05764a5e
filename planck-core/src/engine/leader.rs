//! Leader key sequence matcher.
//!
//! A singleton: only one leader gesture can be in progress. While armed it
//! owns the whole event stream; the engine routes every press here and
//! nothing reaches normal dispatch until the gesture resolves, cancels or
//! times out.

use crate::types::{Action, Keycode, LeaderEntry, TimeMs};

/// Outcome of feeding one keycode to an armed matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Some entry can still match (or just matched but a longer entry is
    /// still reachable); the buffer stays armed.
    Continuing,
    /// The collected keys match an entry and no longer entry can supersede
    /// it anymore.
    Resolved(Action),
    /// No entry can match; the buffer was discarded.
    Cancelled,
}

#[derive(Debug)]
pub struct LeaderMatcher {
    armed: bool,
    collected: Vec<Keycode>,
    deadline: TimeMs,
}

impl LeaderMatcher {
    pub fn new() -> Self {
        Self {
            armed: false,
            collected: Vec::new(),
            deadline: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn collected(&self) -> &[Keycode] {
        &self.collected
    }

    /// Arms the matcher and opens the sequence window.
    pub fn arm(&mut self, now: TimeMs, timeout: TimeMs) {
        self.armed = true;
        self.collected.clear();
        self.deadline = now + timeout;
    }

    /// Appends the next keycode and matches the collected sequence against
    /// the dictionary. Longest match wins: an exact match resolves
    /// immediately only when no longer entry could still complete;
    /// otherwise it stays pending until the window closes.
    pub fn on_key(&mut self, entries: &[LeaderEntry], code: Keycode) -> MatchResult {
        self.collected.push(code);
        let mut exact = None;
        let mut extendable = false;
        for entry in entries {
            if entry.sequence == self.collected {
                exact = Some(entry.action.clone());
            } else if entry.sequence.len() > self.collected.len()
                && entry.sequence.starts_with(&self.collected)
            {
                extendable = true;
            }
        }
        match (exact, extendable) {
            (Some(action), false) => {
                self.reset();
                MatchResult::Resolved(action)
            }
            (Some(_), true) | (None, true) => MatchResult::Continuing,
            (None, false) => {
                self.reset();
                MatchResult::Cancelled
            }
        }
    }

    /// Cancels an in-progress gesture (unmatchable input).
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Window expiry check. Resolves a pending exact match; anything else
    /// cancels silently.
    pub fn poll(&mut self, entries: &[LeaderEntry], now: TimeMs) -> Option<MatchResult> {
        if !self.armed || now < self.deadline {
            return None;
        }
        let exact = entries
            .iter()
            .find(|entry| entry.sequence == self.collected)
            .map(|entry| entry.action.clone());
        self.reset();
        Some(match exact {
            Some(action) => MatchResult::Resolved(action),
            None => MatchResult::Cancelled,
        })
    }

    fn reset(&mut self) {
        self.armed = false;
        self.collected.clear();
    }
}
