//! Engine orchestration: event intake, timer polling and component wiring.

use crate::error::{Error, Result};
use crate::types::{Action, LayerId, Layout, TimeMs};

use super::dispatch::{Dispatcher, Stroke};
use super::host::{Feedback, Persistence};
use super::input::{KeyEvent, KeyPos};
use super::layers::LayerStack;
use super::leader::{LeaderMatcher, MatchResult};
use super::oneshot::OneShotMods;
use super::tap_dance::TapDance;
use super::tap_hold::{PendingHold, TapHold};

/// A pressed key awaiting its release, with the action it resolved to at
/// press time. Releases are interpreted against this record, not against a
/// fresh resolution: layer state may have changed while the key was down.
#[derive(Debug, Clone)]
struct HeldKey {
    pos: KeyPos,
    action: Action,
    swallow_up: bool,
}

/// The runtime core of the keyboard. All mutable state lives here; the
/// scanner feeds events in arrival order and a periodic scheduler tick
/// drives the timeout machinery.
#[derive(Debug)]
pub struct PlanckEngine<H: Feedback + Persistence> {
    layout: Layout,
    layers: LayerStack,
    dances: Vec<TapDance>,
    leader: LeaderMatcher,
    tap_hold: TapHold,
    oneshot: OneShotMods,
    held: Vec<HeldKey>,
    host: H,
}

impl<H: Feedback + Persistence> PlanckEngine<H> {
    /// Builds an engine around a validated layout, restoring the persisted
    /// default layer when one is available and in range.
    pub fn new(layout: Layout, mut host: H) -> Result<Self> {
        layout.validate()?;
        let default_layer = host
            .load_default_layer()
            .filter(|layer| *layer < layout.layers.len())
            .unwrap_or(layout.default_layer);
        let layers = LayerStack::new(layout.layers.len(), default_layer, layout.tri_layer);
        let dances = (0..layout.tap_dances.len()).map(|_| TapDance::new()).collect();
        log::debug!("engine up, {} layers, default {default_layer}", layout.layers.len());
        Ok(Self {
            layout,
            layers,
            dances,
            leader: LeaderMatcher::new(),
            tap_hold: TapHold::new(),
            oneshot: OneShotMods::new(),
            held: Vec::new(),
            host,
        })
    }

    /// Feeds one scanner event. The shared timer pass runs first against the
    /// event's own timestamp, so a gesture whose deadline passed between
    /// scheduler ticks resolves before this event is interpreted.
    pub fn feed(&mut self, event: KeyEvent) {
        self.expire_timers(event.time);
        if event.pressed {
            self.on_press(event);
        } else {
            self.on_release(event);
        }
    }

    /// Scheduler tick: polls every outstanding deadline.
    pub fn tick(&mut self, now: TimeMs) {
        self.expire_timers(now);
    }

    /// Replaces the base layer and requests persistence. A storage failure
    /// is logged and the in-memory switch stands; the value is written again
    /// on the next change.
    pub fn set_default_layer(&mut self, layer: LayerId) -> Result<()> {
        if layer >= self.layout.layers.len() {
            return Err(Error::InvalidLayerRef(layer));
        }
        self.layers.set_default(layer);
        if let Err(err) = self.host.store_default_layer(layer) {
            log::warn!("failed to persist default layer {layer}: {err}");
        }
        Ok(())
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn leader(&self) -> &LeaderMatcher {
        &self.leader
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Tears the engine down, handing the host back (useful for tests and
    /// for hosts that are re-used across a reconfiguration).
    pub fn into_host(self) -> H {
        self.host
    }

    /// Drops every in-flight gesture and held key, returning the engine to
    /// its boot state. The current default layer is kept.
    pub fn reset(&mut self) {
        self.layers = LayerStack::new(
            self.layout.layers.len(),
            self.layers.default_layer(),
            self.layout.tri_layer,
        );
        for dance in &mut self.dances {
            *dance = TapDance::new();
        }
        self.leader.cancel();
        self.tap_hold = TapHold::new();
        self.oneshot = OneShotMods::new();
        self.held.clear();
    }

    fn expire_timers(&mut self, now: TimeMs) {
        match self.leader.poll(&self.layout.leader, now) {
            Some(MatchResult::Resolved(action)) => {
                log::debug!("leader resolved at window close");
                self.dispatch(&action, Stroke::Tap, now);
            }
            Some(_) => log::debug!("leader sequence timed out"),
            None => {}
        }
        // layer taps settle before dances so a dance resolving on the same
        // pass already sees the held layer
        if let Some(pending) = self.tap_hold.poll(now) {
            self.settle_hold(pending);
        }
        for id in 0..self.dances.len() {
            let resolved = self.dances[id].poll(&self.layout.tap_dances[id], now);
            if let Some(action) = resolved {
                log::debug!("tap dance {id} resolved by timeout");
                self.dispatch(&action, Stroke::Tap, now);
            }
        }
        self.oneshot.poll(now);
    }

    fn on_press(&mut self, event: KeyEvent) {
        let now = event.time;

        // an armed leader owns every press outright
        if self.leader.is_armed() {
            self.leader_press(event);
            return;
        }

        // a press elsewhere settles a pending layer-tap as hold first, so
        // this key resolves through the layer it was reaching for
        if let Some(pending) = self.tap_hold.interrupt(event.pos) {
            self.settle_hold(pending);
        }

        // and force-resolves any tap burst in progress on a different key
        self.interrupt_dances(event.pos, now);

        let action = self.layers.resolve(&self.layout, event.pos).clone();
        log::trace!("press {:?} -> {action:?}", event.pos);
        match &action {
            Action::TapDance(id) => {
                self.dances[*id].on_press(event.pos, now, self.layout.options.tapping_term_ms);
                self.held.push(HeldKey { pos: event.pos, action, swallow_up: false });
                self.layers.consume_oneshot();
            }
            Action::Leader => {
                self.leader.arm(now, self.layout.options.leader_timeout_ms);
                log::debug!("leader armed");
            }
            Action::LayerTap(layer, tap) => {
                let displaced = self.tap_hold.begin(PendingHold {
                    pos: event.pos,
                    layer: *layer,
                    tap: *tap,
                    deadline: now + self.layout.options.tapping_term_ms,
                });
                debug_assert!(displaced.is_none(), "interrupt ran before begin");
                self.held.push(HeldKey { pos: event.pos, action, swallow_up: false });
            }
            _ => {
                let wrapped = self.dispatch(&action, Stroke::Press, now);
                if action.emits() {
                    self.layers.consume_oneshot();
                }
                if !wrapped && !matches!(action, Action::OneShotMods(_)) {
                    self.oneshot.note_intervening(&self.layout.options);
                }
                self.held.push(HeldKey { pos: event.pos, action, swallow_up: wrapped });
            }
        }
    }

    fn on_release(&mut self, event: KeyEvent) {
        // releases with no matching press record (pressed before a reset,
        // or a swallowed gesture) complete silently
        let Some(idx) = self.held.iter().rposition(|e| e.pos == event.pos) else {
            return;
        };
        let entry = self.held.remove(idx);
        log::trace!("release {:?} -> {:?}", event.pos, entry.action);
        match entry.action {
            Action::Key(_) if entry.swallow_up => {}
            Action::LayerTap(..) => {
                if let Some(pending) = self.tap_hold.release(event.pos) {
                    // released inside the tapping term: it was a tap
                    self.dispatch(&Action::Key(pending.tap), Stroke::Tap, event.time);
                }
                // settled holds were rewritten to Momentary and never get here
            }
            ref action => {
                self.dispatch(action, Stroke::Release, event.time);
            }
        }
    }

    fn leader_press(&mut self, event: KeyEvent) {
        // translate the position through the current mapping without
        // touching it; only plain keycodes can continue a sequence
        let code = match self.layers.resolve(&self.layout, event.pos) {
            Action::Key(code) => Some(*code),
            _ => None,
        };
        let Some(code) = code else {
            self.leader.cancel();
            log::debug!("leader cancelled: key has no keycode binding");
            return;
        };
        match self.leader.on_key(&self.layout.leader, code) {
            MatchResult::Continuing => {}
            MatchResult::Resolved(action) => {
                log::debug!("leader resolved -> {action:?}");
                self.dispatch(&action, Stroke::Tap, event.time);
            }
            MatchResult::Cancelled => log::debug!("leader cancelled: no matching sequence"),
        }
    }

    fn interrupt_dances(&mut self, pos: KeyPos, now: TimeMs) {
        for id in 0..self.dances.len() {
            if self.dances[id].counting_at().is_some_and(|p| p != pos) {
                let resolved = self.dances[id].interrupt(&self.layout.tap_dances[id]);
                if let Some(action) = resolved {
                    log::debug!("tap dance {id} interrupted");
                    self.dispatch(&action, Stroke::Tap, now);
                }
            }
        }
    }

    // A settled hold behaves like a momentary layer switch from here on:
    // the layer goes active and the key's release record is rewritten so
    // releasing it deactivates the layer.
    fn settle_hold(&mut self, pending: PendingHold) {
        log::debug!("layer-tap at {:?} settled as hold of layer {}", pending.pos, pending.layer);
        self.layers.momentary(pending.layer, true);
        if let Some(entry) = self.held.iter_mut().rev().find(|e| e.pos == pending.pos) {
            entry.action = Action::Momentary(pending.layer);
        }
    }

    fn dispatch(&mut self, action: &Action, stroke: Stroke, now: TimeMs) -> bool {
        let mut dispatcher = Dispatcher {
            layout: &self.layout,
            layers: &mut self.layers,
            oneshot: &mut self.oneshot,
            host: &mut self.host,
        };
        dispatcher.dispatch(action, stroke, now)
    }
}
