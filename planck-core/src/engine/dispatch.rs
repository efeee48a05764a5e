//! Action execution: key emission, layer switching, macros and modes.

use crate::types::{Action, Keycode, Layout, MacroId, MacroStep, ModeId, ModeKind, Modifiers, TimeMs};

use super::host::{Feedback, KeyDirection, Persistence};
use super::layers::LayerStack;
use super::oneshot::OneShotMods;

/// How the triggering key arrived at the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stroke {
    /// Physical press; the matching release arrives later.
    Press,
    /// Physical release of an earlier press.
    Release,
    /// Synthetic full keystroke: tap dance and leader resolutions, layer
    /// taps.
    Tap,
}

/// Borrows the engine pieces an action can touch. Built fresh for each
/// dispatched action; holds no state of its own.
pub(crate) struct Dispatcher<'a, H: Feedback + Persistence> {
    pub layout: &'a Layout,
    pub layers: &'a mut LayerStack,
    pub oneshot: &'a mut OneShotMods,
    pub host: &'a mut H,
}

impl<H: Feedback + Persistence> Dispatcher<'_, H> {
    /// Executes `action`. Returns true when a one-shot modifier wrap already
    /// emitted the key-up, so the physical release must be swallowed.
    pub fn dispatch(&mut self, action: &Action, stroke: Stroke, now: TimeMs) -> bool {
        match action {
            Action::Key(code) => return self.key(*code, stroke),
            Action::Momentary(layer) => match stroke {
                Stroke::Press => self.layers.momentary(*layer, true),
                Stroke::Release => self.layers.momentary(*layer, false),
                Stroke::Tap => {}
            },
            Action::Toggle(layer) => {
                if stroke != Stroke::Release {
                    self.layers.toggle(*layer);
                }
            }
            Action::OneShotLayer(layer) => {
                if stroke != Stroke::Release {
                    self.layers.arm_oneshot(*layer);
                }
            }
            Action::OneShotMods(mods) => {
                if stroke != Stroke::Release {
                    self.oneshot.arm(*mods, now, &self.layout.options);
                }
            }
            Action::Macro(id) => {
                if stroke != Stroke::Release {
                    self.run_macro(*id);
                }
            }
            Action::Mode(id) => {
                if stroke != Stroke::Release {
                    self.switch_mode(*id);
                }
            }
            // Layer taps are settled by the engine before dispatch; tap
            // dances and the leader trigger are intercepted there as well.
            Action::LayerTap(..) | Action::TapDance(_) | Action::Leader => {}
            Action::Transparent | Action::NoOp => {}
        }
        false
    }

    fn key(&mut self, code: Keycode, stroke: Stroke) -> bool {
        match stroke {
            Stroke::Release => {
                self.host.emit_key(code, KeyDirection::Up);
                false
            }
            Stroke::Press | Stroke::Tap => {
                if !code.is_modifier() {
                    if let Some(mods) = self.oneshot.take() {
                        self.wrap(code, mods);
                        return true;
                    }
                }
                self.host.emit_key(code, KeyDirection::Down);
                if stroke == Stroke::Tap {
                    self.host.emit_key(code, KeyDirection::Up);
                }
                false
            }
        }
    }

    // Modifier-down, key-down, key-up, modifier-up; releases in reverse
    // order of the presses.
    fn wrap(&mut self, code: Keycode, mods: Modifiers) {
        let held = mods.keycodes();
        for modifier in &held {
            self.host.emit_key(*modifier, KeyDirection::Down);
        }
        self.host.emit_key(code, KeyDirection::Down);
        self.host.emit_key(code, KeyDirection::Up);
        for modifier in held.iter().rev() {
            self.host.emit_key(*modifier, KeyDirection::Up);
        }
    }

    // Steps run back to back; the engine admits no other event until the
    // last one is emitted.
    fn run_macro(&mut self, id: MacroId) {
        for step in &self.layout.macros[id].steps {
            match step {
                MacroStep::Down(code) => self.host.emit_key(*code, KeyDirection::Down),
                MacroStep::Up(code) => self.host.emit_key(*code, KeyDirection::Up),
            }
        }
    }

    fn switch_mode(&mut self, id: ModeId) {
        match &self.layout.modes[id] {
            ModeKind::Default(layer) => {
                self.layers.set_default(*layer);
                if let Err(err) = self.host.store_default_layer(*layer) {
                    log::warn!("failed to persist default layer {layer}: {err}");
                }
                self.host.mode_entered(id);
            }
            ModeKind::Enter { layer, suspend } => {
                for suspended in suspend {
                    self.layers.deactivate(*suspended);
                }
                self.layers.activate(*layer);
                log::debug!("mode {id} entered");
                self.host.mode_entered(id);
            }
            ModeKind::Exit { layer } => {
                self.layers.deactivate(*layer);
                log::debug!("mode {id} exited");
                self.host.mode_exited(id);
            }
        }
    }
}
