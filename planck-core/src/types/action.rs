//! Logical actions bound to key positions.

use super::keycode::{Keycode, Modifiers};

/// Index of a layer in the layout's layer list. Order is stack priority:
/// higher indices shadow lower ones.
pub type LayerId = usize;

/// Index into the layout's tap dance table.
pub type DanceId = usize;

/// Index into the layout's macro table.
pub type MacroId = usize;

/// Index into the layout's mode table.
pub type ModeId = usize;

/// What a physical key position means once resolved through the layer stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 1:1 keycode passthrough.
    Key(Keycode),
    /// Layer active while the key is held.
    Momentary(LayerId),
    /// Layer toggled on press.
    Toggle(LayerId),
    /// Layer active for exactly the next emitting keypress.
    OneShotLayer(LayerId),
    /// Modifiers applied to exactly the next emitted non-modifier key.
    OneShotMods(Modifiers),
    /// Tap for the keycode, hold for the momentary layer.
    LayerTap(LayerId, Keycode),
    /// Defer to the per-key tap counting state machine.
    TapDance(DanceId),
    /// Arm the leader sequence matcher.
    Leader,
    /// Ordered synthetic key steps, emitted atomically.
    Macro(MacroId),
    /// Mode change: base layer switch or a special layer regime.
    Mode(ModeId),
    /// Defer to the next lower active layer.
    Transparent,
    /// Mapped, but does nothing.
    NoOp,
}

impl Action {
    /// Whether dispatching this action emits keycodes to the host. Used to
    /// decide what consumes a one-shot layer.
    pub fn emits(&self) -> bool {
        matches!(self, Action::Key(_) | Action::Macro(_) | Action::TapDance(_))
    }
}

/// One step of a macro. A tap is a Down step followed by an Up step; keeping
/// both explicit guarantees every press has a matching release even in
/// nested modifier wrappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroStep {
    Down(Keycode),
    Up(Keycode),
}
