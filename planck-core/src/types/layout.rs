//! Static layout configuration supplied to the engine at construction.

use crate::error::{Error, Result};
use super::action::{Action, LayerId, MacroStep};
use super::keycode::Keycode;
use super::TimeMs;

/// One layer of key bindings: a grid matching the physical matrix shape.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub keys: Vec<Vec<Action>>,
}

impl Layer {
    pub fn new(name: impl Into<String>, keys: Vec<Vec<Action>>) -> Self {
        Self { name: name.into(), keys }
    }
}

/// The derived-layer rule: `adjust` is active exactly when both `lower` and
/// `raise` are active. The adjust flag is never switched directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriLayer {
    pub lower: LayerId,
    pub raise: LayerId,
    pub adjust: LayerId,
}

/// Tap dance binding table: entry N-1 fires for a count of N taps. Counts
/// past the end fall back to the last entry.
#[derive(Debug, Clone)]
pub struct TapDanceDef {
    pub actions: Vec<Action>,
}

/// One leader dictionary entry.
#[derive(Debug, Clone)]
pub struct LeaderEntry {
    pub sequence: Vec<Keycode>,
    pub action: Action,
}

/// An ordered list of key steps, emitted atomically.
#[derive(Debug, Clone)]
pub struct MacroDef {
    pub steps: Vec<MacroStep>,
}

/// A mode change triggered by an `Action::Mode` binding.
#[derive(Debug, Clone)]
pub enum ModeKind {
    /// Replace and persist the base layer.
    Default(LayerId),
    /// Deactivate the suspended layers, then activate the mode's layer.
    Enter { layer: LayerId, suspend: Vec<LayerId> },
    /// Deactivate the mode's layer.
    Exit { layer: LayerId },
}

/// Timing and bound configuration.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Inter-tap window for tap dances and hold threshold for layer taps.
    pub tapping_term_ms: TimeMs,
    /// Window for completing a leader sequence.
    pub leader_timeout_ms: TimeMs,
    /// How long armed one-shot modifiers survive unconsumed.
    pub oneshot_timeout_ms: TimeMs,
    /// How many non-consuming presses armed one-shot modifiers survive.
    pub oneshot_tap_limit: u8,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tapping_term_ms: 200,
            leader_timeout_ms: 300,
            oneshot_timeout_ms: 3000,
            oneshot_tap_limit: 3,
        }
    }
}

/// The complete immutable configuration of the engine.
#[derive(Debug, Clone)]
pub struct Layout {
    pub layers: Vec<Layer>,
    pub default_layer: LayerId,
    pub tri_layer: Option<TriLayer>,
    pub tap_dances: Vec<TapDanceDef>,
    pub leader: Vec<LeaderEntry>,
    pub macros: Vec<MacroDef>,
    pub modes: Vec<ModeKind>,
    pub options: LayoutOptions,
}

impl Layout {
    /// A layout with the given layers and no bindings beyond them.
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            default_layer: 0,
            tri_layer: None,
            tap_dances: Vec::new(),
            leader: Vec::new(),
            macros: Vec::new(),
            modes: Vec::new(),
            options: LayoutOptions::default(),
        }
    }

    /// The binding at `(row, col)` on `layer`, if the position exists.
    pub fn action_at(&self, layer: LayerId, row: usize, col: usize) -> Option<&Action> {
        self.layers.get(layer)?.keys.get(row)?.get(col)
    }

    /// Checks every cross-reference and table shape. The engine refuses to
    /// construct around a layout that fails here, so event processing never
    /// has to handle a dangling index.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(Error::NoLayers);
        }
        // active layers live in a 32-bit mask
        if self.layers.len() > 32 {
            return Err(Error::TooManyLayers(self.layers.len()));
        }
        let expected_rows = self.layers[0].keys.len();
        let expected_cols = self.layers[0].keys.first().map_or(0, Vec::len);
        for (id, layer) in self.layers.iter().enumerate() {
            let rows = layer.keys.len();
            let cols = layer.keys.first().map_or(0, Vec::len);
            if rows != expected_rows
                || cols != expected_cols
                || layer.keys.iter().any(|row| row.len() != cols)
            {
                return Err(Error::LayerShape {
                    layer: id,
                    rows,
                    cols,
                    expected_rows,
                    expected_cols,
                });
            }
            for row in &layer.keys {
                for action in row {
                    self.check_refs(action)?;
                }
            }
        }
        self.check_layer(self.default_layer)?;

        if let Some(tri) = self.tri_layer {
            self.check_layer(tri.lower)?;
            self.check_layer(tri.raise)?;
            self.check_layer(tri.adjust)?;
            if tri.lower == tri.raise || tri.lower == tri.adjust || tri.raise == tri.adjust {
                return Err(Error::TriLayerOverlap);
            }
        }

        for (id, dance) in self.tap_dances.iter().enumerate() {
            if dance.actions.is_empty() {
                return Err(Error::EmptyDanceTable(id));
            }
            for action in &dance.actions {
                self.check_refs(action)?;
                if !Self::tappable(action) {
                    return Err(Error::InvalidDanceAction(id));
                }
            }
        }

        for (idx, entry) in self.leader.iter().enumerate() {
            if entry.sequence.is_empty() {
                return Err(Error::EmptyLeaderSequence(idx));
            }
            if self.leader[..idx].iter().any(|e| e.sequence == entry.sequence) {
                return Err(Error::DuplicateLeaderSequence(idx));
            }
            self.check_refs(&entry.action)?;
            if !Self::tappable(&entry.action) {
                return Err(Error::InvalidLeaderAction(idx));
            }
        }

        for (id, mac) in self.macros.iter().enumerate() {
            if mac.steps.is_empty() {
                return Err(Error::EmptyMacro(id));
            }
        }

        for mode in &self.modes {
            match mode {
                ModeKind::Default(layer) | ModeKind::Exit { layer } => self.check_layer(*layer)?,
                ModeKind::Enter { layer, suspend } => {
                    self.check_layer(*layer)?;
                    for s in suspend {
                        self.check_layer(*s)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_layer(&self, layer: LayerId) -> Result<()> {
        if layer >= self.layers.len() {
            return Err(Error::InvalidLayerRef(layer));
        }
        Ok(())
    }

    fn check_refs(&self, action: &Action) -> Result<()> {
        match action {
            Action::Momentary(layer)
            | Action::Toggle(layer)
            | Action::OneShotLayer(layer)
            | Action::LayerTap(layer, _) => self.check_layer(*layer),
            Action::TapDance(id) if *id >= self.tap_dances.len() => {
                Err(Error::InvalidDanceRef(*id))
            }
            Action::Macro(id) if *id >= self.macros.len() => Err(Error::InvalidMacroRef(*id)),
            Action::Mode(id) if *id >= self.modes.len() => Err(Error::InvalidModeRef(*id)),
            _ => Ok(()),
        }
    }

    /// Actions that can fire from a synthetic tap (tap dance resolutions and
    /// leader bindings). Hold-based and gesture-starting actions cannot.
    fn tappable(action: &Action) -> bool {
        !matches!(
            action,
            Action::Momentary(_)
                | Action::LayerTap(..)
                | Action::TapDance(_)
                | Action::Leader
                | Action::Transparent
        )
    }
}
