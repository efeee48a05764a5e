//! Layer stack: which layers are active and what a position resolves to.

use crate::types::{Action, LayerId, Layout, TriLayer};

use super::input::KeyPos;

/// Active-layer state over the layout's layer list. Layer indices double as
/// stack priority: resolution walks from the highest index down. The default
/// (base) layer sits below the stack and is tracked separately, mirroring the
/// usual `layer_state` / default-layer split of keyboard firmware.
#[derive(Debug)]
pub struct LayerStack {
    count: usize,
    active: u32,
    default_layer: LayerId,
    oneshot: Option<LayerId>,
    tri: Option<TriLayer>,
}

impl LayerStack {
    pub fn new(count: usize, default_layer: LayerId, tri: Option<TriLayer>) -> Self {
        Self {
            count,
            active: 0,
            default_layer,
            oneshot: None,
            tri,
        }
    }

    /// Resolves a physical position to its current action: the first
    /// non-transparent binding walking active layers from the top, falling
    /// back to the default layer, and `NoOp` when nothing is bound at all.
    pub fn resolve<'a>(&self, layout: &'a Layout, pos: KeyPos) -> &'a Action {
        let (row, col) = (usize::from(pos.row), usize::from(pos.col));
        for layer in (0..self.count).rev() {
            if !self.is_active(layer) {
                continue;
            }
            match layout.action_at(layer, row, col) {
                Some(Action::Transparent) | None => continue,
                Some(action) => return action,
            }
        }
        match layout.action_at(self.default_layer, row, col) {
            Some(Action::Transparent) | None => &Action::NoOp,
            Some(action) => action,
        }
    }

    pub fn is_active(&self, layer: LayerId) -> bool {
        self.active & (1 << layer) != 0
    }

    /// Press/release transition of a momentary layer switch.
    pub fn momentary(&mut self, layer: LayerId, pressed: bool) {
        self.set(layer, pressed);
        self.update_tri();
    }

    pub fn toggle(&mut self, layer: LayerId) {
        let on = !self.is_active(layer);
        log::debug!("layer {layer} toggled {}", if on { "on" } else { "off" });
        self.set(layer, on);
        self.update_tri();
    }

    pub fn activate(&mut self, layer: LayerId) {
        self.set(layer, true);
        self.update_tri();
    }

    pub fn deactivate(&mut self, layer: LayerId) {
        self.set(layer, false);
        self.update_tri();
    }

    /// Arms a one-shot layer: active now, deactivated again by
    /// [`consume_oneshot`](Self::consume_oneshot) after the next emitting
    /// keypress.
    pub fn arm_oneshot(&mut self, layer: LayerId) {
        // re-arming drops the previously armed layer
        if let Some(prev) = self.oneshot.replace(layer) {
            if prev != layer {
                self.set(prev, false);
            }
        }
        self.set(layer, true);
        self.update_tri();
    }

    /// Deactivates the armed one-shot layer, if any.
    pub fn consume_oneshot(&mut self) {
        if let Some(layer) = self.oneshot.take() {
            log::debug!("one-shot layer {layer} consumed");
            self.set(layer, false);
            self.update_tri();
        }
    }

    pub fn oneshot(&self) -> Option<LayerId> {
        self.oneshot
    }

    pub fn set_default(&mut self, layer: LayerId) {
        log::debug!("default layer -> {layer}");
        self.default_layer = layer;
    }

    pub fn default_layer(&self) -> LayerId {
        self.default_layer
    }

    fn set(&mut self, layer: LayerId, on: bool) {
        if on {
            self.active |= 1 << layer;
        } else {
            self.active &= !(1 << layer);
        }
    }

    /// Re-derives the combination layer. Runs inside every mutation so the
    /// derived flag is correct before the next event is resolved.
    fn update_tri(&mut self) {
        if let Some(TriLayer { lower, raise, adjust }) = self.tri {
            let on = self.is_active(lower) && self.is_active(raise);
            self.set(adjust, on);
        }
    }
}
