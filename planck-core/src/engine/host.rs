//! Interfaces to the world outside the core: emitted key events, side-channel
//! feedback and persistent settings.

use crate::error::Result;
use crate::types::{Keycode, LayerId, ModeId};

/// Direction of an emitted key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

/// The observable output of the engine. Implementations must not block:
/// these calls happen inside event processing.
pub trait Feedback {
    /// Emit a key transition to the host (HID report, audio passthrough, ...).
    fn emit_key(&mut self, code: Keycode, direction: KeyDirection);

    /// A mode was entered. Fire-and-forget; ignored by default.
    fn mode_entered(&mut self, _mode: ModeId) {}

    /// A mode was exited. Fire-and-forget; ignored by default.
    fn mode_exited(&mut self, _mode: ModeId) {}
}

/// Persistent storage for the default layer selection.
pub trait Persistence {
    /// Store the default layer. Failures are logged by the engine and never
    /// interrupt event processing; the value is written again on the next
    /// explicit change.
    fn store_default_layer(&mut self, layer: LayerId) -> Result<()>;

    /// Load the stored default layer. `None` when nothing was stored or the
    /// read failed; the engine then falls back to the layout's default.
    fn load_default_layer(&mut self) -> Option<LayerId>;
}
