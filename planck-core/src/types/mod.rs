pub mod action;
pub mod keycode;
pub mod layout;

pub use action::{Action, DanceId, LayerId, MacroId, MacroStep, ModeId};
pub use keycode::{Keycode, Modifiers};
pub use layout::{
    Layer, Layout, LayoutOptions, LeaderEntry, MacroDef, ModeKind, TapDanceDef, TriLayer,
};

/// Milliseconds on the host's monotonic clock. All deadlines are absolute
/// values on this clock; the engine never reads time itself.
pub type TimeMs = u64;
