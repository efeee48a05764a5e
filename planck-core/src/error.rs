//! Error types for the planck engine.

use thiserror::Error;

use crate::types::{DanceId, LayerId, MacroId, ModeId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("layout has no layers")]
    NoLayers,

    #[error("layout has {0} layers, the stack supports at most 32")]
    TooManyLayers(usize),

    #[error("layer {layer} is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    LayerShape {
        layer: LayerId,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("invalid layer reference: {0}")]
    InvalidLayerRef(LayerId),

    #[error("invalid tap dance reference: {0}")]
    InvalidDanceRef(DanceId),

    #[error("invalid macro reference: {0}")]
    InvalidMacroRef(MacroId),

    #[error("invalid mode reference: {0}")]
    InvalidModeRef(ModeId),

    #[error("tap dance {0} has an empty action table")]
    EmptyDanceTable(DanceId),

    #[error("tap dance {0} binds an action that cannot fire from a tap")]
    InvalidDanceAction(DanceId),

    #[error("leader entry {0} has an empty sequence")]
    EmptyLeaderSequence(usize),

    #[error("duplicate leader sequence at entry {0}")]
    DuplicateLeaderSequence(usize),

    #[error("leader entry {0} binds an action that cannot fire from a tap")]
    InvalidLeaderAction(usize),

    #[error("macro {0} has no steps")]
    EmptyMacro(MacroId),

    #[error("tri-layer rule must name three distinct layers")]
    TriLayerOverlap,

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
