pub mod engine;
pub mod error;
pub mod types;

pub use types::*;

// Re-export commonly used types
pub use engine::{
    Feedback, KeyDirection, KeyEvent, KeyPos, MatchResult, Persistence, PlanckEngine,
};
pub use error::{Error, Result};
