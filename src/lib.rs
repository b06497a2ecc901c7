//! Spell timer overlay: recognizes spell casts in a game log and keeps a
//! sorted list of countdown timers for the effects that landed.

pub mod error;
pub mod models;
pub mod parsing;
pub mod log;
pub mod gui;
pub mod utils;


pub use error::{Result, SpellTimerError};
pub use models::{AppSettings, SharedTracker, SpellIndex};
pub use parsing::LineDispatcher;
