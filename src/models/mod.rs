pub mod spell;
pub mod duration;
pub mod casting;
pub mod timers;
pub mod tracker;
pub mod settings;

pub use spell::{SpellRecord, SpellIndex, LoadReport};
pub use duration::{duration_ticks, spell_duration, TICK_SECONDS};
pub use casting::CastingState;
pub use timers::{Timer, TimerCategory, TimerKey, TimerSnapshot, TimerStore};
pub use tracker::{SharedTracker, TrackerState, SWEEP_INTERVAL, spawn_sweep_thread};
pub use settings::AppSettings;
