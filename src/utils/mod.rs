pub mod time;
pub mod settings_persistence;

pub use time::{format_remaining, round_to_seconds};
pub use settings_persistence::{load_app_settings, load_app_settings_from, save_app_settings, save_app_settings_to};
