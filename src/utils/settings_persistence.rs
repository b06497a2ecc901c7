use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::error::Result;
use crate::models::AppSettings;

const SETTINGS_FILE: &str = "settings.json";

/// Environment variable naming a log to replay from the start.
pub const SIM_LOG_ENV: &str = "SIM_LOG";

pub fn get_settings_file_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE)
}

pub fn load_app_settings() -> AppSettings {
    let mut settings = load_app_settings_from(&get_settings_file_path());
    if let Ok(sim_log) = std::env::var(SIM_LOG_ENV) {
        if !sim_log.is_empty() {
            tracing::info!(path = %sim_log, "Simulating from log file");
            settings.simulate_log(PathBuf::from(sim_log));
        }
    }
    settings
}

pub fn load_app_settings_from(file_path: &Path) -> AppSettings {
    if !file_path.exists() {
        tracing::info!(path = %file_path.display(), "No existing settings found, using defaults");
        return AppSettings::default();
    }

    match fs::read_to_string(file_path) {
        Ok(content) => {
            match serde_json::from_str::<AppSettings>(&content) {
                Ok(mut settings) => {
                    settings.set_character_level(settings.character_level);
                    tracing::info!(
                        character_level = settings.character_level,
                        spell_file = %settings.spell_file.display(),
                        "Loaded settings"
                    );
                    settings
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Error parsing settings JSON, using defaults");
                    AppSettings::default()
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error reading settings file, using defaults");
            AppSettings::default()
        }
    }
}

pub fn save_app_settings(settings: &AppSettings) -> Result<()> {
    save_app_settings_to(&get_settings_file_path(), settings)
}

pub fn save_app_settings_to(file_path: &Path, settings: &AppSettings) -> Result<()> {
    let json_content = serde_json::to_string_pretty(settings)?;

    let mut file = fs::File::create(file_path)?;
    file.write_all(json_content.as_bytes())?;
    file.flush()?;

    tracing::info!(path = %file_path.display(), character_level = settings.character_level, "Saved settings");
    Ok(())
}
