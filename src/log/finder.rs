use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{Result, SpellTimerError};
use crate::models::AppSettings;

const LOG_FILE_PREFIX: &str = "eqlog_";
const LOG_FILE_SUFFIX: &str = ".txt";

fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

/// Most recently modified character log in `dir`.
pub fn find_latest_log_file_in_dir(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir).ok()?.filter_map(|entry| entry.ok())
        .filter(|entry| {
            let path = entry.path();
            path.is_file() && path.file_name().and_then(|s| s.to_str())
                .is_some_and(is_log_file_name)
        })
        .max_by_key(|entry| entry.metadata().ok().and_then(|m| m.modified().ok()))
        .map(|entry| entry.path())
}

/// The log to follow: the configured file, else the newest log in the configured directory.
pub fn resolve_log_path(settings: &AppSettings) -> Result<PathBuf> {
    if let Some(file) = &settings.log_file {
        return Ok(file.clone());
    }
    settings
        .log_directory
        .as_deref()
        .and_then(find_latest_log_file_in_dir)
        .ok_or(SpellTimerError::NoLogFile)
}
