use std::path::PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Level of the observed character, used by level-scaled duration formulas (1-100)
    pub character_level: f64,
    /// Caret-delimited spell data file
    pub spell_file: PathBuf,
    /// Log file to follow. Takes precedence over `log_directory`
    pub log_file: Option<PathBuf>,
    /// Directory searched for the newest `eqlog_*.txt` when no log file is set
    pub log_directory: Option<PathBuf>,
    /// Read the log from the beginning instead of only following new lines
    pub replay_from_start: bool,
    /// Rows in the timer display; shorter lists are padded with blank rows
    pub display_rows: usize,
    /// Characters per row before truncation
    pub display_columns: usize,
    /// Rows with this many seconds or fewer left are highlighted
    pub expiry_warning_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            character_level: 60.0,
            spell_file: PathBuf::from("spells_us.txt"),
            log_file: None,
            log_directory: None,
            replay_from_start: false,
            display_rows: 24,
            display_columns: 120,
            expiry_warning_seconds: 10,
        }
    }
}

impl AppSettings {
    /// Clamps character level to valid range (1-100)
    pub fn set_character_level(&mut self, level: f64) {
        self.character_level = if level.is_finite() { level.clamp(1.0, 100.0) } else { 1.0 };
    }

    /// Points the watcher at `path` and replays it from the start.
    pub fn simulate_log(&mut self, path: PathBuf) {
        self.log_file = Some(path);
        self.replay_from_start = true;
    }
}
