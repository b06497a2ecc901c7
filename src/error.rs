use std::path::PathBuf;

/// Errors surfaced by the spell timer library.
#[derive(Debug, thiserror::Error)]
pub enum SpellTimerError {
    #[error("failed to open spell file '{}': {source}", path.display())]
    SpellFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file '{}': {source}", path.display())]
    LogFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no log file configured and none found in the log directory")]
    NoLogFile,

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpellTimerError>;
