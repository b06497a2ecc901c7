pub mod finder;
pub mod watcher;

pub use finder::{find_latest_log_file_in_dir, resolve_log_path};
pub use watcher::{LogTail, log_watcher_thread, process_lines, spawn_log_watcher, LOG_POLL_INTERVAL};
