use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use crate::error::{Result, SpellTimerError};
use crate::models::SharedTracker;
use crate::parsing::{strip_log_prefix, LineDispatcher};

/// How often the log file is checked for new data.
pub const LOG_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follows a growing log file and hands back complete lines as they appear.
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    file: File,
    position: u64,
    pending: Vec<u8>,
}

impl LogTail {
    /// Opens `path`, positioned at the start when `from_start` is set, else at the end.
    pub fn open(path: &Path, from_start: bool) -> Result<Self> {
        let file = File::open(path).map_err(|source| SpellTimerError::LogFileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let position = if from_start { 0 } else { file.metadata()?.len() };

        tracing::info!(path = %path.display(), position, "Following log file");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            position,
            pending: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads whatever was appended since the last poll. A trailing line
    /// without its newline is held back until the rest of it arrives.
    pub fn poll_lines(&mut self) -> Result<Vec<String>> {
        let current_size = self.file.metadata()?.len();
        if current_size < self.position {
            tracing::info!(path = %self.path.display(), "Log file shrank, reading from the start");
            self.position = 0;
            self.pending.clear();
        }
        if current_size == self.position {
            return Ok(Vec::new());
        }

        self.file.seek(SeekFrom::Start(self.position))?;
        let mut buffer = Vec::new();
        let read = (&mut self.file).take(current_size - self.position).read_to_end(&mut buffer)?;
        self.position += read as u64;
        self.pending.extend_from_slice(&buffer);

        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let complete: Vec<u8> = self.pending.drain(..=last_newline).collect();

        Ok(String::from_utf8_lossy(&complete)
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect())
    }
}

/// Strips and dispatches a batch of raw log lines. Returns how many were handled.
pub fn process_lines(lines: &[String], dispatcher: &LineDispatcher, tracker: &SharedTracker) -> usize {
    lines
        .iter()
        .map(|line| strip_log_prefix(line))
        .filter(|line| !line.is_empty())
        .filter(|line| dispatcher.dispatch_shared(line, tracker).is_some())
        .count()
}

/// Ingestion loop: polls the log for the lifetime of the process.
pub fn log_watcher_thread(mut tail: LogTail, dispatcher: LineDispatcher, tracker: SharedTracker) {
    loop {
        match tail.poll_lines() {
            Ok(lines) if !lines.is_empty() => {
                let handled = process_lines(&lines, &dispatcher, &tracker);
                tracing::debug!(read = lines.len(), handled, "Processed log lines");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(path = %tail.path().display(), error = %e, "Error reading log file"),
        }
        thread::sleep(LOG_POLL_INTERVAL);
    }
}

/// Opens the log and starts the ingestion thread.
pub fn spawn_log_watcher(
    path: &Path,
    from_start: bool,
    dispatcher: LineDispatcher,
    tracker: SharedTracker,
) -> Result<JoinHandle<()>> {
    let tail = LogTail::open(path, from_start)?;
    Ok(thread::spawn(move || log_watcher_thread(tail, dispatcher, tracker)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, OpenOptions};
    use std::io::Write;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("spell_timers_{}_{}.txt", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    fn append(path: &Path, content: &str) {
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn tails_from_end_by_default() {
        let path = scratch_file("tail_end", "old line\n");
        let mut tail = LogTail::open(&path, false).unwrap();
        assert!(tail.poll_lines().unwrap().is_empty());

        append(&path, "new line\r\n");
        assert_eq!(tail.poll_lines().unwrap(), vec!["new line"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn replay_reads_existing_content() {
        let path = scratch_file("tail_start", "one\ntwo\n");
        let mut tail = LogTail::open(&path, true).unwrap();
        assert_eq!(tail.poll_lines().unwrap(), vec!["one", "two"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_line_waits_for_newline() {
        let path = scratch_file("tail_partial", "");
        let mut tail = LogTail::open(&path, true).unwrap();

        append(&path, "You begin cas");
        assert!(tail.poll_lines().unwrap().is_empty());
        append(&path, "ting Foo.\n");
        assert_eq!(tail.poll_lines().unwrap(), vec!["You begin casting Foo."]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn truncated_file_is_reread() {
        let path = scratch_file("tail_truncate", "first line\nsecond line\n");
        let mut tail = LogTail::open(&path, false).unwrap();

        fs::write(&path, "fresh\n").unwrap();
        assert_eq!(tail.poll_lines().unwrap(), vec!["fresh"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_log_fails_to_open() {
        let result = LogTail::open(Path::new("/nonexistent/eqlog_missing.txt"), false);
        assert!(matches!(result, Err(SpellTimerError::LogFileOpen { .. })));
    }
}
