use crate::parsing::regex::RE_LOG_PREFIX;

/// Strips the bracketed timestamp the game writes in front of each log line.
/// Lines without the prefix are returned trimmed.
pub fn strip_log_prefix(line: &str) -> &str {
    let line = line.trim_end_matches(['\r', '\n']);
    match RE_LOG_PREFIX.find(line) {
        Some(prefix) => line[prefix.end()..].trim(),
        None => line.trim(),
    }
}

/// The timestamp text inside the log prefix, if present.
pub fn log_timestamp(line: &str) -> Option<&str> {
    RE_LOG_PREFIX
        .captures(line)
        .and_then(|caps| caps.name("timestamp"))
        .map(|m| m.as_str())
}
