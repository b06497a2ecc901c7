use std::time::Duration;

/// Rounds to the nearest whole second.
pub fn round_to_seconds(duration: Duration) -> u64 {
    (duration.as_millis() as u64 + 500) / 1000
}

/// Compact remaining-time text, e.g. "45s", "3m12s", "1h0m5s".
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = round_to_seconds(remaining);
    if seconds >= 3600 {
        format!("{}h{}m{}s", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
    } else if seconds >= 60 {
        format!("{}m{}s", seconds / 60, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
