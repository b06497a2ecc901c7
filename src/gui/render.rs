use std::time::Duration;
use crate::models::{TimerKey, TimerSnapshot};
use crate::utils::format_remaining;

/// One row of the fixed-size timer display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub text: String,
    /// Timer shown on this row; `None` for padding rows
    pub key: Option<TimerKey>,
    /// Remaining time is at or under the warning threshold
    pub expiring: bool,
}

impl DisplayRow {
    fn blank() -> Self {
        Self {
            text: String::new(),
            key: None,
            expiring: false,
        }
    }
}

pub fn format_timer_line(timer: &TimerSnapshot) -> String {
    format!("{}; {}", timer.label(), format_remaining(timer.remaining))
}

fn truncate_to_columns(text: String, columns: usize) -> String {
    match text.char_indices().nth(columns) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

/// Lays a snapshot out as exactly `rows` rows of at most `columns` characters.
/// Timers past the last row are dropped and long lines are cut, never wrapped.
pub fn render_rows(snapshot: &[TimerSnapshot], rows: usize, columns: usize, warning: Duration) -> Vec<DisplayRow> {
    let mut display: Vec<DisplayRow> = snapshot
        .iter()
        .take(rows)
        .map(|timer| DisplayRow {
            text: truncate_to_columns(format_timer_line(timer), columns),
            key: Some(timer.key.clone()),
            expiring: timer.remaining <= warning,
        })
        .collect();
    display.resize_with(rows, DisplayRow::blank);
    display
}

/// Text-only form of [`render_rows`].
pub fn render_lines(snapshot: &[TimerSnapshot], rows: usize, columns: usize) -> Vec<String> {
    render_rows(snapshot, rows, columns, Duration::ZERO)
        .into_iter()
        .map(|row| row.text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimerCategory;
    use std::time::Instant;

    fn snapshot(label: &str, remaining_ms: u64) -> TimerSnapshot {
        TimerSnapshot {
            key: TimerKey {
                label: label.to_string(),
                category: TimerCategory::OnOther,
                started_at: Instant::now(),
                duration: Duration::from_secs(60),
            },
            remaining: Duration::from_millis(remaining_ms),
        }
    }

    #[test]
    fn pads_to_display_height() {
        let lines = render_lines(&[snapshot("Bar; Foo", 17_600)], 4, 80);
        assert_eq!(lines, vec!["Bar; Foo; 18s", "", "", ""]);
    }

    #[test]
    fn overflow_rows_and_columns_are_truncated() {
        let timers = vec![snapshot("Alpha", 5_000), snapshot("Beta", 5_000), snapshot("Gamma", 5_000)];
        let lines = render_lines(&timers, 2, 6);
        assert_eq!(lines, vec!["Alpha;", "Beta; "]);
    }

    #[test]
    fn expired_remaining_shows_zero() {
        let lines = render_lines(&[snapshot("Foo", 0)], 1, 80);
        assert_eq!(lines, vec!["Foo; 0s"]);
    }

    #[test]
    fn rows_carry_keys_and_warning_state() {
        let timers = vec![snapshot("Soon", 3_000), snapshot("Later", 45_000)];
        let rows = render_rows(&timers, 3, 80, Duration::from_secs(10));
        assert!(rows[0].expiring);
        assert!(!rows[1].expiring);
        assert_eq!(rows[1].key.as_ref().map(|k| k.label.as_str()), Some("Later"));
        assert_eq!(rows[2], DisplayRow::blank());
    }
}
