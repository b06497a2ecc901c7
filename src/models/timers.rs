use std::fmt;
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

/// Who the timed effect landed on. Self timers sort ahead of other timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerCategory {
    OnSelf,
    OnOther,
}

pub type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

pub struct Timer {
    pub label: String,
    pub category: TimerCategory,
    pub started_at: Instant,
    pub duration: Duration,
    on_expire: Option<ExpiryCallback>,
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("label", &self.label)
            .field("category", &self.category)
            .field("started_at", &self.started_at)
            .field("duration", &self.duration)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}

impl Timer {
    pub fn new(label: String, category: TimerCategory, started_at: Instant, duration: Duration) -> Self {
        Self {
            label,
            category,
            started_at,
            duration,
            on_expire: None,
        }
    }

    pub fn with_on_expire(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_expire = Some(Box::new(callback));
        self
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed_at(now))
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.elapsed_at(now) > self.duration
    }

    pub fn key(&self) -> TimerKey {
        TimerKey {
            label: self.label.clone(),
            category: self.category,
            started_at: self.started_at,
            duration: self.duration,
        }
    }

    fn matches(&self, key: &TimerKey) -> bool {
        self.started_at == key.started_at
            && self.duration == key.duration
            && self.category == key.category
            && self.label == key.label
    }
}

/// Structural identity of a timer, captured in snapshots so a displayed row
/// can be removed later even if the store has changed in between.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub label: String,
    pub category: TimerCategory,
    pub started_at: Instant,
    pub duration: Duration,
}

/// Point-in-time view of one timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub key: TimerKey,
    pub remaining: Duration,
}

impl TimerSnapshot {
    pub fn label(&self) -> &str {
        &self.key.label
    }

    pub fn category(&self) -> TimerCategory {
        self.key.category
    }
}

/// Active timers kept in display order: self timers first, then by label.
#[derive(Debug, Default)]
pub struct TimerStore {
    timers: Vec<Timer>,
}

impl TimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timer: Timer) {
        tracing::debug!(label = %timer.label, duration_secs = timer.duration.as_secs(), "Timer started");
        self.timers.push(timer);
        self.timers.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.label.cmp(&b.label))
        });
    }

    /// Removes every timer whose elapsed time exceeds its duration, running
    /// its expiry callback first. Returns how many were removed.
    ///
    /// Expiry callbacks run while the store is borrowed and must not touch it.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.timers.len();
        let mut kept = Vec::with_capacity(before);

        for mut timer in self.timers.drain(..) {
            if timer.is_expired_at(now) {
                tracing::debug!(label = %timer.label, "Timer expired");
                if let Some(callback) = timer.on_expire.take() {
                    callback();
                }
            } else {
                kept.push(timer);
            }
        }

        self.timers = kept;
        before - self.timers.len()
    }

    /// Removes the first timer matching `key`. Returns false if it is already gone.
    pub fn remove(&mut self, key: &TimerKey) -> bool {
        match self.timers.iter().position(|t| t.matches(key)) {
            Some(pos) => {
                self.timers.remove(pos);
                tracing::debug!(label = %key.label, "Timer removed");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn snapshot(&self, now: Instant) -> Vec<TimerSnapshot> {
        self.timers
            .iter()
            .map(|timer| TimerSnapshot {
                key: timer.key(),
                remaining: timer.remaining_at(now),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
