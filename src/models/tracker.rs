use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use crate::models::{CastingState, TimerKey, TimerSnapshot, TimerStore};

/// Interval between expiry sweeps.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// State shared between log ingestion, the expiry sweep and the overlay.
#[derive(Debug, Default)]
pub struct TrackerState {
    pub timers: TimerStore,
    pub casting: CastingState,
}

/// Handle to the tracker state. Every read-modify-write goes through the one mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<TrackerState>>,
}

impl SharedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state. A panic in another activity doesn't take this one down with it.
    pub fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn sweep(&self, now: Instant) -> usize {
        self.lock().timers.sweep(now)
    }

    pub fn snapshot(&self, now: Instant) -> Vec<TimerSnapshot> {
        self.lock().timers.snapshot(now)
    }

    pub fn remove(&self, key: &TimerKey) -> bool {
        self.lock().timers.remove(key)
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.timers.clear();
        state.casting.clear();
    }
}

/// Spawns the expiry sweep. `after_sweep` runs outside the lock once per interval
/// and is used to request a redraw.
pub fn spawn_sweep_thread<F>(tracker: SharedTracker, after_sweep: F) -> JoinHandle<()>
where
    F: Fn() + Send + 'static,
{
    thread::spawn(move || loop {
        let removed = tracker.sweep(Instant::now());
        if removed > 0 {
            tracing::debug!(removed, "Expired timers swept");
        }
        after_sweep();
        thread::sleep(SWEEP_INTERVAL);
    })
}
