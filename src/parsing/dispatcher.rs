use std::time::Instant;
use crate::models::{AppSettings, SharedTracker, SpellIndex, TrackerState};
use crate::parsing::triggers::{compile_triggers, Trigger, TriggerContext};

/// Runs log lines through the compiled triggers.
pub struct LineDispatcher {
    index: SpellIndex,
    triggers: Vec<Trigger>,
    character_level: f64,
}

impl LineDispatcher {
    pub fn new(index: SpellIndex, settings: &AppSettings) -> Self {
        let triggers = compile_triggers(&index);
        Self {
            index,
            triggers,
            character_level: settings.character_level,
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn index(&self) -> &SpellIndex {
        &self.index
    }

    /// Evaluates triggers top to bottom against one prefix-stripped line.
    ///
    /// Stops at the first trigger whose pattern matches and whose action
    /// succeeds, returning its position. A match whose action fails falls
    /// through to the next trigger. `None` means nothing handled the line.
    pub fn dispatch(&self, line: &str, state: &mut TrackerState, now: Instant) -> Option<usize> {
        let ctx = TriggerContext {
            index: &self.index,
            character_level: self.character_level,
            now,
        };

        for (position, trigger) in self.triggers.iter().enumerate() {
            let Some(caps) = trigger.pattern.captures(line) else {
                continue;
            };
            if trigger.fire(&caps, state, &ctx) {
                tracing::trace!(line, trigger = position, "Line handled");
                return Some(position);
            }
        }
        None
    }

    /// Dispatches under the tracker lock.
    pub fn dispatch_shared(&self, line: &str, tracker: &SharedTracker) -> Option<usize> {
        let mut state = tracker.lock();
        self.dispatch(line, &mut state, Instant::now())
    }
}
