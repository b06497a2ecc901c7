use std::time::Duration;
use crate::models::SpellRecord;

/// Wall-clock seconds in one game tick.
pub const TICK_SECONDS: u64 = 6;

/// Number of ticks a spell lasts for the given duration formula.
///
/// Level-derived formulas are capped at `magnitude`, including when the
/// magnitude is zero. Fractional results are truncated toward zero.
pub fn duration_ticks(formula: i64, magnitude: i64, level: f64) -> u64 {
    let magnitude = magnitude.max(0) as f64;
    let capped = |ticks: f64| ticks.min(magnitude);
    let or_default = |default: f64| if magnitude == 0.0 { default } else { magnitude };

    let ticks = match formula {
        0 => 0.0,
        1 | 6 => capped((level / 2.0).ceil()),
        2 => capped((level / 5.0 * 3.0).ceil()),
        3 => capped(level * 30.0),
        4 => or_default(50.0),
        5 => or_default(3.0),
        7 => capped(level),
        8 => capped(level + 10.0),
        9 => capped(level * 2.0 + 10.0),
        10 => capped(level * 3.0 + 10.0),
        11 | 12 | 15 => magnitude,
        50 => 72000.0,
        3600 => or_default(3600.0),
        _ => 0.0,
    };

    ticks.max(0.0) as u64
}

pub fn ticks_to_duration(ticks: u64) -> Duration {
    Duration::from_secs(ticks.saturating_mul(TICK_SECONDS))
}

pub fn duration_for(formula: i64, magnitude: i64, level: f64) -> Duration {
    ticks_to_duration(duration_ticks(formula, magnitude, level))
}

pub fn spell_duration(spell: &SpellRecord, level: f64) -> Duration {
    duration_for(spell.duration_formula, spell.duration, level)
}
