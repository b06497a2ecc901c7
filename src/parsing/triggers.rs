use std::time::Instant;
use regex::{Captures, Regex};
use crate::models::{spell_duration, SpellIndex, SpellRecord, Timer, TimerCategory, TrackerState};
use crate::parsing::regex::RE_BEGIN_CASTING;

/// What a trigger does once its pattern matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    /// "You begin casting <name>." - remember the spell being cast
    BeginCasting,
    /// "<target><effect>" - the pending spell landed on someone else
    OtherEffect { effect: String },
    /// "<effect>" - the pending spell landed on the observed character
    SelfEffect { effect: String },
}

#[derive(Debug, Clone)]
pub struct Trigger {
    pub pattern: Regex,
    pub action: TriggerAction,
}

/// Everything a trigger action reads besides the shared tracker state.
#[derive(Debug, Clone, Copy)]
pub struct TriggerContext<'a> {
    pub index: &'a SpellIndex,
    pub character_level: f64,
    pub now: Instant,
}

impl Trigger {
    pub fn new(pattern: Regex, action: TriggerAction) -> Self {
        Self { pattern, action }
    }

    /// Runs the action for a line this trigger's pattern matched.
    ///
    /// Returns false when the line isn't this trigger's to handle after all
    /// (unknown spell, or a different spell pending), so dispatch moves on.
    pub fn fire(&self, caps: &Captures<'_>, state: &mut TrackerState, ctx: &TriggerContext<'_>) -> bool {
        match &self.action {
            TriggerAction::BeginCasting => {
                let name = caps.name("spell").map_or("", |m| m.as_str());
                match ctx.index.by_name.get(name) {
                    Some(spell) => {
                        state.casting.begin(spell.clone());
                        true
                    }
                    None => false,
                }
            }
            TriggerAction::OtherEffect { effect } => {
                let Some(indexed) = ctx.index.by_other_effect.get(effect) else {
                    return false;
                };
                let Some(cast) = state
                    .casting
                    .complete_if(|pending| pending.effect_other == indexed.effect_other)
                else {
                    return false;
                };

                let target = caps.name("target").map_or("", |m| m.as_str().trim());
                let label = if target.is_empty() {
                    cast.name.clone()
                } else {
                    format!("{}; {}", target, cast.name)
                };
                start_timer(state, &cast, label, TimerCategory::OnOther, ctx);
                true
            }
            TriggerAction::SelfEffect { effect } => {
                let Some(indexed) = ctx.index.by_self_effect.get(effect) else {
                    return false;
                };
                let Some(cast) = state
                    .casting
                    .complete_if(|pending| pending.effect_self == indexed.effect_self)
                else {
                    return false;
                };

                let label = cast.name.clone();
                start_timer(state, &cast, label, TimerCategory::OnSelf, ctx);
                true
            }
        }
    }
}

/// Instant spells (no duration) land without leaving a timer behind.
fn start_timer(state: &mut TrackerState, spell: &SpellRecord, label: String, category: TimerCategory, ctx: &TriggerContext<'_>) {
    if spell.duration == 0 {
        return;
    }
    let duration = spell_duration(spell, ctx.character_level);
    if duration.is_zero() {
        return;
    }
    state.timers.insert(Timer::new(label, category, ctx.now, duration));
}

/// Builds the ordered trigger list: begin-casting first, then one trigger per
/// distinct other-effect text, then one per distinct self-effect text. Effect
/// triggers are ordered by spell id, then effect text.
pub fn compile_triggers(index: &SpellIndex) -> Vec<Trigger> {
    let mut triggers = vec![Trigger::new(RE_BEGIN_CASTING.clone(), TriggerAction::BeginCasting)];

    for (effect, _) in sorted_effects(&index.by_other_effect) {
        let pattern = format!(r"^(?P<target>.*){}$", regex::escape(effect));
        if let Some(trigger) = compile(&pattern, TriggerAction::OtherEffect { effect: effect.to_string() }) {
            triggers.push(trigger);
        }
    }

    for (effect, _) in sorted_effects(&index.by_self_effect) {
        let pattern = format!(r"{}$", regex::escape(effect));
        if let Some(trigger) = compile(&pattern, TriggerAction::SelfEffect { effect: effect.to_string() }) {
            triggers.push(trigger);
        }
    }

    tracing::info!(count = triggers.len(), "Compiled spell triggers");
    triggers
}

fn sorted_effects(map: &std::collections::HashMap<String, SpellRecord>) -> Vec<(&str, &SpellRecord)> {
    let mut effects: Vec<(&str, &SpellRecord)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    effects.sort_by(|a, b| a.1.id.cmp(&b.1.id).then_with(|| a.0.cmp(b.0)));
    effects
}

fn compile(pattern: &str, action: TriggerAction) -> Option<Trigger> {
    match Regex::new(pattern) {
        Ok(regex) => Some(Trigger::new(regex, action)),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Skipping trigger that failed to compile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(id: i64, name: &str, effect_self: &str, effect_other: &str) -> SpellRecord {
        SpellRecord {
            id,
            name: name.to_string(),
            effect_self: effect_self.to_string(),
            effect_other: effect_other.to_string(),
            effect_worn_off: String::new(),
            cast_time: 0,
            duration: 3,
            duration_formula: 5,
        }
    }

    fn index_of(spells: Vec<SpellRecord>) -> SpellIndex {
        let mut index = SpellIndex::default();
        for s in spells {
            index.insert(s);
        }
        index
    }

    #[test]
    fn begin_casting_comes_first_and_order_is_stable() {
        let index = index_of(vec![
            spell(30, "Gamma", "You feel gamma.", " feels gamma."),
            spell(10, "Alpha", "You feel alpha.", " feels alpha."),
            spell(20, "Beta", "You feel beta.", " feels beta."),
        ]);

        let actions: Vec<TriggerAction> = compile_triggers(&index).into_iter().map(|t| t.action).collect();
        assert_eq!(
            actions,
            vec![
                TriggerAction::BeginCasting,
                TriggerAction::OtherEffect { effect: " feels alpha.".into() },
                TriggerAction::OtherEffect { effect: " feels beta.".into() },
                TriggerAction::OtherEffect { effect: " feels gamma.".into() },
                TriggerAction::SelfEffect { effect: "You feel alpha.".into() },
                TriggerAction::SelfEffect { effect: "You feel beta.".into() },
                TriggerAction::SelfEffect { effect: "You feel gamma.".into() },
            ]
        );
    }

    #[test]
    fn metacharacters_in_effect_text_match_literally() {
        let index = index_of(vec![spell(1, "Odd", "You (maybe) feel odd?", "'s eyes glow [blue]. ")]);
        let triggers = compile_triggers(&index);
        assert_eq!(triggers.len(), 3);

        let other = &triggers[1].pattern;
        assert!(other.is_match("Bar's eyes glow [blue]. "));
        assert!(!other.is_match("Bar's eyes glow b. "));

        let own = &triggers[2].pattern;
        assert!(own.is_match("You (maybe) feel odd?"));
        assert!(!own.is_match("You maybe feel odd"));
    }

    #[test]
    fn effect_patterns_are_anchored_at_line_end() {
        let index = index_of(vec![spell(1, "Foo", "You feel the foo.", " feels the foo.")]);
        let triggers = compile_triggers(&index);
        assert!(!triggers[1].pattern.is_match("Bar feels the foo. Or not."));
        let caps = triggers[1].pattern.captures("Bar feels the foo.").unwrap();
        assert_eq!(&caps["target"], "Bar");
    }
}
