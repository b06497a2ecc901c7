use crate::models::SpellRecord;

/// The spell most recently begun and not yet seen landing.
///
/// Holds at most one spell; beginning a new cast replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct CastingState {
    current: Option<SpellRecord>,
}

impl CastingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, spell: SpellRecord) {
        self.current = Some(spell);
    }

    pub fn current(&self) -> Option<&SpellRecord> {
        self.current.as_ref()
    }

    pub fn is_casting(&self) -> bool {
        self.current.is_some()
    }

    /// Takes the pending spell if it satisfies `lands`, leaving the state empty.
    /// A spell that doesn't satisfy it stays pending.
    pub fn complete_if(&mut self, lands: impl FnOnce(&SpellRecord) -> bool) -> Option<SpellRecord> {
        match &self.current {
            Some(spell) if lands(spell) => self.current.take(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(name: &str) -> SpellRecord {
        SpellRecord {
            id: 1,
            name: name.to_string(),
            effect_self: String::new(),
            effect_other: format!(" feels {}.", name),
            effect_worn_off: String::new(),
            cast_time: 0,
            duration: 1,
            duration_formula: 5,
        }
    }

    #[test]
    fn begin_replaces_previous_cast() {
        let mut state = CastingState::new();
        state.begin(spell("Foo"));
        state.begin(spell("Bar"));
        assert_eq!(state.current().map(|s| s.name.as_str()), Some("Bar"));
    }

    #[test]
    fn complete_only_on_match() {
        let mut state = CastingState::new();
        state.begin(spell("Foo"));

        assert!(state.complete_if(|s| s.name == "Bar").is_none());
        assert!(state.is_casting());

        let landed = state.complete_if(|s| s.name == "Foo").unwrap();
        assert_eq!(landed.name, "Foo");
        assert!(!state.is_casting());
    }
}
