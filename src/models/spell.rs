use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SpellTimerError};

const FIELD_DELIMITER: char = '^';
const MIN_FIELDS: usize = 18;

const FIELD_ID: usize = 0;
const FIELD_NAME: usize = 1;
const FIELD_EFFECT_SELF: usize = 6;
const FIELD_EFFECT_OTHER: usize = 7;
const FIELD_EFFECT_WORN_OFF: usize = 8;
const FIELD_CAST_TIME: usize = 13;
const FIELD_DURATION_FORMULA: usize = 16;
const FIELD_DURATION: usize = 17;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellRecord {
    pub id: i64,
    pub name: String,
    /// Text shown when the spell lands on the observed character
    pub effect_self: String,
    /// Text shown after the target's name when the spell lands on someone else
    pub effect_other: String,
    pub effect_worn_off: String,
    /// Cast time in milliseconds
    pub cast_time: i64,
    /// Duration magnitude in ticks, interpreted by `duration_formula`
    pub duration: i64,
    pub duration_formula: i64,
}

impl SpellRecord {
    /// Parses one caret-delimited record. Returns `None` when the line has too few fields.
    pub fn parse(line: &str) -> Option<Self> {
        let values: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if values.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            id: parse_number(values[FIELD_ID]),
            name: values[FIELD_NAME].to_string(),
            effect_self: values[FIELD_EFFECT_SELF].to_string(),
            effect_other: values[FIELD_EFFECT_OTHER].to_string(),
            effect_worn_off: values[FIELD_EFFECT_WORN_OFF].to_string(),
            cast_time: parse_number(values[FIELD_CAST_TIME]),
            duration: parse_number(values[FIELD_DURATION]),
            duration_formula: parse_number(values[FIELD_DURATION_FORMULA]),
        })
    }
}

fn parse_number(field: &str) -> i64 {
    field.trim().parse().unwrap_or(0)
}

/// Effect text that can't identify a spell on its own.
pub fn is_trivial_effect(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == "."
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Lookup tables over the spell file, built once and never mutated.
///
/// Effect texts are shared between ranks of the same spell family, so on a
/// key collision the record loaded last wins in every table.
#[derive(Debug, Default)]
pub struct SpellIndex {
    pub by_name: HashMap<String, SpellRecord>,
    pub by_self_effect: HashMap<String, SpellRecord>,
    pub by_other_effect: HashMap<String, SpellRecord>,
    pub by_worn_off: HashMap<String, SpellRecord>,
}

impl SpellIndex {
    pub fn load(path: &Path) -> Result<(Self, LoadReport)> {
        let mut file = File::open(path).map_err(|source| SpellTimerError::SpellFileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let content = String::from_utf8_lossy(&bytes);

        let (index, report) = Self::parse(&content);
        tracing::info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "Loaded spell database"
        );
        Ok((index, report))
    }

    pub fn parse(content: &str) -> (Self, LoadReport) {
        let mut index = Self::default();
        let mut report = LoadReport::default();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match SpellRecord::parse(line) {
                Some(record) => {
                    index.insert(record);
                    report.loaded += 1;
                }
                None => {
                    tracing::warn!(
                        line = line_no + 1,
                        fields = line.split(FIELD_DELIMITER).count(),
                        "Skipping spell record with too few fields"
                    );
                    report.skipped += 1;
                }
            }
        }

        (index, report)
    }

    pub fn insert(&mut self, record: SpellRecord) {
        if !is_trivial_effect(&record.effect_self) {
            self.by_self_effect.insert(record.effect_self.clone(), record.clone());
        }
        if !is_trivial_effect(&record.effect_other) {
            self.by_other_effect.insert(record.effect_other.clone(), record.clone());
        }
        if !is_trivial_effect(&record.effect_worn_off) {
            self.by_worn_off.insert(record.effect_worn_off.clone(), record.clone());
        }
        self.by_name.insert(record.name.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_line(id: i64, name: &str, you: &str, other: &str, worn: &str, formula: &str, duration: &str) -> String {
        let mut fields = vec![String::new(); 20];
        fields[FIELD_ID] = id.to_string();
        fields[FIELD_NAME] = name.to_string();
        fields[FIELD_EFFECT_SELF] = you.to_string();
        fields[FIELD_EFFECT_OTHER] = other.to_string();
        fields[FIELD_EFFECT_WORN_OFF] = worn.to_string();
        fields[FIELD_CAST_TIME] = "1500".to_string();
        fields[FIELD_DURATION_FORMULA] = formula.to_string();
        fields[FIELD_DURATION] = duration.to_string();
        fields.join("^")
    }

    #[test]
    fn parses_required_fields() {
        let line = record_line(12, "Foo", "You feel the foo.", " feels the foo.", "Foo fades.", "5", "3");
        let record = SpellRecord::parse(&line).unwrap();
        assert_eq!(record.id, 12);
        assert_eq!(record.name, "Foo");
        assert_eq!(record.effect_self, "You feel the foo.");
        assert_eq!(record.effect_other, " feels the foo.");
        assert_eq!(record.effect_worn_off, "Foo fades.");
        assert_eq!(record.cast_time, 1500);
        assert_eq!(record.duration_formula, 5);
        assert_eq!(record.duration, 3);
    }

    #[test]
    fn malformed_numbers_default_to_zero() {
        let line = record_line(1, "Foo", "a", "b", "c", "abc", "");
        let record = SpellRecord::parse(&line).unwrap();
        assert_eq!(record.duration_formula, 0);
        assert_eq!(record.duration, 0);
    }

    #[test]
    fn short_records_are_skipped_not_fatal() {
        let content = format!(
            "{}\n1^Broken^x\n{}\n",
            record_line(1, "Foo", "You feel foo.", " feels foo.", "", "5", "3"),
            record_line(2, "Bar", "You feel bar.", " feels bar.", "", "5", "3"),
        );
        let (index, report) = SpellIndex::parse(&content);
        assert_eq!(report, LoadReport { loaded: 2, skipped: 1 });
        assert!(index.by_name.contains_key("Foo"));
        assert!(index.by_name.contains_key("Bar"));
    }

    #[test]
    fn trivial_effect_text_is_not_indexed() {
        let content = record_line(1, "Quiet", "", ".", "", "0", "0");
        let (index, _) = SpellIndex::parse(&content);
        assert_eq!(index.len(), 1);
        assert!(index.by_self_effect.is_empty());
        assert!(index.by_other_effect.is_empty());
        assert!(index.by_worn_off.is_empty());
    }

    #[test]
    fn last_record_wins_on_shared_effect_text() {
        let content = format!(
            "{}\n{}\n",
            record_line(1, "Minor Shielding", "You feel armored.", " looks armored.", "", "3", "10"),
            record_line(2, "Lesser Shielding", "You feel armored.", " looks armored.", "", "3", "20"),
        );
        let (index, _) = SpellIndex::parse(&content);
        assert_eq!(index.by_other_effect[" looks armored."].name, "Lesser Shielding");
        assert_eq!(index.by_self_effect["You feel armored."].id, 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = SpellIndex::load(Path::new("definitely_missing_spells.txt"));
        assert!(matches!(result, Err(SpellTimerError::SpellFileOpen { .. })));
    }
}
