use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref RE_BEGIN_CASTING: Regex = Regex::new(r"You begin casting (?P<spell>.*)\.$").unwrap();

    // "[Mon Oct 18 12:00:00 2026] " prefix written in front of every log line
    pub static ref RE_LOG_PREFIX: Regex = Regex::new(r"^\[(?P<timestamp>[A-Z][a-z]{2} [A-Z][a-z]{2} [ \d]\d \d{2}:\d{2}:\d{2} \d{4})\] ").unwrap();
}
