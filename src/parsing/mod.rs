pub mod regex;
pub mod line_parser;
pub mod triggers;
pub mod dispatcher;

pub use line_parser::{strip_log_prefix, log_timestamp};
pub use triggers::{Trigger, TriggerAction, TriggerContext, compile_triggers};
pub use dispatcher::LineDispatcher;
