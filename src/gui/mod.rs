pub mod app;
pub mod render;

pub use app::SpellTimerApp;
pub use render::{render_lines, render_rows, DisplayRow};
