use eframe::{egui, NativeOptions};
use egui::ViewportBuilder;
use std::error::Error;
use tracing_subscriber::filter::EnvFilter;

use spell_timers::gui::SpellTimerApp;
use spell_timers::log::{resolve_log_path, spawn_log_watcher};
use spell_timers::models::{spawn_sweep_thread, SharedTracker, SpellIndex};
use spell_timers::parsing::LineDispatcher;
use spell_timers::utils::load_app_settings;

/// Initialize logging, writing to SPELL_TIMERS_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("SPELL_TIMERS_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let settings = load_app_settings();

    // Without spell data nothing can be recognized
    let (index, _report) = SpellIndex::load(&settings.spell_file).inspect_err(|e| {
        tracing::error!(error = %e, "Cannot start without the spell database");
    })?;
    let dispatcher = LineDispatcher::new(index, &settings);
    let tracker = SharedTracker::new();

    let log_path = resolve_log_path(&settings)?;
    let _watcher = spawn_log_watcher(&log_path, settings.replay_from_start, dispatcher, tracker.clone())?;

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([420.0, 480.0])
            .with_min_inner_size([200.0, 120.0])
            .with_resizable(true)
            .with_decorations(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let app = SpellTimerApp::new(tracker.clone(), settings);

    eframe::run_native(
        "Spell Timers",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());

            let repaint_ctx = cc.egui_ctx.clone();
            spawn_sweep_thread(tracker, move || repaint_ctx.request_repaint());

            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
