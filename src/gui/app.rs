use std::time::{Duration, Instant};
use eframe::egui;
use crate::gui::render::{render_rows, DisplayRow};
use crate::models::{AppSettings, SharedTracker, SWEEP_INTERVAL};

pub struct SpellTimerApp {
    /// Timers and casting state shared with the watcher and sweep threads
    pub tracker: SharedTracker,
    pub settings: AppSettings,
    /// Text scaling factor
    pub text_scale: f32,
}

impl SpellTimerApp {
    pub fn new(tracker: SharedTracker, settings: AppSettings) -> Self {
        Self {
            tracker,
            settings,
            text_scale: 1.0,
        }
    }

    fn handle_keys(&self, ctx: &egui::Context) {
        let (quit, clear) = ctx.input(|i| {
            let copy_shortcut = i.events.iter().any(|e| matches!(e, egui::Event::Copy));
            let quit = i.key_pressed(egui::Key::Escape)
                || copy_shortcut
                || (i.modifiers.ctrl && i.key_pressed(egui::Key::C));
            let clear = !i.modifiers.ctrl && !copy_shortcut && i.key_pressed(egui::Key::C);
            (quit, clear)
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if clear {
            self.tracker.clear();
            tracing::info!("Cleared all timers");
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let header_rect = ui.allocate_space(egui::Vec2::new(ui.available_width(), 30.0)).1;

        // Drag anywhere on the header except the buttons
        let draggable_rect = egui::Rect::from_min_size(
            header_rect.min,
            egui::Vec2::new(header_rect.width() - 100.0, header_rect.height()),
        );
        let drag_response = ui.allocate_rect(draggable_rect, egui::Sense::click_and_drag());
        if drag_response.drag_started() {
            ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }

        ui.scope_builder(egui::UiBuilder::new().max_rect(header_rect), |ui| {
            ui.horizontal(|ui| {
                let title_pos = egui::Pos2::new(header_rect.min.x + 10.0, header_rect.center().y);
                ui.painter().text(title_pos, egui::Align2::LEFT_CENTER, "Spell Timers",
                    egui::FontId::proportional(15.0), ui.visuals().text_color());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(egui::Button::new(egui::RichText::new("✕").size(12.0))
                        .min_size(egui::Vec2::new(25.0, 25.0))).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }

                    ui.add_space(10.0);

                    if ui.add(egui::Button::new(egui::RichText::new("A").size(8.0))
                        .min_size(egui::Vec2::new(18.0, 18.0))).clicked() {
                        self.text_scale = (self.text_scale - 0.1).max(0.5);
                        ctx.set_zoom_factor(ctx.zoom_factor() * 0.9);
                    }

                    if ui.add(egui::Button::new(egui::RichText::new("A").size(16.0))
                        .min_size(egui::Vec2::new(20.0, 20.0))).clicked() {
                        self.text_scale = (self.text_scale + 0.1).min(2.0);
                        ctx.set_zoom_factor(ctx.zoom_factor() * 1.1);
                    }
                });
            });
        });
    }

    /// Draws the rows. Secondary-clicking a timer row removes that timer.
    fn show_rows(&self, ui: &mut egui::Ui, rows: &[DisplayRow]) {
        ui.spacing_mut().item_spacing = egui::Vec2::new(0.0, 2.0);

        for row in rows {
            let text = egui::RichText::new(if row.text.is_empty() { " " } else { row.text.as_str() })
                .monospace();
            let text = if row.expiring {
                text.color(egui::Color32::from_rgb(230, 120, 50))
            } else {
                text
            };

            let response = ui.add(egui::Label::new(text).truncate().sense(egui::Sense::click()));
            if response.secondary_clicked() {
                if let Some(key) = &row.key {
                    if self.tracker.remove(key) {
                        tracing::debug!(label = %key.label, "Timer dismissed from overlay");
                    }
                }
            }
        }
    }
}

impl eframe::App for SpellTimerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The sweep thread requests repaints; this keeps the countdown moving if it stalls
        ctx.request_repaint_after(SWEEP_INTERVAL);
        self.handle_keys(ctx);

        // Snapshot under the lock, draw outside it
        let snapshot = self.tracker.snapshot(Instant::now());
        let rows = render_rows(
            &snapshot,
            self.settings.display_rows,
            self.settings.display_columns,
            Duration::from_secs(self.settings.expiry_warning_seconds),
        );

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_header(ui, ctx);
            ui.separator();
            self.show_rows(ui, &rows);
        });
    }
}
