//! Status bar at the bottom of the window.

use eframe::egui::{self, RichText};

use crate::app::CoLabApp;
use crate::ui::colors;

/// Render the status bar.
pub fn render(app: &CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        if let Some((msg, _)) = &app.status_message {
            ui.label(RichText::new(msg).size(11.0).color(muted));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} theme", app.layout.theme()))
                    .size(11.0)
                    .color(muted),
            );
            ui.separator();

            let panel = if app.layout.is_collapsed() {
                "Panel collapsed".to_string()
            } else {
                format!("Panel {}", app.layout.expanded_width())
            };
            ui.label(RichText::new(panel).size(11.0).color(muted));

            let msg_count = app.lines.len();
            if msg_count > 0 {
                ui.separator();
                ui.label(
                    RichText::new(format!("{} messages", msg_count))
                        .size(11.0)
                        .color(muted),
                );
            }
        });
    });
}
