//! Settings section and the discard-changes prompt.

use eframe::egui::{self, RichText, Rounding, Vec2};

use colab_core::navigation::DISCARD_PROMPT;
use colab_core::ApiField;

use crate::app::CoLabApp;
use crate::ui::colors;

/// Render the API settings form.
pub fn render_form(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.heading("API Settings");
    ui.separator();

    egui::Grid::new("api_settings_grid")
        .num_columns(2)
        .spacing(Vec2::new(12.0, 10.0))
        .show(ui, |ui| {
            for field in ApiField::all() {
                ui.label(field.label());
                let mut value = app.settings_form.value(*field).to_string();
                let edit = egui::TextEdit::singleline(&mut value)
                    .password(field.is_secret())
                    .desired_width(280.0);
                if ui.add(edit).changed() {
                    app.settings_form.edit(*field, &value);
                }
                ui.end_row();
            }
        });

    ui.add_space(12.0);

    ui.horizontal(|ui| {
        let dirty = app.settings_form.is_dirty();
        let save = egui::Button::new(RichText::new("Save").strong())
            .fill(colors::ACCENT)
            .rounding(Rounding::same(8.0));
        if ui
            .add_enabled(dirty, save.min_size(Vec2::new(100.0, 30.0)))
            .clicked()
        {
            app.save_settings();
        }

        if dirty {
            ui.label(
                RichText::new("Unsaved changes")
                    .size(11.0)
                    .color(colors::WARNING),
            );
        }
    });

    ui.add_space(16.0);
    ui.label(
        RichText::new("Settings are stored locally and never sent anywhere.")
            .size(11.0)
            .color(muted)
            .italics(),
    );
}

/// Ask whether to drop unsaved settings before switching sections.
pub fn render_discard_prompt(app: &mut CoLabApp, ctx: &egui::Context) {
    egui::Window::new("Unsaved Changes")
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(DISCARD_PROMPT);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                if ui
                    .add_sized(
                        Vec2::new(100.0, 30.0),
                        egui::Button::new(RichText::new("Discard").color(colors::ERROR))
                            .rounding(Rounding::same(8.0)),
                    )
                    .clicked()
                {
                    app.discard_settings_and_switch();
                }

                if ui
                    .add_sized(
                        Vec2::new(100.0, 30.0),
                        egui::Button::new("Cancel").rounding(Rounding::same(8.0)),
                    )
                    .clicked()
                {
                    app.sections.cancel_pending();
                }
            });
        });
}
