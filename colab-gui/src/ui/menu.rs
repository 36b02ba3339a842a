//! Header bar and its dropdown menus.

use eframe::egui::{self, RichText};

use colab_core::{OverlayId, Section};

use crate::app::CoLabApp;
use crate::ui::{colors, to_rect};

/// Render the header bar.
pub fn render(app: &mut CoLabApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    ui.horizontal(|ui| {
        let collapse_hint = if app.layout.is_collapsed() {
            "Expand panel"
        } else {
            "Collapse panel"
        };
        if ui.button("☰").on_hover_text(collapse_hint).clicked() {
            app.toggle_left_panel();
        }

        let theme = app.layout.theme();
        ui.label(RichText::new("Co-Lab").strong().size(16.0))
            .on_hover_text(theme.logo_asset());
        ui.separator();

        let history_button = ui.add_enabled(!app.layout.is_collapsed(), egui::Button::new("🕑"));
        if history_button
            .on_hover_text(app.layout.history_toggle_label())
            .clicked()
        {
            app.toggle_history();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let profile = ui.button("👤 Profile");
            app.overlays
                .set_anchor(OverlayId::ProfileMenu, to_rect(profile.rect));
            if profile.clicked() {
                app.overlays.toggle(OverlayId::ProfileMenu, None);
            }

            if app.settings_form.is_dirty() {
                ui.label(
                    RichText::new("● unsaved settings")
                        .size(11.0)
                        .color(colors::WARNING),
                );
            }
        });
    });

    // Keyboard shortcut for the panel toggle.
    if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::B)) {
        app.toggle_left_panel();
    }
}

/// Render any open dropdowns on top of everything else.
pub fn render_dropdowns(app: &mut CoLabApp, ctx: &egui::Context) {
    if app.overlays.is_open(OverlayId::ProfileMenu) {
        render_profile_menu(app, ctx);
    }
    if app.overlays.is_open(OverlayId::UploadMenu) {
        render_upload_menu(app, ctx);
    }
}

fn popup_position(app: &CoLabApp, id: OverlayId, width: f32, above: bool) -> egui::Pos2 {
    match app.overlays.anchor(id) {
        Some(anchor) if above => egui::pos2(anchor.min.x, anchor.min.y - 4.0),
        Some(anchor) => egui::pos2((anchor.max.x - width).max(0.0), anchor.max.y + 4.0),
        None => egui::pos2(0.0, 0.0),
    }
}

fn render_profile_menu(app: &mut CoLabApp, ctx: &egui::Context) {
    const WIDTH: f32 = 200.0;
    let pos = popup_position(app, OverlayId::ProfileMenu, WIDTH, false);

    let response = egui::Area::new(egui::Id::new("profile_dropdown"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(WIDTH);

                if ui.button(app.layout.theme().toggle_label()).clicked() {
                    app.toggle_theme(ctx);
                    app.overlays.toggle(OverlayId::ProfileMenu, Some(false));
                }

                if ui.button("Settings").clicked() {
                    app.show_section(Section::Settings);
                    app.overlays.toggle(OverlayId::ProfileMenu, Some(false));
                }

                ui.separator();

                if ui
                    .button(RichText::new("Sign Out").color(colors::ERROR))
                    .clicked()
                {
                    app.sign_out();
                }
            });
        })
        .response;

    if app.overlays.is_open(OverlayId::ProfileMenu) {
        app.overlays
            .set_popup(OverlayId::ProfileMenu, to_rect(response.rect));
    }
}

fn render_upload_menu(app: &mut CoLabApp, ctx: &egui::Context) {
    const WIDTH: f32 = 180.0;
    let pos = popup_position(app, OverlayId::UploadMenu, WIDTH, true);

    let response = egui::Area::new(egui::Id::new("upload_dropdown"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .pivot(egui::Align2::LEFT_BOTTOM)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(WIDTH);

                if ui.button("From Computer").clicked() {
                    app.open_file_dialog();
                    app.show_section(Section::Upload);
                    app.overlays.toggle(OverlayId::UploadMenu, Some(false));
                }

                if ui.button("From My Files").clicked() {
                    app.show_section(Section::MyFiles);
                    app.overlays.toggle(OverlayId::UploadMenu, Some(false));
                }
            });
        })
        .response;

    if app.overlays.is_open(OverlayId::UploadMenu) {
        app.overlays
            .set_popup(OverlayId::UploadMenu, to_rect(response.rect));
    }
}
