//! Conversation view and prompt input for the left panel.

use eframe::egui::{self, Color32, Key, RichText, Rounding, Vec2};

use colab_core::OverlayId;

use crate::app::{ChatLine, CoLabApp, LineKind};
use crate::ui::{colors, to_rect};

/// Render the conversation with the input pinned to the bottom.
pub fn render(app: &mut CoLabApp, ui: &mut egui::Ui) {
    egui::TopBottomPanel::bottom("chat_input")
        .frame(egui::Frame::none())
        .show_separator_line(false)
        .show_inside(ui, |ui| {
            render_input(app, ui);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show_inside(ui, |ui| {
            render_lines(app, ui);
        });
}

fn render_lines(app: &mut CoLabApp, ui: &mut egui::Ui) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            egui::Frame::none()
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());

                    if app.lines.is_empty() {
                        render_welcome(ui);
                    } else {
                        let max_width = ui.available_width() * 0.85;
                        for line in &app.lines {
                            ui.add_space(6.0);
                            render_line(ui, line, max_width);
                        }
                    }

                    if app.scroll_to_bottom {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        app.scroll_to_bottom = false;
                    }
                });
        });
}

fn render_welcome(ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Welcome to Co-Lab").size(20.0).strong());
        ui.add_space(6.0);
        ui.label(RichText::new("Type a prompt below to start a conversation.").color(muted));
    });
}

fn render_line(ui: &mut egui::Ui, line: &ChatLine, max_width: f32) {
    match line.kind {
        LineKind::User => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                egui::Frame::none()
                    .fill(colors::ACCENT)
                    .rounding(Rounding {
                        nw: 14.0,
                        ne: 4.0,
                        sw: 14.0,
                        se: 14.0,
                    })
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                    .show(ui, |ui| {
                        ui.set_max_width(max_width);
                        ui.label(RichText::new(&line.text).color(Color32::WHITE));
                    });
            });
        }
        LineKind::Assistant => {
            egui::Frame::none()
                .fill(colors::assistant_bg(ui.visuals()))
                .rounding(Rounding::same(12.0))
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(&line.text);
                });
        }
        LineKind::Status(_) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    RichText::new(&line.text)
                        .italics()
                        .color(colors::muted(ui.visuals())),
                );
            });
        }
    }
}

fn render_input(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let border = colors::border(ui.visuals());
    let rect = ui.available_rect_before_wrap();
    ui.painter().line_segment(
        [rect.left_top(), rect.right_top()],
        egui::Stroke::new(1.0, border),
    );

    egui::Frame::none()
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let upload = ui
                    .add_sized(Vec2::new(32.0, 32.0), egui::Button::new("📎"))
                    .on_hover_text("Upload");
                app.overlays
                    .set_anchor(OverlayId::UploadMenu, to_rect(upload.rect));
                if upload.clicked() {
                    app.overlays.toggle(OverlayId::UploadMenu, None);
                }

                let response = ui.add(
                    egui::TextEdit::multiline(&mut app.input)
                        .desired_width(ui.available_width() - 70.0)
                        .desired_rows(2)
                        .lock_focus(true)
                        .hint_text("Enter your prompt... (Enter to send, Shift+Enter for newline)"),
                );

                if response.has_focus() {
                    let enter_pressed =
                        ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.shift);
                    if enter_pressed {
                        if app.input.ends_with('\n') {
                            app.input.pop();
                        }
                        app.send_message();
                    }
                }

                let can_send = !app.input.trim().is_empty();
                let send = egui::Button::new(RichText::new("Send").color(Color32::WHITE))
                    .fill(if can_send {
                        colors::ACCENT
                    } else {
                        colors::border(ui.visuals())
                    })
                    .rounding(Rounding::same(8.0));
                if ui.add_sized(Vec2::new(60.0, 32.0), send).clicked() && can_send {
                    app.send_message();
                }
            });
        });
}
