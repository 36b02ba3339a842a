//! History sidebar listing stored conversations.

use eframe::egui::{self, RichText};

use crate::app::CoLabApp;
use crate::ui::colors;

/// Render the history sidebar.
pub fn render(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        ui.label(RichText::new("History").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✚ New").on_hover_text("New chat").clicked() {
                app.new_conversation();
            }
        });
    });
    ui.separator();

    if app.conversations.is_empty() {
        ui.label(RichText::new("No conversations yet").size(12.0).color(muted));
        return;
    }

    // Collected and applied after the loop, which borrows the list.
    let mut open: Option<String> = None;
    let mut delete: Option<String> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for conversation in &app.conversations {
                let selected =
                    app.active_conversation.as_deref() == Some(conversation.id.as_str());
                ui.horizontal(|ui| {
                    let title = if conversation.title.is_empty() {
                        "Untitled"
                    } else {
                        conversation.title.as_str()
                    };
                    let response = ui
                        .selectable_label(selected, RichText::new(title).size(13.0))
                        .on_hover_text(
                            conversation
                                .updated_at
                                .format("%Y-%m-%d %H:%M")
                                .to_string(),
                        );
                    if response.clicked() {
                        open = Some(conversation.id.clone());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                            delete = Some(conversation.id.clone());
                        }
                    });
                });
            }
        });

    if let Some(id) = open {
        app.open_conversation(&id);
    }
    if let Some(id) = delete {
        app.delete_conversation(&id);
    }
}
