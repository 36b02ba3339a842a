//! Right panel: section tabs and their content.

use eframe::egui::{self, Color32, RichText, Rounding, Vec2};

use colab_core::Section;

use crate::app::CoLabApp;
use crate::ui::{colors, settings};

/// Render the section tabs and the active section.
pub fn render(app: &mut CoLabApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for section in Section::all() {
            let selected = app.sections.active() == *section;
            let label = RichText::new(format!("  {}  ", section.title())).size(14.0);
            if ui.selectable_label(selected, label).clicked() && !selected {
                app.show_section(*section);
            }
        }
    });
    ui.separator();

    let mut area = egui::ScrollArea::vertical()
        .id_salt("section_content")
        .auto_shrink([false, false]);
    if app.sections.take_scroll_reset() {
        area = area.vertical_scroll_offset(0.0);
    }

    area.show(ui, |ui| match app.sections.active() {
        Section::Tasks => render_tasks(ui),
        Section::MyFiles => render_my_files(app, ui),
        Section::Upload => render_upload(app, ui),
        Section::Wallet => render_wallet(app, ui),
        Section::Settings => settings::render_form(app, ui),
    });
}

fn render_tasks(ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());
    ui.heading("Tasks");
    ui.add_space(8.0);
    for (title, state) in [
        ("Label image dataset", "Open"),
        ("Review model outputs", "In progress"),
        ("Transcribe audio clips", "Open"),
    ] {
        ui.horizontal(|ui| {
            ui.label(title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(state).size(12.0).color(muted));
            });
        });
        ui.separator();
    }
}

fn render_my_files(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());
    ui.heading("My Files");
    ui.add_space(8.0);

    if app.wallet.entries().is_empty() {
        ui.label(RichText::new("No files uploaded yet.").color(muted));
        if ui.button("Upload a file").clicked() {
            app.show_section(Section::Upload);
        }
        return;
    }

    egui::Grid::new("my_files_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for entry in app.wallet.entries() {
                ui.label(&entry.file_name);
                ui.label(RichText::new(&entry.cid).monospace().color(muted));
                ui.end_row();
            }
        });
}

fn render_upload(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());
    ui.heading("Upload");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("Choose file...").clicked() {
            app.open_file_dialog();
        }
        match &app.upload.file {
            Some(file) => {
                ui.label(format!("{} ({} bytes)", file.name, file.size));
            }
            None => {
                ui.label(RichText::new("No file selected").color(muted));
            }
        }
    });

    ui.add_space(8.0);
    ui.label("Description");
    ui.add(
        egui::TextEdit::multiline(&mut app.upload.description)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );

    ui.label("Tags (comma separated)");
    ui.add(egui::TextEdit::singleline(&mut app.upload.tags).desired_width(f32::INFINITY));

    ui.add_space(8.0);
    let submit = egui::Button::new(RichText::new("Upload").color(Color32::WHITE))
        .fill(colors::ACCENT)
        .rounding(Rounding::same(8.0));
    if ui
        .add_enabled(!app.upload.in_flight, submit.min_size(Vec2::new(100.0, 30.0)))
        .clicked()
    {
        app.submit_upload();
    }

    if let Some(status) = &app.upload.status {
        ui.add_space(8.0);
        let color = if status.starts_with("Error") {
            colors::ERROR
        } else if status.starts_with("Success") {
            colors::SUCCESS
        } else {
            muted
        };
        ui.label(RichText::new(status).color(color));
    }
}

fn render_wallet(app: &CoLabApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());
    ui.heading("Wallet");
    ui.add_space(8.0);

    ui.label(
        RichText::new(format!("{:.4} COLAB", app.wallet.balance()))
            .size(22.0)
            .strong(),
    );
    ui.label(RichText::new("Balance from upload rewards this session").color(muted));
    ui.add_space(12.0);

    for entry in app.wallet.entries() {
        ui.horizontal(|ui| {
            ui.label(&entry.file_name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(entry.credited_at.format("%H:%M:%S").to_string())
                        .size(11.0)
                        .color(muted),
                );
                ui.label(RichText::new(format!("+{:.4}", entry.amount)).color(colors::SUCCESS));
            });
        });
    }
}
