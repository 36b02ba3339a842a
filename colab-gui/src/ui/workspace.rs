//! The two-panel workspace: left conversation panel, drag handle, right
//! sections panel.

use eframe::egui::{self, CursorIcon, Rect, Sense, UiBuilder};

use crate::app::CoLabApp;
use crate::ui::{chat, colors, history, sections};

/// Width of the history sidebar inside the left panel.
const HISTORY_WIDTH: f32 = 200.0;

/// Split `container` into left, resizer and right rects.
pub fn split(container: Rect, left: f32, resizer: f32) -> (Rect, Option<Rect>, Rect) {
    let left_rect = Rect::from_min_max(
        container.min,
        egui::pos2(container.min.x + left, container.max.y),
    );
    if resizer <= 0.0 {
        let right_rect =
            Rect::from_min_max(egui::pos2(left_rect.max.x, container.min.y), container.max);
        return (left_rect, None, right_rect);
    }
    let resizer_rect = Rect::from_min_max(
        egui::pos2(left_rect.max.x, container.min.y),
        egui::pos2(left_rect.max.x + resizer, container.max.y),
    );
    let right_rect =
        Rect::from_min_max(egui::pos2(resizer_rect.max.x, container.min.y), container.max);
    (left_rect, Some(resizer_rect), right_rect)
}

/// Render the workspace into the central panel.
pub fn render(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let container = ui.max_rect();
    let container_width = container.width();
    app.last_container_width = container_width;

    let left = app.layout.left_width_px(container_width);
    let resizer = if app.layout.resizer_visible() {
        app.layout.constants().resizer_width
    } else {
        0.0
    };
    let (left_rect, resizer_rect, right_rect) = split(container, left, resizer);

    if let Some(rect) = resizer_rect {
        render_resizer(app, ui, rect, left, container_width);
    }

    let panel_bg = colors::panel_bg(ui.visuals());
    ui.painter().rect_filled(left_rect, 0.0, panel_bg);

    ui.allocate_new_ui(UiBuilder::new().max_rect(left_rect), |ui| {
        ui.set_clip_rect(left_rect);
        if app.layout.is_collapsed() {
            render_collapsed_strip(app, ui);
        } else {
            render_left_panel(app, ui);
        }
    });

    ui.allocate_new_ui(UiBuilder::new().max_rect(right_rect.shrink(8.0)), |ui| {
        ui.set_clip_rect(right_rect);
        sections::render(app, ui);
    });
}

fn render_resizer(
    app: &mut CoLabApp,
    ui: &mut egui::Ui,
    rect: Rect,
    left: f32,
    container_width: f32,
) {
    let response = ui.interact(rect, ui.id().with("drag_handle"), Sense::drag());

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.layout.begin_resize(pos.x, left);
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            app.layout.continue_resize(pos.x, container_width);
        }
    }
    if response.drag_stopped() {
        app.layout.end_resize(&app.db);
    }

    if response.hovered() || app.layout.is_resizing() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    }

    let stroke_color = if app.layout.is_resizing() {
        colors::ACCENT
    } else {
        colors::border(ui.visuals())
    };
    ui.painter().rect_filled(rect, 0.0, stroke_color);
}

fn render_collapsed_strip(app: &mut CoLabApp, ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        if ui.button("»").on_hover_text("Expand panel").clicked() {
            app.toggle_left_panel();
        }
        if ui.button("✚").on_hover_text("New chat").clicked() {
            app.new_conversation();
            app.toggle_left_panel();
        }
    });
}

fn render_left_panel(app: &mut CoLabApp, ui: &mut egui::Ui) {
    let full = ui.max_rect();
    if app.layout.history_hidden() || full.width() < HISTORY_WIDTH * 2.0 {
        chat::render(app, ui);
        return;
    }

    let (history_rect, divider, chat_rect) = split(full, HISTORY_WIDTH, 1.0);
    if let Some(divider) = divider {
        ui.painter()
            .rect_filled(divider, 0.0, colors::border(ui.visuals()));
    }

    ui.allocate_new_ui(UiBuilder::new().max_rect(history_rect.shrink(6.0)), |ui| {
        history::render(app, ui);
    });
    ui.allocate_new_ui(UiBuilder::new().max_rect(chat_rect), |ui| {
        chat::render(app, ui);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Rect {
        Rect::from_min_max(egui::pos2(0.0, 20.0), egui::pos2(1000.0, 700.0))
    }

    #[test]
    fn split_expanded_leaves_remainder_to_the_right() {
        let (left, resizer, right) = split(container(), 400.0, 6.0);
        assert_eq!(left.width(), 400.0);
        assert_eq!(resizer.unwrap().width(), 6.0);
        assert_eq!(right.width(), 594.0);
        assert_eq!(right.min.y, 20.0);
    }

    #[test]
    fn split_collapsed_has_no_resizer() {
        let (left, resizer, right) = split(container(), 50.0, 0.0);
        assert_eq!(left.width(), 50.0);
        assert!(resizer.is_none());
        assert_eq!(right.width(), 950.0);
    }
}
