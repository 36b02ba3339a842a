//! UI components for Co-Lab.

pub mod chat;
pub mod history;
pub mod menu;
pub mod sections;
pub mod settings;
pub mod status;
pub mod workspace;

use eframe::egui;

/// Convert an egui position for the overlay registry.
pub fn to_point(p: egui::Pos2) -> colab_core::Point {
    colab_core::Point::new(p.x, p.y)
}

/// Convert an egui rect for the overlay registry.
pub fn to_rect(r: egui::Rect) -> colab_core::Rect {
    colab_core::Rect::from_min_max(to_point(r.min), to_point(r.max))
}

// Theme-aware colors for the UI
pub mod colors {
    use eframe::egui::{Color32, Visuals};

    /// Accent used for user bubbles and primary buttons (same for both themes)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);

    /// Success green
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

    /// Error red
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    /// Unsaved-changes amber
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);

    /// Get assistant message background based on theme
    pub fn assistant_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(55, 55, 60)
        } else {
            Color32::from_rgb(240, 240, 245)
        }
    }

    /// Get panel background based on theme
    pub fn panel_bg(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(30, 30, 35)
        } else {
            Color32::from_rgb(248, 248, 252)
        }
    }

    /// Get muted text color based on theme
    pub fn muted(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(156, 163, 175)
        } else {
            Color32::from_rgb(100, 100, 110)
        }
    }

    /// Get border color based on theme
    pub fn border(visuals: &Visuals) -> Color32 {
        if visuals.dark_mode {
            Color32::from_rgb(70, 70, 75)
        } else {
            Color32::from_rgb(200, 200, 210)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_conversion_preserves_corners() {
        let r = egui::Rect::from_min_max(egui::pos2(1.0, 2.0), egui::pos2(30.0, 40.0));
        let converted = to_rect(r);
        assert!(converted.contains(colab_core::Point::new(15.0, 20.0)));
        assert!(!converted.contains(colab_core::Point::new(31.0, 20.0)));
    }
}
