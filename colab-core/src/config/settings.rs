//! Theme selection and layout constants for Co-Lab.
//!
//! The theme is persisted as a plain `light` / `dark` string. Layout
//! constants have named defaults and may be overridden from the store.

use serde::{Deserialize, Serialize};

use crate::store::PreferenceStore;

// =============================================================================
// Theme Selection
// =============================================================================

/// App theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (the default when nothing is stored)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl Theme {
    /// The value written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a stored value. Anything other than `light` is dark.
    pub fn from_stored(value: &str) -> Self {
        if value == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// The other theme.
    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Logo asset shown in the header for this theme.
    pub fn logo_asset(self) -> &'static str {
        match self {
            Self::Dark => "assets/Co-Lab_Logo_Dark.png",
            Self::Light => "assets/Co-Lab_Logo_Light.png",
        }
    }

    /// Label of the menu entry that switches away from this theme.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Toggle Light Mode",
            Self::Light => "Toggle Dark Mode",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "Dark"),
            Self::Light => write!(f, "Light"),
        }
    }
}

// =============================================================================
// Layout Constants
// =============================================================================

/// Width of the left panel when collapsed to its icon strip.
pub const DEFAULT_COLLAPSED_WIDTH: f32 = 50.0;

/// Narrowest the left panel may be dragged while expanded.
pub const DEFAULT_MIN_LEFT_WIDTH: f32 = 250.0;

/// Narrowest the right panel may become while dragging.
pub const DEFAULT_MIN_RIGHT_WIDTH: f32 = 350.0;

/// Gap kept between a dragged panel and the collapsed width.
pub const DEFAULT_COLLAPSE_BUFFER: f32 = 20.0;

/// Width of the drag handle between the panels.
pub const DEFAULT_RESIZER_WIDTH: f32 = 6.0;

/// Narrowest panel container the window allows. Both panel minimums and the
/// resizer must fit inside it.
pub const MIN_CONTAINER_WIDTH: f32 = 760.0;

/// Store key prefix for layout constant overrides.
const LAYOUT_KEY_PREFIX: &str = "colab.layout.";

/// Geometry constants consumed by the layout engine, all in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    pub collapsed_width: f32,
    pub min_left_width: f32,
    pub min_right_width: f32,
    pub collapse_buffer: f32,
    pub resizer_width: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            collapsed_width: DEFAULT_COLLAPSED_WIDTH,
            min_left_width: DEFAULT_MIN_LEFT_WIDTH,
            min_right_width: DEFAULT_MIN_RIGHT_WIDTH,
            collapse_buffer: DEFAULT_COLLAPSE_BUFFER,
            resizer_width: DEFAULT_RESIZER_WIDTH,
        }
    }
}

impl LayoutConstants {
    /// Load constants, applying any `colab.layout.*` overrides from the store.
    ///
    /// Missing or unparseable overrides keep their default. The result is
    /// validated before it is returned.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut constants = Self::default();

        for (name, slot) in [
            ("collapsed_width", &mut constants.collapsed_width),
            ("min_left_width", &mut constants.min_left_width),
            ("min_right_width", &mut constants.min_right_width),
            ("collapse_buffer", &mut constants.collapse_buffer),
            ("resizer_width", &mut constants.resizer_width),
        ] {
            let key = format!("{LAYOUT_KEY_PREFIX}{name}");
            match store.get(&key) {
                Ok(Some(raw)) => match raw.trim().trim_end_matches("px").parse::<f32>() {
                    Ok(value) => *slot = value,
                    Err(e) => {
                        tracing::warn!(key = %key, value = %raw, error = %e, "Ignoring invalid layout override");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to read layout override");
                }
            }
        }

        constants.validate();
        constants
    }

    /// Repair values that would break the layout math.
    ///
    /// Non-finite or negative values fall back to their defaults, and the
    /// minimum left width is never below the collapsed width. A record whose
    /// minimums cannot fit in [`MIN_CONTAINER_WIDTH`] is replaced by the
    /// defaults.
    pub fn validate(&mut self) {
        fn repair(value: &mut f32, default: f32) {
            if !value.is_finite() || *value < 0.0 {
                *value = default;
            }
        }

        repair(&mut self.collapsed_width, DEFAULT_COLLAPSED_WIDTH);
        repair(&mut self.min_left_width, DEFAULT_MIN_LEFT_WIDTH);
        repair(&mut self.min_right_width, DEFAULT_MIN_RIGHT_WIDTH);
        repair(&mut self.collapse_buffer, DEFAULT_COLLAPSE_BUFFER);
        repair(&mut self.resizer_width, DEFAULT_RESIZER_WIDTH);

        if self.min_left_width < self.collapsed_width {
            self.min_left_width = self.collapsed_width;
        }

        let required = self.drag_floor() + self.resizer_width + self.min_right_width;
        if required > MIN_CONTAINER_WIDTH {
            tracing::warn!(
                required,
                available = MIN_CONTAINER_WIDTH,
                "Layout overrides do not fit the minimum window, using defaults"
            );
            *self = Self::default();
        }
    }

    /// Smallest width a drag may produce before the right-panel clamp.
    pub fn drag_floor(&self) -> f32 {
        (self.collapsed_width + self.collapse_buffer).max(self.min_left_width)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, PreferenceStore};

    // -------------------------------------------------------------------------
    // Theme Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_theme_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_theme_serialization_uses_stored_names() {
        let json = serde_json::to_string(&Theme::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let parsed: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, Theme::Dark);
    }

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("solarized"), Theme::Dark);
    }

    #[test]
    fn test_theme_assets_and_labels() {
        assert_eq!(Theme::Dark.logo_asset(), "assets/Co-Lab_Logo_Dark.png");
        assert_eq!(Theme::Light.logo_asset(), "assets/Co-Lab_Logo_Light.png");
        assert_eq!(Theme::Dark.toggle_label(), "Toggle Light Mode");
        assert_eq!(Theme::Light.toggle_label(), "Toggle Dark Mode");
        assert_eq!(Theme::Light.flipped().flipped(), Theme::Light);
    }

    // -------------------------------------------------------------------------
    // Layout Constants Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_constants_default() {
        let c = LayoutConstants::default();
        assert_eq!(c.collapsed_width, 50.0);
        assert_eq!(c.min_left_width, 250.0);
        assert_eq!(c.min_right_width, 350.0);
        assert_eq!(c.collapse_buffer, 20.0);
        assert_eq!(c.drag_floor(), 250.0);
    }

    #[test]
    fn test_constants_load_applies_overrides() {
        let store = MemoryStore::new();
        store.set("colab.layout.min_left_width", "300px").unwrap();
        store.set("colab.layout.min_right_width", "400").unwrap();

        let c = LayoutConstants::load(&store);
        assert_eq!(c.min_left_width, 300.0);
        assert_eq!(c.min_right_width, 400.0);
        assert_eq!(c.collapsed_width, DEFAULT_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_constants_load_ignores_garbage() {
        let store = MemoryStore::new();
        store.set("colab.layout.collapsed_width", "wide").unwrap();

        let c = LayoutConstants::load(&store);
        assert_eq!(c.collapsed_width, DEFAULT_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_constants_load_from_failing_store_uses_defaults() {
        let c = LayoutConstants::load(&MemoryStore::failing());
        assert_eq!(c, LayoutConstants::default());
    }

    #[test]
    fn test_constants_validate_repairs_values() {
        let mut c = LayoutConstants {
            collapsed_width: f32::NAN,
            min_left_width: 10.0,
            min_right_width: -5.0,
            collapse_buffer: 20.0,
            resizer_width: f32::INFINITY,
        };
        c.validate();
        assert_eq!(c.collapsed_width, DEFAULT_COLLAPSED_WIDTH);
        assert_eq!(c.min_left_width, DEFAULT_COLLAPSED_WIDTH);
        assert_eq!(c.min_right_width, DEFAULT_MIN_RIGHT_WIDTH);
        assert_eq!(c.resizer_width, DEFAULT_RESIZER_WIDTH);
    }

    #[test]
    fn test_constants_load_rejects_minimums_wider_than_window() {
        let store = MemoryStore::new();
        store.set("colab.layout.min_right_width", "900").unwrap();

        let c = LayoutConstants::load(&store);
        assert_eq!(c, LayoutConstants::default());
    }

    #[test]
    fn test_constants_validate_keeps_overrides_that_just_fit() {
        let mut c = LayoutConstants {
            min_right_width: MIN_CONTAINER_WIDTH - DEFAULT_MIN_LEFT_WIDTH - DEFAULT_RESIZER_WIDTH,
            ..LayoutConstants::default()
        };
        let expected = c;
        c.validate();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_drag_floor_prefers_buffered_collapsed_width() {
        let c = LayoutConstants {
            collapsed_width: 100.0,
            min_left_width: 110.0,
            ..LayoutConstants::default()
        };
        assert_eq!(c.drag_floor(), 120.0);
    }
}
