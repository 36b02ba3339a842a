//! Panel layout engine.
//!
//! Owns the left/right split, the collapsed flag, history sidebar
//! visibility and the theme, and keeps them in sync with the preference
//! store. Every store access is best-effort: failures are logged and the
//! in-memory state carries on.

use tracing::{debug, warn};

use super::width::PanelWidth;
use crate::config::{LayoutConstants, Theme};
use crate::store::{flag_value, get_flag, PreferenceStore};

/// Store key for the theme preference.
pub const THEME_KEY: &str = "coLabThemePreference";
/// Store key for the expanded left panel width.
pub const LEFT_WIDTH_KEY: &str = "coLabLeftPanelWidth";
/// Store key for the collapsed flag.
pub const COLLAPSED_KEY: &str = "coLabLeftPanelCollapsed";
/// Store key for the history sidebar hidden flag.
pub const HISTORY_HIDDEN_KEY: &str = "coLabHistorySidebarHidden";

/// Origin of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    origin_x: f32,
    origin_width: f32,
    restore: PanelWidth,
}

/// Layout state for one workspace window.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    constants: LayoutConstants,
    theme: Theme,
    collapsed: bool,
    /// The user's own history preference; collapsing hides the sidebar
    /// without touching it.
    history_pref_hidden: bool,
    /// Width used while expanded.
    width: PanelWidth,
    drag: Option<DragState>,
}

impl LayoutEngine {
    /// Build the layout from whatever the store holds.
    ///
    /// Absent keys fall back to dark theme, an expanded panel at 50% and a
    /// visible history sidebar.
    pub fn initialize(store: &dyn PreferenceStore, constants: LayoutConstants) -> Self {
        let theme = read(store, THEME_KEY)
            .map(|v| Theme::from_stored(&v))
            .unwrap_or_default();
        let collapsed = get_flag(store, COLLAPSED_KEY);
        let history_pref_hidden = get_flag(store, HISTORY_HIDDEN_KEY);
        let width = read_width(store).unwrap_or_default();

        debug!(%theme, collapsed, history_pref_hidden, %width, "Layout initialized");

        Self {
            constants,
            theme,
            collapsed,
            history_pref_hidden,
            width,
            drag: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn constants(&self) -> &LayoutConstants {
        &self.constants
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Whether the history sidebar is hidden. Always true while collapsed.
    pub fn history_hidden(&self) -> bool {
        self.collapsed || self.history_pref_hidden
    }

    /// Label for the history toggle affordance.
    pub fn history_toggle_label(&self) -> &'static str {
        if self.history_hidden() {
            "Show History"
        } else {
            "Hide History"
        }
    }

    /// The width the panel has, or will get back, while expanded.
    pub fn expanded_width(&self) -> PanelWidth {
        self.width
    }

    pub fn resizer_visible(&self) -> bool {
        !self.collapsed
    }

    pub fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    /// Rendered left panel width in pixels.
    ///
    /// The expanded width goes through [`clamp_width`](Self::clamp_width) so a
    /// width saved in a wider window still leaves the right panel its
    /// minimum. The stored width is left alone.
    pub fn left_width_px(&self, container_width: f32) -> f32 {
        if self.collapsed {
            self.constants.collapsed_width
        } else {
            self.clamp_width(self.width.resolve(container_width), container_width)
        }
    }

    /// Rendered right panel width: whatever the left panel and the resizer
    /// leave over.
    pub fn right_width_px(&self, container_width: f32) -> f32 {
        let used = if self.collapsed {
            self.constants.collapsed_width
        } else {
            self.left_width_px(container_width) + self.constants.resizer_width
        };
        (container_width - used).max(0.0)
    }

    // =========================================================================
    // Collapse
    // =========================================================================

    /// Collapse or expand the left panel. Returns the new collapsed state.
    ///
    /// `measured_left_px` is the width the panel currently renders at; it is
    /// snapshotted into the store when collapsing from expanded. A zero
    /// measurement (panel not laid out yet) keeps the previously stored
    /// width, or `50%`.
    pub fn toggle_collapse(
        &mut self,
        store: &dyn PreferenceStore,
        target: Option<bool>,
        measured_left_px: f32,
    ) -> bool {
        let collapse = target.unwrap_or(!self.collapsed);

        if collapse {
            if !self.collapsed {
                let snapshot = if measured_left_px > 0.0 {
                    PanelWidth::Pixels(measured_left_px)
                } else {
                    read_width(store).unwrap_or_default()
                };
                self.width = snapshot;
                write(store, LEFT_WIDTH_KEY, &snapshot.to_string());
            }
            self.drag = None;
            self.collapsed = true;
            write(store, COLLAPSED_KEY, flag_value(true));
        } else {
            self.width = match store.get(LEFT_WIDTH_KEY) {
                Ok(Some(raw)) => raw.parse::<PanelWidth>().unwrap_or_default(),
                Ok(None) => PanelWidth::default(),
                Err(e) => {
                    warn!(error = %e, "Failed to read stored width, keeping last known width");
                    self.width
                }
            };
            self.collapsed = false;
            write(store, COLLAPSED_KEY, flag_value(false));

            match store.get(HISTORY_HIDDEN_KEY) {
                Ok(value) => self.history_pref_hidden = value.as_deref() == Some("true"),
                Err(e) => warn!(error = %e, "Failed to read history flag, keeping last known"),
            }
        }

        debug!(collapsed = self.collapsed, width = %self.width, "Left panel toggled");
        self.collapsed
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Start a drag at `pointer_x`. Ignored while collapsed.
    ///
    /// Returns whether a drag is now active.
    pub fn begin_resize(&mut self, pointer_x: f32, current_left_px: f32) -> bool {
        if self.collapsed {
            return false;
        }
        self.drag = Some(DragState {
            origin_x: pointer_x,
            origin_width: current_left_px,
            restore: self.width,
        });
        true
    }

    /// Follow the pointer. Returns the applied left width, or `None` when no
    /// drag is active.
    pub fn continue_resize(&mut self, pointer_x: f32, container_width: f32) -> Option<f32> {
        let drag = self.drag?;
        let candidate = drag.origin_width + (pointer_x - drag.origin_x);
        let width = self.clamp_width(candidate, container_width);
        self.width = PanelWidth::Pixels(width);
        Some(width)
    }

    /// Clamp a candidate drag width.
    ///
    /// The collapsed buffer and left minimum apply first, then the right
    /// minimum. A container too narrow for both minimums favors the right
    /// panel, but never below `collapsed_width + collapse_buffer`.
    pub fn clamp_width(&self, candidate: f32, container_width: f32) -> f32 {
        let c = &self.constants;
        let mut width = candidate.max(c.drag_floor());

        if container_width - width - c.resizer_width < c.min_right_width {
            width = container_width - c.min_right_width - c.resizer_width;
        }
        width.max(c.collapsed_width + c.collapse_buffer)
    }

    /// Finish a drag, persisting the width unless the panel is collapsed.
    ///
    /// Returns false when no drag was active.
    pub fn end_resize(&mut self, store: &dyn PreferenceStore) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        if !self.collapsed {
            write(store, LEFT_WIDTH_KEY, &self.width.to_string());
        }
        debug!(width = %self.width, "Resize finished");
        true
    }

    /// Abandon a drag (pointer lost, window blurred) and put the width back
    /// where the drag started. Nothing is persisted.
    pub fn cancel_resize(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                self.width = drag.restore;
                debug!(width = %self.width, "Resize cancelled");
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // History Sidebar & Theme
    // =========================================================================

    /// Hide or show the history sidebar. Returns whether it is now hidden.
    ///
    /// While collapsed the preference is recorded but the sidebar stays
    /// hidden until the panel expands.
    pub fn toggle_history(&mut self, store: &dyn PreferenceStore, target: Option<bool>) -> bool {
        let hide = target.unwrap_or(!self.history_hidden());
        self.history_pref_hidden = hide;
        write(store, HISTORY_HIDDEN_KEY, flag_value(hide));
        debug!(hidden = self.history_hidden(), "History sidebar toggled");
        self.history_hidden()
    }

    /// Switch to the other theme and persist it.
    pub fn toggle_theme(&mut self, store: &dyn PreferenceStore) -> Theme {
        self.theme = self.theme.flipped();
        write(store, THEME_KEY, self.theme.as_str());
        debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }
}

fn read(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read preference");
            None
        }
    }
}

fn read_width(store: &dyn PreferenceStore) -> Option<PanelWidth> {
    let raw = read(store, LEFT_WIDTH_KEY)?;
    match raw.parse() {
        Ok(width) => Some(width),
        Err(e) => {
            warn!(error = %e, "Ignoring stored panel width");
            None
        }
    }
}

fn write(store: &dyn PreferenceStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key = %key, error = %e, "Failed to persist preference");
    }
}

// =============================================================================
// Tests
// =============================================================================
