//! Two-panel workspace layout.
//!
//! [`LayoutEngine`] owns the split between the left (conversation) panel and
//! the right (sections) panel, the collapsed state, history sidebar
//! visibility and the theme, persisting all of them as plain strings.

mod engine;
mod width;

pub use engine::{
    LayoutEngine, COLLAPSED_KEY, HISTORY_HIDDEN_KEY, LEFT_WIDTH_KEY, THEME_KEY,
};
pub use width::{PanelWidth, ParseWidthError};
