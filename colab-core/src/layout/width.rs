//! Stored panel widths.
//!
//! Widths are persisted as CSS-style length strings: `"412px"` once the
//! user has dragged or collapsed the panel, `"50%"` before that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Width of the left panel as it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PanelWidth {
    /// Absolute width in pixels.
    Pixels(f32),
    /// Fraction of the container, `0.0..=100.0`.
    Percent(f32),
}

impl Default for PanelWidth {
    fn default() -> Self {
        Self::Percent(50.0)
    }
}

impl PanelWidth {
    /// Resolve to pixels inside a container of the given width.
    pub fn resolve(self, container_width: f32) -> f32 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => container_width * pct / 100.0,
        }
    }
}

impl fmt::Display for PanelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Why a stored width string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid panel width: {0:?}")]
pub struct ParseWidthError(pub String);

impl FromStr for PanelWidth {
    type Err = ParseWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseWidthError(s.to_string());

        let (number, make): (&str, fn(f32) -> PanelWidth) =
            if let Some(n) = trimmed.strip_suffix("px") {
                (n, PanelWidth::Pixels)
            } else if let Some(n) = trimmed.strip_suffix('%') {
                (n, PanelWidth::Percent)
            } else {
                return Err(invalid());
            };

        let value: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(make(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixels_and_percent() {
        assert_eq!("412px".parse::<PanelWidth>(), Ok(PanelWidth::Pixels(412.0)));
        assert_eq!(" 33.5% ".parse::<PanelWidth>(), Ok(PanelWidth::Percent(33.5)));
    }

    #[test]
    fn test_parse_rejects_other_units_and_garbage() {
        assert!("12em".parse::<PanelWidth>().is_err());
        assert!("px".parse::<PanelWidth>().is_err());
        assert!("-4px".parse::<PanelWidth>().is_err());
        assert!("".parse::<PanelWidth>().is_err());
    }

    #[test]
    fn test_display_matches_stored_form() {
        assert_eq!(PanelWidth::Pixels(400.0).to_string(), "400px");
        assert_eq!(PanelWidth::Pixels(412.5).to_string(), "412.5px");
        assert_eq!(PanelWidth::default().to_string(), "50%");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(PanelWidth::Percent(50.0).resolve(1000.0), 500.0);
        assert_eq!(PanelWidth::Pixels(320.0).resolve(1000.0), 320.0);
    }
}
