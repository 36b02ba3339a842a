//! Dismissible overlay registry.
//!
//! Dropdown menus register here instead of each installing its own
//! outside-click handler. The GUI forwards every primary pointer press to
//! [`OverlayRegistry::dismiss_outside`], which closes each open overlay
//! whose anchor and popup both miss the press.

use std::collections::BTreeMap;

/// A point in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Overlays known to the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayId {
    ProfileMenu,
    UploadMenu,
}

#[derive(Debug, Clone, Default)]
struct OverlayEntry {
    open: bool,
    /// Button that opens the overlay.
    anchor: Option<Rect>,
    /// The popup itself, once it has been laid out.
    popup: Option<Rect>,
}

impl OverlayEntry {
    fn hit(&self, p: Point) -> bool {
        self.anchor.is_some_and(|r| r.contains(p)) || self.popup.is_some_and(|r| r.contains(p))
    }
}

/// Open/closed state and hit regions of every overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    entries: BTreeMap<OverlayId, OverlayEntry>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open, close, or flip an overlay. Returns whether it is now open.
    pub fn toggle(&mut self, id: OverlayId, show: Option<bool>) -> bool {
        let entry = self.entries.entry(id).or_default();
        entry.open = show.unwrap_or(!entry.open);
        if !entry.open {
            entry.popup = None;
        }
        entry.open
    }

    pub fn is_open(&self, id: OverlayId) -> bool {
        self.entries.get(&id).is_some_and(|e| e.open)
    }

    /// Record where the overlay's anchor button was drawn this frame.
    pub fn set_anchor(&mut self, id: OverlayId, anchor: Rect) {
        self.entries.entry(id).or_default().anchor = Some(anchor);
    }

    /// Where the anchor was last drawn.
    pub fn anchor(&self, id: OverlayId) -> Option<Rect> {
        self.entries.get(&id).and_then(|e| e.anchor)
    }

    /// Record where the open popup was drawn this frame.
    pub fn set_popup(&mut self, id: OverlayId, popup: Rect) {
        self.entries.entry(id).or_default().popup = Some(popup);
    }

    /// Close every overlay, e.g. on Escape or sign-out.
    pub fn close_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.open = false;
            entry.popup = None;
        }
    }

    /// Close every open overlay that does not contain `p`.
    ///
    /// Returns the overlays that were closed.
    pub fn dismiss_outside(&mut self, p: Point) -> Vec<OverlayId> {
        let mut closed = Vec::new();
        for (id, entry) in self.entries.iter_mut() {
            if entry.open && !entry.hit(p) {
                entry.open = false;
                entry.popup = None;
                closed.push(*id);
            }
        }
        if !closed.is_empty() {
            tracing::debug!(?closed, "Dismissed overlays");
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_min_max(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn registry() -> OverlayRegistry {
        let mut reg = OverlayRegistry::new();
        reg.set_anchor(OverlayId::ProfileMenu, rect(900.0, 0.0, 940.0, 30.0));
        reg.set_anchor(OverlayId::UploadMenu, rect(100.0, 700.0, 140.0, 730.0));
        reg
    }

    #[test]
    fn test_toggle_flips_and_sets() {
        let mut reg = registry();
        assert!(!reg.is_open(OverlayId::ProfileMenu));
        assert!(reg.toggle(OverlayId::ProfileMenu, None));
        assert!(!reg.toggle(OverlayId::ProfileMenu, None));
        assert!(reg.toggle(OverlayId::ProfileMenu, Some(true)));
        assert!(reg.toggle(OverlayId::ProfileMenu, Some(true)));
    }

    #[test]
    fn test_click_outside_closes_open_overlays() {
        let mut reg = registry();
        reg.toggle(OverlayId::ProfileMenu, Some(true));
        reg.toggle(OverlayId::UploadMenu, Some(true));

        let closed = reg.dismiss_outside(Point::new(500.0, 400.0));
        assert_eq!(closed, vec![OverlayId::ProfileMenu, OverlayId::UploadMenu]);
        assert!(!reg.is_open(OverlayId::ProfileMenu));
        assert!(!reg.is_open(OverlayId::UploadMenu));
    }

    #[test]
    fn test_click_on_anchor_or_popup_keeps_overlay() {
        let mut reg = registry();
        reg.toggle(OverlayId::ProfileMenu, Some(true));
        reg.set_popup(OverlayId::ProfileMenu, rect(760.0, 30.0, 940.0, 150.0));

        assert!(reg.dismiss_outside(Point::new(920.0, 10.0)).is_empty());
        assert!(reg.dismiss_outside(Point::new(800.0, 100.0)).is_empty());
        assert!(reg.is_open(OverlayId::ProfileMenu));
    }

    #[test]
    fn test_click_inside_one_overlay_closes_the_other() {
        let mut reg = registry();
        reg.toggle(OverlayId::ProfileMenu, Some(true));
        reg.toggle(OverlayId::UploadMenu, Some(true));

        let closed = reg.dismiss_outside(Point::new(120.0, 710.0));
        assert_eq!(closed, vec![OverlayId::ProfileMenu]);
        assert!(reg.is_open(OverlayId::UploadMenu));
    }

    #[test]
    fn test_anchor_is_remembered() {
        let reg = registry();
        assert_eq!(
            reg.anchor(OverlayId::UploadMenu),
            Some(rect(100.0, 700.0, 140.0, 730.0))
        );
        assert_eq!(OverlayRegistry::new().anchor(OverlayId::UploadMenu), None);
    }

    #[test]
    fn test_closed_overlays_are_not_reported() {
        let mut reg = registry();
        assert!(reg.dismiss_outside(Point::new(1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_close_all_clears_popups_but_keeps_anchors() {
        let mut reg = registry();
        reg.toggle(OverlayId::ProfileMenu, Some(true));
        reg.set_popup(OverlayId::ProfileMenu, rect(760.0, 30.0, 940.0, 150.0));
        reg.toggle(OverlayId::UploadMenu, Some(true));
        reg.close_all();
        assert!(!reg.is_open(OverlayId::ProfileMenu));
        assert!(!reg.is_open(OverlayId::UploadMenu));

        // Reopening works from the retained anchor; a press on it is not "outside".
        reg.toggle(OverlayId::ProfileMenu, Some(true));
        assert!(reg.dismiss_outside(Point::new(920.0, 10.0)).is_empty());
        assert!(reg.is_open(OverlayId::ProfileMenu));
    }
}
