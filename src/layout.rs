//! Bounds calculation: split the viewport into the data area and the two axis
//! label strips.
//!
//! Regions are recomputed from scratch on every resize. Negative or zero sizes are
//! kept as-is; a degenerate region simply has nothing drawn in it.

use serde::{Deserialize, Serialize};

pub const PADDING_LEFT: i32 = 30;
pub const PADDING_TOP: i32 = 15;
pub const PADDING_RIGHT: i32 = 30;
pub const PADDING_BOTTOM: i32 = 15;
/// Width reserved left of the data area for y tick text.
pub const AXIS_WIDTH: i32 = 20;
/// Height reserved under the data area for x tick text.
pub const AXIS_HEIGHT: i32 = 10;

/// Margins of the containing frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub fn uniform(v: i32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Positive-area intersection test; touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `self` lies inside `outer` (degenerate regions always do).
    pub fn within(&self, outer: &Rect) -> bool {
        self.is_degenerate()
            || (self.x >= outer.x
                && self.y >= outer.y
                && self.right() <= outer.right()
                && self.bottom() <= outer.bottom())
    }
}

/// Current display size plus the frame insets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
}

impl Viewport {
    pub fn new(width: i32, height: i32, insets: Insets) -> Self {
        Self {
            width,
            height,
            insets,
        }
    }

    /// Area inside the insets.
    pub fn content(&self) -> Rect {
        let i = self.insets;
        Rect::new(
            i.left,
            i.top,
            self.width - i.left - i.right,
            self.height - i.top - i.bottom,
        )
    }
}

/// The three drawable areas derived from a viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutRegions {
    pub data: Rect,
    pub x_labels: Rect,
    pub y_labels: Rect,
}

impl LayoutRegions {
    /// Overwrite all three regions for `viewport`.
    pub fn update(&mut self, viewport: &Viewport) {
        let i = viewport.insets;
        let left = i.left + PADDING_LEFT;
        let top = i.top + PADDING_TOP;
        let inner_width = viewport.width - i.left - i.right - PADDING_LEFT - PADDING_RIGHT;
        let inner_height = viewport.height - i.top - i.bottom - PADDING_TOP - PADDING_BOTTOM;

        self.data = Rect::new(
            left + AXIS_WIDTH,
            top,
            inner_width - AXIS_WIDTH,
            inner_height - AXIS_HEIGHT,
        );
        self.x_labels = Rect::new(
            left + AXIS_WIDTH,
            top + inner_height - AXIS_HEIGHT,
            inner_width - AXIS_WIDTH,
            AXIS_HEIGHT,
        );
        // Spans the data area too: the horizontal gridlines live in this strip.
        self.y_labels = Rect::new(
            left,
            top,
            inner_width + PADDING_RIGHT,
            inner_height - AXIS_HEIGHT,
        );
    }
}

pub fn compute_regions(viewport: &Viewport) -> LayoutRegions {
    let mut regions = LayoutRegions::default();
    regions.update(viewport);
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_ignores_shared_edges() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(0, 10, 10, 5);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(5, 5, 10, 10)));
    }

    #[test]
    fn degenerate_never_overlaps() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(2, 2, 0, 5)));
        assert!(!a.overlaps(&Rect::new(2, 2, 5, -3)));
    }

    #[test]
    fn update_overwrites_previous_values() {
        let mut r = compute_regions(&Viewport::new(720, 500, Insets::default()));
        r.update(&Viewport::new(400, 300, Insets::default()));
        assert_eq!(r, compute_regions(&Viewport::new(400, 300, Insets::default())));
    }
}
