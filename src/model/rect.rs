//! Axis-aligned rectangles in wrapper-relative coordinates

use serde::Serialize;

use crate::visibility::Dimension;

/// Axis-aligned rectangle in a coordinate space shared by element and viewport.
///
/// # Invariants
/// - `bottom == top + height`
/// - `right == left + width`
///
/// Fields are public plain data. Build through [`Rect::new`] or
/// [`Rect::moved_to`], which derive the far edges; evaluation reads the far
/// edges as given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Near vertical edge.
    pub top: f64,
    /// Far vertical edge.
    pub bottom: f64,
    /// Near horizontal edge.
    pub left: f64,
    /// Far horizontal edge.
    pub right: f64,
    /// Vertical extent.
    pub height: f64,
    /// Horizontal extent.
    pub width: f64,
}

impl Rect {
    /// Create a rectangle from its near edges and extents.
    pub fn new(top: f64, left: f64, height: f64, width: f64) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
            height,
            width,
        }
    }

    /// Same extents, near edges moved to the given position.
    pub fn moved_to(&self, top: f64, left: f64) -> Self {
        Self::new(top, left, self.height, self.width)
    }

    /// Area covered by the rectangle.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Element and viewport rectangles sharing the wrapper's origin.
///
/// `viewport` is the currently visible window onto the scrollable area,
/// not the full scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Measurements {
    /// The element being checked.
    pub element: Rect,
    /// The visible scrolled window.
    pub viewport: Rect,
}

impl Measurements {
    /// Create measurements from two rectangles.
    pub fn new(element: Rect, viewport: Rect) -> Self {
        Self { element, viewport }
    }

    /// Measurements after scrolling the viewport to `offset` along `dimension`.
    ///
    /// `Vertical` moves the top edge, `Horizontal` the left edge, `Both` moves
    /// both edges to the same offset. The element does not move.
    pub fn scrolled_to(&self, dimension: Dimension, offset: f64) -> Self {
        let vp = self.viewport;
        let viewport = match dimension {
            Dimension::Vertical => vp.moved_to(offset, vp.left),
            Dimension::Horizontal => vp.moved_to(vp.top, offset),
            Dimension::Both => vp.moved_to(offset, offset),
        };
        Self {
            element: self.element,
            viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_far_edges() {
        let rect = Rect::new(100.0, 20.0, 50.0, 30.0);
        assert_eq!(rect.bottom, 150.0);
        assert_eq!(rect.right, 50.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.width, 30.0);
    }

    #[test]
    fn constructors_keep_far_edges_consistent() {
        let rects = [
            Rect::new(-40.0, 12.5, 80.0, 0.5),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(7.0, -3.0, 1.0, 9.0).moved_to(-100.0, 250.0),
        ];
        for rect in rects {
            assert_eq!(rect.bottom, rect.top + rect.height);
            assert_eq!(rect.right, rect.left + rect.width);
        }
    }

    #[test]
    fn zero_extent_rect_collapses_edges() {
        let rect = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(rect.top, rect.bottom);
        assert_eq!(rect.left, rect.right);
        assert_eq!(rect.area(), 0.0);
    }

    #[test]
    fn moved_to_keeps_extents() {
        let rect = Rect::new(0.0, 0.0, 200.0, 300.0).moved_to(120.0, 40.0);
        assert_eq!(rect, Rect::new(120.0, 40.0, 200.0, 300.0));
    }

    mod scrolled_to {
        use super::*;

        fn sample() -> Measurements {
            Measurements::new(
                Rect::new(100.0, 0.0, 50.0, 50.0),
                Rect::new(0.0, 0.0, 200.0, 300.0),
            )
        }

        #[test]
        fn vertical_moves_only_top() {
            let m = sample().scrolled_to(Dimension::Vertical, 120.0);
            assert_eq!(m.viewport.top, 120.0);
            assert_eq!(m.viewport.bottom, 320.0);
            assert_eq!(m.viewport.left, 0.0);
            assert_eq!(m.element, sample().element);
        }

        #[test]
        fn horizontal_moves_only_left() {
            let m = sample().scrolled_to(Dimension::Horizontal, 75.0);
            assert_eq!(m.viewport.top, 0.0);
            assert_eq!(m.viewport.left, 75.0);
            assert_eq!(m.viewport.right, 375.0);
        }

        #[test]
        fn both_moves_both_edges() {
            let m = sample().scrolled_to(Dimension::Both, 300.0);
            assert_eq!(m.viewport.top, 300.0);
            assert_eq!(m.viewport.left, 300.0);
        }
    }
}
