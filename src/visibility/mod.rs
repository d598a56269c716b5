//! Visibility checks.
//!
//! Entry point for callers: pick a [`Dimension`], optionally a viewport and
//! wrapper, then run the check against a [`Document`] that supplies the
//! defaults (top-level window, root content container).
//!
//! ```
//! use inviewport::model::{Measurements, Rect};
//! use inviewport::visibility::{Dimension, ZeroExtentPolicy};
//!
//! let m = Measurements::new(
//!     Rect::new(100.0, 0.0, 50.0, 50.0),
//!     Rect::new(120.0, 0.0, 200.0, 300.0),
//! );
//! let result = Dimension::Vertical.evaluate(&m, ZeroExtentPolicy::Propagate);
//! assert!(result.visible());
//! assert_eq!(result.percent_visible(), 0.6);
//! ```

pub mod axis;
pub mod combine;
pub mod sweep;

pub use axis::{evaluate_axis, Axis, AxisDetails, AxisResult, Span, ZeroExtentPolicy};
pub use combine::{combine_both, CombinedDetails, CombinedResult};
pub use sweep::{ScrollSweep, SweepError, SweepFrame};

use serde::Serialize;
use tracing::warn;

use crate::measure::{extract, Measurable, Viewport, WindowMetrics};
use crate::model::{MeasureError, Measurements};

/// Which axes a check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Top/bottom only.
    #[default]
    Vertical,
    /// Left/right only.
    Horizontal,
    /// Both axes, composed multiplicatively.
    Both,
}

impl Dimension {
    /// Parse a dimension name exactly (`vertical`, `horizontal`, `both`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "vertical" => Some(Dimension::Vertical),
            "horizontal" => Some(Dimension::Horizontal),
            "both" => Some(Dimension::Both),
            _ => None,
        }
    }

    /// Parse a dimension name, falling back to `Vertical`.
    ///
    /// Missing and unrecognised names are not errors.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None => Dimension::default(),
            Some(name) => Self::parse(name).unwrap_or_else(|| {
                warn!(name, "Unrecognised dimension, using vertical");
                Dimension::default()
            }),
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Vertical => "vertical",
            Dimension::Horizontal => "horizontal",
            Dimension::Both => "both",
        }
    }

    /// Route measurements to the single-axis evaluator or the combiner.
    pub fn evaluate(self, measurements: &Measurements, policy: ZeroExtentPolicy) -> Visibility {
        match self {
            Dimension::Vertical => {
                Visibility::Axis(evaluate_axis(measurements, Axis::Vertical, policy))
            }
            Dimension::Horizontal => {
                Visibility::Axis(evaluate_axis(measurements, Axis::Horizontal, policy))
            }
            Dimension::Both => Visibility::Both(combine_both(measurements, policy)),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result record of a check.
///
/// Serialises as the bare single-axis or combined record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Visibility {
    /// `vertical` or `horizontal` check.
    Axis(AxisResult),
    /// `both` check.
    Both(CombinedResult),
}

impl Visibility {
    /// Any part of the element is visible.
    pub fn visible(&self) -> bool {
        match self {
            Visibility::Axis(r) => r.visible,
            Visibility::Both(r) => r.visible,
        }
    }

    /// Fraction of the element that is visible.
    pub fn percent_visible(&self) -> f64 {
        match self {
            Visibility::Axis(r) => r.percent_visible,
            Visibility::Both(r) => r.percent_visible,
        }
    }

    /// Fraction of the viewport the element occupies.
    pub fn percent_of_viewport(&self) -> f64 {
        match self {
            Visibility::Axis(r) => r.percent_of_viewport,
            Visibility::Both(r) => r.percent_of_viewport,
        }
    }
}

/// Supplies the defaults for a check.
pub trait Document {
    /// The top-level window, default viewport.
    fn window(&self) -> &dyn WindowMetrics;

    /// The root content container, default wrapper.
    fn root(&self) -> &dyn Measurable;
}

/// A configured visibility check for one element.
///
/// Unset options take their documented defaults:
/// dimension `Vertical`, viewport the document's window, wrapper the
/// document's root container, zero-extent policy `Propagate`.
#[derive(Clone, Copy)]
pub struct VisibilityCheck<'a> {
    element: &'a dyn Measurable,
    dimension: Dimension,
    viewport: Option<Viewport<'a>>,
    wrapper: Option<&'a dyn Measurable>,
    policy: ZeroExtentPolicy,
}

impl<'a> VisibilityCheck<'a> {
    /// Check `element` with all defaults.
    pub fn new(element: &'a dyn Measurable) -> Self {
        Self {
            element,
            dimension: Dimension::default(),
            viewport: None,
            wrapper: None,
            policy: ZeroExtentPolicy::default(),
        }
    }

    /// Set the dimension.
    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the dimension by name, leniently (see [`Dimension::from_name`]).
    pub fn dimension_name(self, name: Option<&str>) -> Self {
        self.dimension(Dimension::from_name(name))
    }

    /// Check against a specific viewport instead of the window.
    pub fn viewport(mut self, viewport: Viewport<'a>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Measure relative to a specific wrapper instead of the root container.
    pub fn wrapper(mut self, wrapper: &'a dyn Measurable) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Set the zero-extent policy.
    pub fn zero_extent(mut self, policy: ZeroExtentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The dimension this check will evaluate.
    pub fn selected_dimension(&self) -> Dimension {
        self.dimension
    }

    /// Extract measurements, filling defaults from `document`.
    ///
    /// # Errors
    ///
    /// Measurement failures propagate unchanged.
    pub fn measure(&self, document: &dyn Document) -> Result<Measurements, MeasureError> {
        let viewport = match self.viewport {
            Some(viewport) => viewport,
            None => Viewport::Window(document.window()),
        };
        let wrapper = match self.wrapper {
            Some(wrapper) => wrapper,
            None => document.root(),
        };
        extract(viewport, wrapper, self.element)
    }

    /// Measure and evaluate.
    ///
    /// # Errors
    ///
    /// Measurement failures propagate unchanged; there are no partial results.
    pub fn run(&self, document: &dyn Document) -> Result<Visibility, MeasureError> {
        let measurements = self.measure(document)?;
        Ok(self.dimension.evaluate(&measurements, self.policy))
    }
}

/// Check visibility of `element` in one call.
///
/// `dimension` is matched leniently; `viewport` and `wrapper` default to the
/// document's window and root container.
///
/// # Errors
///
/// Measurement failures propagate unchanged.
pub fn check(
    document: &dyn Document,
    dimension: Option<&str>,
    viewport: Option<Viewport<'_>>,
    wrapper: Option<&dyn Measurable>,
    element: &dyn Measurable,
) -> Result<Visibility, MeasureError> {
    let mut request = VisibilityCheck::new(element).dimension_name(dimension);
    if let Some(viewport) = viewport {
        request = request.viewport(viewport);
    }
    if let Some(wrapper) = wrapper {
        request = request.wrapper(wrapper);
    }
    request.run(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Position;
    use crate::model::Rect;

    struct Node {
        top: f64,
        left: f64,
        height: f64,
        width: f64,
        scroll: (f64, f64),
    }

    fn node(top: f64, left: f64, height: f64, width: f64) -> Node {
        Node {
            top,
            left,
            height,
            width,
            scroll: (0.0, 0.0),
        }
    }

    impl Measurable for Node {
        fn height(&self) -> Result<f64, MeasureError> {
            Ok(self.height)
        }
        fn width(&self) -> Result<f64, MeasureError> {
            Ok(self.width)
        }
        fn position(&self) -> Result<Position, MeasureError> {
            Ok(Position::new(self.top, self.left))
        }
        fn scroll_top(&self) -> Result<f64, MeasureError> {
            Ok(self.scroll.0)
        }
        fn scroll_left(&self) -> Result<f64, MeasureError> {
            Ok(self.scroll.1)
        }
    }

    struct Page {
        scroll: (f64, f64),
        body: Node,
    }

    impl WindowMetrics for Page {
        fn height(&self) -> Result<f64, MeasureError> {
            Ok(200.0)
        }
        fn width(&self) -> Result<f64, MeasureError> {
            Ok(300.0)
        }
        fn page_offset(&self, axis: Axis) -> Option<f64> {
            Some(match axis {
                Axis::Vertical => self.scroll.0,
                Axis::Horizontal => self.scroll.1,
            })
        }
        fn document_element_scroll(&self, _axis: Axis) -> Option<f64> {
            Some(0.0)
        }
        fn body_parent_scroll(&self, _axis: Axis) -> Option<f64> {
            None
        }
        fn body_scroll(&self, _axis: Axis) -> Option<f64> {
            None
        }
    }

    impl Document for Page {
        fn window(&self) -> &dyn WindowMetrics {
            self
        }
        fn root(&self) -> &dyn Measurable {
            &self.body
        }
    }

    fn page(scroll_top: f64) -> Page {
        Page {
            scroll: (scroll_top, 0.0),
            body: node(8.0, 8.0, 2000.0, 300.0),
        }
    }

    mod dimension {
        use super::*;

        #[test]
        fn parse_accepts_known_names() {
            assert_eq!(Dimension::parse("vertical"), Some(Dimension::Vertical));
            assert_eq!(Dimension::parse("horizontal"), Some(Dimension::Horizontal));
            assert_eq!(Dimension::parse("both"), Some(Dimension::Both));
        }

        #[test]
        fn parse_is_case_sensitive() {
            assert_eq!(Dimension::parse("Both"), None);
        }

        #[test]
        fn missing_name_defaults_to_vertical() {
            assert_eq!(Dimension::from_name(None), Dimension::Vertical);
        }

        #[test]
        fn unknown_name_falls_back_to_vertical() {
            assert_eq!(Dimension::from_name(Some("diagonal")), Dimension::Vertical);
            assert_eq!(Dimension::from_name(Some("")), Dimension::Vertical);
        }

        #[test]
        fn display_matches_name() {
            assert_eq!(Dimension::Both.to_string(), "both");
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn defaults_use_window_and_root() {
            let document = page(120.0);
            // 100 below the body's origin
            let element = node(108.0, 8.0, 50.0, 50.0);

            let result = check(&document, None, None, None, &element).unwrap();

            assert!(matches!(result, Visibility::Axis(r) if r.details.axis == Axis::Vertical));
            assert_eq!(result.percent_visible(), 0.6);
            assert_eq!(result.percent_of_viewport(), 0.15);
            assert!(result.visible());
        }

        #[test]
        fn explicit_viewport_and_wrapper_override_defaults() {
            let document = page(0.0);
            let wrapper = node(0.0, 0.0, 1000.0, 1000.0);
            let mut container = node(0.0, 0.0, 100.0, 100.0);
            container.scroll = (200.0, 0.0);
            let element = node(0.0, 0.0, 50.0, 50.0);

            let result = check(
                &document,
                Some("vertical"),
                Some(Viewport::Element(&container)),
                Some(&wrapper),
                &element,
            )
            .unwrap();

            assert!(!result.visible());
            match result {
                Visibility::Axis(r) => assert_eq!(r.details.distance_from_viewport_far, 150.0),
                Visibility::Both(_) => panic!("expected single-axis result"),
            }
        }

        #[test]
        fn horizontal_routes_to_horizontal_axis() {
            let document = page(0.0);
            let element = node(8.0, 8.0, 10.0, 10.0);

            let result = check(&document, Some("horizontal"), None, None, &element).unwrap();

            assert!(matches!(result, Visibility::Axis(r) if r.details.axis == Axis::Horizontal));
        }

        #[test]
        fn both_routes_to_combiner() {
            let document = page(0.0);
            let element = node(8.0, 8.0, 10.0, 10.0);

            let result = check(&document, Some("both"), None, None, &element).unwrap();

            assert!(matches!(result, Visibility::Both(_)));
            assert_eq!(result.percent_visible(), 1.0);
        }

        #[test]
        fn invalid_dimension_behaves_like_vertical() {
            let document = page(120.0);
            let element = node(108.0, 8.0, 50.0, 50.0);

            let invalid = check(&document, Some("sideways"), None, None, &element).unwrap();
            let vertical = check(&document, Some("vertical"), None, None, &element).unwrap();

            assert_eq!(invalid, vertical);
        }

        #[test]
        fn builder_applies_zero_extent_policy() {
            let document = page(0.0);
            let element = node(8.0, 8.0, 0.0, 10.0);

            let result = VisibilityCheck::new(&element)
                .zero_extent(ZeroExtentPolicy::Zero)
                .run(&document)
                .unwrap();

            assert_eq!(result.percent_visible(), 0.0);
        }

        #[test]
        fn measure_exposes_normalised_rectangles() {
            let document = page(50.0);
            let element = node(108.0, 18.0, 50.0, 40.0);

            let m = VisibilityCheck::new(&element).measure(&document).unwrap();

            assert_eq!(m.element, Rect::new(100.0, 10.0, 50.0, 40.0));
            assert_eq!(m.viewport, Rect::new(50.0, 0.0, 200.0, 300.0));
        }
    }
}
