//! Single-axis overlap evaluation.
//!
//! One evaluator serves both axes. [`Axis`] selects which edges and extent
//! of a [`Rect`] are read, so the vertical and horizontal results can never
//! disagree in behaviour.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::model::{Measurements, Rect};

/// Dimension of analysis for a single-axis check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Top, bottom, height.
    Vertical,
    /// Left, right, width.
    Horizontal,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Vertical => f.write_str("vertical"),
            Axis::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// A rectangle projected onto one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Near edge (top or left).
    pub near: f64,
    /// Far edge (bottom or right).
    pub far: f64,
    /// Extent (height or width).
    pub extent: f64,
}

/// Output key names for one axis' details.
struct Labels {
    element_extent: &'static str,
    invisible_near: &'static str,
    invisible_far: &'static str,
    distance_near: &'static str,
    distance_far: &'static str,
}

const VERTICAL_LABELS: Labels = Labels {
    element_extent: "elementHeight",
    invisible_near: "invisibleTop",
    invisible_far: "invisibleBottom",
    distance_near: "distanceFromViewportTop",
    distance_far: "distanceFromViewportBottom",
};

const HORIZONTAL_LABELS: Labels = Labels {
    element_extent: "elementWidth",
    invisible_near: "invisibleLeft",
    invisible_far: "invisibleRight",
    distance_near: "distanceFromViewportLeft",
    distance_far: "distanceFromViewportRight",
};

impl Axis {
    /// Both axes, vertical first.
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    /// Project a rectangle onto this axis.
    pub fn span(self, rect: &Rect) -> Span {
        match self {
            Axis::Vertical => Span {
                near: rect.top,
                far: rect.bottom,
                extent: rect.height,
            },
            Axis::Horizontal => Span {
                near: rect.left,
                far: rect.right,
                extent: rect.width,
            },
        }
    }

    fn labels(self) -> &'static Labels {
        match self {
            Axis::Vertical => &VERTICAL_LABELS,
            Axis::Horizontal => &HORIZONTAL_LABELS,
        }
    }
}

/// How a ratio with a zero denominator is reported.
///
/// Applies to `percent_visible` (zero-extent element) and
/// `percent_of_viewport` (zero-extent viewport).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ZeroExtentPolicy {
    /// Plain IEEE division: `0/0` is NaN, `x/0` is infinite.
    #[default]
    Propagate,
    /// A zero denominator yields `0.0`.
    Zero,
}

impl ZeroExtentPolicy {
    /// Divide `part` by `whole` under this policy.
    pub fn ratio(self, part: f64, whole: f64) -> f64 {
        match self {
            ZeroExtentPolicy::Zero if whole == 0.0 => 0.0,
            _ => part / whole,
        }
    }
}

/// Bound `value` below by `min`, then above by `max`.
///
/// Unlike `f64::clamp` this never panics; with `max < min` the upper bound wins.
pub(crate) fn crop(value: f64, min: f64, max: f64) -> f64 {
    let value = if value < min { min } else { value };
    if value > max {
        max
    } else {
        value
    }
}

/// Raw extents behind an axis result.
///
/// Serialised with axis-specific keys (`invisibleTop` vs `invisibleLeft`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDetails {
    /// Which axis these extents belong to.
    pub axis: Axis,
    /// Element height or width.
    pub element_extent: f64,
    /// Part of the element hidden before the viewport's near edge.
    pub invisible_near: f64,
    /// Part of the element hidden past the viewport's far edge.
    pub invisible_far: f64,
    /// Total hidden extent.
    pub invisible_part: f64,
    /// Total visible extent.
    pub visible_part: f64,
    /// Gap between the viewport's far edge and an element lying past it.
    pub distance_from_viewport_near: f64,
    /// Gap between an element lying before the viewport and its near edge.
    pub distance_from_viewport_far: f64,
}

impl Serialize for AxisDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels = self.axis.labels();
        let mut map = serializer.serialize_map(Some(7))?;
        map.serialize_entry(labels.element_extent, &self.element_extent)?;
        map.serialize_entry(labels.invisible_near, &self.invisible_near)?;
        map.serialize_entry(labels.invisible_far, &self.invisible_far)?;
        map.serialize_entry("invisiblePart", &self.invisible_part)?;
        map.serialize_entry("visiblePart", &self.visible_part)?;
        map.serialize_entry(labels.distance_near, &self.distance_from_viewport_near)?;
        map.serialize_entry(labels.distance_far, &self.distance_from_viewport_far)?;
        map.end()
    }
}

/// Visibility of an element along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisResult {
    /// Any part of the element overlaps the viewport.
    pub visible: bool,
    /// Visible extent over element extent. Not clamped.
    pub percent_visible: f64,
    /// Visible extent over viewport extent. Not clamped.
    pub percent_of_viewport: f64,
    /// Raw extents.
    pub details: AxisDetails,
}

/// Evaluate overlap of element and viewport along `axis`.
///
/// Overlap is strict: an element touching the viewport edge is not visible.
pub fn evaluate_axis(
    measurements: &Measurements,
    axis: Axis,
    policy: ZeroExtentPolicy,
) -> AxisResult {
    let element = axis.span(&measurements.element);
    let viewport = axis.span(&measurements.viewport);

    let visible = element.far > viewport.near && element.near < viewport.far;

    let invisible_near = crop(viewport.near - element.near, 0.0, element.extent);
    let invisible_far = crop(element.far - viewport.far, 0.0, element.extent);

    let mut invisible_part = 0.0;
    if invisible_near > 0.0 {
        invisible_part += invisible_near;
    }
    if invisible_far > 0.0 {
        invisible_part += invisible_far;
    }

    let visible_part = crop(element.extent - invisible_part, 0.0, f64::INFINITY);

    let details = AxisDetails {
        axis,
        element_extent: element.extent,
        invisible_near,
        invisible_far,
        invisible_part,
        visible_part,
        distance_from_viewport_near: crop(element.near - viewport.far, 0.0, f64::INFINITY),
        distance_from_viewport_far: crop(viewport.near - element.far, 0.0, f64::INFINITY),
    };

    let result = AxisResult {
        visible,
        percent_visible: policy.ratio(visible_part, element.extent),
        percent_of_viewport: policy.ratio(visible_part, viewport.extent),
        details,
    };

    debug!(
        %axis,
        visible,
        percent_visible = result.percent_visible,
        percent_of_viewport = result.percent_of_viewport,
        "Evaluated axis"
    );

    result
}
