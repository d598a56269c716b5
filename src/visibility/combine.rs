//! Two-axis composition.
//!
//! The visible area is the product of the two visible extents. This is exact
//! only for an unrotated, opaque rectangle.

use serde::Serialize;

use super::axis::{evaluate_axis, Axis, AxisDetails, ZeroExtentPolicy};
use crate::model::Measurements;

/// Extents behind a two-axis result.
///
/// Both per-axis detail records are kept under their own keys; the
/// top-level `visible_part`/`invisible_part` are areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDetails {
    /// Vertical extents.
    pub vertical: AxisDetails,
    /// Horizontal extents.
    pub horizontal: AxisDetails,
    /// Visible area.
    pub visible_part: f64,
    /// Element area minus visible area.
    pub invisible_part: f64,
}

/// Visibility of an element along both axes at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResult {
    /// Visible along both axes.
    pub visible: bool,
    /// Product of the per-axis fractions.
    pub percent_visible: f64,
    /// Product of the per-axis viewport fractions.
    pub percent_of_viewport: f64,
    /// Per-axis extents and areas.
    pub details: CombinedDetails,
}

/// Evaluate both axes and compose them multiplicatively.
pub fn combine_both(measurements: &Measurements, policy: ZeroExtentPolicy) -> CombinedResult {
    let v = evaluate_axis(measurements, Axis::Vertical, policy);
    let h = evaluate_axis(measurements, Axis::Horizontal, policy);

    let visible_part = h.details.visible_part * v.details.visible_part;
    let invisible_part = h.details.element_extent * v.details.element_extent - visible_part;

    CombinedResult {
        visible: v.visible && h.visible,
        percent_visible: v.percent_visible * h.percent_visible,
        percent_of_viewport: v.percent_of_viewport * h.percent_of_viewport,
        details: CombinedDetails {
            vertical: v.details,
            horizontal: h.details,
            visible_part,
            invisible_part,
        },
    }
}
