//! Measurement extraction.
//!
//! Converts raw measurements read from the UI layer into a [`Measurements`]
//! pair whose rectangles share the wrapper's origin:
//! - element position is taken relative to the wrapper position
//! - viewport position is its scroll offset (page scroll for a top-level window)
//!
//! The UI layer is reached only through the [`Measurable`] and
//! [`WindowMetrics`] traits. Each query is read once per extraction.

use tracing::trace;

use crate::model::{MeasureError, Measurements, Rect};
use crate::visibility::Axis;

/// Position of a box relative to its nearest positioned ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Vertical offset.
    pub top: f64,
    /// Horizontal offset.
    pub left: f64,
}

impl Position {
    /// Create a position.
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// A box the UI layer can measure: elements, wrappers and scrollable containers.
pub trait Measurable {
    /// Content height.
    fn height(&self) -> Result<f64, MeasureError>;

    /// Content width.
    fn width(&self) -> Result<f64, MeasureError>;

    /// Position relative to the nearest positioned ancestor or the document.
    fn position(&self) -> Result<Position, MeasureError>;

    /// Vertical scroll offset. Meaningful for scrollable containers.
    fn scroll_top(&self) -> Result<f64, MeasureError>;

    /// Horizontal scroll offset. Meaningful for scrollable containers.
    fn scroll_left(&self) -> Result<f64, MeasureError>;
}

/// The top-level window.
///
/// A window has no element-style scroll offset. Its offset is resolved through
/// the page scroll sources in order, see [`page_scroll`].
pub trait WindowMetrics {
    /// Visible height of the window.
    fn height(&self) -> Result<f64, MeasureError>;

    /// Visible width of the window.
    fn width(&self) -> Result<f64, MeasureError>;

    /// Dedicated page offset (`pageYOffset` / `pageXOffset`), if exposed.
    fn page_offset(&self, axis: Axis) -> Option<f64>;

    /// Scroll offset of the document root element, if it exists.
    fn document_element_scroll(&self, axis: Axis) -> Option<f64>;

    /// Scroll offset of the body's parent node, if it exists.
    fn body_parent_scroll(&self, axis: Axis) -> Option<f64>;

    /// Scroll offset of the body, if it exists.
    fn body_scroll(&self, axis: Axis) -> Option<f64>;
}

/// The scrolled area an element is checked against.
///
/// An explicit discriminant: a window resolves its offset through the page
/// scroll chain, a container through its own scroll queries.
#[derive(Clone, Copy)]
pub enum Viewport<'a> {
    /// The top-level window.
    Window(&'a dyn WindowMetrics),
    /// A scrollable container element.
    Element(&'a dyn Measurable),
}

impl std::fmt::Debug for Viewport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viewport::Window(_) => f.write_str("Viewport::Window"),
            Viewport::Element(_) => f.write_str("Viewport::Element"),
        }
    }
}

impl Viewport<'_> {
    /// Visible area of the viewport in scroll coordinates.
    ///
    /// # Errors
    ///
    /// Returns the first failing measurement query.
    pub fn rect(&self) -> Result<Rect, MeasureError> {
        match self {
            Viewport::Window(window) => Ok(Rect::new(
                page_scroll(*window, Axis::Vertical)?,
                page_scroll(*window, Axis::Horizontal)?,
                window.height()?,
                window.width()?,
            )),
            Viewport::Element(container) => Ok(Rect::new(
                container.scroll_top()?,
                container.scroll_left()?,
                container.height()?,
                container.width()?,
            )),
        }
    }
}

/// Resolve the window's page scroll offset along `axis`.
///
/// A non-zero dedicated page offset wins. Otherwise the first existing source
/// among document root, body parent and body supplies the offset.
///
/// # Errors
///
/// Returns `MeasureError::NoScrollSource` if no source in the chain exists.
pub fn page_scroll(window: &dyn WindowMetrics, axis: Axis) -> Result<f64, MeasureError> {
    if let Some(offset) = window.page_offset(axis).filter(|o| *o != 0.0 && !o.is_nan()) {
        return Ok(offset);
    }

    window
        .document_element_scroll(axis)
        .or_else(|| window.body_parent_scroll(axis))
        .or_else(|| window.body_scroll(axis))
        .ok_or(MeasureError::NoScrollSource { axis })
}

/// Extract wrapper-relative rectangles for an element and a viewport.
///
/// # Errors
///
/// Measurement failures propagate unchanged.
pub fn extract(
    viewport: Viewport<'_>,
    wrapper: &dyn Measurable,
    element: &dyn Measurable,
) -> Result<Measurements, MeasureError> {
    let origin = wrapper.position()?;
    let position = element.position()?;

    let element = Rect::new(
        position.top - origin.top,
        position.left - origin.left,
        element.height()?,
        element.width()?,
    );
    let viewport = viewport.rect()?;

    trace!(?element, ?viewport, "Extracted measurements");

    Ok(Measurements::new(element, viewport))
}
