//! Scene snapshots.
//!
//! A scene is a JSON record of measurements taken from a rendered page:
//! the window, the root container, an optional scrollable viewport and
//! wrapper, and the element. It stands in for the live UI layer by
//! implementing [`Measurable`], [`WindowMetrics`] and [`Document`].

use serde::Deserialize;

use crate::measure::{Measurable, Position, Viewport, WindowMetrics};
use crate::model::error::InputError;
use crate::model::MeasureError;
use crate::visibility::{Axis, Document, VisibilityCheck};

/// Measured box: element, wrapper, body or scrollable container.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSnapshot {
    /// Label used in error messages (e.g. `#element`).
    #[serde(default)]
    pub name: Option<String>,
    /// Offset from the nearest positioned ancestor.
    pub top: f64,
    /// Offset from the nearest positioned ancestor.
    pub left: f64,
    /// Content height.
    pub height: f64,
    /// Content width.
    pub width: f64,
    /// Vertical scroll offset.
    #[serde(default)]
    pub scroll_top: f64,
    /// Horizontal scroll offset.
    #[serde(default)]
    pub scroll_left: f64,
    /// The box was removed from the document before it was measured.
    #[serde(default)]
    pub detached: bool,
}

impl BoxSnapshot {
    fn read(&self, value: f64) -> Result<f64, MeasureError> {
        if self.detached {
            return Err(MeasureError::Detached {
                what: self.name.clone().unwrap_or_else(|| "box".to_string()),
            });
        }
        Ok(value)
    }
}

impl Measurable for BoxSnapshot {
    fn height(&self) -> Result<f64, MeasureError> {
        self.read(self.height)
    }

    fn width(&self) -> Result<f64, MeasureError> {
        self.read(self.width)
    }

    fn position(&self) -> Result<Position, MeasureError> {
        Ok(Position::new(self.read(self.top)?, self.read(self.left)?))
    }

    fn scroll_top(&self) -> Result<f64, MeasureError> {
        self.read(self.scroll_top)
    }

    fn scroll_left(&self) -> Result<f64, MeasureError> {
        self.read(self.scroll_left)
    }
}

/// Scroll offsets read from one node of the page scroll chain.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSource {
    /// Vertical offset.
    #[serde(default)]
    pub scroll_top: f64,
    /// Horizontal offset.
    #[serde(default)]
    pub scroll_left: f64,
}

impl ScrollSource {
    fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_top,
            Axis::Horizontal => self.scroll_left,
        }
    }
}

/// Top-level window metrics and page scroll sources.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    /// Visible height.
    pub height: f64,
    /// Visible width.
    pub width: f64,
    /// `pageXOffset`.
    #[serde(default)]
    pub page_x_offset: Option<f64>,
    /// `pageYOffset`.
    #[serde(default)]
    pub page_y_offset: Option<f64>,
    /// Document root element scroll.
    #[serde(default)]
    pub document_element: Option<ScrollSource>,
    /// Body parent node scroll.
    #[serde(default)]
    pub body_parent: Option<ScrollSource>,
    /// Body scroll. [`Scene::from_json`] fills it from the scene's body box
    /// when omitted.
    #[serde(default)]
    pub body: Option<ScrollSource>,
}

impl WindowMetrics for WindowSnapshot {
    fn height(&self) -> Result<f64, MeasureError> {
        Ok(self.height)
    }

    fn width(&self) -> Result<f64, MeasureError> {
        Ok(self.width)
    }

    fn page_offset(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Vertical => self.page_y_offset,
            Axis::Horizontal => self.page_x_offset,
        }
    }

    fn document_element_scroll(&self, axis: Axis) -> Option<f64> {
        self.document_element.map(|s| s.along(axis))
    }

    fn body_parent_scroll(&self, axis: Axis) -> Option<f64> {
        self.body_parent.map(|s| s.along(axis))
    }

    fn body_scroll(&self, axis: Axis) -> Option<f64> {
        self.body.map(|s| s.along(axis))
    }
}

/// Which box a check is run against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewportSnapshot {
    /// The top-level window.
    Window,
    /// A scrollable container.
    Element(BoxSnapshot),
}

/// A complete measured page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scene {
    /// Requested dimension name, matched leniently.
    #[serde(default)]
    pub dimension: Option<String>,
    /// Top-level window.
    pub window: WindowSnapshot,
    /// Root content container.
    pub body: BoxSnapshot,
    /// Viewport; the window when absent.
    #[serde(default)]
    pub viewport: Option<ViewportSnapshot>,
    /// Wrapper; the body when absent.
    #[serde(default)]
    pub wrapper: Option<BoxSnapshot>,
    /// Element being checked.
    pub element: BoxSnapshot,
}

impl Scene {
    /// Decode a scene from JSON text.
    ///
    /// A page always has a body, so the window's page scroll chain ends at
    /// the body box's own scroll offsets unless the scene records them.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidScene` if the text is not a valid scene.
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        let mut scene: Scene =
            serde_json::from_str(text).map_err(|e| InputError::InvalidScene {
                message: e.to_string(),
            })?;

        let body_scroll = ScrollSource {
            scroll_top: scene.body.scroll_top,
            scroll_left: scene.body.scroll_left,
        };
        scene.window.body.get_or_insert(body_scroll);

        Ok(scene)
    }

    /// The viewport to check against, if one was given.
    pub fn viewport(&self) -> Option<Viewport<'_>> {
        match &self.viewport {
            Some(ViewportSnapshot::Window) => Some(Viewport::Window(&self.window)),
            Some(ViewportSnapshot::Element(container)) => Some(Viewport::Element(container)),
            None => None,
        }
    }

    /// Check for this scene's element with the scene's own options.
    pub fn check(&self) -> VisibilityCheck<'_> {
        let mut check = VisibilityCheck::new(&self.element).dimension_name(self.dimension.as_deref());
        if let Some(viewport) = self.viewport() {
            check = check.viewport(viewport);
        }
        if let Some(wrapper) = &self.wrapper {
            check = check.wrapper(wrapper);
        }
        check
    }

    /// Override the viewport's scroll offsets.
    ///
    /// A container viewport gets new `scrollTop`/`scrollLeft`. The window gets
    /// both its page offset and its document root scroll, so a zero override
    /// is not masked by a later source in the page scroll chain.
    pub fn scroll_viewport_to(&mut self, top: Option<f64>, left: Option<f64>) {
        match &mut self.viewport {
            Some(ViewportSnapshot::Element(container)) => {
                if let Some(top) = top {
                    container.scroll_top = top;
                }
                if let Some(left) = left {
                    container.scroll_left = left;
                }
            }
            Some(ViewportSnapshot::Window) | None => {
                let window = &mut self.window;
                let root = window.document_element.get_or_insert_with(ScrollSource::default);
                if let Some(top) = top {
                    window.page_y_offset = Some(top);
                    root.scroll_top = top;
                }
                if let Some(left) = left {
                    window.page_x_offset = Some(left);
                    root.scroll_left = left;
                }
            }
        }
    }
}

impl Document for Scene {
    fn window(&self) -> &dyn WindowMetrics {
        &self.window
    }

    fn root(&self) -> &dyn Measurable {
        &self.body
    }
}
