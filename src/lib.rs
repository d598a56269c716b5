//! inviewport
//!
//! Computes how much of a rectangular element is visible inside a scrollable
//! viewport, per axis or for both axes at once.
//!
//! Pure Core / Impure Shell:
//! - [`model`], [`visibility`] are pure geometry on plain numbers
//! - [`measure`] reads the UI layer through traits, once per check
//! - [`source`], [`config`], [`logging`], [`output`] serve the command-line shell

pub mod config;
pub mod logging;
pub mod measure;
pub mod model;
pub mod output;
pub mod source;
pub mod visibility;

pub use measure::{extract, Measurable, Position, Viewport, WindowMetrics};
pub use model::{Measurements, Rect};
pub use visibility::{check, Dimension, Document, Visibility, VisibilityCheck, ZeroExtentPolicy};
