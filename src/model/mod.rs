//! Domain model types (pure).
//!
//! Rectangles and measurement pairs are plain data built fresh per check.

pub mod error;
pub mod rect;

// Re-export for convenience
pub use error::{AppError, InputError, MeasureError};
pub use rect::{Measurements, Rect};
