//! Error types for inviewport.
//!
//! Errors are `thiserror` enums composed with `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level binary error wrapping every failure mode
//!   - [`InputError`] - Scene snapshot could not be read or decoded
//!   - [`MeasureError`] - A measurement query on the UI layer failed
//!   - [`ConfigError`] - Config file unreadable or malformed
//!   - [`LoggingError`] - Tracing subscriber could not be installed
//!
//! # Recovery Strategy
//!
//! The core never recovers. A visibility check either returns a complete
//! result or the first measurement failure, unchanged. An unrecognised
//! dimension name is not an error at all: it falls back to `vertical`.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::visibility::Axis;

/// Top-level application error for the command-line shell.
///
/// # Examples
///
/// ```no_run
/// use inviewport::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     // InputError converts to AppError via From
///     let _scene = load()?;
///     Ok(())
/// }
/// # fn load() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the scene snapshot.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// A measurement query failed while extracting rectangles.
    #[error("Measurement failed: {0}")]
    Measure(#[from] MeasureError),

    /// Config file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the result record failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Result record could not be encoded.
    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors encountered when reading a scene snapshot from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The scene file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use inviewport::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// No scene given and stdin is an interactive terminal.
    ///
    /// ```
    /// use inviewport::model::error::InputError;
    ///
    /// assert!(InputError::NoInput.to_string().contains("pipe a scene to stdin"));
    /// ```
    #[error("No input source: provide a scene file or pipe a scene to stdin")]
    NoInput,

    /// The scene is not valid JSON or does not match the scene schema.
    #[error("Invalid scene: {message}")]
    InvalidScene {
        /// Decoder message from `serde_json`.
        message: String,
    },

    /// Generic I/O failure while reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A measurement query on the UI layer failed.
///
/// Raised by [`Measurable`](crate::measure::Measurable) and
/// [`WindowMetrics`](crate::measure::WindowMetrics) implementations and
/// propagated unchanged through extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// The measured node is not attached to a rendered document.
    #[error("{what} is detached and cannot be measured")]
    Detached {
        /// Which descriptor failed (element, wrapper, viewport).
        what: String,
    },

    /// A specific query is not supported by the descriptor.
    #[error("{what} does not support {query}")]
    Unavailable {
        /// Which descriptor failed.
        what: String,
        /// The query that was attempted.
        query: &'static str,
    },

    /// None of the page scroll sources exist for the window.
    ///
    /// ```
    /// use inviewport::model::error::MeasureError;
    /// use inviewport::visibility::Axis;
    ///
    /// let err = MeasureError::NoScrollSource { axis: Axis::Vertical };
    /// assert!(err.to_string().contains("vertical"));
    /// ```
    #[error("No page scroll offset available on the {axis} axis")]
    NoScrollSource {
        /// Axis whose offset could not be resolved.
        axis: Axis,
    },
}
