//! Scroll sweeps.
//!
//! Re-evaluates a check at a series of scroll offsets, the way a scroll
//! handler would re-run it on every scroll event. The viewport rectangle is
//! moved with [`Measurements::scrolled_to`]; nothing is re-measured.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::{Dimension, Visibility, ZeroExtentPolicy};
use crate::model::Measurements;

/// Errors from building a sweep.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    /// Step must be strictly positive.
    #[error("Sweep step must be positive (got {0})")]
    NonPositiveStep(f64),

    /// Bounds and step must be finite numbers.
    #[error("Sweep bounds and step must be finite")]
    NonFinite,

    /// Text form was not `FROM:TO:STEP`.
    #[error("Expected FROM:TO:STEP, got {0:?}")]
    Malformed(String),
}

/// Inclusive range of scroll offsets visited at a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSweep {
    from: f64,
    to: f64,
    step: f64,
}

/// One evaluated sweep position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepFrame {
    /// Scroll offset the viewport was moved to.
    pub offset: f64,
    /// Check result at that offset.
    pub result: Visibility,
}

impl ScrollSweep {
    /// Create a sweep from `from` to `to` (inclusive) in increments of `step`.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::NonFinite` for NaN or infinite inputs and
    /// `SweepError::NonPositiveStep` when `step <= 0`.
    pub fn new(from: f64, to: f64, step: f64) -> Result<Self, SweepError> {
        if !(from.is_finite() && to.is_finite() && step.is_finite()) {
            return Err(SweepError::NonFinite);
        }
        if step <= 0.0 {
            return Err(SweepError::NonPositiveStep(step));
        }
        Ok(Self { from, to, step })
    }

    /// Offsets visited. Empty when `from > to`.
    ///
    /// Offsets are computed as `from + i * step` so they do not accumulate
    /// rounding error.
    pub fn offsets(&self) -> impl Iterator<Item = f64> {
        let Self { from, to, step } = *self;
        (0u64..)
            .map(move |i| from + step * i as f64)
            .take_while(move |offset| *offset <= to)
    }

    /// Evaluate `dimension` at each offset, one frame at a time.
    ///
    /// Nothing is evaluated until the iterator is advanced, so arbitrarily
    /// long sweeps can be streamed to a writer.
    pub fn frames(
        &self,
        measurements: &Measurements,
        dimension: Dimension,
        policy: ZeroExtentPolicy,
    ) -> impl Iterator<Item = SweepFrame> {
        let measurements = *measurements;
        self.offsets().map(move |offset| SweepFrame {
            offset,
            result: dimension.evaluate(&measurements.scrolled_to(dimension, offset), policy),
        })
    }

    /// Evaluate `dimension` at every offset and collect the frames.
    pub fn run(
        &self,
        measurements: &Measurements,
        dimension: Dimension,
        policy: ZeroExtentPolicy,
    ) -> Vec<SweepFrame> {
        let frames: Vec<SweepFrame> = self.frames(measurements, dimension, policy).collect();

        debug!(frames = frames.len(), %dimension, "Sweep complete");

        frames
    }
}

impl FromStr for ScrollSweep {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SweepError::Malformed(s.to_string());

        let parts: Vec<f64> = s
            .split(':')
            .map(|part| part.trim().parse::<f64>().map_err(|_| malformed()))
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [from, to, step] => Self::new(*from, *to, *step),
            _ => Err(malformed()),
        }
    }
}
