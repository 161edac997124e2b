// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors absorbed by the evaluator and the tracker.

use core::fmt;

/// A condition that makes a curve, or a tracker setting, unusable as given.
///
/// None of these are fatal. The tracker turns them into a "not valid"
/// [`ValidationResult`](crate::ValidationResult) and a log record; the
/// evaluator falls back to a safe point where one exists.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum TraceError {
    /// The curve has fewer control points than `degree + 1`.
    InsufficientControlPoints {
        /// The number of control points the degree needs.
        required: usize,
        /// The number of control points the curve has.
        actual: usize,
    },
    /// The rational basis weights summed to zero or less.
    DegenerateWeights,
    /// A checkpoint interval outside the open unit interval.
    InvalidCheckpointInterval(f64),
    /// A tolerance radius that is not finite and positive.
    InvalidToleranceRadius(f64),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientControlPoints { required, actual } => write!(
                f,
                "curve needs at least {required} control points, has {actual}"
            ),
            Self::DegenerateWeights => write!(f, "basis weights sum to zero or less"),
            Self::InvalidCheckpointInterval(interval) => {
                write!(f, "checkpoint interval {interval} is outside (0, 1)")
            }
            Self::InvalidToleranceRadius(radius) => {
                write!(f, "tolerance radius {radius} is not positive")
            }
        }
    }
}

impl core::error::Error for TraceError {}

#[cfg(test)]
mod tests {
    use super::TraceError;

    #[test]
    fn display_messages() {
        let err = TraceError::InsufficientControlPoints {
            required: 4,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "curve needs at least 4 control points, has 2"
        );
        assert_eq!(
            TraceError::InvalidCheckpointInterval(1.5).to_string(),
            "checkpoint interval 1.5 is outside (0, 1)"
        );
    }
}
