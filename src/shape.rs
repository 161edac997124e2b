// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes made of ordered strokes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{NurbsCurve, TraceError};

/// A number or other shape, traced one stroke at a time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Shape {
    name: String,
    strokes: Vec<NurbsCurve>,
    score_value: u32,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            name: String::new(),
            strokes: Vec::new(),
            score_value: 1,
        }
    }
}

impl Shape {
    /// Create a shape with no strokes, worth one point.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: NurbsCurve) -> Self {
        self.strokes.push(stroke);
        self
    }

    /// Set the score awarded for completing the shape.
    #[must_use]
    pub fn with_score_value(mut self, score_value: u32) -> Self {
        self.score_value = score_value;
        self
    }

    /// The shape's name, such as `"2"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strokes in tracing order.
    #[inline]
    pub fn strokes(&self) -> &[NurbsCurve] {
        &self.strokes
    }

    /// One stroke.
    #[inline]
    pub fn stroke(&self, index: usize) -> Option<&NurbsCurve> {
        self.strokes.get(index)
    }

    /// One stroke, for editing.
    #[inline]
    pub fn stroke_mut(&mut self, index: usize) -> Option<&mut NurbsCurve> {
        self.strokes.get_mut(index)
    }

    /// The number of strokes.
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// The score awarded for completing the shape.
    #[inline]
    pub fn score_value(&self) -> u32 {
        self.score_value
    }

    /// Append a stroke.
    pub fn add_stroke(&mut self, stroke: NurbsCurve) {
        self.strokes.push(stroke);
    }

    /// Remove a stroke, if `index` is in range.
    pub fn remove_stroke(&mut self, index: usize) -> Option<NurbsCurve> {
        (index < self.strokes.len()).then(|| self.strokes.remove(index))
    }

    /// Check every stroke, reporting the first that cannot be traced.
    ///
    /// # Errors
    ///
    /// Returns the index of the failing stroke and why it fails.
    pub fn validate(&self) -> Result<(), (usize, TraceError)> {
        for (ix, stroke) in self.strokes.iter().enumerate() {
            stroke.validate().map_err(|err| (ix, err))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;
    use crate::{NurbsCurve, TraceError};

    #[test]
    fn build_and_edit() {
        let mut shape = Shape::new("7")
            .with_stroke(NurbsCurve::new([(0.0, 0.0), (100.0, 0.0)]).with_degree(1))
            .with_score_value(3);
        assert_eq!(shape.name(), "7");
        assert_eq!(shape.score_value(), 3);
        assert_eq!(shape.stroke_count(), 1);
        assert!(shape.validate().is_ok());

        shape.add_stroke(NurbsCurve::new([(100.0, 0.0), (40.0, 150.0)]));
        assert_eq!(
            shape.validate(),
            Err((
                1,
                TraceError::InsufficientControlPoints {
                    required: 4,
                    actual: 2
                }
            ))
        );
        shape.stroke_mut(1).unwrap().push((30.0, 160.0));
        assert!(shape.remove_stroke(5).is_none());
        assert_eq!(shape.remove_stroke(1).unwrap().control_points().len(), 3);
        assert!(shape.stroke(1).is_none());
    }

    #[test]
    fn default_score_is_one() {
        assert_eq!(Shape::new("0").score_value(), 1);
    }
}
