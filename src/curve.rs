// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke curves: weighted control points, a degree and a tolerance radius.

use alloc::vec::Vec;

use crate::{Nearest, Nurbs, ParamCurve, ParamCurveNearest, Point, TraceError};

/// Default degree of an authored stroke.
pub const DEFAULT_DEGREE: u32 = 3;

/// Default distance a trace may wander from the curve and still count.
pub const DEFAULT_TOLERANCE_RADIUS: f64 = 20.0;

/// Scan resolution used by [`NurbsCurve::within_tolerance`].
const TOLERANCE_SCAN_RESOLUTION: usize = 100;

/// Check that a tolerance radius is a positive finite number.
pub(crate) fn check_tolerance_radius(radius: f64) -> Result<f64, TraceError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(TraceError::InvalidToleranceRadius(radius))
    }
}

/// A control point of a rational curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint {
    /// Where the point sits in curve space.
    pub position: Point,
    /// How strongly the point pulls the curve. Must be positive.
    pub weight: f64,
}

impl ControlPoint {
    /// Create a new control point.
    #[inline]
    pub const fn new(position: Point, weight: f64) -> Self {
        Self { position, weight }
    }
}

impl From<Point> for ControlPoint {
    #[inline]
    fn from(position: Point) -> Self {
        Self::new(position, 1.0)
    }
}

impl From<(f64, f64)> for ControlPoint {
    #[inline]
    fn from(position: (f64, f64)) -> Self {
        Self::new(position.into(), 1.0)
    }
}

/// A stroke to be traced.
///
/// This is the authoring value: it can be built up one point at a time and
/// may be temporarily short of points. Call [`NurbsCurve::nurbs`] to get an
/// evaluation view, or use the `Result`-returning helpers below, which fail
/// with [`TraceError::InsufficientControlPoints`] on such curves.
///
/// # Examples
///
/// ```
/// use spuro::{NurbsCurve, Point};
///
/// let curve = NurbsCurve::new([(0.0, 0.0), (100.0, 0.0)])
///     .with_degree(1)
///     .with_tolerance_radius(10.0);
/// assert_eq!(curve.evaluate(1.0).unwrap(), Point::new(100.0, 0.0));
/// assert!(curve.within_tolerance(Point::new(50.0, 0.0), 10.0).unwrap());
/// assert!(!curve.within_tolerance(Point::new(50.0, 20.0), 10.0).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NurbsCurve {
    control_points: Vec<ControlPoint>,
    degree: u32,
    tolerance_radius: f64,
}

impl Default for NurbsCurve {
    fn default() -> Self {
        Self {
            control_points: Vec::new(),
            degree: DEFAULT_DEGREE,
            tolerance_radius: DEFAULT_TOLERANCE_RADIUS,
        }
    }
}

impl NurbsCurve {
    /// Create a curve of the default degree and tolerance radius.
    pub fn new<I>(control_points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ControlPoint>,
    {
        Self {
            control_points: control_points.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the degree.
    #[must_use]
    pub fn with_degree(mut self, degree: u32) -> Self {
        self.degree = degree;
        self
    }

    /// Set the tolerance radius.
    #[must_use]
    pub fn with_tolerance_radius(mut self, tolerance_radius: f64) -> Self {
        self.tolerance_radius = tolerance_radius;
        self
    }

    /// The control points, in order.
    #[inline]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// The degree.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// How far from the curve a trace may stray.
    #[inline]
    pub fn tolerance_radius(&self) -> f64 {
        self.tolerance_radius
    }

    /// Append a control point.
    pub fn push(&mut self, control_point: impl Into<ControlPoint>) {
        self.control_points.push(control_point.into());
    }

    /// Move a control point. Returns `false` if `index` is out of range.
    pub fn set_position(&mut self, index: usize, position: Point) -> bool {
        match self.control_points.get_mut(index) {
            Some(cp) => {
                cp.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove a control point.
    ///
    /// Removal is refused, returning `None`, when `index` is out of range or
    /// when it would leave fewer than `degree + 1` points.
    pub fn remove(&mut self, index: usize) -> Option<ControlPoint> {
        let required = (self.degree as usize).saturating_add(1);
        if index < self.control_points.len() && self.control_points.len() > required {
            Some(self.control_points.remove(index))
        } else {
            None
        }
    }

    /// Check that the curve can be traced.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points, and
    /// [`TraceError::InvalidToleranceRadius`] for a radius that is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), TraceError> {
        self.nurbs()?;
        check_tolerance_radius(self.tolerance_radius)?;
        Ok(())
    }

    /// An evaluation view of the curve.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points.
    pub fn nurbs(&self) -> Result<Nurbs<'_>, TraceError> {
        Nurbs::new(&self.control_points, self.degree)
    }

    /// The position on the curve at parameter `t`, clamped to [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points.
    pub fn evaluate(&self, t: f64) -> Result<Point, TraceError> {
        Ok(self.nurbs()?.eval(t))
    }

    /// `resolution + 1` points along the curve, evenly spaced in parameter.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points.
    pub fn sample(&self, resolution: usize) -> Result<Vec<Point>, TraceError> {
        Ok(self.nurbs()?.samples(resolution).collect())
    }

    /// The closest of `resolution + 1` evenly spaced curve points to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points.
    pub fn closest_point(&self, point: Point, resolution: usize) -> Result<Nearest, TraceError> {
        Ok(self.nurbs()?.nearest(point, resolution))
    }

    /// Whether `point` lies within `radius` of the curve.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] for a curve with
    /// fewer than `degree + 1` points.
    pub fn within_tolerance(&self, point: Point, radius: f64) -> Result<bool, TraceError> {
        let hit = self.closest_point(point, TOLERANCE_SCAN_RESOLUTION)?;
        Ok(hit.distance <= radius)
    }
}
