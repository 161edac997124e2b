// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rational B-spline evaluation over a clamped uniform knot vector.

use smallvec::SmallVec;

use crate::common::clamp_unit;
use crate::{ControlPoint, ParamCurve, Point, TraceError, Vec2};

/// Inline capacity of the knot and basis buffers.
///
/// Authored strokes rarely go past a dozen control points; larger curves
/// spill to the heap.
const INLINE_KNOTS: usize = 24;

type KnotBuf = SmallVec<[f64; INLINE_KNOTS]>;

/// A validated view of a [`NurbsCurve`](crate::NurbsCurve), ready to evaluate.
///
/// The knot vector is synthesized once when the view is created and reused
/// for every evaluation, so hold on to a `Nurbs` while sampling or scanning.
#[derive(Clone, Debug)]
pub struct Nurbs<'a> {
    control_points: &'a [ControlPoint],
    degree: usize,
    knots: KnotBuf,
}

impl<'a> Nurbs<'a> {
    /// Create an evaluation view.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InsufficientControlPoints`] when there are fewer
    /// than `degree + 1` control points.
    pub fn new(control_points: &'a [ControlPoint], degree: u32) -> Result<Self, TraceError> {
        let degree = degree as usize;
        let required = degree.saturating_add(1);
        if control_points.len() < required {
            return Err(TraceError::InsufficientControlPoints {
                required,
                actual: control_points.len(),
            });
        }
        if control_points
            .iter()
            .any(|cp| cp.weight <= 0.0 || cp.weight.is_nan())
        {
            log::warn!(
                "curve has non-positive weights; evaluation may fall back to the end point"
            );
        }
        let knots = uniform_knots(control_points.len() - 1, degree);
        Ok(Self {
            control_points,
            degree,
            knots,
        })
    }

    /// The degree of the curve.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The control points the view evaluates.
    #[inline]
    pub fn control_points(&self) -> &'a [ControlPoint] {
        self.control_points
    }

    /// The synthesized knot vector, `n + degree + 2` entries long.
    #[inline]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Evaluate the curve at `t`, reporting degenerate weights.
    ///
    /// `t` is clamped to the unit interval. The endpoints are returned
    /// exactly, without computing any basis functions.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::DegenerateWeights`] if the weighted basis
    /// functions sum to zero or less at `t`.
    pub fn try_eval(&self, t: f64) -> Result<Point, TraceError> {
        let t = clamp_unit(t);
        if t == 0.0 {
            return Ok(self.first());
        }
        if t == 1.0 {
            return Ok(self.last());
        }
        let basis = self.basis(t);
        let mut acc = Vec2::ZERO;
        let mut weight_sum = 0.0;
        for (cp, n) in self.control_points.iter().zip(&basis) {
            let w = n * cp.weight;
            acc += cp.position.to_vec2() * w;
            weight_sum += w;
        }
        if weight_sum > 0.0 {
            Ok((acc / weight_sum).to_point())
        } else {
            Err(TraceError::DegenerateWeights)
        }
    }

    /// The non-rational basis functions `N(i, degree)` at `t`, one per
    /// control point.
    ///
    /// This is the Cox-de Boor recursion unrolled into a triangle: start
    /// from the degree-zero indicator functions over half-open knot spans
    /// and raise the degree in place. Terms over a zero-length span are zero.
    pub(crate) fn basis(&self, t: f64) -> KnotBuf {
        let knots = &self.knots;
        let spans = knots.len() - 1;
        let mut n: KnotBuf = (0..spans)
            .map(|j| {
                if t >= knots[j] && t < knots[j + 1] {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        for p in 1..=self.degree {
            for j in 0..spans - p {
                let left_span = knots[j + p] - knots[j];
                let right_span = knots[j + p + 1] - knots[j + 1];
                let left = if left_span != 0.0 {
                    (t - knots[j]) / left_span * n[j]
                } else {
                    0.0
                };
                let right = if right_span != 0.0 {
                    (knots[j + p + 1] - t) / right_span * n[j + 1]
                } else {
                    0.0
                };
                n[j] = left + right;
            }
        }
        n.truncate(self.control_points.len());
        n
    }

    #[inline]
    fn first(&self) -> Point {
        self.control_points[0].position
    }

    #[inline]
    fn last(&self) -> Point {
        self.control_points[self.control_points.len() - 1].position
    }
}

impl ParamCurve for Nurbs<'_> {
    fn eval(&self, t: f64) -> Point {
        self.try_eval(t).unwrap_or_else(|err| {
            log::debug!("{err} at t={t}, using the last control point");
            self.last()
        })
    }

    #[inline]
    fn start(&self) -> Point {
        self.first()
    }

    #[inline]
    fn end(&self) -> Point {
        self.last()
    }
}

/// A uniform open knot vector for control points `0..=n`.
///
/// The first and last `degree + 1` knots are clamped to 0 and 1; the
/// interior knots are evenly spaced.
fn uniform_knots(n: usize, degree: usize) -> KnotBuf {
    let m = n + degree + 1;
    let interior = (n - degree + 1) as f64;
    (0..=m)
        .map(|i| {
            if i <= degree {
                0.0
            } else if i >= m - degree {
                1.0
            } else {
                (i - degree) as f64 / interior
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{uniform_knots, Nurbs};
    use crate::{ControlPoint, ParamCurve, Point, TraceError};

    fn unweighted(points: &[(f64, f64)]) -> Vec<ControlPoint> {
        points.iter().map(|&p| ControlPoint::from(p)).collect()
    }

    #[test]
    fn knot_vector_layout() {
        assert_eq!(uniform_knots(1, 1).as_slice(), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(
            uniform_knots(2, 2).as_slice(),
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]
        );
        let knots = uniform_knots(5, 3);
        assert_eq!(knots.len(), 5 + 3 + 2);
        assert_eq!(&knots[..4], &[0.0; 4]);
        assert_eq!(&knots[6..], &[1.0; 4]);
        assert!((knots[4] - 1.0 / 3.0).abs() < 1e-15);
        assert!((knots[5] - 2.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn endpoints_are_exact() {
        let cps = unweighted(&[(100.0, 200.0), (300.0, 400.0), (500.0, 600.0)]);
        let curve = Nurbs::new(&cps, 2).unwrap();
        assert_eq!(curve.eval(0.0), Point::new(100.0, 200.0));
        assert_eq!(curve.eval(1.0), Point::new(500.0, 600.0));
        assert_eq!(curve.eval(-0.5), Point::new(100.0, 200.0));
        assert_eq!(curve.eval(1.5), Point::new(500.0, 600.0));
        assert_eq!(curve.eval(f64::NAN), Point::new(100.0, 200.0));
    }

    #[test]
    fn interior_never_zero() {
        let cps = unweighted(&[(100.0, 200.0), (300.0, 400.0), (500.0, 600.0)]);
        let curve = Nurbs::new(&cps, 2).unwrap();
        for i in 0..=10 {
            let p = curve.eval(i as f64 / 10.0);
            assert_ne!(p, Point::ZERO, "t={} collapsed to the origin", i as f64 / 10.0);
        }
    }

    #[test]
    fn single_span_is_bezier() {
        let cps = unweighted(&[(0.0, 0.0), (100.0, 100.0), (200.0, 0.0)]);
        let curve = Nurbs::new(&cps, 2).unwrap();
        for &t in &[0.1, 0.25, 0.5, 0.8] {
            let mt = 1.0 - t;
            let expected = Point::new(
                2.0 * t * mt * 100.0 + t * t * 200.0,
                2.0 * t * mt * 100.0,
            );
            assert!(curve.eval(t).distance(expected) < 1e-9);
        }
    }

    #[test]
    fn linear_matches_lerp() {
        let cps = unweighted(&[(0.0, 0.0), (100.0, 0.0)]);
        let curve = Nurbs::new(&cps, 1).unwrap();
        assert_eq!(curve.eval(0.5), Point::new(50.0, 0.0));
        assert!(curve.eval(0.37).distance(Point::new(37.0, 0.0)) < 1e-9);
    }

    #[test]
    fn weights_trace_a_circular_arc() {
        let cps = [
            ControlPoint::new(Point::new(1.0, 0.0), 1.0),
            ControlPoint::new(Point::new(1.0, 1.0), core::f64::consts::FRAC_1_SQRT_2),
            ControlPoint::new(Point::new(0.0, 1.0), 1.0),
        ];
        let curve = Nurbs::new(&cps, 2).unwrap();
        for p in curve.samples(50) {
            let r = p.to_vec2().hypot();
            assert!((r - 1.0).abs() < 1e-12, "{p:?} is off the unit circle");
        }
    }

    #[test]
    fn basis_is_partition_of_unity() {
        let cps = unweighted(&[
            (0.0, 0.0),
            (1.0, 2.0),
            (3.0, 2.0),
            (4.0, 0.0),
            (6.0, 1.0),
            (7.0, 3.0),
        ]);
        let curve = Nurbs::new(&cps, 3).unwrap();
        for i in 1..100 {
            let basis = curve.basis(i as f64 / 100.0);
            assert_eq!(basis.len(), cps.len());
            let sum: f64 = basis.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
            assert!(basis.iter().all(|&b| b >= 0.0));
        }
    }

    #[test]
    fn insufficient_control_points() {
        let cps = unweighted(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(
            Nurbs::new(&cps, 3).unwrap_err(),
            TraceError::InsufficientControlPoints {
                required: 4,
                actual: 2
            }
        );
        assert!(Nurbs::new(&[], 0).is_err());
    }

    #[test]
    fn degenerate_weights_fall_back_to_last_point() {
        let cps = [
            ControlPoint::new(Point::new(0.0, 0.0), 0.0),
            ControlPoint::new(Point::new(10.0, 5.0), 0.0),
            ControlPoint::new(Point::new(20.0, 0.0), 0.0),
        ];
        let curve = Nurbs::new(&cps, 2).unwrap();
        assert_eq!(curve.try_eval(0.5), Err(TraceError::DegenerateWeights));
        assert_eq!(curve.eval(0.5), Point::new(20.0, 0.0));
        // The endpoints never look at the weights.
        assert_eq!(curve.try_eval(0.0), Ok(Point::new(0.0, 0.0)));
    }

    #[test]
    fn random_curves_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let count = rng.random_range(2..12_usize);
            let degree = u32::try_from(rng.random_range(1..count.min(6))).unwrap();
            let cps: Vec<ControlPoint> = (0..count)
                .map(|_| {
                    let x = rng.random_range(-500.0..500.0);
                    let y = rng.random_range(-500.0..500.0);
                    ControlPoint::new(Point::new(x, y), rng.random_range(0.1..3.0))
                })
                .collect();
            let curve = Nurbs::new(&cps, degree).unwrap();
            assert_eq!(curve.eval(0.0), cps[0].position);
            assert_eq!(curve.eval(1.0), cps[count - 1].position);

            let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
            for cp in &cps {
                x0 = x0.min(cp.position.x);
                y0 = y0.min(cp.position.y);
                x1 = x1.max(cp.position.x);
                y1 = y1.max(cp.position.y);
            }
            let eps = 1e-9;
            for p in curve.samples(64) {
                assert!(p.is_finite());
                assert!(p.x >= x0 - eps && p.x <= x1 + eps, "{p:?} escaped the hull");
                assert!(p.y >= y0 - eps && p.y <= y1 + eps, "{p:?} escaped the hull");
            }
        }
    }
}
