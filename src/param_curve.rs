// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for curves parametrized by a scalar.

use core::iter::FusedIterator;

use crate::common::sample_param;
use crate::Point;

/// A curve parametrized by a scalar.
///
/// If the result is interpreted as a point, this represents a curve.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }

    /// A dense polyline of the curve, evaluated at `resolution + 1` uniformly
    /// spaced parameters from 0 to 1 inclusive.
    ///
    /// The iterator is lazy and holds no cache; clone it or call this again
    /// to walk the curve another time.
    fn samples(&self, resolution: usize) -> Samples<'_, Self> {
        Samples {
            curve: self,
            resolution,
            ix: 0,
        }
    }
}

/// The nearest position on a curve to some point.
///
/// This is returned by [`ParamCurveNearest::nearest`].
#[derive(Debug, Clone, Copy)]
pub struct Nearest {
    /// The position on the curve.
    pub point: Point,
    /// The Euclidean distance from the query point to [`point`](Self::point).
    pub distance: f64,
    /// The parameter at which [`point`](Self::point) lies.
    pub t: f64,
}

/// A parametrized curve that reports the nearest point.
pub trait ParamCurveNearest {
    /// Find the position on the curve nearest the given point.
    ///
    /// The search is a uniform scan of `resolution + 1` parameters, so the
    /// answer is within half a parameter step of the true projection. Ties
    /// go to the lowest parameter.
    fn nearest(&self, p: Point, resolution: usize) -> Nearest;
}

impl<C: ParamCurve> ParamCurveNearest for C {
    fn nearest(&self, p: Point, resolution: usize) -> Nearest {
        let start = self.start();
        let mut best = Nearest {
            point: start,
            distance: p.distance(start),
            t: 0.0,
        };
        for (i, point) in self.samples(resolution).enumerate().skip(1) {
            let distance = p.distance(point);
            if distance < best.distance {
                best = Nearest {
                    point,
                    distance,
                    t: sample_param(i, resolution),
                };
            }
        }
        best
    }
}

/// An iterator over uniformly spaced points of a curve.
///
/// This is returned by [`ParamCurve::samples`].
#[derive(Debug)]
pub struct Samples<'a, C> {
    curve: &'a C,
    resolution: usize,
    ix: usize,
}

impl<C> Clone for Samples<'_, C> {
    fn clone(&self) -> Self {
        Self {
            curve: self.curve,
            resolution: self.resolution,
            ix: self.ix,
        }
    }
}

impl<C: ParamCurve> Iterator for Samples<'_, C> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.ix > self.resolution {
            return None;
        }
        let t = sample_param(self.ix, self.resolution);
        self.ix += 1;
        Some(self.curve.eval(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.resolution + 1).saturating_sub(self.ix);
        (remaining, Some(remaining))
    }
}

impl<C: ParamCurve> ExactSizeIterator for Samples<'_, C> {}

impl<C: ParamCurve> FusedIterator for Samples<'_, C> {}

#[cfg(test)]
mod tests {
    use super::{ParamCurve, ParamCurveNearest};
    use crate::Point;

    /// A straight segment, enough to exercise the provided methods.
    struct Segment(Point, Point);

    impl ParamCurve for Segment {
        fn eval(&self, t: f64) -> Point {
            self.0.lerp(self.1, t)
        }
    }

    #[test]
    fn samples_are_exact_size_and_restartable() {
        let seg = Segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let samples = seg.samples(10);
        assert_eq!(samples.len(), 11);
        let first: Vec<Point> = samples.clone().collect();
        let second: Vec<Point> = samples.collect();
        assert_eq!(first, second);
        assert_eq!(first[3], Point::new(3.0, 0.0));
        assert_eq!(first[10], seg.end());
    }

    #[test]
    fn zero_resolution_is_start_only() {
        let seg = Segment(Point::new(1.0, 2.0), Point::new(10.0, 0.0));
        let pts: Vec<Point> = seg.samples(0).collect();
        assert_eq!(pts, vec![seg.start()]);
    }

    #[test]
    fn nearest_prefers_lowest_parameter_on_ties() {
        // (0, 5) is equidistant from both ends.
        let seg = Segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let hit = seg.nearest(Point::new(0.0, 5.0), 2);
        assert_eq!(hit.t, 0.5);
        let hit = seg.nearest(Point::new(0.0, 5.0), 1);
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, Point::new(-1.0, 0.0));
    }
}
