// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made digit shapes, laid out on a 600 by 600 canvas with y down.

use alloc::vec;
use alloc::vec::Vec;

use crate::{NurbsCurve, Shape};

/// The digit 0: an oval traced clockwise from the top.
pub fn zero() -> Shape {
    Shape::new("0").with_stroke(NurbsCurve::new([
        (300.0, 100.0),
        (450.0, 150.0),
        (500.0, 300.0),
        (450.0, 450.0),
        (300.0, 500.0),
        (150.0, 450.0),
        (100.0, 300.0),
        (150.0, 150.0),
        (300.0, 100.0),
    ]))
}

/// The digit 1: a straight line from top to bottom.
pub fn one() -> Shape {
    Shape::new("1").with_stroke(
        NurbsCurve::new([(300.0, 100.0), (300.0, 300.0), (300.0, 500.0)]).with_degree(2),
    )
}

/// The digit 2 as a single stroke: top curve, diagonal, then the base.
pub fn two() -> Shape {
    Shape::new("2").with_stroke(NurbsCurve::new([
        (150.0, 150.0),
        (300.0, 100.0),
        (450.0, 150.0),
        (500.0, 200.0),
        (450.0, 250.0),
        (350.0, 300.0),
        (250.0, 400.0),
        (150.0, 450.0),
        (150.0, 500.0),
        (300.0, 500.0),
        (450.0, 500.0),
    ]))
}

/// The digit 2 in two strokes: the top curve, then the diagonal and base.
pub fn two_multi_stroke() -> Shape {
    Shape::new("2")
        .with_stroke(NurbsCurve::new([
            (150.0, 150.0),
            (250.0, 100.0),
            (350.0, 120.0),
            (400.0, 180.0),
            (380.0, 240.0),
            (320.0, 280.0),
        ]))
        .with_stroke(NurbsCurve::new([
            (320.0, 280.0),
            (280.0, 350.0),
            (200.0, 420.0),
            (150.0, 480.0),
            (150.0, 500.0),
            (280.0, 500.0),
            (420.0, 500.0),
        ]))
}

/// The digit 3: two bowls stacked, as a single stroke.
pub fn three() -> Shape {
    Shape::new("3").with_stroke(NurbsCurve::new([
        (150.0, 150.0),
        (300.0, 100.0),
        (450.0, 150.0),
        (400.0, 200.0),
        (350.0, 250.0),
        (300.0, 300.0),
        (400.0, 350.0),
        (450.0, 400.0),
        (350.0, 450.0),
        (200.0, 500.0),
        (150.0, 450.0),
    ]))
}

/// The single-stroke digits, in order.
pub fn digits() -> Vec<Shape> {
    vec![zero(), one(), two(), three()]
}

#[cfg(test)]
mod tests {
    use super::{digits, two_multi_stroke};
    use crate::ParamCurve;

    #[test]
    fn presets_are_traceable() {
        for shape in digits().iter().chain([&two_multi_stroke()]) {
            assert!(shape.validate().is_ok(), "{} cannot be traced", shape.name());
        }
    }

    #[test]
    fn multi_stroke_two_is_connected() {
        let shape = two_multi_stroke();
        let first = shape.stroke(0).unwrap().nurbs().unwrap();
        let second = shape.stroke(1).unwrap().nurbs().unwrap();
        assert_eq!(first.end(), second.start());
    }
}
