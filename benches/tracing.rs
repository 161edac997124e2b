// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks of curve evaluation, nearest-point scans and per-tick tracking.

#![expect(missing_docs, reason = "criterion emits undocumented functions")]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use spuro::{
    presets, CurveId, ParamCurve as _, ParamCurveNearest as _, Point, ProgressTracker,
    StrokeInput,
};

fn bench_eval(cc: &mut Criterion) {
    let shape = presets::two();
    let Some(stroke) = shape.stroke(0) else {
        return;
    };
    let Ok(curve) = stroke.nurbs() else {
        return;
    };
    cc.bench_function("nurbs eval", |bb| {
        bb.iter(|| black_box(&curve).eval(black_box(0.37)));
    });
}

fn bench_nearest(cc: &mut Criterion) {
    let shape = presets::three();
    let Some(stroke) = shape.stroke(0) else {
        return;
    };
    let Ok(curve) = stroke.nurbs() else {
        return;
    };
    let p = Point::new(380.0, 260.0);

    for resolution in [50_usize, 200, 800] {
        cc.bench_with_input(
            BenchmarkId::new("nurbs nearest point", resolution),
            &resolution,
            |bb, resolution| {
                bb.iter(|| black_box(&curve).nearest(black_box(p), *resolution));
            },
        );
    }
}

fn bench_validate(cc: &mut Criterion) {
    let shape = presets::zero();
    let Some(stroke) = shape.stroke(0) else {
        return;
    };
    let Ok(samples) = stroke.sample(300) else {
        return;
    };
    cc.bench_function("validate full trace", |bb| {
        bb.iter(|| {
            let mut tracker = ProgressTracker::new();
            for &p in &samples {
                black_box(tracker.validate(
                    CurveId(0),
                    stroke,
                    StrokeInput::pressed(p, 1.0 / 60.0),
                ));
            }
        });
    });
}

criterion_group!(benches, bench_eval, bench_nearest, bench_validate);
criterion_main!(benches);
