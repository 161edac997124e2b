// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fading trail of recent pointer positions.

use alloc::collections::VecDeque;

use crate::Point;

/// Default seconds a trail point stays visible.
pub const DEFAULT_FADE_TIME: f64 = 2.0;

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    /// Where the pointer was.
    pub position: Point,
    /// Seconds since the point was recorded.
    pub age: f64,
}

/// Recent pointer positions of the active stroke, oldest first.
///
/// Points age with [`advance`](Self::advance) and are dropped once they are
/// older than the fade time.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    fade_time: f64,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_TIME)
    }
}

impl Trail {
    /// Create an empty trail whose points fade over `fade_time` seconds.
    pub fn new(fade_time: f64) -> Self {
        Self {
            points: VecDeque::new(),
            fade_time,
        }
    }

    /// Seconds a point stays visible.
    #[inline]
    pub fn fade_time(&self) -> f64 {
        self.fade_time
    }

    /// Record a pointer position.
    pub fn push(&mut self, position: Point) {
        self.points.push_back(TrailPoint { position, age: 0.0 });
    }

    /// Age every point by `delta_time` seconds and drop the faded ones.
    pub fn advance(&mut self, delta_time: f64) {
        if delta_time.is_finite() && delta_time > 0.0 {
            for p in &mut self.points {
                p.age += delta_time;
            }
        }
        // Points are pushed in order, so the oldest are at the front.
        while self
            .points
            .front()
            .is_some_and(|p| p.age > self.fade_time)
        {
            self.points.pop_front();
        }
    }

    /// Opacity of a point, from 1 when fresh down to 0 when fully faded.
    pub fn alpha(&self, point: &TrailPoint) -> f64 {
        if self.fade_time > 0.0 {
            (1.0 - point.age / self.fade_time).max(0.0)
        } else {
            0.0
        }
    }

    /// The live points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// The number of live points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trail is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
