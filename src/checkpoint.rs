// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered checkpoints along a curve.

use smallvec::SmallVec;

use crate::{ParamCurve, Point, TraceError};

/// Spacing used when a configured interval is unusable.
pub const DEFAULT_CHECKPOINT_INTERVAL: f64 = 0.1;

/// Parameter of the checkpoint every curve gets near its end.
pub const DEFAULT_FINAL_CHECKPOINT: f64 = 0.95;

/// A fixed position along the curve that a trace must pass near.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    /// The curve parameter, in (0, 1).
    pub t: f64,
    /// The curve position at [`t`](Self::t), frozen when generated.
    pub point: Point,
    /// Whether the trace has passed this checkpoint.
    pub cleared: bool,
}

/// The checkpoints of one curve, in increasing parameter order.
#[derive(Clone, Debug, Default)]
pub struct Checkpoints {
    items: SmallVec<[Checkpoint; 12]>,
    last_cleared: Option<usize>,
}

/// Check a checkpoint interval.
///
/// # Errors
///
/// Returns [`TraceError::InvalidCheckpointInterval`] unless the interval is
/// strictly between 0 and 1.
pub fn check_interval(interval: f64) -> Result<f64, TraceError> {
    if interval > 0.0 && interval < 1.0 {
        Ok(interval)
    } else {
        Err(TraceError::InvalidCheckpointInterval(interval))
    }
}

impl Checkpoints {
    /// Generate checkpoints at every multiple of `interval` below 1, plus one
    /// at `final_t` when the last multiple falls short of it.
    ///
    /// An interval outside (0, 1) is replaced by
    /// [`DEFAULT_CHECKPOINT_INTERVAL`] with a warning.
    pub fn generate(curve: &impl ParamCurve, interval: f64, final_t: f64) -> Self {
        let interval = check_interval(interval).unwrap_or_else(|err| {
            log::warn!("{err}, using {DEFAULT_CHECKPOINT_INTERVAL}");
            DEFAULT_CHECKPOINT_INTERVAL
        });
        let mut items = SmallVec::new();
        let mut k = 1_u32;
        loop {
            let t = f64::from(k) * interval;
            if t >= 1.0 {
                break;
            }
            items.push(Checkpoint {
                t,
                point: curve.eval(t),
                cleared: false,
            });
            k += 1;
        }
        let needs_final = items.last().map_or(true, |cp: &Checkpoint| cp.t < final_t);
        if needs_final && final_t > 0.0 && final_t < 1.0 {
            items.push(Checkpoint {
                t: final_t,
                point: curve.eval(final_t),
                cleared: false,
            });
        }
        Self {
            items,
            last_cleared: None,
        }
    }

    /// All checkpoints, in order.
    #[inline]
    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.items
    }

    /// The number of checkpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no checkpoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the furthest checkpoint cleared so far, if any.
    #[inline]
    pub fn last_cleared(&self) -> Option<usize> {
        self.last_cleared
    }

    /// How many checkpoints are cleared.
    pub fn cleared_count(&self) -> usize {
        self.items.iter().filter(|cp| cp.cleared).count()
    }

    /// Whether every checkpoint is cleared.
    pub fn all_cleared(&self) -> bool {
        self.items.iter().all(|cp| cp.cleared)
    }

    /// The first checkpoint still outstanding.
    pub fn first_uncleared(&self) -> Option<&Checkpoint> {
        self.items.iter().find(|cp| !cp.cleared)
    }

    /// Mark every checkpoint as outstanding again.
    pub fn reset(&mut self) {
        for cp in &mut self.items {
            cp.cleared = false;
        }
        self.last_cleared = None;
    }

    /// Clear the checkpoints `position` is within `radius` of, in order.
    ///
    /// A checkpoint is only cleared if it is the next one after the last
    /// cleared index (or earlier), or if the live parameter `t` has already
    /// reached it. Returns the number of checkpoints newly cleared.
    pub fn clear_reached(&mut self, position: Point, t: f64, radius: f64) -> usize {
        let mut newly = 0;
        for (ix, cp) in self.items.iter_mut().enumerate() {
            if cp.cleared || position.distance(cp.point) > radius {
                continue;
            }
            let next = self.last_cleared.map_or(0, |last| last + 1);
            if ix <= next || t >= cp.t {
                cp.cleared = true;
                self.last_cleared = Some(self.last_cleared.map_or(ix, |last| last.max(ix)));
                newly += 1;
                log::debug!("cleared checkpoint {ix} at t={}", cp.t);
            }
        }
        newly
    }
}
