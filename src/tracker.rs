// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checkpoint-gated progress tracking of a trace along a curve.
//!
//! A [`ProgressTracker`] keeps one [`TrackingState`] per curve, keyed by a
//! host-assigned [`CurveId`]. Each tick the host hands it the current pointer
//! sample; the tracker projects the sample onto the curve and decides whether
//! the trace is still a valid, forward, in-tolerance trace, and whether it is
//! complete.
//!
//! A trace must start near the beginning of the curve, must stay within the
//! curve's tolerance radius while pressed, and only completes once it is past
//! the completion threshold with every checkpoint cleared. Releasing or
//! straying starts over.

use alloc::collections::BTreeMap;

use crate::checkpoint::{DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_FINAL_CHECKPOINT};
use crate::curve::check_tolerance_radius;
use crate::{Checkpoints, Nurbs, NurbsCurve, ParamCurveNearest, Point};

/// Identifies one curve within a [`ProgressTracker`].
///
/// The host picks the ids; a stroke index works well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveId(pub u64);

/// One pointer sample, in curve space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeInput {
    /// The pointer position.
    pub position: Point,
    /// Whether the pointer is down.
    pub is_pressed: bool,
    /// Seconds since the previous sample.
    pub delta_time: f64,
}

impl StrokeInput {
    /// A pressed sample.
    #[inline]
    pub fn pressed(position: impl Into<Point>, delta_time: f64) -> Self {
        Self {
            position: position.into(),
            is_pressed: true,
            delta_time,
        }
    }

    /// A released sample.
    #[inline]
    pub fn released(position: impl Into<Point>, delta_time: f64) -> Self {
        Self {
            position: position.into(),
            is_pressed: false,
            delta_time,
        }
    }
}

/// The verdict on one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValidationResult {
    /// The trace is being followed this tick.
    pub is_valid: bool,
    /// The curve has been traced to the end with every checkpoint cleared.
    pub is_complete: bool,
    /// How far along the curve the trace has got, in parameter space.
    pub raw_progress: f64,
    /// [`raw_progress`](Self::raw_progress) capped at the first outstanding
    /// checkpoint, for rendering the filled part of the curve.
    pub visual_progress: f64,
    /// The nearest scanned point on the curve.
    pub closest_point: Point,
    /// Distance from the sample to [`closest_point`](Self::closest_point).
    pub distance: f64,
}

/// Where a curve's trace stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracePhase {
    /// Not following the curve.
    #[default]
    Idle,
    /// Following the curve.
    Tracking,
    /// Traced to the end. Stays here until the host resets the curve.
    Complete,
}

/// Thresholds of the tracking state machine, all in parameter space except
/// the scan resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Steps of the nearest-point scan.
    pub search_resolution: usize,
    /// A trace may only begin before this parameter.
    pub start_threshold: f64,
    /// How far the trace may slip back without the update being ignored.
    pub backtrack_tolerance: f64,
    /// The trace must pass this parameter to complete.
    pub completion_threshold: f64,
    /// Spacing of the checkpoints.
    pub checkpoint_interval: f64,
    /// Parameter of the checkpoint added near the end.
    pub final_checkpoint: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            search_resolution: 200,
            start_threshold: 0.1,
            backtrack_tolerance: 0.05,
            completion_threshold: 0.95,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            final_checkpoint: DEFAULT_FINAL_CHECKPOINT,
        }
    }
}

impl TrackerConfig {
    /// Set the nearest-point scan resolution.
    #[must_use]
    pub fn with_search_resolution(mut self, search_resolution: usize) -> Self {
        self.search_resolution = search_resolution;
        self
    }

    /// Set the parameter a trace must begin before.
    #[must_use]
    pub fn with_start_threshold(mut self, start_threshold: f64) -> Self {
        self.start_threshold = start_threshold;
        self
    }

    /// Set how far back a trace may slip.
    #[must_use]
    pub fn with_backtrack_tolerance(mut self, backtrack_tolerance: f64) -> Self {
        self.backtrack_tolerance = backtrack_tolerance;
        self
    }

    /// Set the parameter a trace must pass to complete.
    #[must_use]
    pub fn with_completion_threshold(mut self, completion_threshold: f64) -> Self {
        self.completion_threshold = completion_threshold;
        self
    }

    /// Set the checkpoint spacing.
    #[must_use]
    pub fn with_checkpoint_interval(mut self, checkpoint_interval: f64) -> Self {
        self.checkpoint_interval = checkpoint_interval;
        self
    }

    /// Set the parameter of the checkpoint near the end.
    #[must_use]
    pub fn with_final_checkpoint(mut self, final_checkpoint: f64) -> Self {
        self.final_checkpoint = final_checkpoint;
        self
    }
}

/// The tracking session of one curve.
#[derive(Clone, Debug)]
pub struct TrackingState {
    phase: TracePhase,
    current_t: f64,
    checkpoints: Checkpoints,
    elapsed: f64,
}

impl TrackingState {
    fn new(curve: &Nurbs<'_>, config: &TrackerConfig) -> Self {
        Self {
            phase: TracePhase::Idle,
            current_t: 0.0,
            checkpoints: Checkpoints::generate(
                curve,
                config.checkpoint_interval,
                config.final_checkpoint,
            ),
            elapsed: 0.0,
        }
    }

    /// Where the trace stands.
    #[inline]
    pub fn phase(&self) -> TracePhase {
        self.phase
    }

    /// Whether the trace is being followed.
    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.phase == TracePhase::Tracking
    }

    /// The furthest parameter reached.
    #[inline]
    pub fn current_parameter(&self) -> f64 {
        self.current_t
    }

    /// The curve's checkpoints, frozen when the session began.
    #[inline]
    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Seconds spent tracking since the trace last started.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Raw progress, held back at the first outstanding checkpoint.
    pub fn visual_progress(&self) -> f64 {
        let cap = self.checkpoints.first_uncleared().map_or(1.0, |cp| cp.t);
        self.current_t.min(cap)
    }

    fn begin(&mut self, t: f64) {
        self.phase = TracePhase::Tracking;
        self.current_t = t;
        self.checkpoints.reset();
        self.elapsed = 0.0;
    }

    fn restart(&mut self) {
        self.phase = TracePhase::Idle;
        self.current_t = 0.0;
        self.checkpoints.reset();
        self.elapsed = 0.0;
    }
}

/// Tracks trace progress for any number of curves.
///
/// The tracker is the only thing that mutates tracking state, and every
/// [`validate`](Self::validate) call reads then writes it. A host sharing a
/// tracker between threads should hold one lock around each call.
///
/// # Examples
///
/// ```
/// use spuro::{CurveId, NurbsCurve, ProgressTracker, StrokeInput};
///
/// let curve = NurbsCurve::new([(0.0, 0.0), (1000.0, 0.0)])
///     .with_degree(1)
///     .with_tolerance_radius(10.0);
/// let id = CurveId(0);
/// let mut tracker = ProgressTracker::new();
///
/// // Starting mid-curve does not count.
/// let result = tracker.validate(id, &curve, StrokeInput::pressed((500.0, 0.0), 0.016));
/// assert!(!result.is_valid);
///
/// let mut result = tracker.validate(id, &curve, StrokeInput::pressed((0.0, 0.0), 0.016));
/// assert!(result.is_valid);
/// for x in (5..=1000).step_by(5) {
///     result = tracker.validate(id, &curve, StrokeInput::pressed((f64::from(x), 0.0), 0.016));
///     if result.is_complete {
///         break;
///     }
/// }
/// assert!(result.is_complete);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProgressTracker {
    config: TrackerConfig,
    sessions: BTreeMap<CurveId, TrackingState>,
}

impl ProgressTracker {
    /// Create a tracker with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with the given thresholds.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            sessions: BTreeMap::new(),
        }
    }

    /// The thresholds in use.
    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Judge one pointer sample against `curve`.
    ///
    /// The tracking state for `id` is created on first use, with its
    /// checkpoints taken from `curve` at that moment. A curve that cannot be
    /// traced yields an all-false result and leaves no state behind.
    pub fn validate(
        &mut self,
        id: CurveId,
        curve: &NurbsCurve,
        input: StrokeInput,
    ) -> ValidationResult {
        if curve.control_points().len() < 2 {
            return ValidationResult::default();
        }
        let (nurbs, radius) = match curve
            .nurbs()
            .and_then(|nurbs| Ok((nurbs, check_tolerance_radius(curve.tolerance_radius())?)))
        {
            Ok(ready) => ready,
            Err(err) => {
                log::warn!("curve {id:?} cannot be traced: {err}");
                return ValidationResult::default();
            }
        };

        let config = self.config;
        let hit = nurbs.nearest(input.position, config.search_resolution);
        let within_radius = hit.distance <= radius;
        let state = self
            .sessions
            .entry(id)
            .or_insert_with(|| TrackingState::new(&nurbs, &config));

        let mut result = ValidationResult {
            closest_point: hit.point,
            distance: hit.distance,
            ..ValidationResult::default()
        };
        log::trace!(
            "{id:?}: t={:.3} distance={:.1} pressed={} phase={:?}",
            hit.t,
            hit.distance,
            input.is_pressed,
            state.phase
        );

        if state.phase == TracePhase::Complete {
            result.is_complete = true;
            result.raw_progress = state.current_t;
            result.visual_progress = state.visual_progress();
            return result;
        }

        if input.is_pressed && within_radius {
            if state.phase == TracePhase::Idle {
                if hit.t < config.start_threshold {
                    state.begin(hit.t);
                    log::debug!("{id:?}: started tracing at t={:.3}", hit.t);
                }
            } else {
                state
                    .checkpoints
                    .clear_reached(input.position, hit.t, radius);
                if hit.t >= state.current_t - config.backtrack_tolerance {
                    state.current_t = state.current_t.max(hit.t);
                }
                if input.delta_time.is_finite() && input.delta_time > 0.0 {
                    state.elapsed += input.delta_time;
                }
            }
            result.is_valid = state.phase == TracePhase::Tracking;
            result.raw_progress = state.current_t;
            result.visual_progress = state.visual_progress();
            result.is_complete = result.is_valid
                && state.current_t > config.completion_threshold
                && state.checkpoints.all_cleared();
            if result.is_complete {
                state.phase = TracePhase::Complete;
                log::debug!(
                    "{id:?}: complete after {:.2}s at t={:.3}",
                    state.elapsed,
                    state.current_t
                );
            }
        } else if state.phase == TracePhase::Tracking {
            log::debug!(
                "{id:?}: lost trace at t={:.3} ({})",
                state.current_t,
                if input.is_pressed {
                    "left tolerance"
                } else {
                    "released"
                }
            );
            state.restart();
        }
        result
    }

    /// Forget the tracking state of one curve.
    ///
    /// The next [`validate`](Self::validate) for `id` starts a fresh idle
    /// session with new checkpoints. Returns whether there was state to drop.
    pub fn reset_progress(&mut self, id: CurveId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Forget the tracking state of every curve.
    pub fn clear_all_progress(&mut self) {
        self.sessions.clear();
    }

    /// The tracking state of a curve, if it has been validated since the
    /// last reset.
    pub fn state(&self, id: CurveId) -> Option<&TrackingState> {
        self.sessions.get(&id)
    }

    /// Where the trace of a curve stands; idle if it has no state.
    pub fn phase(&self, id: CurveId) -> TracePhase {
        self.state(id).map_or(TracePhase::Idle, TrackingState::phase)
    }

    /// How many curves have tracking state.
    pub fn tracked_count(&self) -> usize {
        self.sessions.len()
    }
}
