// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A game loop over a rotation of shapes, traced stroke by stroke.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::trail::DEFAULT_FADE_TIME;
use crate::{
    CurveId, NurbsCurve, ProgressTracker, Shape, StrokeInput, Trail, TrackerConfig,
    ValidationResult,
};

/// Timing and thresholds of a [`TracingSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Seconds between finishing a stroke and the next stroke activating.
    pub stroke_delay: f64,
    /// Seconds between finishing a shape and the next shape loading.
    pub shape_delay: f64,
    /// Seconds a trail point stays visible.
    pub trail_fade_time: f64,
    /// Thresholds handed to the session's [`ProgressTracker`].
    pub tracker: TrackerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stroke_delay: 0.5,
            shape_delay: 1.0,
            trail_fade_time: DEFAULT_FADE_TIME,
            tracker: TrackerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the pause after a stroke.
    #[must_use]
    pub fn with_stroke_delay(mut self, stroke_delay: f64) -> Self {
        self.stroke_delay = stroke_delay;
        self
    }

    /// Set the pause after a shape.
    #[must_use]
    pub fn with_shape_delay(mut self, shape_delay: f64) -> Self {
        self.shape_delay = shape_delay;
        self
    }

    /// Set how long trail points stay visible.
    #[must_use]
    pub fn with_trail_fade_time(mut self, trail_fade_time: f64) -> Self {
        self.trail_fade_time = trail_fade_time;
        self
    }

    /// Set the tracker thresholds.
    #[must_use]
    pub fn with_tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }
}

/// Something that happened during one [`TracingSession::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A stroke was traced to the end.
    StrokeCompleted {
        /// Index of the shape in the rotation.
        shape: usize,
        /// Index of the stroke within the shape.
        stroke: usize,
    },
    /// The last stroke of a shape was traced, and its score awarded.
    ShapeCompleted {
        /// Index of the shape in the rotation.
        shape: usize,
        /// The session score after the award.
        score: u32,
    },
}

/// The outcome of one [`TracingSession::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionUpdate {
    /// The tracker's verdict on the active stroke. All false while the
    /// session is pausing between strokes or shapes.
    pub validation: ValidationResult,
    /// Completions reached on this tick, in order.
    pub events: ArrayVec<SessionEvent, 2>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Pause {
    NextStroke(f64),
    NextShape(f64),
}

/// Drives a rotation of shapes, one stroke at a time.
///
/// Each shape's strokes must be traced in order. Once a stroke completes, the
/// session pauses before activating the next; once a shape completes it adds
/// the shape's score and pauses before loading the next shape, wrapping back
/// to the first after the last.
///
/// # Examples
///
/// ```
/// use spuro::{presets, SessionEvent, StrokeInput, TracingSession};
///
/// let mut session = TracingSession::new(vec![presets::one()]);
/// let mut events = Vec::new();
/// for y in (100..=500).step_by(2) {
///     let update = session.update(StrokeInput::pressed((300.0, f64::from(y)), 0.016));
///     events.extend(update.events);
/// }
/// assert_eq!(
///     events.last(),
///     Some(&SessionEvent::ShapeCompleted { shape: 0, score: 1 })
/// );
/// assert_eq!(session.score(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TracingSession {
    config: SessionConfig,
    shapes: Vec<Shape>,
    shape_index: usize,
    stroke_index: usize,
    tracker: ProgressTracker,
    trail: Trail,
    score: u32,
    pause: Option<Pause>,
}

impl TracingSession {
    /// Start a session on the first of `shapes`, with default timing.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self::with_config(shapes, SessionConfig::default())
    }

    /// Start a session on the first of `shapes`.
    pub fn with_config(shapes: Vec<Shape>, config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            shapes,
            shape_index: 0,
            stroke_index: 0,
            tracker: ProgressTracker::with_config(config.tracker),
            trail: Trail::new(config.trail_fade_time),
            score: 0,
            pause: None,
        };
        session.load_shape(0);
        session
    }

    /// The timing and thresholds in use.
    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The shapes in rotation.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Index of the active shape.
    #[inline]
    pub fn shape_index(&self) -> usize {
        self.shape_index
    }

    /// Index of the active stroke within the active shape.
    #[inline]
    pub fn stroke_index(&self) -> usize {
        self.stroke_index
    }

    /// The active shape, if there is one.
    pub fn current_shape(&self) -> Option<&Shape> {
        self.shapes.get(self.shape_index)
    }

    /// The stroke being traced, if there is one.
    pub fn current_stroke(&self) -> Option<&NurbsCurve> {
        self.current_shape()?.stroke(self.stroke_index)
    }

    /// The total score of completed shapes.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The underlying tracker, keyed by stroke index.
    #[inline]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Recent pointer positions on the active stroke.
    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Whether the session is pausing after a completion.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.pause.is_some()
    }

    /// Make `index` the active shape, starting from its first stroke.
    ///
    /// All tracking progress is dropped. Returns `false`, changing nothing,
    /// if `index` is out of range.
    pub fn load_shape(&mut self, index: usize) -> bool {
        let Some(shape) = self.shapes.get(index) else {
            if self.shapes.is_empty() {
                log::warn!("tracing session has no shapes");
            }
            return false;
        };
        if shape.stroke_count() == 0 {
            log::warn!("shape {:?} has no strokes", shape.name());
        }
        log::debug!("loading shape {index} {:?}", shape.name());
        self.shape_index = index;
        self.stroke_index = 0;
        self.pause = None;
        self.tracker.clear_all_progress();
        self.trail.clear();
        true
    }

    /// Feed one pointer sample.
    pub fn update(&mut self, input: StrokeInput) -> SessionUpdate {
        let mut update = SessionUpdate::default();
        self.trail.advance(input.delta_time);

        if let Some(pause) = self.pause {
            self.count_down(pause, input.delta_time);
            if self.pause.is_some() {
                return update;
            }
        }

        let shape_index = self.shape_index;
        let stroke_index = self.stroke_index;
        let Some(shape) = self.shapes.get(shape_index) else {
            return update;
        };
        let Some(stroke) = shape.stroke(stroke_index) else {
            return update;
        };
        let last_stroke = stroke_index + 1 == shape.stroke_count();
        let score_value = shape.score_value();

        update.validation = self
            .tracker
            .validate(CurveId(stroke_index as u64), stroke, input);
        if input.is_pressed {
            self.trail.push(input.position);
        }
        if !update.validation.is_complete {
            return update;
        }

        log::debug!("shape {shape_index}: stroke {stroke_index} complete");
        update.events.push(SessionEvent::StrokeCompleted {
            shape: shape_index,
            stroke: stroke_index,
        });
        if last_stroke {
            self.score = self.score.saturating_add(score_value);
            log::debug!("shape {shape_index} complete, score {}", self.score);
            update.events.push(SessionEvent::ShapeCompleted {
                shape: shape_index,
                score: self.score,
            });
            self.pause = Some(Pause::NextShape(self.config.shape_delay));
        } else {
            self.pause = Some(Pause::NextStroke(self.config.stroke_delay));
        }
        update
    }

    /// Restart the active shape and zero the score.
    pub fn restart(&mut self) {
        self.score = 0;
        self.load_shape(self.shape_index);
    }

    fn count_down(&mut self, pause: Pause, delta_time: f64) {
        let dt = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        match pause {
            Pause::NextStroke(remaining) if remaining > dt => {
                self.pause = Some(Pause::NextStroke(remaining - dt));
            }
            Pause::NextShape(remaining) if remaining > dt => {
                self.pause = Some(Pause::NextShape(remaining - dt));
            }
            Pause::NextStroke(_) => {
                self.pause = None;
                self.stroke_index += 1;
                self.trail.clear();
                log::debug!(
                    "shape {}: moving to stroke {}",
                    self.shape_index,
                    self.stroke_index
                );
            }
            Pause::NextShape(_) => {
                let next = (self.shape_index + 1) % self.shapes.len().max(1);
                self.load_shape(next);
            }
        }
    }
}
