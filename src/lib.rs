// Copyright 2026 the Spuro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve tracing validation.
//!
//! The spuro library checks whether a pointer is tracing a curve: drawing
//! along it from the start, within a tolerance radius, through every
//! checkpoint, to the end. It was built for handwriting practice, where a
//! learner traces the strokes of a digit, but it works for any stroke that can
//! be described as a NURBS curve.
//!
//! The pieces are layered:
//!
//! - [`NurbsCurve`] is an authored stroke: weighted control points, a degree
//!   and a tolerance radius. [`Nurbs`] is its evaluation view, implementing
//!   [`ParamCurve`] and, through it, a sampled [`ParamCurveNearest`].
//! - [`Checkpoints`] are points along a curve that a trace must pass.
//! - [`ProgressTracker`] judges one [`StrokeInput`] per tick and keeps a
//!   [`TrackingState`] per curve.
//! - [`TracingSession`] runs a rotation of [`Shape`]s stroke by stroke, with
//!   pauses, scoring and a fading [`Trail`]. Ready-made digits live in
//!   [`presets`].
//!
//! # Examples
//!
//! Tracing a straight stroke:
//!
//! ```
//! use spuro::{CurveId, NurbsCurve, ProgressTracker, StrokeInput};
//!
//! let stroke = NurbsCurve::new([(100.0, 100.0), (100.0, 300.0), (100.0, 500.0)])
//!     .with_degree(2);
//! let mut tracker = ProgressTracker::new();
//! let id = CurveId(0);
//!
//! let mut done = false;
//! for y in (100..=500).step_by(4) {
//!     let input = StrokeInput::pressed((100.0, f64::from(y)), 1.0 / 60.0);
//!     let result = tracker.validate(id, &stroke, input);
//!     assert!(result.is_valid || result.is_complete);
//!     done |= result.is_complete;
//! }
//! assert!(done);
//! ```
//!
//! Projecting a point onto a curve:
//!
//! ```
//! use spuro::{NurbsCurve, Point};
//!
//! let stroke = NurbsCurve::new([(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)]).with_degree(2);
//! let hit = stroke.closest_point(Point::new(50.0, 80.0), 200).unwrap();
//! assert_eq!(hit.t, 0.5);
//! assert_eq!(hit.point, Point::new(50.0, 50.0));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. This crate still uses the `alloc` crate regardless.
//!
//! The `serde` feature derives serialization for the geometry, curve, shape
//! and config types, and `mint` adds conversions for [`Point`] and [`Vec2`].
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade: warnings when a curve or
//! config cannot be used, debug records on tracking transitions and trace
//! records per tick. No logger is installed.
//!
//! [`libm`]: https://docs.rs/libm
//! [`log`]: https://docs.rs/log

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::many_single_char_names,
    reason = "control point and basis math reads best with short names"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("spuro requires either the `std` or `libm` feature");

extern crate alloc;

mod checkpoint;
pub(crate) mod common;
mod curve;
mod error;
mod nurbs;
mod param_curve;
mod point;
pub mod presets;
mod session;
mod shape;
mod tracker;
mod trail;
mod vec2;

pub use crate::checkpoint::*;
pub use crate::curve::*;
pub use crate::error::*;
pub use crate::nurbs::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::session::*;
pub use crate::shape::*;
pub use crate::tracker::*;
pub use crate::trail::*;
pub use crate::vec2::*;
