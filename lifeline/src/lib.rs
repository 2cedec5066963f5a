// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline: an interactive timeline viewport engine.
//!
//! A timeline shows a hierarchy of time-bounded *branches* as horizontal
//! lanes around a central axis, with point-in-time *nodes* on them. The
//! viewer pans by dragging (with momentum), zooms about the pointer with the
//! wheel, and can be moved programmatically with eased camera transitions.
//!
//! [`TimelineEngine`] ties the pieces together:
//! - [`lifeline_model`] resolves raw records into a [`Snapshot`];
//! - [`lifeline_layout`] assigns every branch a lane;
//! - [`lifeline_axis`] maps instants to pixels and plans calendar ticks;
//! - [`lifeline_camera`] owns the viewport, its bounds and its animation;
//! - [`lifeline_interaction`] turns [`InputEvent`]s into camera moves and
//!   tooltips;
//! - [`lifeline_render`] draws a frame as [`DrawOp`]s.
//!
//! The engine is single threaded and frame driven. It never blocks and never
//! fails after construction: bad records are skipped, out-of-range requests
//! are clamped, and an empty view simply draws nothing.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use lifeline::{
//!     BranchRecord, FixedClock, InputEvent, RecordingSurface, Snapshot, TimelineConfig,
//!     TimelineEngine, parse_timestamp,
//! };
//!
//! let now = parse_timestamp("2024-06-01").unwrap();
//! let mut engine = TimelineEngine::with_clock(TimelineConfig::default(), FixedClock::new(now))?;
//! engine.set_snapshot(Snapshot::resolve(
//!     &[
//!         BranchRecord::new("life", "Life", "1990-01-01"),
//!         BranchRecord::new("work", "Work", "2015-03-01").with_parent("life"),
//!     ],
//!     &[],
//! ));
//! engine.resize(Size::new(1024.0, 768.0));
//!
//! // Zoom in about the middle of the view, then run the frame loop.
//! engine.handle(&InputEvent::Wheel { position: Point::new(512.0, 384.0), delta: -240.0, time_ms: 0.0 });
//! let mut t = 0.0;
//! while engine.needs_frame() {
//!     t += 16.0;
//!     engine.tick(t);
//! }
//!
//! if engine.take_redraw_request() {
//!     let mut surface = RecordingSurface::new();
//!     engine.render(&mut surface);
//!     assert!(surface.find_text("Work").is_some());
//! }
//! # Ok::<(), lifeline::ConfigError>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`TimelineConfig`] and the raw
//!   records.

mod clock;
mod config;
mod engine;

pub use lifeline_axis;
pub use lifeline_camera;
pub use lifeline_interaction;
pub use lifeline_layout;
pub use lifeline_model;
pub use lifeline_render;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, TimelineConfig};
pub use engine::TimelineEngine;

pub use lifeline_camera::{AnimationState, ViewportState};
pub use lifeline_interaction::{HitTarget, InputEvent, Tooltip};
pub use lifeline_model::{
    Branch, BranchRecord, DataSource, Node, NodeKind, NodeRecord, Seconds, Snapshot,
    parse_timestamp,
};
pub use lifeline_render::{DrawOp, RecordingSurface, Surface};
