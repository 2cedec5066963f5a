// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Camera: viewport state and the animation scheduler behind it.
//!
//! A [`Camera`] owns the [`ViewportState`] (scale, time offset and vertical
//! offset) and the single [`AnimationState`] that may drive it:
//! - [`AnimationState::Momentum`]: post-drag inertia decaying every frame;
//! - [`AnimationState::Transition`]: an eased [`CameraTransition`] towards a
//!   target state, started by a wheel zoom or a programmatic focus;
//! - [`AnimationState::Idle`]: nothing to do, so the host need not schedule
//!   frames.
//!
//! Starting either animation discards the other. Every mutation keeps the
//! scale within the [`ZoomBounds`] derived from the view width and keeps the
//! epoch from entering the view by more than a fixed left padding.
//!
//! The host drives the loop:
//!
//! ```rust
//! use kurbo::Size;
//! use lifeline_camera::{Camera, CameraConfig};
//!
//! let mut camera = Camera::new(CameraConfig::default(), 0.0);
//! camera.resize(Size::new(1_000.0, 600.0));
//!
//! // Zoom in around the pointer at x = 500.
//! let mut now = 0.0;
//! camera.zoom_about(500.0, 0.5, now);
//! while camera.is_active() {
//!     now += 16.0;
//!     camera.tick(now);
//!     // ... redraw ...
//! }
//! ```
//!
//! Velocities are in pixels per nominal frame, timestamps in host monotonic
//! milliseconds.

mod camera;
mod easing;
mod momentum;
mod transition;
mod viewport;

pub use camera::{AnimationState, Camera, CameraConfig, FocusTiming};
pub use easing::Easing;
pub use momentum::{Momentum, MomentumConfig};
pub use transition::{Anchor, CameraTransition};
pub use viewport::{Projection, ViewportState, ZoomBounds, min_time_offset};
