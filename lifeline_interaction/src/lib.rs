// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Interaction: pointer and wheel input for the timeline.
//!
//! Input arrives as [`InputEvent`] values and is fed through a single
//! [`Controller::handle`] call together with the [`Camera`](lifeline_camera::Camera)
//! it drives, so navigation can be tested without any input device:
//! - pointer down cancels any camera animation and starts a drag;
//! - pointer move pans proportionally while dragging (clamped at the lower
//!   time bound) and tracks a smoothed velocity, or hit-tests for a tooltip
//!   otherwise;
//! - pointer up hands the release velocity to the camera as momentum;
//! - wheel zooms about the pointer with an eased transition;
//! - resize recomputes the camera's zoom bounds.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use lifeline_camera::{Camera, CameraConfig};
//! use lifeline_interaction::{Controller, InputEvent};
//!
//! let mut camera = Camera::new(CameraConfig::default(), 0.0);
//! let mut controller = Controller::default();
//! controller.handle(&InputEvent::Resize { size: Size::new(800.0, 600.0) }, &mut camera, None);
//!
//! let before = camera.state().scale;
//! let wheel = InputEvent::Wheel { position: Point::new(400.0, 300.0), delta: -120.0, time_ms: 0.0 };
//! assert!(controller.handle(&wheel, &mut camera, None));
//! camera.tick(1_000.0);
//! assert!(camera.state().scale < before);
//! ```
//!
//! Hit testing ([`hit_test`]) checks branch lines, then branch start/end
//! markers, then nodes, against the same [`HitScene`] the renderer drew.

mod controller;
pub mod drag;
mod hit;

pub use controller::{Controller, InputEvent, InteractionConfig, WheelConfig};
pub use drag::{DragTracker, VelocityConfig};
pub use hit::{HitScene, HitTarget, HitTestConfig, Tooltip, hit_test};
