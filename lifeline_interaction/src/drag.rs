// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: total offset from the press position plus a smoothed
//! release velocity.
//!
//! ```
//! use kurbo::Point;
//! use lifeline_camera::ViewportState;
//! use lifeline_interaction::{DragTracker, VelocityConfig};
//!
//! let mut drag = DragTracker::default();
//! drag.start(Point::new(10.0, 20.0), ViewportState::default(), 0.0);
//! let total = drag.update(Point::new(30.0, 20.0), 16.0, &VelocityConfig::default());
//! assert_eq!(total.unwrap().x, 20.0);
//! ```

use kurbo::{Point, Vec2};
use lifeline_camera::ViewportState;

/// Velocity estimation tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VelocityConfig {
    /// Weight of the newest sample in the moving average, in `(0, 1]`.
    pub smoothing: f64,
    /// Samples further apart than this restart the estimate, and a release
    /// this long after the last move carries no velocity.
    pub stale_after_ms: f64,
    /// Length of the nominal frame velocities are expressed in.
    pub frame_ms: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.8,
            stale_after_ms: 100.0,
            frame_ms: 1_000.0 / 60.0,
        }
    }
}

/// State of an in-progress drag.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveDrag {
    start_pos: Point,
    last_pos: Point,
    last_ms: f64,
    origin: ViewportState,
    velocity: Vec2,
}

/// Tracks a pointer drag from press to release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    /// Starts a drag at `pos`, remembering the viewport it started from.
    pub fn start(&mut self, pos: Point, origin: ViewportState, now_ms: f64) {
        self.active = Some(ActiveDrag {
            start_pos: pos,
            last_pos: pos,
            last_ms: now_ms,
            origin,
            velocity: Vec2::ZERO,
        });
    }

    /// Records a move and returns the total offset from the press position.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point, now_ms: f64, config: &VelocityConfig) -> Option<Vec2> {
        let drag = self.active.as_mut()?;
        let dt = now_ms - drag.last_ms;
        let delta = pos - drag.last_pos;
        if dt > 0.0 && config.frame_ms > 0.0 {
            let sample = delta * (config.frame_ms / dt);
            drag.velocity = if dt > config.stale_after_ms {
                sample
            } else {
                sample * config.smoothing + drag.velocity * (1.0 - config.smoothing)
            };
            drag.last_ms = now_ms;
            drag.last_pos = pos;
        }
        // Moves sharing a timestamp fold into the next timed sample.
        Some(pos - drag.start_pos)
    }

    /// The viewport state the drag started from.
    #[must_use]
    pub fn origin(&self) -> Option<ViewportState> {
        self.active.map(|drag| drag.origin)
    }

    /// Total offset of `pos` from the press position.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.active.map(|drag| pos - drag.start_pos)
    }

    /// Current smoothed velocity in px/frame.
    #[must_use]
    pub fn velocity(&self) -> Option<Vec2> {
        self.active.map(|drag| drag.velocity)
    }

    /// Ends the drag, returning the release velocity in px/frame.
    ///
    /// A release long after the last move means the pointer came to rest
    /// first, so the velocity is zero.
    pub fn end(&mut self, now_ms: f64, config: &VelocityConfig) -> Option<Vec2> {
        let drag = self.active.take()?;
        if now_ms - drag.last_ms > config.stale_after_ms || !drag.velocity.is_finite() {
            return Some(Vec2::ZERO);
        }
        Some(drag.velocity)
    }

    /// Drops the drag without producing a velocity.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_tracker_ignores_moves() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0), 5.0, &config), None);
        assert_eq!(drag.end(5.0, &config), None);
    }

    #[test]
    fn total_offset_is_from_press() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig::default();
        drag.start(Point::new(10.0, 20.0), ViewportState::default(), 0.0);
        drag.update(Point::new(15.0, 25.0), 10.0, &config);
        let total = drag.update(Point::new(30.0, 10.0), 20.0, &config);
        assert_eq!(total, Some(Vec2::new(20.0, -10.0)));
        assert_eq!(drag.total_offset(Point::new(10.0, 20.0)), Some(Vec2::ZERO));
        assert_eq!(drag.origin(), Some(ViewportState::default()));
    }

    #[test]
    fn steady_motion_converges_to_per_frame_speed() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig {
            frame_ms: 10.0,
            ..VelocityConfig::default()
        };
        drag.start(Point::ZERO, ViewportState::default(), 0.0);
        // 5 px every 10 ms is 5 px per nominal frame.
        for i in 1..=10 {
            let t = f64::from(i) * 10.0;
            drag.update(Point::new(t * 0.5, 0.0), t, &config);
        }
        let v = drag.end(100.0, &config).unwrap();
        assert!((v.x - 5.0).abs() < 1e-6, "{v:?}");
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn smoothing_weights_recent_samples() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig {
            frame_ms: 10.0,
            ..VelocityConfig::default()
        };
        drag.start(Point::ZERO, ViewportState::default(), 0.0);
        drag.update(Point::new(10.0, 0.0), 10.0, &config);
        drag.update(Point::new(10.0, 0.0), 20.0, &config);
        // 0.8 * 0 + 0.2 * (0.8 * 10)
        assert!((drag.velocity().unwrap().x - 1.6).abs() < 1e-9);
    }

    #[test]
    fn stale_samples_restart_the_estimate() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig {
            frame_ms: 10.0,
            ..VelocityConfig::default()
        };
        drag.start(Point::ZERO, ViewportState::default(), 0.0);
        drag.update(Point::new(100.0, 0.0), 10.0, &config);
        drag.update(Point::new(110.0, 0.0), 510.0, &config);
        assert!((drag.velocity().unwrap().x - 0.2).abs() < 1e-9);
    }

    #[test]
    fn late_release_has_no_velocity() {
        let mut drag = DragTracker::default();
        let config = VelocityConfig::default();
        drag.start(Point::ZERO, ViewportState::default(), 0.0);
        drag.update(Point::new(50.0, 0.0), 16.0, &config);
        assert_eq!(drag.end(400.0, &config), Some(Vec2::ZERO));
        assert!(!drag.is_dragging());
    }
}
