// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Size, Vec2};
use lifeline_model::{HOUR, Seconds, YEAR};
use tracing::{debug, trace};

use crate::easing::Easing;
use crate::momentum::{Momentum, MomentumConfig};
use crate::transition::{Anchor, CameraTransition};
use crate::viewport::{Projection, ViewportState, ZoomBounds, min_time_offset};

/// How long a programmatic focus move takes.
///
/// The duration grows with the on-screen travel distance and with the number
/// of e-folds the scale changes by, then is clamped to
/// `[min_ms, max_ms]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FocusTiming {
    /// Fixed part of every move.
    pub base_ms: f64,
    /// Added per pixel of travel.
    pub per_px_ms: f64,
    /// Added per e-fold of zoom change.
    pub per_zoom_efold_ms: f64,
    /// Shortest move.
    pub min_ms: f64,
    /// Longest move.
    pub max_ms: f64,
    /// Easing curve.
    pub easing: Easing,
}

impl Default for FocusTiming {
    fn default() -> Self {
        Self {
            base_ms: 300.0,
            per_px_ms: 0.5,
            per_zoom_efold_ms: 250.0,
            min_ms: 400.0,
            max_ms: 1_800.0,
            easing: Easing::EaseInOutCubic,
        }
    }
}

impl FocusTiming {
    /// Duration of a move travelling `travel_px` pixels while the scale
    /// changes by `zoom_ratio`.
    #[must_use]
    pub fn duration_ms(&self, travel_px: f64, zoom_ratio: f64) -> f64 {
        let efolds = if zoom_ratio > 0.0 {
            zoom_ratio.ln().abs()
        } else {
            0.0
        };
        let travel_px = if travel_px.is_finite() { travel_px.abs() } else { 0.0 };
        let raw = self.base_ms + self.per_px_ms * travel_px + self.per_zoom_efold_ms * efolds;
        if raw.is_nan() {
            return self.max_ms;
        }
        raw.clamp(self.min_ms, self.max_ms)
    }
}

/// Navigation tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// How far, in pixels, the lower time bound may sit inside the view.
    pub left_padding_px: f64,
    /// Calendar span visible across the view when fully zoomed in.
    pub zoom_in_span: Seconds,
    /// Calendar span visible across the view when fully zoomed out.
    pub zoom_out_span: Seconds,
    /// Post-drag inertia.
    pub momentum: MomentumConfig,
    /// Duration of a wheel zoom.
    pub wheel_duration_ms: f64,
    /// Easing of a wheel zoom.
    pub wheel_easing: Easing,
    /// Timing of programmatic focus moves.
    pub focus: FocusTiming,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            left_padding_px: 80.0,
            zoom_in_span: HOUR,
            zoom_out_span: 60.0 * YEAR,
            momentum: MomentumConfig::default(),
            wheel_duration_ms: 250.0,
            wheel_easing: Easing::EaseOutCubic,
            focus: FocusTiming::default(),
        }
    }
}

/// What the frame loop is currently driving.
///
/// Momentum and a transition are mutually exclusive: starting one replaces
/// the other.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AnimationState {
    /// Nothing to animate; the frame loop should not run.
    #[default]
    Idle,
    /// Post-drag inertial panning.
    Momentum(Momentum),
    /// Eased move towards a target state.
    Transition(CameraTransition),
}

impl AnimationState {
    /// Returns `true` unless idle.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Viewport state together with the animation driving it.
///
/// Every mutation keeps two invariants: the scale stays within the
/// [`ZoomBounds`] of the current width, and the time offset never lets the
/// lower time bound (the epoch) enter the view by more than the configured
/// left padding.
///
/// Nothing moves while the view has no width; navigation requests are
/// ignored and any animation is dropped.
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    state: ViewportState,
    animation: AnimationState,
    size: Size,
    bounds: Option<ZoomBounds>,
    epoch: Seconds,
}

impl Camera {
    /// Creates an idle camera with an empty view, showing `epoch` at the
    /// left padding.
    #[must_use]
    pub fn new(config: CameraConfig, epoch: Seconds) -> Self {
        let scale = ViewportState::default().scale;
        let state = ViewportState::new(
            scale,
            min_time_offset(epoch, scale, config.left_padding_px),
            0.0,
        );
        Self {
            config,
            state,
            animation: AnimationState::Idle,
            size: Size::ZERO,
            bounds: None,
            epoch,
        }
    }

    /// Navigation tunables.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Current viewport state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Current animation.
    #[must_use]
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Returns `true` while momentum or a transition is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.animation.is_active()
    }

    /// Current view size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Zoom bounds for the current width, `None` while the view is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<ZoomBounds> {
        self.bounds
    }

    /// The screen mapping of the current state, `None` while the view is
    /// empty.
    #[must_use]
    pub fn projection(&self) -> Option<Projection> {
        self.bounds.map(|_| self.state.projection(self.size))
    }

    /// The lower time bound.
    #[must_use]
    pub fn epoch(&self) -> Seconds {
        self.epoch
    }

    /// Smallest allowed time offset at the current scale.
    #[must_use]
    pub fn min_time_offset(&self) -> Seconds {
        min_time_offset(self.epoch, self.state.scale, self.config.left_padding_px)
    }

    /// Moves the lower time bound and re-clamps the current state.
    pub fn set_epoch(&mut self, epoch: Seconds) {
        if !epoch.is_finite() || epoch == self.epoch {
            return;
        }
        self.epoch = epoch;
        self.state = self.clamped(self.state);
    }

    /// Updates the view size, recomputing zoom bounds.
    ///
    /// The scale is only changed if it falls outside the new bounds. An empty
    /// size drops any running animation.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.bounds = if size.height.is_finite() && size.height > 0.0 {
            ZoomBounds::for_width(size.width, self.config.zoom_in_span, self.config.zoom_out_span)
        } else {
            None
        };
        debug!(width = size.width, height = size.height, bounds = ?self.bounds, "resized");
        if self.bounds.is_none() {
            self.cancel_animation();
            return;
        }
        self.state = self.clamped(self.state);
    }

    /// Stops momentum or a transition.
    pub fn cancel_animation(&mut self) {
        if self.animation.is_active() {
            debug!(animation = ?self.animation, "animation cancelled");
        }
        self.animation = AnimationState::Idle;
    }

    /// Applies the scale bounds and lower time bound to `state`.
    #[must_use]
    pub fn clamped(&self, mut state: ViewportState) -> ViewportState {
        if let Some(bounds) = self.bounds {
            state.scale = bounds.clamp(state.scale);
        }
        let min = min_time_offset(self.epoch, state.scale, self.config.left_padding_px);
        if state.time_offset < min || state.time_offset.is_nan() {
            state.time_offset = min;
        }
        state
    }

    /// Jumps to `state` (clamped) without animating.
    ///
    /// Returns `false` if the view is empty or `state` is invalid.
    pub fn set_state(&mut self, state: ViewportState) -> bool {
        if self.bounds.is_none() || !state.is_valid() {
            return false;
        }
        self.state = self.clamped(state);
        true
    }

    /// Sets the state to `origin` panned by `delta` pixels, clamping at the
    /// lower time bound.
    ///
    /// Content follows the pointer: a positive `delta.x` reveals earlier
    /// instants and a positive `delta.y` moves lanes down. Returns `true` if
    /// the horizontal movement hit the lower time bound.
    pub fn pan_from(&mut self, origin: ViewportState, delta: Vec2) -> bool {
        if self.bounds.is_none() || !delta.is_finite() {
            return false;
        }
        let wanted = ViewportState {
            time_offset: origin.time_offset - delta.x * origin.scale,
            vertical_offset: origin.vertical_offset + delta.y,
            ..origin
        };
        let clamped = self.clamped(wanted);
        self.state = clamped;
        clamped.time_offset != wanted.time_offset
    }

    /// Starts inertial panning with `velocity` in px/frame.
    ///
    /// Releases slower than the start threshold leave the camera idle.
    /// Returns `true` if momentum started.
    pub fn start_momentum(&mut self, velocity: Vec2) -> bool {
        self.cancel_animation();
        if self.bounds.is_none() || !velocity.is_finite() {
            return false;
        }
        if velocity.hypot() <= self.config.momentum.start_threshold {
            return false;
        }
        debug!(vx = velocity.x, vy = velocity.y, "momentum started");
        self.animation = AnimationState::Momentum(Momentum::new(velocity));
        true
    }

    /// Zooms by `factor` (below one zooms in) about pixel `anchor_x`, keeping
    /// the instant under it fixed.
    ///
    /// Animates with the wheel timing. A request whose clamped scale equals
    /// the current one is a no-op and returns `false`.
    pub fn zoom_about(&mut self, anchor_x: f64, factor: f64, now_ms: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !(factor.is_finite() && factor > 0.0 && anchor_x.is_finite()) {
            return false;
        }
        let from = self.state;
        let scale = bounds.clamp(from.scale * factor);
        if (scale - from.scale).abs() <= 1e-9 * from.scale {
            trace!(scale, "zoom request at bound ignored");
            return false;
        }
        let anchor = Anchor {
            time: from.axis().x_to_time(anchor_x),
            x: anchor_x,
        };
        let target = self.clamped(from.anchored(anchor.time, anchor.x, scale));
        let transition = CameraTransition::new(
            from,
            target,
            now_ms,
            self.config.wheel_duration_ms,
            self.config.wheel_easing,
        )
        .with_anchor(anchor);
        self.begin_transition(transition);
        true
    }

    /// Animates so `time` is horizontally centered, the lane at
    /// `lane_offset` is vertically centered, and the scale is `scale`
    /// (clamped to the zoom bounds).
    ///
    /// Returns `false` if the view is empty, an argument is not finite, or
    /// the camera is already there.
    pub fn focus_on(&mut self, time: Seconds, lane_offset: f64, scale: f64, now_ms: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !(time.is_finite() && lane_offset.is_finite() && scale.is_finite() && scale > 0.0) {
            return false;
        }
        let scale = bounds.clamp(scale);
        let target = ViewportState::new(scale, time - self.size.width * 0.5 * scale, -lane_offset);
        self.animate_to(target, now_ms)
    }

    /// Animates towards `target` (clamped) with the focus timing, vertical
    /// offset included.
    ///
    /// Returns `false` if the view is empty, `target` is invalid, or the
    /// camera is already there.
    pub fn animate_to(&mut self, target: ViewportState, now_ms: f64) -> bool {
        if self.bounds.is_none() || !target.is_valid() {
            return false;
        }
        let from = self.state;
        let target = self.clamped(target);
        if from.approx_eq(&target) {
            return false;
        }
        let width = self.size.width;
        let coarse = from.scale.max(target.scale);
        let travel = Vec2::new(
            (target.center_time(width) - from.center_time(width)) / coarse,
            target.vertical_offset - from.vertical_offset,
        );
        let timing = self.config.focus;
        let duration = timing.duration_ms(travel.hypot(), target.scale / from.scale);
        let transition = CameraTransition::new(from, target, now_ms, duration, timing.easing)
            .with_vertical(true);
        self.begin_transition(transition);
        true
    }

    /// Frames `range` between the left padding and the right edge less the
    /// same padding, immediately.
    ///
    /// Returns `false` if the view is empty or the range is empty.
    pub fn fit_range(&mut self, range: Range<Seconds>) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        let span = range.end - range.start;
        if !(span.is_finite() && span > 0.0 && range.start.is_finite()) {
            return false;
        }
        let padding = self.config.left_padding_px;
        let usable = (self.size.width - 2.0 * padding).max(padding).max(1.0);
        let scale = bounds.clamp(span / usable);
        self.cancel_animation();
        self.state = self.clamped(ViewportState {
            scale,
            time_offset: range.start - padding * scale,
            ..self.state
        });
        debug!(scale, "fitted range");
        true
    }

    /// Advances the running animation by one frame at `now_ms`.
    ///
    /// Returns `true` if the state changed and a redraw is due.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.bounds.is_none() {
            self.cancel_animation();
            return false;
        }
        match self.animation {
            AnimationState::Idle => false,
            AnimationState::Momentum(mut momentum) => {
                let velocity = momentum.velocity();
                if self.pan_from(self.state, velocity) {
                    momentum.stop_horizontal();
                }
                momentum.decay(self.config.momentum.decay);
                if momentum.is_spent(self.config.momentum.stop_velocity) {
                    debug!("momentum settled");
                    self.animation = AnimationState::Idle;
                } else {
                    self.animation = AnimationState::Momentum(momentum);
                }
                true
            }
            AnimationState::Transition(transition) => {
                self.state = self.clamped(transition.sample(now_ms));
                if transition.is_finished(now_ms) {
                    debug!(state = ?self.state, "transition finished");
                    self.animation = AnimationState::Idle;
                }
                true
            }
        }
    }

    fn begin_transition(&mut self, transition: CameraTransition) {
        self.cancel_animation();
        debug!(
            target = ?transition.target(),
            duration_ms = transition.duration_ms(),
            "transition started"
        );
        self.animation = AnimationState::Transition(transition);
    }
}

#[cfg(test)]
mod tests {
    use lifeline_model::DAY;

    use super::*;

    fn camera(epoch: Seconds) -> Camera {
        let mut camera = Camera::new(CameraConfig::default(), epoch);
        camera.resize(Size::new(1_000.0, 600.0));
        camera
    }

    fn run(camera: &mut Camera, mut now: f64) -> f64 {
        let mut frames = 0;
        while camera.is_active() {
            now += 1_000.0 / 60.0;
            camera.tick(now);
            frames += 1;
            assert!(frames < 10_000, "animation never settled");
        }
        now
    }

    #[test]
    fn starts_at_epoch_with_padding() {
        let camera = camera(1_000_000.0);
        let x = camera.state().axis().time_to_x(1_000_000.0);
        assert!((x - 80.0).abs() < 1e-9);
        assert!(!camera.is_active());
    }

    #[test]
    fn empty_view_ignores_navigation() {
        let mut camera = Camera::new(CameraConfig::default(), 0.0);
        let before = camera.state();
        assert!(!camera.zoom_about(10.0, 0.5, 0.0));
        assert!(!camera.focus_on(DAY, 0.0, 10.0, 0.0));
        assert!(!camera.start_momentum(Vec2::new(50.0, 0.0)));
        assert!(!camera.fit_range(0.0..DAY));
        assert!(!camera.tick(16.0));
        assert_eq!(camera.state(), before);
        assert!(camera.bounds().is_none());
    }

    #[test]
    fn resize_to_zero_drops_animation_and_keeps_state() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(3_600.0, 10.0 * YEAR, 0.0));
        assert!(camera.zoom_about(500.0, 0.5, 0.0));
        let before = camera.state();
        camera.resize(Size::new(0.0, 600.0));
        assert!(!camera.is_active());
        assert!(camera.bounds().is_none());
        assert_eq!(camera.state(), before);
    }

    #[test]
    fn resize_clamps_scale_into_new_bounds() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(3.6, YEAR, 0.0));
        // Halving the width doubles the minimum scale.
        camera.resize(Size::new(500.0, 600.0));
        assert_eq!(camera.state().scale, HOUR / 500.0);
        assert_eq!(camera.state().time_offset, YEAR);
    }

    #[test]
    fn pan_stops_at_lower_bound() {
        let mut camera = camera(0.0);
        let origin = ViewportState::new(60.0, 0.0, 0.0);
        assert!(!camera.pan_from(origin, Vec2::new(-100.0, 5.0)));
        assert_eq!(camera.state().time_offset, 6_000.0);
        assert_eq!(camera.state().vertical_offset, 5.0);
        assert!(camera.pan_from(origin, Vec2::new(10_000.0, 0.0)));
        assert_eq!(camera.state().time_offset, -80.0 * 60.0);
    }

    #[test]
    fn slow_release_does_not_coast() {
        let mut camera = camera(0.0);
        assert!(!camera.start_momentum(Vec2::new(0.3, 0.2)));
        assert!(!camera.is_active());
        assert!(camera.start_momentum(Vec2::new(-20.0, 0.0)));
        assert!(matches!(camera.animation(), AnimationState::Momentum(_)));
    }

    #[test]
    fn momentum_settles_and_moves_forward() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(60.0, YEAR, 0.0));
        assert!(camera.start_momentum(Vec2::new(-30.0, 4.0)));
        run(&mut camera, 0.0);
        assert!(camera.state().time_offset > YEAR);
        assert!(camera.state().vertical_offset > 0.0);
    }

    #[test]
    fn momentum_into_lower_bound_stops_horizontal() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(60.0, 0.0, 0.0));
        assert!(camera.start_momentum(Vec2::new(500.0, 0.0)));
        camera.tick(16.0);
        assert_eq!(camera.state().time_offset, camera.min_time_offset());
        assert!(!camera.is_active());
    }

    #[test]
    fn transition_replaces_momentum() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(60.0, YEAR, 0.0));
        assert!(camera.start_momentum(Vec2::new(-30.0, 0.0)));
        assert!(camera.zoom_about(500.0, 0.5, 0.0));
        assert!(matches!(camera.animation(), AnimationState::Transition(_)));
        assert!(camera.start_momentum(Vec2::new(-30.0, 0.0)));
        assert!(matches!(camera.animation(), AnimationState::Momentum(_)));
    }

    #[test]
    fn wheel_zoom_keeps_pointer_instant() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(600.0, YEAR, 0.0));
        let under = camera.state().axis().x_to_time(700.0);
        assert!(camera.zoom_about(700.0, 0.5, 0.0));
        camera.tick(100.0);
        assert!((camera.state().axis().time_to_x(under) - 700.0).abs() < 1e-6);
        run(&mut camera, 100.0);
        assert!((camera.state().scale - 300.0).abs() < 1e-9);
        assert!((camera.state().axis().time_to_x(under) - 700.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_at_bound_is_a_no_op() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(3.6, YEAR, 0.0));
        assert!(!camera.zoom_about(500.0, 0.5, 0.0));
        assert!(!camera.is_active());
        assert!(!camera.zoom_about(500.0, 0.0, 0.0));
        assert!(!camera.zoom_about(500.0, f64::NAN, 0.0));
    }

    #[test]
    fn focus_duration_is_clamped() {
        let timing = FocusTiming::default();
        assert_eq!(timing.duration_ms(0.0, 1.0), 400.0);
        assert_eq!(timing.duration_ms(400.0, 1.0), 500.0);
        assert_eq!(timing.duration_ms(1e9, 1.0), 1_800.0);
        assert!(timing.duration_ms(0.0, 1e-6) > timing.duration_ms(0.0, 0.5));
        assert_eq!(timing.duration_ms(f64::NAN, f64::NAN), 400.0);
    }

    #[test]
    fn focus_centers_target_and_clamps_scale() {
        let mut camera = camera(0.0);
        camera.set_state(ViewportState::new(600.0, YEAR, 0.0));
        let target = 20.0 * YEAR;
        assert!(camera.focus_on(target, -120.0, 0.001, 0.0));
        run(&mut camera, 0.0);
        let state = camera.state();
        assert_eq!(state.scale, HOUR / 1_000.0);
        assert!((state.center_time(1_000.0) - target).abs() < 1e-6);
        assert_eq!(state.vertical_offset, 120.0);
        // Already there.
        assert!(!camera.focus_on(target, -120.0, 0.001, 10_000.0));
    }

    #[test]
    fn fit_range_frames_between_paddings() {
        let mut camera = camera(0.0);
        assert!(camera.fit_range(0.0..(10.0 * YEAR)));
        let axis = camera.state().axis();
        assert!((axis.time_to_x(0.0) - 80.0).abs() < 1e-6);
        assert!((axis.time_to_x(10.0 * YEAR) - 920.0).abs() < 1e-6);
    }
}
