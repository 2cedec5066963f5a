// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Inertial panning tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MomentumConfig {
    /// Velocity multiplier applied every frame, in `(0, 1)`.
    pub decay: f64,
    /// Momentum stops once both components fall below this, in px/frame.
    pub stop_velocity: f64,
    /// A release slower than this does not start momentum, in px/frame.
    pub start_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            decay: 0.95,
            stop_velocity: 0.1,
            start_threshold: 0.5,
        }
    }
}

/// Post-drag velocity, in pixels per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Momentum {
    velocity: Vec2,
}

impl Momentum {
    /// Creates momentum with an initial velocity.
    #[must_use]
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Zeroes the horizontal component, e.g. after hitting the lower bound.
    pub fn stop_horizontal(&mut self) {
        self.velocity.x = 0.0;
    }

    /// Applies one frame of decay.
    pub fn decay(&mut self, factor: f64) {
        self.velocity *= factor;
    }

    /// Returns `true` once both components are below `stop_velocity`.
    #[must_use]
    pub fn is_spent(&self, stop_velocity: f64) -> bool {
        !(self.velocity.x.abs() >= stop_velocity || self.velocity.y.abs() >= stop_velocity)
    }
}
