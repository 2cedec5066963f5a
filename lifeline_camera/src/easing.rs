// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to a transition's normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing. Used for wheel zoom.
    EaseOutCubic,
    /// Gentle start and landing. Used for programmatic focus moves.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Maps progress `t` (clamped to `[0, 1]`) to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
