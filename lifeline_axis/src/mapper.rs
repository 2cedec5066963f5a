// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use lifeline_model::Seconds;

/// Converts an instant into a horizontal pixel position.
///
/// `scale` is seconds per pixel and `time_offset` is the instant at pixel 0.
#[inline]
#[must_use]
pub fn time_to_x(t: Seconds, scale: f64, time_offset: Seconds) -> f64 {
    (t - time_offset) / scale
}

/// Converts a horizontal pixel position into an instant.
///
/// This is the inverse of [`time_to_x`].
#[inline]
#[must_use]
pub fn x_to_time(x: f64, scale: f64, time_offset: Seconds) -> Seconds {
    time_offset + x * scale
}

/// Returns the vertical pixel position of a lane.
///
/// `lane_offset` is the signed distance of the lane from the center axis in
/// content pixels (negative above, positive below).
#[inline]
#[must_use]
pub fn lane_y(center_y: f64, vertical_offset: f64, lane_offset: f64) -> f64 {
    center_y + vertical_offset + lane_offset
}

/// Returns the time offset that keeps `anchor_time` at pixel `anchor_x` under
/// `scale`.
///
/// This is the "zoom to cursor" solution of
/// `time_to_x(anchor_time, scale, offset) == anchor_x`.
#[inline]
#[must_use]
pub fn offset_for_anchor(anchor_time: Seconds, anchor_x: f64, scale: f64) -> Seconds {
    anchor_time - anchor_x * scale
}

/// A horizontal time axis: a scale and the instant at pixel 0.
///
/// This is a small copyable view over the mapping functions above, used by
/// the tick generator, hit testing and rendering so they all agree on the
/// same frame's mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeAxis {
    /// Seconds represented by one pixel.
    pub scale: f64,
    /// Instant mapped to pixel 0.
    pub time_offset: Seconds,
}

impl TimeAxis {
    /// Creates a new axis.
    #[must_use]
    pub fn new(scale: f64, time_offset: Seconds) -> Self {
        Self { scale, time_offset }
    }

    /// Returns `true` if the scale is finite and positive and the offset is
    /// finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0 && self.time_offset.is_finite()
    }

    /// Converts an instant into a pixel X coordinate.
    #[must_use]
    pub fn time_to_x(&self, t: Seconds) -> f64 {
        time_to_x(t, self.scale, self.time_offset)
    }

    /// Converts a pixel X coordinate into an instant.
    #[must_use]
    pub fn x_to_time(&self, x: f64) -> Seconds {
        x_to_time(x, self.scale, self.time_offset)
    }

    /// Returns the pixel length of a time span.
    #[must_use]
    pub fn span_to_px(&self, span: Seconds) -> f64 {
        span / self.scale
    }

    /// Returns the instants visible across a view of `width` pixels.
    #[must_use]
    pub fn visible_range(&self, width: f64) -> Range<Seconds> {
        self.time_offset..self.x_to_time(width)
    }
}
