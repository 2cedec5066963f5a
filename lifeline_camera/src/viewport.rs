// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Size};
use lifeline_axis::{TimeAxis, lane_y, offset_for_anchor};
use lifeline_model::{DAY, Seconds};

/// The mutable navigation state of the timeline.
///
/// - `scale` is seconds of calendar time per horizontal pixel.
/// - `time_offset` is the instant mapped to pixel 0.
/// - `vertical_offset` shifts every lane, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Seconds per pixel.
    pub scale: f64,
    /// Instant at pixel 0.
    pub time_offset: Seconds,
    /// Vertical pan in pixels.
    pub vertical_offset: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: DAY / 100.0,
            time_offset: 0.0,
            vertical_offset: 0.0,
        }
    }
}

impl ViewportState {
    /// Creates a new state.
    #[must_use]
    pub fn new(scale: f64, time_offset: Seconds, vertical_offset: f64) -> Self {
        Self {
            scale,
            time_offset,
            vertical_offset,
        }
    }

    /// The horizontal mapping of this state.
    #[must_use]
    pub fn axis(&self) -> TimeAxis {
        TimeAxis::new(self.scale, self.time_offset)
    }

    /// Returns `true` if every component is finite and the scale is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.axis().is_valid() && self.vertical_offset.is_finite()
    }

    /// Instant under the horizontal center of a view `width` pixels wide.
    #[must_use]
    pub fn center_time(&self, width: f64) -> Seconds {
        self.axis().x_to_time(width * 0.5)
    }

    /// This state at `scale`, shifted so `anchor_time` stays at `anchor_x`.
    #[must_use]
    pub fn anchored(self, anchor_time: Seconds, anchor_x: f64, scale: f64) -> Self {
        Self {
            scale,
            time_offset: offset_for_anchor(anchor_time, anchor_x, scale),
            ..self
        }
    }

    /// The screen mapping of this state for a view of `size`.
    #[must_use]
    pub fn projection(&self, size: Size) -> Projection {
        Projection {
            axis: self.axis(),
            vertical_offset: self.vertical_offset,
            size,
        }
    }

    /// Returns `true` if `other` differs by less than a relative `1e-9` in
    /// scale and less than a pixel's billionth in both offsets.
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        let scale_eps = 1e-9 * self.scale.abs().max(other.scale.abs());
        (self.scale - other.scale).abs() <= scale_eps
            && (self.time_offset - other.time_offset).abs() <= scale_eps
            && (self.vertical_offset - other.vertical_offset).abs() <= 1e-9
    }
}

/// Maps (instant, lane offset) pairs to screen points for one frame.
///
/// Hit testing and rendering both go through this so that what is hit is
/// exactly what was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Horizontal mapping.
    pub axis: TimeAxis,
    /// Vertical pan in pixels.
    pub vertical_offset: f64,
    /// View size in pixels.
    pub size: Size,
}

impl Projection {
    /// Y of the center axis before vertical panning.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.size.height * 0.5
    }

    /// X of instant `t`.
    #[must_use]
    pub fn x(&self, t: Seconds) -> f64 {
        self.axis.time_to_x(t)
    }

    /// Y of the lane `lane_offset` pixels from the center axis.
    #[must_use]
    pub fn y(&self, lane_offset: f64) -> f64 {
        lane_y(self.center_y(), self.vertical_offset, lane_offset)
    }

    /// Screen point of instant `t` on the lane at `lane_offset`.
    #[must_use]
    pub fn point(&self, t: Seconds, lane_offset: f64) -> Point {
        Point::new(self.x(t), self.y(lane_offset))
    }

    /// Instants covered by the view width.
    #[must_use]
    pub fn visible_range(&self) -> Range<Seconds> {
        self.axis.visible_range(self.size.width)
    }
}

/// The closed range of scales the view may take at its current width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    /// Smallest scale (most zoomed in).
    pub min_scale: f64,
    /// Largest scale (most zoomed out).
    pub max_scale: f64,
}

impl ZoomBounds {
    /// Bounds fitting `zoom_in_span` (at most zoomed in) and `zoom_out_span`
    /// (at most zoomed out) across `width` pixels.
    ///
    /// Returns `None` for an empty or non-finite width, or spans that do not
    /// form a positive range.
    #[must_use]
    pub fn for_width(width: f64, zoom_in_span: Seconds, zoom_out_span: Seconds) -> Option<Self> {
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        let min_scale = zoom_in_span / width;
        let max_scale = zoom_out_span / width;
        (min_scale.is_finite() && min_scale > 0.0 && max_scale.is_finite() && max_scale >= min_scale)
            .then_some(Self {
                min_scale,
                max_scale,
            })
    }

    /// Clamps `scale` into the bounds.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Returns `true` if `scale` lies within the bounds.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min_scale..=self.max_scale).contains(&scale)
    }
}

/// Smallest time offset allowed at `scale`: the lower time bound may enter the
/// view by at most `padding_px` pixels.
#[inline]
#[must_use]
pub fn min_time_offset(lower_bound: Seconds, scale: f64, padding_px: f64) -> Seconds {
    lower_bound - padding_px * scale
}

#[cfg(test)]
mod tests {
    use lifeline_model::{HOUR, YEAR};

    use super::*;

    #[test]
    fn bounds_follow_width() {
        let bounds = ZoomBounds::for_width(1_000.0, HOUR, 60.0 * YEAR).unwrap();
        assert_eq!(bounds.min_scale, 3.6);
        assert_eq!(bounds.clamp(0.1), 3.6);
        assert_eq!(bounds.clamp(1e12), bounds.max_scale);
        assert!(bounds.contains(100.0));
        assert!(ZoomBounds::for_width(0.0, HOUR, YEAR).is_none());
        assert!(ZoomBounds::for_width(f64::NAN, HOUR, YEAR).is_none());
        assert!(ZoomBounds::for_width(100.0, YEAR, HOUR).is_none());
    }

    #[test]
    fn anchored_keeps_instant_under_pointer() {
        let state = ViewportState::new(60.0, 1_000_000.0, 12.0);
        let anchor = state.axis().x_to_time(250.0);
        let zoomed = state.anchored(anchor, 250.0, 15.0);
        assert!((zoomed.axis().time_to_x(anchor) - 250.0).abs() < 1e-9);
        assert_eq!(zoomed.vertical_offset, 12.0);
    }

    #[test]
    fn padding_is_measured_at_scale() {
        assert_eq!(min_time_offset(1_000.0, 2.0, 80.0), 840.0);
    }

    #[test]
    fn projection_places_lanes_around_center() {
        let state = ViewportState::new(10.0, 1_000.0, -15.0);
        let projection = state.projection(Size::new(800.0, 600.0));
        assert_eq!(projection.point(2_000.0, 40.0), Point::new(100.0, 325.0));
        assert_eq!(projection.y(0.0), 285.0);
        assert_eq!(projection.visible_range(), 1_000.0..9_000.0);
    }

    #[test]
    fn center_time_is_mid_view() {
        let state = ViewportState::new(10.0, 0.0, 0.0);
        assert_eq!(state.center_time(800.0), 4_000.0);
    }
}
