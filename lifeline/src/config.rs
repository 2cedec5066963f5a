// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lifeline_axis::TickConfig;
use lifeline_camera::CameraConfig;
use lifeline_interaction::InteractionConfig;
use lifeline_layout::LayoutConfig;
use lifeline_model::DAY;
use lifeline_render::Theme;

/// A configuration value [`TimelineConfig::validate`] rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A length, span or duration that must be strictly positive.
    #[error("`{field}` must be finite and positive, got {value}")]
    NotPositive {
        /// Dotted path of the field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A padding, tolerance or rate that must not be negative.
    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative {
        /// Dotted path of the field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A factor outside its allowed interval.
    #[error("`{field}` must lie in {range}, got {value}")]
    OutOfRange {
        /// Dotted path of the field.
        field: &'static str,
        /// Rejected value.
        value: f64,
        /// The allowed interval.
        range: &'static str,
    },
    /// The fully-zoomed-in span is not shorter than the fully-zoomed-out one.
    #[error("zoom-in span ({zoom_in} s) must be shorter than zoom-out span ({zoom_out} s)")]
    InvertedZoomSpans {
        /// `camera.zoom_in_span`.
        zoom_in: f64,
        /// `camera.zoom_out_span`.
        zoom_out: f64,
    },
    /// The shortest focus move is longer than the longest.
    #[error("focus duration bounds are inverted: min {min} ms > max {max} ms")]
    InvertedFocusDurations {
        /// `camera.focus.min_ms`.
        min: f64,
        /// `camera.focus.max_ms`.
        max: f64,
    },
    /// The per-event wheel factor bounds do not bracket one.
    #[error("wheel factor bounds [{min}, {max}] must contain 1")]
    WheelFactorBounds {
        /// `interaction.wheel.min_factor`.
        min: f64,
        /// `interaction.wheel.max_factor`.
        max: f64,
    },
    /// `ticks.max_ticks` is zero.
    #[error("`ticks.max_ticks` must be at least 1")]
    NoTicks,
    /// The UTC offset is a day or more.
    #[error("UTC offset of {0} s is out of range")]
    UtcOffset(i32),
}

/// Everything the engine can be tuned with.
///
/// Every part has a [`Default`] matching the stock behavior; build one with
/// struct update syntax and pass it to
/// [`TimelineEngine::new`](crate::TimelineEngine::new), which validates it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineConfig {
    /// Branch to treat as the root. Falls back to the earliest parentless
    /// branch when unset or unknown.
    pub root_id: Option<String>,
    /// Tick density and calendar offset.
    pub ticks: TickConfig,
    /// Lane spacing.
    pub layout: LayoutConfig,
    /// Zoom bounds, padding and animation timing.
    pub camera: CameraConfig,
    /// Wheel, drag and hit-test tunables.
    pub interaction: InteractionConfig,
    /// Colors and metrics; not serialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub theme: Theme,
}

impl TimelineConfig {
    /// Checks every numeric tunable, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ticks = &self.ticks;
        positive("ticks.min_spacing_px", ticks.min_spacing_px)?;
        if ticks.max_ticks == 0 {
            return Err(ConfigError::NoTicks);
        }
        if f64::from(ticks.utc_offset_seconds).abs() >= DAY {
            return Err(ConfigError::UtcOffset(ticks.utc_offset_seconds));
        }

        positive("layout.lane_spacing", self.layout.lane_spacing)?;

        let camera = &self.camera;
        non_negative("camera.left_padding_px", camera.left_padding_px)?;
        positive("camera.zoom_in_span", camera.zoom_in_span)?;
        positive("camera.zoom_out_span", camera.zoom_out_span)?;
        if camera.zoom_in_span >= camera.zoom_out_span {
            return Err(ConfigError::InvertedZoomSpans {
                zoom_in: camera.zoom_in_span,
                zoom_out: camera.zoom_out_span,
            });
        }
        open_unit("camera.momentum.decay", camera.momentum.decay)?;
        positive("camera.momentum.stop_velocity", camera.momentum.stop_velocity)?;
        non_negative("camera.momentum.start_threshold", camera.momentum.start_threshold)?;
        non_negative("camera.wheel_duration_ms", camera.wheel_duration_ms)?;
        let focus = &camera.focus;
        non_negative("camera.focus.base_ms", focus.base_ms)?;
        non_negative("camera.focus.per_px_ms", focus.per_px_ms)?;
        non_negative("camera.focus.per_zoom_efold_ms", focus.per_zoom_efold_ms)?;
        positive("camera.focus.min_ms", focus.min_ms)?;
        positive("camera.focus.max_ms", focus.max_ms)?;
        if focus.min_ms > focus.max_ms {
            return Err(ConfigError::InvertedFocusDurations {
                min: focus.min_ms,
                max: focus.max_ms,
            });
        }

        let wheel = &self.interaction.wheel;
        positive("interaction.wheel.sensitivity", wheel.sensitivity)?;
        positive("interaction.wheel.min_factor", wheel.min_factor)?;
        positive("interaction.wheel.max_factor", wheel.max_factor)?;
        if !(wheel.min_factor <= 1.0 && 1.0 <= wheel.max_factor) {
            return Err(ConfigError::WheelFactorBounds {
                min: wheel.min_factor,
                max: wheel.max_factor,
            });
        }
        let velocity = &self.interaction.velocity;
        if !(velocity.smoothing > 0.0 && velocity.smoothing <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "interaction.velocity.smoothing",
                value: velocity.smoothing,
                range: "(0, 1]",
            });
        }
        positive("interaction.velocity.stale_after_ms", velocity.stale_after_ms)?;
        positive("interaction.velocity.frame_ms", velocity.frame_ms)?;
        let hit = &self.interaction.hit;
        non_negative("interaction.hit.line_tolerance", hit.line_tolerance)?;
        non_negative("interaction.hit.marker_radius", hit.marker_radius)?;
        non_negative("interaction.hit.node_radius", hit.node_radius)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn open_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "(0, 1)",
        })
    }
}
