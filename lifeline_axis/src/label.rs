// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{FixedOffset, Timelike};
use lifeline_model::{Seconds, seconds_to_datetime};

use crate::ladder::{TickStep, TickUnit};

/// Formats the label drawn next to a tick of `step` at `time`.
///
/// Sub-day ticks that land on midnight show the date instead of `00:00` so
/// day changes stay readable when zoomed in.
#[must_use]
pub fn format_tick_label(time: Seconds, step: TickStep, offset: FixedOffset) -> String {
    let Some(dt) = seconds_to_datetime(time, offset) else {
        return String::new();
    };
    let format = match step.unit {
        TickUnit::Year => "%Y",
        TickUnit::Month => "%b %Y",
        TickUnit::Week => "%-d %b",
        TickUnit::Day => "%a %-d %b",
        TickUnit::Minute | TickUnit::Hour if dt.num_seconds_from_midnight() == 0 => "%-d %b",
        TickUnit::Minute | TickUnit::Hour => "%H:%M",
    };
    dt.format(format).to_string()
}

/// Formats an instant as a calendar date for tooltips.
#[must_use]
pub fn format_date(time: Seconds, offset: FixedOffset) -> String {
    seconds_to_datetime(time, offset)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Formats an instant as date and time of day for tooltips.
#[must_use]
pub fn format_date_time(time: Seconds, offset: FixedOffset) -> String {
    seconds_to_datetime(time, offset)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
