// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::iter::successors;
use core::ops::Range;

use chrono::{Datelike, Days, FixedOffset, NaiveDate};
use lifeline_model::{Seconds, fixed_offset, seconds_to_datetime};
use tracing::trace;

use crate::label::format_tick_label;
use crate::ladder::{TickStep, TickUnit, choose_step};
use crate::mapper::TimeAxis;

/// Tunables for tick selection and generation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TickConfig {
    /// Minimum pixel spacing between two ticks of the chosen step.
    pub min_spacing_px: f64,
    /// Upper bound on the number of ticks produced per layer.
    pub max_ticks: usize,
    /// Offset from UTC, in seconds, in which calendar boundaries are placed.
    pub utc_offset_seconds: i32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            min_spacing_px: 150.0,
            max_ticks: 4_096,
            utc_offset_seconds: 0,
        }
    }
}

impl TickConfig {
    /// The fixed offset calendar boundaries are computed in.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        fixed_offset(self.utc_offset_seconds)
    }
}

/// A single tick instant with its step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Instant of the tick.
    pub time: Seconds,
    /// Step the tick was generated for.
    pub step: TickStep,
}

impl Tick {
    /// Formats the tick label for its granularity.
    #[must_use]
    pub fn label(&self, offset: FixedOffset) -> String {
        format_tick_label(self.time, self.step, offset)
    }
}

/// Ticks of one granularity together with the opacity they are drawn at.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLayer {
    /// Step of every tick in this layer.
    pub step: TickStep,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Pixel spacing between adjacent ticks at the planned scale.
    pub spacing_px: f64,
    /// Ticks in strictly increasing order.
    pub ticks: Vec<Tick>,
}

/// The ticks to draw for one frame: the chosen step, plus the next finer step
/// while it is fading in.
#[derive(Clone, Debug, PartialEq)]
pub struct TickPlan {
    /// The chosen ("coarse") step.
    pub coarse: TickLayer,
    /// The next finer step, present while the cross-fade is under way.
    pub fine: Option<TickLayer>,
}

impl TickPlan {
    /// Iterates the layers, coarse first.
    pub fn layers(&self) -> impl Iterator<Item = &TickLayer> {
        core::iter::once(&self.coarse).chain(self.fine.as_ref())
    }
}

/// Returns the cross-fade progress for a coarse step drawn `spacing_px` apart.
///
/// `0` shows only the coarse step, `1` only the finer one.
#[must_use]
pub fn crossfade(spacing_px: f64, min_spacing_px: f64) -> f64 {
    if !(min_spacing_px > 0.0) {
        return 0.0;
    }
    ((spacing_px - min_spacing_px) / min_spacing_px).clamp(0.0, 1.0)
}

/// Plans the tick layers for a view `width` pixels wide.
///
/// Returns `None` for an invalid axis or an empty view.
#[must_use]
pub fn plan_ticks(axis: &TimeAxis, width: f64, config: &TickConfig) -> Option<TickPlan> {
    if !axis.is_valid() || !(width > 0.0) {
        return None;
    }
    let coarse_step = choose_step(axis.scale, config.min_spacing_px)?;
    let spacing_px = axis.span_to_px(coarse_step.approx_seconds());
    let fade = crossfade(spacing_px, config.min_spacing_px);
    let range = axis.visible_range(width);
    let offset = config.offset();
    trace!(?coarse_step, spacing_px, fade, "planning ticks");

    let fine = coarse_step
        .finer()
        .filter(|_| fade > 0.0)
        .map(|step| TickLayer {
            step,
            opacity: fade,
            spacing_px: axis.span_to_px(step.approx_seconds()),
            ticks: generate_ticks(range.clone(), step, offset, config.max_ticks),
        });
    let coarse = TickLayer {
        step: coarse_step,
        opacity: if fine.is_some() { 1.0 - fade } else { 1.0 },
        spacing_px,
        ticks: generate_ticks(range, coarse_step, offset, config.max_ticks),
    };
    Some(TickPlan { coarse, fine })
}

/// Generates calendar-aligned ticks for `step` inside `range` (inclusive).
///
/// Sub-day steps count from the start of each day, weeks start on Monday,
/// months count from January, years are multiples of the step count. The
/// output is strictly increasing, never leaves `range`, and holds at most
/// `max_ticks` entries. An empty or inverted range yields no ticks.
#[must_use]
pub fn generate_ticks(
    range: Range<Seconds>,
    step: TickStep,
    offset: FixedOffset,
    max_ticks: usize,
) -> Vec<Tick> {
    if !(range.start.is_finite() && range.end.is_finite()) || range.end <= range.start {
        return Vec::new();
    }
    let Some(start) = seconds_to_datetime(range.start, offset) else {
        return Vec::new();
    };
    let start_date = start.date_naive();

    let times: Vec<Seconds> = match step.unit {
        TickUnit::Minute | TickUnit::Hour => {
            let Some(day_start) = date_to_seconds(start_date, offset) else {
                return Vec::new();
            };
            let step_s = step.approx_seconds();
            (0_u32..)
                .map(|i| day_start + f64::from(i) * step_s)
                .skip_while(|t| *t < range.start)
                .take_while(|t| *t <= range.end)
                .take(max_ticks)
                .collect()
        }
        TickUnit::Day => {
            let days = successors(Some(start_date), |d| {
                d.checked_add_days(Days::new(u64::from(step.count)))
            });
            collect_dates(days, &range, offset, max_ticks)
        }
        TickUnit::Week => {
            let back = u64::from(start_date.weekday().num_days_from_monday());
            let Some(monday) = start_date.checked_sub_days(Days::new(back)) else {
                return Vec::new();
            };
            let weeks = successors(Some(monday), |d| {
                d.checked_add_days(Days::new(7 * u64::from(step.count)))
            });
            collect_dates(weeks, &range, offset, max_ticks)
        }
        TickUnit::Month => {
            let count = i64::from(step.count.max(1));
            let index = i64::from(start_date.year()) * 12 + i64::from(start_date.month0());
            let first = index - index.rem_euclid(count);
            let months = (0_i64..)
                .map(|i| first + i * count)
                .map_while(month_start);
            collect_dates(months, &range, offset, max_ticks)
        }
        TickUnit::Year => {
            let count = i32::try_from(step.count.max(1)).unwrap_or(i32::MAX);
            let year = start_date.year();
            let first = year - year.rem_euclid(count);
            let years = successors(Some(first), |y| y.checked_add(count))
                .map_while(|y| NaiveDate::from_ymd_opt(y, 1, 1));
            collect_dates(years, &range, offset, max_ticks)
        }
    };

    times.into_iter().map(|time| Tick { time, step }).collect()
}

fn collect_dates(
    dates: impl Iterator<Item = NaiveDate>,
    range: &Range<Seconds>,
    offset: FixedOffset,
    max_ticks: usize,
) -> Vec<Seconds> {
    dates
        .map_while(|d| date_to_seconds(d, offset))
        .skip_while(|t| *t < range.start)
        .take_while(|t| *t <= range.end)
        .take(max_ticks)
        .collect()
}

/// Midnight of `date` in `offset`, as seconds since the Unix epoch.
pub(crate) fn date_to_seconds(date: NaiveDate, offset: FixedOffset) -> Option<Seconds> {
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
    Some(midnight as f64 - f64::from(offset.local_minus_utc()))
}

fn month_start(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use chrono::{Timelike, Weekday};
    use lifeline_model::{DAY, HOUR, MINUTE, YEAR, parse_timestamp};

    use super::*;
    use crate::ladder::TICK_LADDER;

    fn utc() -> FixedOffset {
        fixed_offset(0)
    }

    fn at(raw: &str) -> Seconds {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn empty_or_inverted_range_yields_nothing() {
        let step = TickStep::new(TickUnit::Day, 1);
        assert!(generate_ticks(10.0..10.0, step, utc(), 100).is_empty());
        assert!(generate_ticks(10.0..5.0, step, utc(), 100).is_empty());
        assert!(generate_ticks(f64::NAN..5.0, step, utc(), 100).is_empty());
    }

    #[test]
    fn hour_ticks_align_to_start_of_day() {
        let step = TickStep::new(TickUnit::Hour, 3);
        let ticks = generate_ticks(
            at("2021-06-01T01:10:00")..at("2021-06-01T13:00:00"),
            step,
            utc(),
            100,
        );
        let times: Vec<_> = ticks.iter().map(|t| t.time).collect();
        assert_eq!(
            times,
            vec![
                at("2021-06-01T03:00:00"),
                at("2021-06-01T06:00:00"),
                at("2021-06-01T09:00:00"),
                at("2021-06-01T12:00:00"),
            ]
        );
    }

    #[test]
    fn minute_ticks_respect_utc_offset() {
        // 15 minute ticks in UTC+05:30 fall on :00/:15/:30/:45 local time.
        let offset = fixed_offset(5 * 3_600 + 30 * 60);
        let step = TickStep::new(TickUnit::Minute, 15);
        let range = at("2021-06-01T00:01:00")..at("2021-06-01T02:00:00");
        let ticks = generate_ticks(range, step, offset, 100);
        assert!(!ticks.is_empty());
        for tick in &ticks {
            let local = seconds_to_datetime(tick.time, offset).unwrap();
            assert_eq!(local.minute() % 15, 0);
            assert_eq!(local.second(), 0);
        }
    }

    #[test]
    fn week_ticks_land_on_mondays() {
        let step = TickStep::new(TickUnit::Week, 1);
        let ticks = generate_ticks(at("2021-06-02")..at("2021-08-01"), step, utc(), 100);
        assert_eq!(ticks.len(), 8);
        for tick in &ticks {
            let dt = seconds_to_datetime(tick.time, utc()).unwrap();
            assert_eq!(dt.weekday(), Weekday::Mon);
            assert_eq!(dt.num_seconds_from_midnight(), 0);
        }
        assert_eq!(ticks[0].time, at("2021-06-07"));
    }

    #[test]
    fn quarter_ticks_start_from_january() {
        let step = TickStep::new(TickUnit::Month, 3);
        let ticks = generate_ticks(at("2020-02-15")..at("2021-01-01"), step, utc(), 100);
        let times: Vec<_> = ticks.iter().map(|t| t.time).collect();
        assert_eq!(
            times,
            vec![at("2020-04-01"), at("2020-07-01"), at("2020-10-01"), at("2021-01-01")]
        );
    }

    #[test]
    fn year_ticks_are_multiples_of_count() {
        let step = TickStep::new(TickUnit::Year, 5);
        let ticks = generate_ticks(at("1987-03-01")..at("2011-01-01"), step, utc(), 100);
        let years: Vec<_> = ticks
            .iter()
            .map(|t| seconds_to_datetime(t.time, utc()).unwrap().year())
            .collect();
        assert_eq!(years, vec![1990, 1995, 2000, 2005, 2010]);
    }

    #[test]
    fn tick_count_is_capped() {
        let step = TickStep::new(TickUnit::Minute, 1);
        let ticks = generate_ticks(0.0..10.0 * YEAR, step, utc(), 64);
        assert_eq!(ticks.len(), 64);
    }

    #[test]
    fn crossfade_progress_is_clamped() {
        assert_eq!(crossfade(100.0, 150.0), 0.0);
        assert_eq!(crossfade(150.0, 150.0), 0.0);
        assert_eq!(crossfade(225.0, 150.0), 0.5);
        assert_eq!(crossfade(300.0, 150.0), 1.0);
        assert_eq!(crossfade(900.0, 150.0), 1.0);
        assert_eq!(crossfade(900.0, 0.0), 0.0);
    }

    #[test]
    fn plan_fades_in_the_finer_step() {
        let config = TickConfig::default();
        // 1 day at 225 px: halfway through the fade towards 12 hours.
        let axis = TimeAxis::new(DAY / 225.0, at("2021-06-01"));
        let plan = plan_ticks(&axis, 1_000.0, &config).unwrap();
        assert_eq!(plan.coarse.step, TickStep::new(TickUnit::Day, 1));
        let fine = plan.fine.as_ref().unwrap();
        assert_eq!(fine.step, TickStep::new(TickUnit::Hour, 12));
        assert!((plan.coarse.opacity - 0.5).abs() < 1e-9);
        assert!((fine.opacity - 0.5).abs() < 1e-9);
        assert_eq!(plan.layers().count(), 2);
    }

    #[test]
    fn plan_without_fade_has_single_layer() {
        let config = TickConfig::default();
        // 3 hours at exactly 150 px.
        let axis = TimeAxis::new(3.0 * HOUR / 150.0, 0.0);
        let plan = plan_ticks(&axis, 800.0, &config).unwrap();
        assert_eq!(plan.coarse.step, TickStep::new(TickUnit::Hour, 3));
        assert!(plan.fine.is_none());
        assert_eq!(plan.coarse.opacity, 1.0);
        assert!(plan_ticks(&axis, 0.0, &config).is_none());
        assert!(plan_ticks(&TimeAxis::new(0.0, 0.0), 800.0, &config).is_none());
    }

    #[test]
    fn finest_step_never_fades_out() {
        let config = TickConfig::default();
        let axis = TimeAxis::new(MINUTE / 1_000.0, 0.0);
        let plan = plan_ticks(&axis, 800.0, &config).unwrap();
        assert_eq!(plan.coarse.step, TICK_LADDER[0]);
        assert!(plan.fine.is_none());
        assert_eq!(plan.coarse.opacity, 1.0);
    }
}
