// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lifeline_model::{DAY, HOUR, MINUTE, MONTH, Seconds, WEEK, YEAR};

/// Calendar unit a tick step counts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TickUnit {
    /// Minutes, aligned to the start of the day.
    Minute,
    /// Hours, aligned to the start of the day.
    Hour,
    /// Days, aligned to midnight.
    Day,
    /// Weeks, aligned to Mondays.
    Week,
    /// Months, aligned to the first of the month and to the start of the year.
    Month,
    /// Years, aligned to January 1st.
    Year,
}

impl TickUnit {
    /// Nominal length of one unit in seconds.
    ///
    /// Months and years use Gregorian averages; they are only used to judge
    /// pixel density, never to place ticks.
    #[must_use]
    pub const fn nominal_seconds(self) -> Seconds {
        match self {
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => WEEK,
            Self::Month => MONTH,
            Self::Year => YEAR,
        }
    }
}

/// One rung of the tick ladder: a count of calendar units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickStep {
    /// Calendar unit.
    pub unit: TickUnit,
    /// Number of units between ticks.
    pub count: u32,
}

impl TickStep {
    /// Creates a step of `count` units.
    #[must_use]
    pub const fn new(unit: TickUnit, count: u32) -> Self {
        Self { unit, count }
    }

    /// Nominal step length in seconds.
    #[must_use]
    pub fn approx_seconds(self) -> Seconds {
        self.unit.nominal_seconds() * f64::from(self.count)
    }

    /// Returns `true` for steps placed within a day (minutes and hours).
    #[must_use]
    pub fn is_sub_day(self) -> bool {
        matches!(self.unit, TickUnit::Minute | TickUnit::Hour)
    }

    /// Position of this step on [`TICK_LADDER`], if it is one of its rungs.
    #[must_use]
    pub fn ladder_index(self) -> Option<usize> {
        TICK_LADDER.iter().position(|s| *s == self)
    }

    /// The next finer rung on the ladder, if any.
    #[must_use]
    pub fn finer(self) -> Option<Self> {
        let index = self.ladder_index()?;
        index.checked_sub(1).map(|i| TICK_LADDER[i])
    }

    /// The next coarser rung on the ladder, if any.
    #[must_use]
    pub fn coarser(self) -> Option<Self> {
        let index = self.ladder_index()?;
        TICK_LADDER.get(index + 1).copied()
    }
}

/// The ascending ladder of calendar-meaningful tick steps.
pub const TICK_LADDER: [TickStep; 16] = [
    TickStep::new(TickUnit::Minute, 1),
    TickStep::new(TickUnit::Minute, 5),
    TickStep::new(TickUnit::Minute, 15),
    TickStep::new(TickUnit::Minute, 30),
    TickStep::new(TickUnit::Hour, 1),
    TickStep::new(TickUnit::Hour, 3),
    TickStep::new(TickUnit::Hour, 6),
    TickStep::new(TickUnit::Hour, 12),
    TickStep::new(TickUnit::Day, 1),
    TickStep::new(TickUnit::Week, 1),
    TickStep::new(TickUnit::Month, 1),
    TickStep::new(TickUnit::Month, 3),
    TickStep::new(TickUnit::Month, 6),
    TickStep::new(TickUnit::Year, 1),
    TickStep::new(TickUnit::Year, 5),
    TickStep::new(TickUnit::Year, 10),
];

/// Picks the finest ladder step whose pixel spacing is at least
/// `min_spacing_px` at `scale` seconds per pixel.
///
/// Falls back to the coarsest step when none is wide enough, and returns
/// `None` for a non-finite or non-positive scale.
#[must_use]
pub fn choose_step(scale: f64, min_spacing_px: f64) -> Option<TickStep> {
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }
    let chosen = TICK_LADDER
        .iter()
        .copied()
        .find(|step| step.approx_seconds() / scale >= min_spacing_px)
        .unwrap_or(TICK_LADDER[TICK_LADDER.len() - 1]);
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_is_strictly_ascending() {
        for pair in TICK_LADDER.windows(2) {
            assert!(
                pair[0].approx_seconds() < pair[1].approx_seconds(),
                "{:?} should be finer than {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn adjacent_rungs_are_at_least_double() {
        for pair in TICK_LADDER.windows(2) {
            let ratio = pair[1].approx_seconds() / pair[0].approx_seconds();
            assert!(ratio >= 2.0 - 1e-9, "ratio {ratio} between {pair:?}");
        }
    }

    #[test]
    fn finer_and_coarser_walk_the_ladder() {
        let day = TickStep::new(TickUnit::Day, 1);
        assert_eq!(day.finer(), Some(TickStep::new(TickUnit::Hour, 12)));
        assert_eq!(day.coarser(), Some(TickStep::new(TickUnit::Week, 1)));
        assert_eq!(TICK_LADDER[0].finer(), None);
        assert_eq!(TICK_LADDER[15].coarser(), None);
        assert_eq!(TickStep::new(TickUnit::Hour, 2).finer(), None);
    }

    #[test]
    fn choose_step_respects_min_spacing() {
        // One hour per 100 px: 3h is the first step reaching 150 px.
        let scale = HOUR / 100.0;
        assert_eq!(
            choose_step(scale, 150.0),
            Some(TickStep::new(TickUnit::Hour, 3))
        );
        // Absurdly zoomed out: coarsest step.
        assert_eq!(choose_step(YEAR * 1_000.0, 150.0), Some(TICK_LADDER[15]));
        // Absurdly zoomed in: finest step.
        assert_eq!(choose_step(1e-3, 150.0), Some(TICK_LADDER[0]));
        assert_eq!(choose_step(0.0, 150.0), None);
        assert_eq!(choose_step(f64::NAN, 150.0), None);
    }
}
