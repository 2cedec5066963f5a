// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Axis: time/pixel mapping and calendar-aligned ticks.
//!
//! This crate is the horizontal half of the timeline viewport. It provides:
//! - Pure conversion between instants and pixel X coordinates given a scale
//!   (seconds per pixel) and a time offset (the instant at pixel 0), see
//!   [`TimeAxis`] and the free functions [`time_to_x`] / [`x_to_time`].
//! - A fixed ladder of sixteen calendar-meaningful tick steps
//!   ([`TICK_LADDER`]) and the density rule picking one of them
//!   ([`choose_step`]).
//! - Tick generation aligned to real calendar boundaries ([`generate_ticks`]):
//!   ticks land on "noon", "Monday", "the 1st" or "January", never on offsets
//!   from an arbitrary origin.
//! - A per-frame [`TickPlan`] that cross-fades the chosen step with the next
//!   finer one while zooming, so granularity changes never pop.
//!
//! ## Minimal example
//!
//! ```rust
//! use lifeline_axis::{TickConfig, TimeAxis, plan_ticks};
//! use lifeline_model::{DAY, parse_timestamp};
//!
//! // One day every 200 px, starting at the first of June.
//! let axis = TimeAxis::new(DAY / 200.0, parse_timestamp("2021-06-01").unwrap());
//! let plan = plan_ticks(&axis, 1_000.0, &TickConfig::default()).unwrap();
//!
//! let first = plan.coarse.ticks[0];
//! assert_eq!(axis.time_to_x(first.time), 0.0);
//! assert_eq!(first.label(TickConfig::default().offset()), "Tue 1 Jun");
//! ```
//!
//! All arithmetic is done on `f64` seconds; chrono is only used to find
//! calendar boundaries, in a configurable fixed UTC offset.

mod label;
mod ladder;
mod mapper;
mod ticks;

pub use label::{format_date, format_date_time, format_tick_label};
pub use ladder::{TICK_LADDER, TickStep, TickUnit, choose_step};
pub use mapper::{TimeAxis, lane_y, offset_for_anchor, time_to_x, x_to_time};
pub use ticks::{Tick, TickConfig, TickLayer, TickPlan, crossfade, generate_ticks, plan_ticks};
