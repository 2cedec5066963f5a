// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Model: the branch and node snapshot consumed by the timeline engine.
//!
//! The engine only ever *reads* data. A data collaborator owns storage and
//! updates; it hands the engine raw [`BranchRecord`]s and [`NodeRecord`]s
//! (directly or through a [`DataSource`]), which are resolved once into an
//! immutable [`Snapshot`] with instants expressed as [`Seconds`].
//!
//! ```rust
//! use lifeline_model::{BranchRecord, NodeRecord, Snapshot};
//!
//! let branches = [
//!     BranchRecord::new("main", "Main", "1990-05-01"),
//!     BranchRecord::new("uni", "University", "2008-09-01")
//!         .with_parent("main")
//!         .with_end("2012-06-30"),
//! ];
//! let nodes = [NodeRecord::new("n1", "uni", "2010-03-14", "Thesis topic chosen")];
//!
//! let snapshot = Snapshot::resolve(&branches, &nodes);
//! assert_eq!(snapshot.root(None).unwrap().id, "main");
//! assert!(snapshot.branch("uni").unwrap().end.is_some());
//! ```
//!
//! Malformed timestamps never fail resolution; the offending record is
//! dropped, logged through `tracing`, and counted in [`Snapshot::skipped`].

mod record;
mod snapshot;
mod timestamp;

pub use record::{BranchRecord, NodeKind, NodeRecord};
pub use snapshot::{Branch, DataSource, Node, Snapshot};
pub use timestamp::{
    DAY, HOUR, MINUTE, MONTH, Seconds, TimestampError, WEEK, YEAR, datetime_to_seconds,
    fixed_offset, parse_timestamp, seconds_to_datetime,
};
