// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Layout: lane assignment for timeline branches.
//!
//! Every branch is drawn as a horizontal lane at a fixed vertical distance
//! from the center axis. The root branch owns the axis itself; every other
//! branch gets a [`Side`] (above or below the axis) and a 1-based lane index
//! on that side.
//!
//! The assignment is one pass over the non-root branches sorted by start
//! instant:
//! - direct children of the root alternate above, below, above, ...
//! - nested branches take the side of their top-level ancestor, so a subtree
//!   stays on one side of the axis;
//! - branches whose parent chain never reaches the root (unknown parent, a
//!   second parentless branch, or a cycle) go above without disturbing the
//!   alternation;
//! - the lane index is one more than the number of branches already placed on
//!   the same side.
//!
//! The result depends only on the branch set, not on its order or on the
//! viewport, so it can be cached until the data changes.
//!
//! ```rust
//! use lifeline_layout::{LayoutConfig, Side, layout_branches};
//! use lifeline_model::{Branch, parse_timestamp};
//!
//! let branch = |id: &str, parent: Option<&str>, start: &str| Branch {
//!     id: id.into(),
//!     parent_id: parent.map(Into::into),
//!     start: parse_timestamp(start).unwrap(),
//!     end: None,
//!     name: id.into(),
//!     summary: String::new(),
//! };
//! let branches = [
//!     branch("main", None, "1990-01-01"),
//!     branch("school", Some("main"), "2020-01-01"),
//!     branch("work", Some("main"), "2021-01-01"),
//! ];
//!
//! let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
//! assert_eq!(layout.get("school").unwrap().side, Side::Above);
//! assert_eq!(layout.get("work").unwrap().side, Side::Below);
//! assert_eq!(layout.get("work").unwrap().lane_offset, 40.0);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use lifeline_model::Branch;
use tracing::trace;

/// Which side of the center axis a lane sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Above the axis (negative Y).
    #[default]
    Above,
    /// Below the axis (positive Y).
    Below,
}

impl Side {
    /// `-1.0` above, `1.0` below.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Above => -1.0,
            Self::Below => 1.0,
        }
    }

    /// The opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

/// Tunables for lane assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Vertical distance between adjacent lanes, in pixels.
    pub lane_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { lane_spacing: 40.0 }
    }
}

/// Where one branch is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneAssignment {
    /// Side of the center axis.
    pub side: Side,
    /// Lane number on that side, `0` for the root, `1` for the lane closest
    /// to the axis.
    pub lane_index: u32,
    /// Signed distance from the center axis in content pixels.
    pub lane_offset: f64,
}

impl LaneAssignment {
    const ROOT: Self = Self {
        side: Side::Above,
        lane_index: 0,
        lane_offset: 0.0,
    };
}

/// The lanes of every branch in a snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BranchLayout {
    root_id: Option<String>,
    lanes: BTreeMap<String, LaneAssignment>,
}

impl BranchLayout {
    /// Identifier of the branch pinned to the center axis.
    #[must_use]
    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    /// Returns `true` if `id` is the root branch.
    #[must_use]
    pub fn is_root(&self, id: &str) -> bool {
        self.root_id.as_deref() == Some(id)
    }

    /// Lane of branch `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LaneAssignment> {
        self.lanes.get(id)
    }

    /// Content-space offset of branch `id`, `0.0` (the axis) when unknown.
    #[must_use]
    pub fn lane_offset(&self, id: &str) -> f64 {
        self.lanes.get(id).map_or(0.0, |lane| lane.lane_offset)
    }

    /// Number of laid out branches, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if no branch was laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Iterates `(id, lane)` pairs ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LaneAssignment)> {
        self.lanes.iter().map(|(id, lane)| (id.as_str(), lane))
    }
}

/// How a branch relates to the root through its parent chain.
enum Lineage<'a> {
    /// Descends from the root through the given top-level branch.
    UnderRoot(&'a str),
    /// Never reaches the root.
    Detached,
}

/// Assigns a lane to every branch.
///
/// `root_id` names the branch pinned to the center axis; pass the id resolved
/// by [`lifeline_model::Snapshot::root`]. When it does not name any branch in
/// `branches`, every branch is laid out as detached.
///
/// Duplicate ids keep their first occurrence.
#[must_use]
pub fn layout_branches(
    branches: &[Branch],
    root_id: Option<&str>,
    config: &LayoutConfig,
) -> BranchLayout {
    let mut by_id: HashMap<&str, &Branch> = HashMap::with_capacity(branches.len());
    for branch in branches {
        by_id.entry(branch.id.as_str()).or_insert(branch);
    }
    let root_id = root_id.filter(|id| by_id.contains_key(id));

    let mut ordered: Vec<&Branch> = by_id
        .values()
        .copied()
        .filter(|b| Some(b.id.as_str()) != root_id)
        .collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

    // Root children alternate in start order; everything else follows them.
    let mut top_level_sides: HashMap<&str, Side> = HashMap::new();
    let mut next = Side::Above;
    for branch in &ordered {
        if branch.parent_id.as_deref().is_some_and(|p| Some(p) == root_id) {
            top_level_sides.insert(branch.id.as_str(), next);
            next = next.flipped();
        }
    }

    let mut layout = BranchLayout {
        root_id: root_id.map(str::to_owned),
        lanes: BTreeMap::new(),
    };
    if let Some(root) = root_id {
        layout.lanes.insert(root.to_owned(), LaneAssignment::ROOT);
    }

    let mut placed_above = 0_u32;
    let mut placed_below = 0_u32;
    for branch in ordered {
        let side = match lineage(branch, root_id, &by_id) {
            Lineage::UnderRoot(top) => top_level_sides.get(top).copied().unwrap_or_default(),
            Lineage::Detached => Side::Above,
        };
        let placed = match side {
            Side::Above => &mut placed_above,
            Side::Below => &mut placed_below,
        };
        *placed += 1;
        let lane = LaneAssignment {
            side,
            lane_index: *placed,
            lane_offset: side.sign() * f64::from(*placed) * config.lane_spacing,
        };
        trace!(branch = %branch.id, ?side, lane = *placed, "assigned lane");
        layout.lanes.insert(branch.id.clone(), lane);
    }
    layout
}

fn lineage<'a>(
    branch: &'a Branch,
    root_id: Option<&str>,
    by_id: &HashMap<&str, &'a Branch>,
) -> Lineage<'a> {
    let Some(root_id) = root_id else {
        return Lineage::Detached;
    };
    let mut seen = HashSet::new();
    let mut current = branch;
    loop {
        if !seen.insert(current.id.as_str()) {
            return Lineage::Detached;
        }
        match current.parent_id.as_deref() {
            Some(parent) if parent == root_id => return Lineage::UnderRoot(current.id.as_str()),
            Some(parent) => match by_id.get(parent) {
                Some(next) => current = *next,
                None => return Lineage::Detached,
            },
            None => return Lineage::Detached,
        }
    }
}

#[cfg(test)]
mod tests {
    use lifeline_model::parse_timestamp;

    use super::*;

    fn branch(id: &str, parent: Option<&str>, start: &str) -> Branch {
        Branch {
            id: id.into(),
            parent_id: parent.map(Into::into),
            start: parse_timestamp(start).unwrap(),
            end: None,
            name: id.into(),
            summary: String::new(),
        }
    }

    fn lane(layout: &BranchLayout, id: &str) -> (Side, u32) {
        let lane = layout.get(id).unwrap();
        (lane.side, lane.lane_index)
    }

    #[test]
    fn root_sits_on_the_axis() {
        let branches = [branch("main", None, "1990-01-01")];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(layout.get("main"), Some(&LaneAssignment::ROOT));
        assert!(layout.is_root("main"));
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn siblings_alternate_sides() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("b", Some("main"), "2021-01-01"),
            branch("a", Some("main"), "2020-01-01"),
            branch("c", Some("main"), "2022-01-01"),
        ];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(lane(&layout, "a"), (Side::Above, 1));
        assert_eq!(lane(&layout, "b"), (Side::Below, 1));
        assert_eq!(lane(&layout, "c"), (Side::Above, 2));
        assert_eq!(layout.lane_offset("a"), -40.0);
        assert_eq!(layout.lane_offset("b"), 40.0);
        assert_eq!(layout.lane_offset("c"), -80.0);
    }

    #[test]
    fn nested_branches_follow_their_ancestor() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("a", Some("main"), "2000-01-01"),
            branch("b", Some("main"), "2001-01-01"),
            branch("b1", Some("b"), "2002-01-01"),
            branch("b1x", Some("b1"), "2003-01-01"),
        ];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(lane(&layout, "b"), (Side::Below, 1));
        assert_eq!(lane(&layout, "b1"), (Side::Below, 2));
        assert_eq!(lane(&layout, "b1x"), (Side::Below, 3));
    }

    #[test]
    fn child_starting_before_parent_keeps_parent_side() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("a", Some("main"), "2000-01-01"),
            branch("b", Some("main"), "2005-01-01"),
            branch("early", Some("b"), "1995-01-01"),
        ];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(lane(&layout, "early"), (Side::Below, 1));
        assert_eq!(lane(&layout, "b"), (Side::Below, 2));
    }

    #[test]
    fn orphans_and_cycles_go_above_without_flipping() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("orphan", Some("missing"), "1999-01-01"),
            branch("x", Some("y"), "1999-06-01"),
            branch("y", Some("x"), "1999-07-01"),
            branch("a", Some("main"), "2000-01-01"),
            branch("b", Some("main"), "2001-01-01"),
        ];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(lane(&layout, "orphan"), (Side::Above, 1));
        assert_eq!(lane(&layout, "x"), (Side::Above, 2));
        assert_eq!(lane(&layout, "y"), (Side::Above, 3));
        assert_eq!(lane(&layout, "a"), (Side::Above, 4));
        assert_eq!(lane(&layout, "b"), (Side::Below, 1));
    }

    #[test]
    fn equal_starts_break_ties_by_id() {
        let forward = [
            branch("main", None, "1990-01-01"),
            branch("p", Some("main"), "2000-01-01"),
            branch("q", Some("main"), "2000-01-01"),
        ];
        let backward = [forward[0].clone(), forward[2].clone(), forward[1].clone()];
        let config = LayoutConfig::default();
        let a = layout_branches(&forward, Some("main"), &config);
        let b = layout_branches(&backward, Some("main"), &config);
        assert_eq!(a, b);
        assert_eq!(lane(&a, "p"), (Side::Above, 1));
    }

    #[test]
    fn unknown_root_lays_everything_out_detached() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("a", Some("main"), "2000-01-01"),
        ];
        let layout = layout_branches(&branches, Some("nope"), &LayoutConfig::default());
        assert_eq!(layout.root_id(), None);
        assert_eq!(lane(&layout, "main"), (Side::Above, 1));
        assert_eq!(lane(&layout, "a"), (Side::Above, 2));
        assert!(layout_branches(&[], None, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let branches = [
            branch("main", None, "1990-01-01"),
            branch("a", Some("main"), "2000-01-01"),
            branch("a", Some("main"), "1980-01-01"),
        ];
        let layout = layout_branches(&branches, Some("main"), &LayoutConfig::default());
        assert_eq!(layout.len(), 2);
        assert_eq!(lane(&layout, "a"), (Side::Above, 1));
    }
}
