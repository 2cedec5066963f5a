// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::FixedOffset;
use kurbo::{Line, ParamCurveNearest, Point};
use lifeline_axis::{format_date, format_date_time};
use lifeline_camera::Projection;
use lifeline_layout::BranchLayout;
use lifeline_model::{Branch, Seconds, Snapshot};

/// Pointer tolerances for hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitTestConfig {
    /// Maximum distance from a branch line, in pixels.
    pub line_tolerance: f64,
    /// Radius of branch start/end markers, in pixels.
    pub marker_radius: f64,
    /// Radius of node markers, in pixels.
    pub node_radius: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 5.0,
            marker_radius: 6.0,
            node_radius: 5.0,
        }
    }
}

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// The horizontal line of a branch.
    BranchLine(String),
    /// The start marker of a branch.
    BranchStart(String),
    /// The end marker of a finished branch.
    BranchEnd(String),
    /// A node marker.
    Node(String),
}

/// Tooltip shown for a hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Pointer position the tooltip is anchored to.
    pub anchor: Point,
    /// Text to display.
    pub text: String,
    /// What was hit.
    pub target: HitTarget,
}

/// The data a frame was drawn from.
///
/// Hit testing must see exactly what the renderer saw, so the engine hands
/// both the same snapshot, layout and "now".
#[derive(Clone, Copy, Debug)]
pub struct HitScene<'a> {
    /// Branches and nodes.
    pub snapshot: &'a Snapshot,
    /// Lanes of the branches.
    pub layout: &'a BranchLayout,
    /// The instant ongoing branches extend to.
    pub now: Seconds,
    /// Offset used to format dates.
    pub offset: FixedOffset,
}

/// Finds the first element under `point`.
///
/// Branch lines are tested first, then start/end markers, then nodes. A line
/// hit yields to a marker or node of the same branch under the pointer, since
/// those sit on the line. The root branch's line and markers are not drawn
/// and cannot be hit; nodes on the root can.
#[must_use]
pub fn hit_test(
    scene: &HitScene<'_>,
    projection: &Projection,
    point: Point,
    config: &HitTestConfig,
) -> Option<Tooltip> {
    if !(point.x.is_finite() && point.y.is_finite()) {
        return None;
    }
    let (target, text) = find_hit(scene, projection, point, config)?;
    Some(Tooltip {
        anchor: point,
        text,
        target,
    })
}

fn find_hit(
    scene: &HitScene<'_>,
    projection: &Projection,
    point: Point,
    config: &HitTestConfig,
) -> Option<(HitTarget, String)> {
    for (branch, lane) in drawn_branches(scene) {
        let line = Line::new(
            projection.point(branch.start, lane),
            projection.point(branch.end_or(scene.now), lane),
        );
        let dist = line.nearest(point, 0.).distance_sq.sqrt();
        if dist <= config.line_tolerance {
            let on_line = marker_hit(branch, lane, scene, projection, point, config)
                .or_else(|| node_hit(scene, projection, point, config, Some(branch.id.as_str())))
                .unwrap_or_else(|| {
                    (
                        HitTarget::BranchLine(branch.id.clone()),
                        branch_text(branch, scene),
                    )
                });
            return Some(on_line);
        }
    }

    drawn_branches(scene)
        .find_map(|(branch, lane)| marker_hit(branch, lane, scene, projection, point, config))
        .or_else(|| node_hit(scene, projection, point, config, None))
}

fn marker_hit(
    branch: &Branch,
    lane: f64,
    scene: &HitScene<'_>,
    projection: &Projection,
    point: Point,
    config: &HitTestConfig,
) -> Option<(HitTarget, String)> {
    if projection.point(branch.start, lane).distance(point) <= config.marker_radius {
        return Some((
            HitTarget::BranchStart(branch.id.clone()),
            format!("{} started {}", branch.name, format_date(branch.start, scene.offset)),
        ));
    }
    let end = branch.end?;
    (projection.point(end, lane).distance(point) <= config.marker_radius).then(|| {
        (
            HitTarget::BranchEnd(branch.id.clone()),
            format!("{} ended {}", branch.name, format_date(end, scene.offset)),
        )
    })
}

/// First node within `node_radius` of `point`, optionally only on `branch_id`.
fn node_hit(
    scene: &HitScene<'_>,
    projection: &Projection,
    point: Point,
    config: &HitTestConfig,
    branch_id: Option<&str>,
) -> Option<(HitTarget, String)> {
    scene
        .snapshot
        .nodes()
        .iter()
        .filter(|node| branch_id.is_none_or(|id| node.branch_id == id))
        .filter_map(|node| {
            let lane = scene.layout.get(&node.branch_id)?.lane_offset;
            Some((node, projection.point(node.time, lane)))
        })
        .find(|(_, at)| at.distance(point) <= config.node_radius)
        .map(|(node, _)| {
            (
                HitTarget::Node(node.id.clone()),
                format!("{}\n{}", node.content, format_date_time(node.time, scene.offset)),
            )
        })
}

/// Non-root branches with a lane, paired with their lane offset.
fn drawn_branches<'a>(scene: &HitScene<'a>) -> impl Iterator<Item = (&'a Branch, f64)> + use<'a> {
    let layout = scene.layout;
    scene
        .snapshot
        .branches()
        .iter()
        .filter(move |b| !layout.is_root(&b.id))
        .filter_map(move |b| layout.get(&b.id).map(|lane| (b, lane.lane_offset)))
}

fn branch_text(branch: &Branch, scene: &HitScene<'_>) -> String {
    let start = format_date(branch.start, scene.offset);
    let end = branch
        .end
        .map_or_else(|| "present".to_owned(), |end| format_date(end, scene.offset));
    let mut text = format!("{}\n{start} to {end}", branch.name);
    if !branch.summary.is_empty() {
        text.push('\n');
        text.push_str(&branch.summary);
    }
    text
}
