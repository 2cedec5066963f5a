// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame rendering scenarios.

use kurbo::{Line, Point, Size};
use lifeline_axis::TickConfig;
use lifeline_camera::ViewportState;
use lifeline_layout::{LayoutConfig, layout_branches};
use lifeline_model::{BranchRecord, DAY, HOUR, NodeRecord, Snapshot, YEAR};
use lifeline_render::{DrawOp, Frame, RecordingSurface, Renderer, Theme};

fn render(snapshot: &Snapshot, state: ViewportState, now: f64, epoch: f64) -> RecordingSurface {
    let root = snapshot.root(None).map(|b| b.id.as_str());
    let layout = layout_branches(snapshot.branches(), root, &LayoutConfig::default());
    let frame = Frame {
        snapshot,
        layout: &layout,
        projection: state.projection(Size::new(640.0, 480.0)),
        now,
        epoch,
        callout: None,
    };
    let mut surface = RecordingSurface::new();
    Renderer::default().render(&frame, &mut surface);
    surface
}

fn lines_in(surface: &RecordingSurface, theme_color: peniko::Color) -> Vec<Line> {
    surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::StrokeLine { line, color, .. } if *color == theme_color => Some(*line),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_snapshot_still_draws_the_frame() {
    let theme = Theme::default();
    let surface = render(&Snapshot::default(), ViewportState::new(DAY / 100.0, 0.0, 0.0), 3.0 * DAY, 0.0);

    assert!(matches!(surface.ops().first(), Some(DrawOp::FillRect { .. })));
    let axis = lines_in(&surface, theme.axis);
    assert_eq!(axis, vec![Line::new((0.0, 240.0), (300.0, 240.0))]);
    let now = lines_in(&surface, theme.now);
    assert_eq!(now, vec![Line::new((300.0, 0.0), (300.0, 480.0))]);
    assert!(surface.texts().next().is_some(), "tick labels are drawn");
}

#[test]
fn axis_is_limited_to_epoch_and_now() {
    let theme = Theme::default();
    // Epoch and now both well inside the view.
    let state = ViewportState::new(HOUR, -10.0 * HOUR, 0.0);
    let surface = render(&Snapshot::default(), state, 100.0 * HOUR, 0.0);
    let axis = lines_in(&surface, theme.axis);
    assert_eq!(axis, vec![Line::new((10.0, 240.0), (110.0, 240.0))]);
}

#[test]
fn axis_is_skipped_before_the_epoch() {
    let theme = Theme::default();
    let state = ViewportState::new(HOUR, -10.0 * YEAR, 0.0);
    let surface = render(&Snapshot::default(), state, 100.0 * HOUR, 0.0);
    assert!(lines_in(&surface, theme.axis).is_empty());
    assert!(lines_in(&surface, theme.now).is_empty());
}

#[test]
fn tick_layers_fade_between_granularities() {
    let surface = render(&Snapshot::default(), ViewportState::new(DAY / 200.0, 0.0, 0.0), DAY, 0.0);
    let config = TickConfig::default();
    assert_eq!(config.min_spacing_px, 150.0);
    let alphas: Vec<f32> = surface
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { color, size, .. } if *size == Theme::default().tick_font_size => {
                Some(color.components[3])
            }
            _ => None,
        })
        .collect();
    assert!(!alphas.is_empty());
    assert!(alphas.iter().all(|a| *a > 0.0 && *a <= 1.0));
}

#[test]
fn nodes_follow_their_branch_lane() {
    let snapshot = Snapshot::resolve(
        &[
            BranchRecord::new("main", "Main", "1970-01-01"),
            BranchRecord::new("side", "Side", "1970-01-02").with_parent("main"),
        ],
        &[NodeRecord::new("n", "side", "1970-01-03", "Hello")],
    );
    let surface = render(&snapshot, ViewportState::new(DAY / 100.0, 0.0, 0.0), 4.0 * DAY, 0.0);
    let node = surface.ops().iter().find_map(|op| match op {
        DrawOp::FillCircle { circle, color } if *color == Theme::default().node => Some(circle.center),
        _ => None,
    });
    // "side" is the first root child: one lane (40 px) above the axis.
    assert_eq!(node, Some(Point::new(200.0, 200.0)));
    // The root itself is the axis, not a drawn branch.
    assert!(surface.find_text("Main").is_none());
    assert!(surface.find_text("Side").is_some());
}
