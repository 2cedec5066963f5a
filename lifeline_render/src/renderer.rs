// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Circle, Line, Point, Rect, RoundedRect, Stroke};
use lifeline_axis::{TickConfig, TickLayer, plan_ticks};
use lifeline_camera::Projection;
use lifeline_layout::BranchLayout;
use lifeline_model::{Branch, Node, NodeKind, Seconds, Snapshot};
use tracing::trace;

use crate::surface::{DrawOp, Surface, TextAlign};
use crate::theme::Theme;

/// Pixels an element may sit outside the view before it is culled.
const CULL_MARGIN: f64 = 32.0;
/// Gap between a marker or edge and the text next to it.
const LABEL_INSET: f64 = 8.0;
/// Rough advance of one character, as a fraction of the font size.
const CHAR_WIDTH: f64 = 0.6;
/// Inner padding of label boxes and tooltips.
const BOX_PADDING: f64 = 6.0;

/// Tooltip text to draw over the frame, anchored at the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Callout<'a> {
    /// Pointer position.
    pub anchor: Point,
    /// Text, one line per `\n`.
    pub text: &'a str,
}

/// Everything one frame is drawn from.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Branches and nodes.
    pub snapshot: &'a Snapshot,
    /// Lanes of the branches.
    pub layout: &'a BranchLayout,
    /// Screen mapping of the current viewport.
    pub projection: Projection,
    /// The instant ongoing branches and the axis extend to.
    pub now: Seconds,
    /// Where the axis starts.
    pub epoch: Seconds,
    /// Tooltip overlay, drawn last.
    pub callout: Option<Callout<'a>>,
}

/// Turns a [`Frame`] into [`DrawOp`]s.
///
/// Drawing order, back to front: background, ticks, axis, branch lines,
/// start/end markers, branch labels, nodes, the "now" line and the callout.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    theme: Theme,
    ticks: TickConfig,
}

impl Renderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(theme: Theme, ticks: TickConfig) -> Self {
        Self { theme, ticks }
    }

    /// Colors and metrics.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Tick tunables.
    #[must_use]
    pub fn tick_config(&self) -> &TickConfig {
        &self.ticks
    }

    /// Draws `frame` onto `surface`.
    ///
    /// Draws nothing for an empty view or a degenerate axis.
    pub fn render(&self, frame: &Frame<'_>, surface: &mut impl Surface) {
        let size = frame.projection.size;
        if !(size.width > 0.0 && size.height > 0.0) || !frame.projection.axis.is_valid() {
            trace!(width = size.width, height = size.height, "frame skipped");
            return;
        }
        let mut painter = Painter {
            theme: &self.theme,
            frame,
            surface,
        };
        painter.background();
        if let Some(plan) = plan_ticks(&frame.projection.axis, size.width, &self.ticks) {
            for layer in plan.layers() {
                painter.tick_layer(layer, &self.ticks);
            }
        }
        painter.axis();

        let branches: Vec<_> = frame
            .snapshot
            .branches()
            .iter()
            .filter_map(|branch| painter.place(branch))
            .collect();
        for placed in &branches {
            painter.branch_line(placed);
        }
        for placed in &branches {
            painter.markers(placed);
        }
        for placed in &branches {
            painter.label(placed);
        }
        for node in frame.snapshot.nodes() {
            painter.node(node);
        }
        painter.now_line();
        if let Some(callout) = frame.callout {
            painter.callout(callout);
        }
    }
}

/// A branch with its resolved screen geometry.
#[derive(Debug)]
struct PlacedBranch<'a> {
    branch: &'a Branch,
    y: f64,
    parent_y: f64,
    start_x: f64,
    end_x: f64,
}

struct Painter<'f, 'a, S: ?Sized> {
    theme: &'f Theme,
    frame: &'f Frame<'a>,
    surface: &'f mut S,
}

impl<S: Surface + ?Sized> Painter<'_, '_, S> {
    fn width(&self) -> f64 {
        self.frame.projection.size.width
    }

    fn height(&self) -> f64 {
        self.frame.projection.size.height
    }

    fn x_visible(&self, x: f64, margin: f64) -> bool {
        x >= -margin && x <= self.width() + margin
    }

    fn background(&mut self) {
        let rect = Rect::from_origin_size(Point::ZERO, self.frame.projection.size);
        self.surface.draw(DrawOp::FillRect {
            rect,
            color: self.theme.background,
        });
    }

    fn tick_layer(&mut self, layer: &TickLayer, config: &TickConfig) {
        let alpha = opacity(layer.opacity);
        if alpha <= 0.0 {
            return;
        }
        let line_color = self.theme.tick.multiply_alpha(alpha);
        let label_color = self.theme.tick_label.multiply_alpha(alpha);
        let offset = config.offset();
        let label_y = self.theme.tick_font_size + 4.0;
        for tick in &layer.ticks {
            let x = self.frame.projection.x(tick.time);
            self.surface.draw(DrawOp::StrokeLine {
                line: Line::new((x, 0.0), (x, self.height())),
                color: line_color,
                stroke: Stroke::new(1.0),
            });
            self.surface.draw(DrawOp::Text {
                origin: Point::new(x + 4.0, label_y),
                text: tick.label(offset),
                size: self.theme.tick_font_size,
                color: label_color,
                align: TextAlign::Start,
            });
        }
    }

    fn axis(&mut self) {
        let projection = &self.frame.projection;
        let start = projection.x(self.frame.epoch).max(-CULL_MARGIN);
        let end = projection.x(self.frame.now).min(self.width() + CULL_MARGIN);
        if end <= start {
            return;
        }
        let y = projection.y(0.0);
        self.surface.draw(DrawOp::StrokeLine {
            line: Line::new((start, y), (end, y)),
            color: self.theme.axis,
            stroke: Stroke::new(self.theme.line_width),
        });
    }

    /// Resolves a non-root branch to screen space, or `None` if it is not
    /// drawn this frame.
    fn place<'b>(&self, branch: &'b Branch) -> Option<PlacedBranch<'b>> {
        let layout = self.frame.layout;
        if layout.is_root(&branch.id) {
            return None;
        }
        let lane = layout.get(&branch.id)?;
        let projection = &self.frame.projection;
        let start_x = projection.x(branch.start);
        let end_x = projection.x(branch.end_or(self.frame.now));
        if end_x < -CULL_MARGIN || start_x > self.width() + CULL_MARGIN {
            return None;
        }
        let parent_offset = branch
            .parent_id
            .as_deref()
            .and_then(|id| layout.get(id))
            .map_or(0.0, |parent| parent.lane_offset);
        Some(PlacedBranch {
            branch,
            y: projection.y(lane.lane_offset),
            parent_y: projection.y(parent_offset),
            start_x,
            end_x,
        })
    }

    fn branch_line(&mut self, placed: &PlacedBranch<'_>) {
        let path = branch_path(
            placed,
            self.width(),
            self.theme.connector_radius,
            placed.branch.end.is_some(),
        );
        self.surface.draw(DrawOp::StrokePath {
            path,
            color: self.theme.branch,
            stroke: Stroke::new(self.theme.line_width),
        });
    }

    fn markers(&mut self, placed: &PlacedBranch<'_>) {
        let radius = self.theme.marker_radius;
        let mut ends = vec![placed.start_x];
        if placed.branch.end.is_some() {
            ends.push(placed.end_x);
        }
        for x in ends {
            if self.x_visible(x, radius) {
                self.surface.draw(DrawOp::FillCircle {
                    circle: Circle::new((x, placed.y), radius),
                    color: self.theme.marker,
                });
            }
        }
    }

    fn label(&mut self, placed: &PlacedBranch<'_>) {
        let visible_end = placed.end_x.min(self.width());
        let visible_start = placed.start_x.max(0.0);
        if visible_end <= visible_start {
            return;
        }
        let y = placed.y - LABEL_INSET;
        let name = &placed.branch.name;
        // Off-screen starts pin the label to the left edge.
        let x = if placed.start_x < 0.0 {
            LABEL_INSET
        } else {
            placed.start_x + LABEL_INSET
        };
        self.surface.draw(DrawOp::Text {
            origin: Point::new(x, y),
            text: name.clone(),
            size: self.theme.label_font_size,
            color: self.theme.label,
            align: TextAlign::Start,
        });

        if placed.branch.is_ongoing() && self.x_visible(placed.end_x, 0.0) {
            let size = self.theme.label_font_size;
            let width = text_width(name, size) + 2.0 * BOX_PADDING;
            let height = size + 2.0 * BOX_PADDING;
            let x0 = placed.end_x + LABEL_INSET;
            let rect = Rect::new(x0, placed.y - height * 0.5, x0 + width, placed.y + height * 0.5);
            self.surface.draw(DrawOp::FillRoundedRect {
                rect: RoundedRect::from_rect(rect, height * 0.5),
                color: self.theme.label_box,
            });
            self.surface.draw(DrawOp::Text {
                origin: Point::new(rect.center().x, placed.y + size * 0.35),
                text: name.clone(),
                size,
                color: self.theme.label,
                align: TextAlign::Center,
            });
        }
    }

    fn node(&mut self, node: &Node) {
        let Some(lane) = self.frame.layout.get(&node.branch_id) else {
            return;
        };
        let radius = self.theme.node_radius;
        let center = self.frame.projection.point(node.time, lane.lane_offset);
        if !self.x_visible(center.x, 2.0 * radius) {
            return;
        }
        match node.kind {
            NodeKind::Event => self.surface.draw(DrawOp::FillCircle {
                circle: Circle::new(center, radius),
                color: self.theme.node,
            }),
            NodeKind::Milestone => self.surface.draw(DrawOp::FillPath {
                path: diamond(center, radius * 1.4),
                color: self.theme.milestone,
            }),
        }
        if node.is_updating {
            self.surface.draw(DrawOp::StrokeCircle {
                circle: Circle::new(center, radius + 4.0),
                color: self.theme.updating,
                stroke: Stroke::new(1.5).with_dashes(0.0, [3.0, 3.0]),
            });
        }
    }

    fn now_line(&mut self) {
        let x = self.frame.projection.x(self.frame.now);
        if !self.x_visible(x, 0.0) {
            return;
        }
        self.surface.draw(DrawOp::StrokeLine {
            line: Line::new((x, 0.0), (x, self.height())),
            color: self.theme.now,
            stroke: Stroke::new(self.theme.line_width),
        });
    }

    fn callout(&mut self, callout: Callout<'_>) {
        let size = self.theme.label_font_size;
        let line_height = size * 1.3;
        let lines: Vec<&str> = callout.text.lines().collect();
        if lines.is_empty() {
            return;
        }
        let widest = lines
            .iter()
            .map(|line| text_width(line, size))
            .fold(0.0, f64::max);
        let box_width = widest + 2.0 * BOX_PADDING;
        let box_height = rows(lines.len()) * line_height + 2.0 * BOX_PADDING;

        // Below-right of the pointer, flipped when it would leave the view.
        let mut x0 = callout.anchor.x + 12.0;
        if x0 + box_width > self.width() {
            x0 = callout.anchor.x - 12.0 - box_width;
        }
        let mut y0 = callout.anchor.y + 12.0;
        if y0 + box_height > self.height() {
            y0 = callout.anchor.y - 12.0 - box_height;
        }
        let rect = Rect::new(x0, y0, x0 + box_width, y0 + box_height);
        self.surface.draw(DrawOp::FillRoundedRect {
            rect: RoundedRect::from_rect(rect, 4.0),
            color: self.theme.tooltip_background,
        });
        let mut baseline = y0 + BOX_PADDING + size;
        for line in lines {
            self.surface.draw(DrawOp::Text {
                origin: Point::new(x0 + BOX_PADDING, baseline),
                text: line.to_owned(),
                size,
                color: self.theme.tooltip_text,
                align: TextAlign::Start,
            });
            baseline += line_height;
        }
    }
}

/// Lane line of a branch, with rounded 90° connectors to the parent lane at
/// its start and, if `connect_end`, at its end.
///
/// Ends beyond the cull margin are cut off without a connector.
fn branch_path(placed: &PlacedBranch<'_>, width: f64, radius: f64, connect_end: bool) -> BezPath {
    let y = placed.y;
    let rise = placed.parent_y - y;
    let start_visible = placed.start_x >= -CULL_MARGIN;
    let end_visible = placed.end_x <= width + CULL_MARGIN;
    let start_x = placed.start_x.max(-CULL_MARGIN);
    let end_x = placed.end_x.min(width + CULL_MARGIN);

    let mut r = radius.min(rise.abs()).max(0.0);
    if connect_end {
        r = r.min((placed.end_x - placed.start_x).max(0.0) * 0.5);
    }
    let toward_parent = rise.signum() * r;

    let mut path = BezPath::new();
    if start_visible && r > 0.0 {
        path.move_to((start_x, placed.parent_y));
        path.line_to((start_x, y + toward_parent));
        path.quad_to((start_x, y), (start_x + r, y));
    } else {
        path.move_to((start_x, y));
    }
    if connect_end && end_visible && r > 0.0 {
        path.line_to((end_x - r, y));
        path.quad_to((end_x, y), (end_x, y + toward_parent));
        path.line_to((end_x, placed.parent_y));
    } else {
        path.line_to((end_x, y));
    }
    path
}

fn diamond(center: Point, half: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((center.x, center.y - half));
    path.line_to((center.x + half, center.y));
    path.line_to((center.x, center.y + half));
    path.line_to((center.x - half, center.y));
    path.close_path();
    path
}

fn text_width(text: &str, size: f64) -> f64 {
    rows(text.chars().count()) * size * CHAR_WIDTH
}

#[expect(
    clippy::cast_precision_loss,
    reason = "label lengths and line counts are far below 2^52"
)]
fn rows(count: usize) -> f64 {
    count as f64
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "opacity is clamped to [0, 1], well within f32 precision"
)]
fn opacity(value: f64) -> f32 {
    value.clamp(0.0, 1.0) as f32
}
