// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Circle, Line, Point, Rect, RoundedRect, Stroke};
use peniko::Color;

/// Horizontal alignment of a text run relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the origin.
    #[default]
    Start,
    /// Text is centered on the origin.
    Center,
}

/// A single drawing command in view pixels.
///
/// This is the whole vocabulary the renderer needs; a host maps it onto its
/// own 2D backend.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Fill a rounded rectangle.
    FillRoundedRect {
        /// Rounded rectangle.
        rect: RoundedRect,
        /// Fill color.
        color: Color,
    },
    /// Stroke a straight segment.
    StrokeLine {
        /// Segment.
        line: Line,
        /// Stroke color.
        color: Color,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Stroke an arbitrary path.
    StrokePath {
        /// Path.
        path: BezPath,
        /// Stroke color.
        color: Color,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Fill an arbitrary path (non-zero winding).
    FillPath {
        /// Path.
        path: BezPath,
        /// Fill color.
        color: Color,
    },
    /// Fill a circle.
    FillCircle {
        /// Circle.
        circle: Circle,
        /// Fill color.
        color: Color,
    },
    /// Stroke a circle outline.
    StrokeCircle {
        /// Circle.
        circle: Circle,
        /// Stroke color.
        color: Color,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Draw a single line of text with its baseline at `origin.y`.
    Text {
        /// Anchor point.
        origin: Point,
        /// Text to draw.
        text: String,
        /// Font size in pixels.
        size: f64,
        /// Text color.
        color: Color,
        /// Alignment relative to `origin`.
        align: TextAlign,
    },
}

/// A drawing target.
pub trait Surface {
    /// Applies one drawing command.
    fn draw(&mut self, op: DrawOp);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw(&mut self, op: DrawOp) {
        (**self).draw(op);
    }
}

/// A surface that records every op, for tests and debugging.
///
/// It does not rasterize anything.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded ops, in the order they were drawn.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every text run drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }

    /// Origin of the first text run equal to `text`.
    #[must_use]
    pub fn find_text(&self, text: &str) -> Option<Point> {
        self.texts().find(|(t, _)| *t == text).map(|(_, origin)| origin)
    }

    /// Forgets every recorded op.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}
