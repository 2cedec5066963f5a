// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Colors and metrics used to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Frame background.
    pub background: Color,
    /// Main axis line.
    pub axis: Color,
    /// Tick grid lines, before cross-fade opacity.
    pub tick: Color,
    /// Tick labels, before cross-fade opacity.
    pub tick_label: Color,
    /// Branch lines and connectors.
    pub branch: Color,
    /// Start/end marker fill.
    pub marker: Color,
    /// Regular node fill.
    pub node: Color,
    /// Milestone node fill.
    pub milestone: Color,
    /// Halo around nodes being updated.
    pub updating: Color,
    /// Vertical "now" line.
    pub now: Color,
    /// Branch label text.
    pub label: Color,
    /// Fill of the trailing label box of ongoing branches.
    pub label_box: Color,
    /// Tooltip background.
    pub tooltip_background: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
    /// Width of the axis and branch lines.
    pub line_width: f64,
    /// Radius of the rounded connector corners.
    pub connector_radius: f64,
    /// Radius of branch start/end markers.
    pub marker_radius: f64,
    /// Radius of node markers.
    pub node_radius: f64,
    /// Font size of tick labels.
    pub tick_font_size: f64,
    /// Font size of branch labels and tooltips.
    pub label_font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(0x12, 0x14, 0x1a, 0xff),
            axis: Color::from_rgba8(0xc8, 0xcc, 0xd4, 0xff),
            tick: Color::from_rgba8(0xff, 0xff, 0xff, 0x30),
            tick_label: Color::from_rgba8(0x9a, 0xa0, 0xac, 0xff),
            branch: Color::from_rgba8(0x5b, 0x9b, 0xd5, 0xff),
            marker: Color::from_rgba8(0xe8, 0xec, 0xf2, 0xff),
            node: Color::from_rgba8(0xf2, 0xb1, 0x3c, 0xff),
            milestone: Color::from_rgba8(0xe0, 0x5d, 0x7b, 0xff),
            updating: Color::from_rgba8(0xf2, 0xb1, 0x3c, 0xa0),
            now: Color::from_rgba8(0x6f, 0xcf, 0x97, 0xff),
            label: Color::from_rgba8(0xe8, 0xec, 0xf2, 0xff),
            label_box: Color::from_rgba8(0x2a, 0x30, 0x3c, 0xe6),
            tooltip_background: Color::from_rgba8(0x00, 0x00, 0x00, 0xd0),
            tooltip_text: Color::WHITE,
            line_width: 2.0,
            connector_radius: 12.0,
            marker_radius: 6.0,
            node_radius: 5.0,
            tick_font_size: 11.0,
            label_font_size: 12.0,
        }
    }
}
