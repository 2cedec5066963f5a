// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifeline Render: draws one timeline frame as a list of 2D drawing ops.
//!
//! The renderer owns no state between frames. It reads a [`Frame`] (the
//! snapshot, its lane layout, the viewport projection and the current
//! instant) and emits [`DrawOp`]s into any [`Surface`]. Hosts adapt
//! [`Surface`] to their own backend; [`RecordingSurface`] keeps the ops
//! for inspection.
//!
//! ```rust
//! use kurbo::Size;
//! use lifeline_camera::ViewportState;
//! use lifeline_layout::{LayoutConfig, layout_branches};
//! use lifeline_model::{DAY, Snapshot};
//! use lifeline_render::{DrawOp, Frame, RecordingSurface, Renderer};
//!
//! let snapshot = Snapshot::default();
//! let layout = layout_branches(snapshot.branches(), None, &LayoutConfig::default());
//! let frame = Frame {
//!     snapshot: &snapshot,
//!     layout: &layout,
//!     projection: ViewportState::new(DAY / 100.0, 0.0, 0.0).projection(Size::new(640.0, 480.0)),
//!     now: 3.0 * DAY,
//!     epoch: 0.0,
//!     callout: None,
//! };
//!
//! let mut surface = RecordingSurface::new();
//! Renderer::default().render(&frame, &mut surface);
//! assert!(matches!(surface.ops()[0], DrawOp::FillRect { .. }));
//! ```
//!
//! Elements outside the view are skipped. A branch whose start lies left of
//! the view but whose line is still visible keeps its name label, pinned to
//! the left edge.

mod renderer;
mod surface;
mod theme;

pub use renderer::{Callout, Frame, Renderer};
pub use surface::{DrawOp, RecordingSurface, Surface, TextAlign};
pub use theme::Theme;
