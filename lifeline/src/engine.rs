// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;

use kurbo::Size;
use lifeline_camera::{Camera, ViewportState};
use lifeline_interaction::{Controller, HitScene, InputEvent, Tooltip};
use lifeline_layout::{BranchLayout, layout_branches};
use lifeline_model::{DataSource, Seconds, Snapshot, YEAR};
use lifeline_render::{Callout, Frame, Renderer, Surface};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, TimelineConfig};

/// The interactive timeline.
///
/// Owns the viewport and its animation, the current data snapshot and its
/// lane layout, and the in-progress pointer interaction. Hosts feed it
/// input with [`handle`](Self::handle), drive it with
/// [`tick`](Self::tick) while [`needs_frame`](Self::needs_frame) holds, and
/// draw it with [`render`](Self::render) whenever
/// [`take_redraw_request`](Self::take_redraw_request) says so.
#[derive(Debug)]
pub struct TimelineEngine<C = SystemClock> {
    config: TimelineConfig,
    clock: C,
    camera: Camera,
    controller: Controller,
    renderer: Renderer,
    snapshot: Snapshot,
    layout: BranchLayout,
    generation: u64,
    fitted: bool,
    redraw: bool,
}

impl TimelineEngine {
    /// Creates an engine reading "now" from the system clock.
    pub fn new(config: TimelineConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TimelineEngine<C> {
    /// Creates an engine reading "now" from `clock`.
    ///
    /// The engine starts with an empty snapshot and an empty view; nothing
    /// is drawn until the first [`InputEvent::Resize`].
    pub fn with_clock(config: TimelineConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let snapshot = Snapshot::default();
        let layout = layout_branches(snapshot.branches(), None, &config.layout);
        Ok(Self {
            camera: Camera::new(config.camera, 0.0),
            controller: Controller::new(config.interaction),
            renderer: Renderer::new(config.theme.clone(), config.ticks),
            config,
            clock,
            snapshot,
            layout,
            generation: 0,
            fitted: false,
            redraw: true,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// The clock "now" is read from.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock, for hosts that drive it.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The camera: viewport state, bounds and animation.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.camera.state()
    }

    /// The data currently shown.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Lanes of the current snapshot.
    #[must_use]
    pub fn layout(&self) -> &BranchLayout {
        &self.layout
    }

    /// Bumped every time the snapshot is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The lower time bound: the root branch's start, or the Unix epoch
    /// without branches.
    #[must_use]
    pub fn epoch(&self) -> Seconds {
        self.camera.epoch()
    }

    /// The tooltip under the pointer, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.controller.tooltip()
    }

    /// Replaces the data shown.
    ///
    /// Re-resolves the root, moves the lower time bound to its start, and
    /// recomputes the lane layout.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        if snapshot.skipped() > 0 {
            warn!(skipped = snapshot.skipped(), "records with unreadable timestamps skipped");
        }
        let root = snapshot.root(self.config.root_id.as_deref());
        let epoch = root.map_or(0.0, |root| root.start);
        let root_id = root.map(|root| root.id.clone());
        self.layout = layout_branches(snapshot.branches(), root_id.as_deref(), &self.config.layout);
        self.snapshot = snapshot;
        self.generation += 1;
        self.camera.set_epoch(epoch);
        self.controller.clear_tooltip();
        debug!(
            generation = self.generation,
            branches = self.snapshot.branches().len(),
            nodes = self.snapshot.nodes().len(),
            root = root_id.as_deref(),
            epoch,
            "snapshot replaced"
        );
        self.redraw = true;
    }

    /// Reads a fresh snapshot from `source`.
    pub fn load(&mut self, source: &impl DataSource) {
        self.set_snapshot(Snapshot::load(source));
    }

    /// Applies one input event.
    ///
    /// The first resize to a non-empty size frames the whole lifetime (see
    /// [`fit_lifetime`](Self::fit_lifetime)). Returns `true` if a redraw is
    /// due.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let scene = HitScene {
            snapshot: &self.snapshot,
            layout: &self.layout,
            now: self.clock.now(),
            offset: self.config.ticks.offset(),
        };
        let mut changed = self.controller.handle(event, &mut self.camera, Some(&scene));
        if let InputEvent::Resize { .. } = event
            && !self.fitted
            && self.camera.bounds().is_some()
        {
            changed |= self.fit_lifetime();
        }
        self.redraw |= changed;
        changed
    }

    /// Advances any running animation to `now_ms` (host monotonic time).
    ///
    /// Returns `true` if a redraw is due.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let changed = self.camera.tick(now_ms);
        self.redraw |= changed;
        changed
    }

    /// Returns `true` while the frame loop should keep calling
    /// [`tick`](Self::tick).
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.camera.is_active()
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        mem::take(&mut self.redraw)
    }

    /// Draws the current frame onto `surface`.
    ///
    /// Draws nothing while the view is empty.
    pub fn render(&self, surface: &mut impl Surface) {
        let Some(projection) = self.camera.projection() else {
            return;
        };
        let frame = Frame {
            snapshot: &self.snapshot,
            layout: &self.layout,
            projection,
            now: self.clock.now(),
            epoch: self.camera.epoch(),
            callout: self.controller.tooltip().map(|tip| Callout {
                anchor: tip.anchor,
                text: &tip.text,
            }),
        };
        self.renderer.render(&frame, surface);
    }

    /// Animates so `time` is horizontally centered, the lane `lane_offset`
    /// pixels from the axis is vertically centered, and the scale becomes
    /// `scale` seconds per pixel, clamped to the zoom bounds.
    ///
    /// Returns `false` if nothing moves (empty view, invalid arguments, or
    /// already there).
    pub fn focus_viewport_to_location(
        &mut self,
        time: Seconds,
        lane_offset: f64,
        scale: f64,
        now_ms: f64,
    ) -> bool {
        let moved = self.camera.focus_on(time, lane_offset, scale, now_ms);
        self.redraw |= moved;
        moved
    }

    /// Centers "now" on the axis, showing about a year across the view.
    pub fn focus_today(&mut self, now_ms: f64) -> bool {
        let Some(scale) = self.default_scale() else {
            return false;
        };
        let now = self.clock.now();
        self.focus_viewport_to_location(now, 0.0, scale, now_ms)
    }

    /// Brings the lower time bound to the left padding, showing about a year
    /// across the view.
    pub fn focus_epoch_start(&mut self, now_ms: f64) -> bool {
        let Some(scale) = self.default_scale() else {
            return false;
        };
        let padding = self.config.camera.left_padding_px;
        let target = ViewportState::new(scale, self.epoch() - padding * scale, 0.0);
        let moved = self.camera.animate_to(target, now_ms);
        self.redraw |= moved;
        moved
    }

    /// Frames the lower time bound through "now" across the view,
    /// immediately.
    ///
    /// Returns `false` while the view is empty.
    pub fn fit_lifetime(&mut self) -> bool {
        let epoch = self.epoch();
        let end = self.clock.now().max(epoch + self.config.camera.zoom_in_span);
        let fitted = self.camera.fit_range(epoch..end);
        self.fitted |= fitted;
        self.redraw |= fitted;
        fitted
    }

    /// Resizes the view; shorthand for handling [`InputEvent::Resize`].
    pub fn resize(&mut self, size: Size) -> bool {
        self.handle(&InputEvent::Resize { size })
    }

    fn default_scale(&self) -> Option<f64> {
        self.camera.bounds()?;
        Some(YEAR / self.camera.size().width)
    }
}
