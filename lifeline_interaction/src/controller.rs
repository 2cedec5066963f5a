// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use lifeline_camera::Camera;
use tracing::{debug, trace};

use crate::drag::{DragTracker, VelocityConfig};
use crate::hit::{HitScene, HitTestConfig, Tooltip, hit_test};

/// A raw input event with its host timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown {
        /// Pointer position in view pixels.
        position: Point,
        /// Host timestamp.
        time_ms: f64,
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        /// Pointer position in view pixels.
        position: Point,
        /// Host timestamp.
        time_ms: f64,
    },
    /// Primary button released.
    PointerUp {
        /// Pointer position in view pixels.
        position: Point,
        /// Host timestamp.
        time_ms: f64,
    },
    /// Pointer left the view.
    PointerLeave {
        /// Host timestamp.
        time_ms: f64,
    },
    /// Wheel scrolled; positive `delta` zooms out.
    Wheel {
        /// Pointer position in view pixels.
        position: Point,
        /// Vertical scroll amount in wheel units.
        delta: f64,
        /// Host timestamp.
        time_ms: f64,
    },
    /// The drawing surface changed size.
    Resize {
        /// New size in pixels.
        size: Size,
    },
}

/// Wheel zoom tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelConfig {
    /// Exponent per wheel unit: one event zooms by `exp(delta * sensitivity)`.
    pub sensitivity: f64,
    /// Smallest zoom factor a single event may apply.
    pub min_factor: f64,
    /// Largest zoom factor a single event may apply.
    pub max_factor: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            min_factor: 0.25,
            max_factor: 4.0,
        }
    }
}

impl WheelConfig {
    /// Scale factor for a wheel `delta`.
    #[must_use]
    pub fn factor(&self, delta: f64) -> f64 {
        let factor = (delta * self.sensitivity).exp();
        if factor.is_nan() {
            return 1.0;
        }
        factor.clamp(self.min_factor, self.max_factor)
    }
}

/// Input handling tunables.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionConfig {
    /// Wheel zoom.
    pub wheel: WheelConfig,
    /// Drag velocity estimation.
    pub velocity: VelocityConfig,
    /// Hit-test tolerances.
    pub hit: HitTestConfig,
}

/// Turns input events into camera changes and tooltips.
///
/// The controller owns only the drag in progress and the current tooltip;
/// the viewport itself lives in the [`Camera`] passed to
/// [`handle`](Self::handle).
#[derive(Clone, Debug, Default)]
pub struct Controller {
    config: InteractionConfig,
    drag: DragTracker,
    tooltip: Option<Tooltip>,
}

impl Controller {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            drag: DragTracker::default(),
            tooltip: None,
        }
    }

    /// Input tunables.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The tooltip to draw, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Drops the tooltip, returning `true` if one was shown.
    ///
    /// Call this when the data behind the last hit test changes.
    pub fn clear_tooltip(&mut self) -> bool {
        self.set_tooltip(None)
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Applies `event` to `camera`.
    ///
    /// `scene` is what the last frame was drawn from; without it hovering
    /// never produces a tooltip. Returns `true` if a redraw is due.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        camera: &mut Camera,
        scene: Option<&HitScene<'_>>,
    ) -> bool {
        match *event {
            InputEvent::PointerDown { position, time_ms } => {
                camera.cancel_animation();
                self.drag.start(position, camera.state(), time_ms);
                debug!(x = position.x, y = position.y, "drag started");
                self.set_tooltip(None);
                true
            }
            InputEvent::PointerMove { position, time_ms } => {
                let Some(origin) = self.drag.origin() else {
                    return self.hover(position, camera, scene);
                };
                match self.drag.update(position, time_ms, &self.config.velocity) {
                    Some(total) => {
                        camera.pan_from(origin, total);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::PointerUp { time_ms, .. } => {
                let Some(velocity) = self.drag.end(time_ms, &self.config.velocity) else {
                    return false;
                };
                let coasting = camera.start_momentum(velocity);
                debug!(vx = velocity.x, vy = velocity.y, coasting, "drag ended");
                true
            }
            InputEvent::PointerLeave { .. } => {
                let was_dragging = self.drag.is_dragging();
                if was_dragging {
                    debug!("drag abandoned");
                }
                self.drag.cancel();
                self.set_tooltip(None) || was_dragging
            }
            InputEvent::Wheel {
                position,
                delta,
                time_ms,
            } => {
                if self.drag.is_dragging() {
                    return false;
                }
                let factor = self.config.wheel.factor(delta);
                trace!(delta, factor, "wheel");
                camera.zoom_about(position.x, factor, time_ms)
            }
            InputEvent::Resize { size } => {
                camera.resize(size);
                true
            }
        }
    }

    fn hover(&mut self, position: Point, camera: &Camera, scene: Option<&HitScene<'_>>) -> bool {
        let tooltip = match (scene, camera.projection()) {
            (Some(scene), Some(projection)) => {
                hit_test(scene, &projection, position, &self.config.hit)
            }
            _ => None,
        };
        self.set_tooltip(tooltip)
    }

    /// Replaces the tooltip, returning `true` if it changed.
    fn set_tooltip(&mut self, tooltip: Option<Tooltip>) -> bool {
        if self.tooltip == tooltip {
            return false;
        }
        self.tooltip = tooltip;
        true
    }
}
