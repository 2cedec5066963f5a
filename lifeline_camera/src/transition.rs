// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lifeline_model::Seconds;

use crate::easing::Easing;
use crate::viewport::ViewportState;

/// A point that stays fixed on screen while a transition zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Instant pinned on screen.
    pub time: Seconds,
    /// Pixel X it is pinned to.
    pub x: f64,
}

/// An eased interpolation between two viewport states.
///
/// Scale is interpolated geometrically, so every frame zooms by the same
/// ratio. With an [`Anchor`] the time offset is derived from the scale so the
/// anchored instant never drifts; otherwise it is interpolated linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
    from: ViewportState,
    to: ViewportState,
    anchor: Option<Anchor>,
    animate_vertical: bool,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl CameraTransition {
    /// Creates a transition from `from` to `to` starting at `start_ms` and
    /// lasting `duration_ms`.
    ///
    /// The vertical offset is left untouched unless
    /// [`with_vertical`](Self::with_vertical) is set.
    #[must_use]
    pub fn new(
        from: ViewportState,
        to: ViewportState,
        start_ms: f64,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            anchor: None,
            animate_vertical: false,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Pins `anchor` on screen for the whole transition.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Also interpolates the vertical offset.
    #[must_use]
    pub fn with_vertical(mut self, animate: bool) -> Self {
        self.animate_vertical = animate;
        self
    }

    /// Starting state.
    #[must_use]
    pub fn from(&self) -> ViewportState {
        self.from
    }

    /// Final state.
    #[must_use]
    pub fn target(&self) -> ViewportState {
        ViewportState {
            vertical_offset: if self.animate_vertical {
                self.to.vertical_offset
            } else {
                self.from.vertical_offset
            },
            ..self.to
        }
    }

    /// Duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Easing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if !(self.duration_ms > 0.0) {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Returns `true` once `now_ms` reaches the end of the transition.
    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// The interpolated state at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> ViewportState {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.target();
        }
        let e = self.easing.apply(progress);
        let scale = if self.from.scale > 0.0 && self.to.scale > 0.0 {
            self.from.scale * (self.to.scale / self.from.scale).powf(e)
        } else {
            lerp(self.from.scale, self.to.scale, e)
        };
        let time_offset = match self.anchor {
            Some(anchor) => anchor.time - anchor.x * scale,
            None => lerp(self.from.time_offset, self.to.time_offset, e),
        };
        let vertical_offset = if self.animate_vertical {
            lerp(self.from.vertical_offset, self.to.vertical_offset, e)
        } else {
            self.from.vertical_offset
        };
        ViewportState {
            scale,
            time_offset,
            vertical_offset,
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
