// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! No sequence of navigation requests may escape the zoom bounds or the
//! lower time bound.

use kurbo::{Size, Vec2};
use lifeline_camera::{Camera, CameraConfig, ViewportState};
use lifeline_model::YEAR;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Zoom { x: f64, factor: f64 },
    Pan { dx: f64, dy: f64 },
    Fling { vx: f64, vy: f64 },
    Focus { time: f64, scale: f64 },
    Resize { width: f64 },
    Frames(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0_f64..1_200.0, 0.05_f64..20.0).prop_map(|(x, factor)| Op::Zoom { x, factor }),
        (-5_000.0_f64..5_000.0, -500.0_f64..500.0).prop_map(|(dx, dy)| Op::Pan { dx, dy }),
        (-200.0_f64..200.0, -50.0_f64..50.0).prop_map(|(vx, vy)| Op::Fling { vx, vy }),
        (-10.0 * YEAR..100.0 * YEAR, 1e-3_f64..1e8).prop_map(|(time, scale)| Op::Focus { time, scale }),
        (0.0_f64..2_000.0).prop_map(|width| Op::Resize { width }),
        (1_u8..40).prop_map(Op::Frames),
    ]
}

fn assert_within_bounds(camera: &Camera) -> Result<(), TestCaseError> {
    let state = camera.state();
    prop_assert!(state.is_valid(), "invalid state {state:?}");
    if let Some(bounds) = camera.bounds() {
        prop_assert!(bounds.contains(state.scale), "{state:?} outside {bounds:?}");
    }
    let min = camera.min_time_offset();
    prop_assert!(state.time_offset >= min - 1e-6 * min.abs().max(1.0));
    Ok(())
}

proptest! {
    #[test]
    fn navigation_never_escapes_bounds(ops in prop::collection::vec(op(), 1..40)) {
        let mut camera = Camera::new(CameraConfig::default(), 5.0 * YEAR);
        camera.resize(Size::new(1_000.0, 600.0));
        camera.fit_range(5.0 * YEAR..30.0 * YEAR);
        let mut now = 0.0;
        for op in ops {
            match op {
                Op::Zoom { x, factor } => {
                    camera.zoom_about(x, factor, now);
                }
                Op::Pan { dx, dy } => {
                    camera.cancel_animation();
                    camera.pan_from(camera.state(), Vec2::new(dx, dy));
                }
                Op::Fling { vx, vy } => {
                    camera.start_momentum(Vec2::new(vx, vy));
                }
                Op::Focus { time, scale } => {
                    camera.focus_on(time, 0.0, scale, now);
                }
                Op::Resize { width } => camera.resize(Size::new(width, 600.0)),
                Op::Frames(n) => {
                    for _ in 0..n {
                        now += 1_000.0 / 60.0;
                        camera.tick(now);
                        assert_within_bounds(&camera)?;
                    }
                }
            }
            assert_within_bounds(&camera)?;
        }
    }
}

#[test]
fn repeated_zoom_in_reaches_bound_then_stops() {
    let mut camera = Camera::new(CameraConfig::default(), 0.0);
    camera.resize(Size::new(1_000.0, 600.0));
    camera.set_state(ViewportState::new(YEAR / 1_000.0, 10.0 * YEAR, 0.0));
    let min = camera.bounds().unwrap().min_scale;

    let mut now = 0.0;
    let mut last = camera.state().scale;
    for _ in 0..40 {
        camera.zoom_about(500.0, 0.25, now);
        while camera.is_active() {
            now += 16.0;
            camera.tick(now);
        }
        let scale = camera.state().scale;
        assert!(scale <= last);
        if last > min {
            assert!(scale < last);
        }
        last = scale;
    }
    assert_eq!(last, min);
    assert!(!camera.zoom_about(500.0, 0.25, now));
}
