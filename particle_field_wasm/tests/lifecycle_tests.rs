mod common;

use common::{DrawCall, FakeFrames, RecordingSurface};
use glam::Vec2;
use particle_field_wasm::background::Background;
use particle_field_wasm::config::FieldConfig;
use particle_field_wasm::viewport::Viewport;
use rand::rngs::StdRng;
use rand::SeedableRng;

type TestBackground = Background<RecordingSurface, FakeFrames, StdRng>;

fn background(enabled: bool) -> TestBackground {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1280.0, 720.0, 2.0, &config);

    Background::new(
        RecordingSurface::default(),
        FakeFrames::default(),
        viewport,
        config,
        StdRng::seed_from_u64(5),
        enabled,
    )
}

/// Simulates the browser delivering the pending frame, if any.
fn tick(background: &mut TestBackground) {
    if background.is_scheduled() {
        background.on_frame();
    }
}

#[test]
fn test_construction_sizes_surface_and_population() {
    let background = background(true);

    assert_eq!(
        background.surface().calls,
        vec![DrawCall::Resize { physical: (2560, 1440), ratio: 2.0 }]
    );
    assert_eq!(background.field().particles().len(), 110);
    assert!(!background.is_scheduled());
}

#[test]
fn test_start_draws_immediately_and_schedules() {
    let mut background = background(true);
    background.start();

    assert!(background.is_scheduled());
    assert_eq!(background.surface().discs(), 110);

    background.start();
    assert_eq!(background.surface().discs(), 110, "second start is ignored");
}

#[test]
fn test_each_frame_reschedules() {
    let mut background = background(true);
    background.start();

    tick(&mut background);
    tick(&mut background);

    assert!(background.is_scheduled());
    assert_eq!(background.surface().discs(), 330);
}

#[test]
fn test_disabling_cancels_pending_frame() {
    let mut background = background(true);
    background.start();
    tick(&mut background);

    background.set_enabled(false);

    assert!(!background.is_scheduled());
    assert!(!background.is_enabled());

    let painted = background.surface().paint_calls();
    tick(&mut background);
    // A frame the browser already queued must not paint either.
    background.on_frame();

    assert_eq!(background.surface().paint_calls(), painted);
    assert!(!background.is_scheduled());
}

#[test]
fn test_cancel_hands_back_the_pending_handle() {
    let mut background = background(true);
    background.start();
    tick(&mut background);

    background.stop();

    // Handle 1 fired, handle 2 was still pending.
    assert_eq!(background.scheduler().requested, vec![1, 2]);
    assert_eq!(background.scheduler().cancelled, vec![2]);
    assert!(matches!(background.surface().calls.last(), Some(DrawCall::Clear(_))));

    background.stop();
    assert_eq!(background.scheduler().cancelled, vec![2], "nothing left to cancel");
}

#[test]
fn test_disabled_layer_does_no_work() {
    let mut background = background(false);
    background.start();
    tick(&mut background);

    assert!(!background.is_scheduled());
    assert_eq!(background.surface().paint_calls(), 0);
}

#[test]
fn test_reenabling_resumes_the_loop() {
    let mut background = background(true);
    background.start();
    background.set_enabled(false);

    background.set_enabled(true);

    assert!(background.is_enabled());
    assert!(background.is_scheduled());
}

#[test]
fn test_failed_request_stops_the_loop() {
    let config = FieldConfig::default();
    let mut background = Background::new(
        RecordingSurface::default(),
        FakeFrames { fail: true, ..FakeFrames::default() },
        Viewport::new(640.0, 480.0, 1.0, &config),
        config,
        StdRng::seed_from_u64(5),
        true,
    );

    background.start();

    assert!(!background.is_scheduled());
    assert_eq!(background.surface().discs(), 60, "the first frame is still drawn");
}

#[test]
fn test_pointer_events_reach_the_field() {
    let mut background = background(true);

    background.pointer_moved(Vec2::new(12.0, 34.0));
    assert_eq!(background.field().pointer(), Some(Vec2::new(12.0, 34.0)));

    background.pointer_left();
    assert_eq!(background.field().pointer(), None);
}

#[test]
fn test_resize_updates_surface_and_population() {
    let mut background = background(true);
    let viewport = background.viewport(1920.0, 1080.0, 1.0);

    background.resize(viewport);

    assert_eq!(background.field().particles().len(), 220);
    assert_eq!(
        background.surface().calls.last(),
        Some(&DrawCall::Resize { physical: (1920, 1080), ratio: 1.0 })
    );
}

#[test]
fn test_disabled_construction_defers_sizing() {
    let background = background(false);

    assert!(background.surface().calls.is_empty());
    assert!(background.field().particles().is_empty());
}

#[test]
fn test_enabling_applies_the_latest_viewport() {
    let mut background = background(false);
    let viewport = background.viewport(1920.0, 1080.0, 1.0);

    background.resize(viewport);
    assert!(background.surface().calls.is_empty(), "a disabled layer is not resized");
    assert!(background.field().particles().is_empty());

    background.set_enabled(true);

    assert_eq!(
        background.surface().calls[0],
        DrawCall::Resize { physical: (1920, 1080), ratio: 1.0 }
    );
    assert_eq!(background.field().particles().len(), 220);
    assert!(background.is_scheduled());
}

#[test]
fn test_restart_does_not_resize_again() {
    let mut background = background(true);
    background.start();
    background.set_enabled(false);
    background.set_enabled(true);

    let resizes = background
        .surface()
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Resize { .. }))
        .count();
    assert_eq!(resizes, 1);
}
