use std::{num::NonZeroUsize, sync::Arc};

use deskclock_proto::geometry::{Bounds, Size};
use tokio::{task::yield_now, time::advance};

use super::*;
use crate::{
    clock_source::FixedClockSource,
    event_bus::{BusEvent, EventBus, EventReceiver},
    signals::ChannelSignalSource,
    test_utils::{DrawOp, RecordingRenderer},
};

fn images() -> FaceImages {
    FaceImages {
        dial:        Image::new("dial", Size::new(400, 400)),
        hour_hand:   Image::new("hour", Size::new(20, 400)),
        minute_hand: Image::new("minute", Size::new(10, 400)),
        second_hand: Some(Image::new("second", Size::new(4, 400))),
    }
}

fn face_at(time: WallTime) -> (ClockFace, Arc<FixedClockSource>) {
    let clock = Arc::new(FixedClockSource::new(time).with_zone("Plus2", 2));
    let face = ClockFace::new(clock.clone(), images());

    (face, clock)
}

fn module_context() -> (ModuleContext, EventBus) {
    let bus = EventBus::new(NonZeroUsize::new(16).expect("capacity"));
    let ctx = ModuleContext::new(bus.sender(), tokio::runtime::Handle::current());

    (ctx, bus)
}

fn drain(receiver: &mut EventReceiver) -> Vec<BusEvent> {
    let mut events = Vec::new();
    while let Some(event) = receiver.try_recv().expect("queue") {
        events.push(event);
    }
    events
}

fn clock_message(event: &BusEvent) -> Option<Message> {
    match event {
        BusEvent::Module(ModuleEvent::AnalogClock(message)) => Some(message.clone()),
        _ => None,
    }
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn render_before_any_computation_computes_first() {
    let (mut face, _clock) = face_at(WallTime::new(3, 30, 0));
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 400, 400);

    let rotations = renderer.rotations();
    assert_eq!(rotations.len(), 3);
    assert_close(rotations[0], 105.0);
    assert_close(rotations[1], 180.0);
    assert_close(rotations[2], 0.0);
    assert!(renderer.is_balanced());
}

#[test]
fn draws_dial_then_hands_centred_on_the_origin() {
    let (mut face, _clock) = face_at(WallTime::MIDNIGHT);
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 500, 400);

    assert_eq!(
        renderer.images(),
        vec![
            ("dial", Bounds::new(50, 0, 450, 400)),
            ("hour", Bounds::new(240, 0, 260, 400)),
            ("minute", Bounds::new(245, 0, 255, 400)),
            ("second", Bounds::new(248, 0, 252, 400)),
        ]
    );
    assert!(renderer.ops.contains(&DrawOp::Rotate {
        degrees: 0.0,
        pivot:   Point::new(250.0, 200.0),
    }));
}

#[test]
fn rendering_twice_reuses_identical_bounds() {
    let (mut face, _clock) = face_at(WallTime::new(10, 8, 42));
    let mut first = RecordingRenderer::new();
    let mut second = RecordingRenderer::new();

    face.render(&mut first, 300, 300);
    assert!(!face.is_dirty());
    let cached = *face.bounds().expect("bounds after render");

    face.render(&mut second, 300, 300);

    assert_eq!(first.ops, second.ops);
    assert_eq!(face.bounds(), Some(&cached));
}

#[test]
fn resizing_repositions_bounds() {
    let (mut face, _clock) = face_at(WallTime::MIDNIGHT);
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 400, 400);
    face.render(&mut renderer, 600, 600);

    let dial = face.bounds().expect("bounds").dial;
    assert_eq!(dial, Bounds::new(100, 100, 500, 500));
}

#[test]
fn smaller_area_scales_down_uniformly() {
    let (mut face, _clock) = face_at(WallTime::MIDNIGHT);
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 300, 200);

    assert_eq!(renderer.scales(), vec![(0.5, 0.5)]);
    assert!(matches!(
        renderer.ops.get(1),
        Some(DrawOp::Scale { pivot, .. }) if *pivot == Point::new(150.0, 100.0)
    ));
    assert!(renderer.is_balanced());
}

#[test]
fn larger_area_is_never_upscaled() {
    let (mut face, _clock) = face_at(WallTime::MIDNIGHT);
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 1200, 900);

    assert!(renderer.scales().is_empty());
}

#[test]
fn disabled_seconds_are_not_recomputed_or_drawn() {
    let (mut face, clock) = face_at(WallTime::new(1, 0, 15));
    let mut renderer = RecordingRenderer::new();
    face.render(&mut renderer, 400, 400);
    assert_close(face.angles().second, 90.0);

    face.enable_seconds(false);
    clock.set(WallTime::new(1, 0, 45));
    face.on_external_time_signal(TimeSignal::TimeChanged);
    renderer.clear();
    face.render(&mut renderer, 400, 400);

    assert_close(face.angles().second, 90.0);
    assert!(renderer.images().iter().all(|(name, _)| *name != "second"));
    assert_eq!(renderer.rotations().len(), 2);
}

#[test]
fn missing_second_hand_is_skipped() {
    let clock = Arc::new(FixedClockSource::new(WallTime::new(2, 0, 0)));
    let mut images = images();
    images.second_hand = None;
    let mut face = ClockFace::new(clock, images);
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 400, 400);

    assert_eq!(renderer.rotations().len(), 2);
    assert!(face.bounds().expect("bounds").second.is_none());
}

#[test]
fn zone_override_changes_hour_angle() {
    let (mut face, _clock) = face_at(WallTime::new(3, 30, 0));

    face.set_time_zone("Plus2");

    assert_eq!(face.time_zone_id(), Some("Plus2"));
    assert_close(face.angles().hour, 165.0);
    assert_eq!(face.content_description().as_deref(), Some("05:30"));
}

#[test]
fn unknown_zone_falls_back_to_system_zone() {
    let (mut face, _clock) = face_at(WallTime::new(3, 30, 0));
    face.set_time_zone("Plus2");

    face.set_time_zone("Atlantis/Lost");

    assert_eq!(face.time_zone_id(), None);
    assert_close(face.angles().hour, 105.0);
}

#[test]
fn zone_change_signal_becomes_the_override() {
    let (mut face, _clock) = face_at(WallTime::new(11, 0, 0));

    face.on_external_time_signal(TimeSignal::TimeZoneChanged("Plus2".into()));

    assert_eq!(face.time_zone_id(), Some("Plus2"));
    assert_close(face.angles().hour, 30.0);
}

#[test]
fn jewel_is_drawn_below_the_top_of_the_dial() {
    let (face, _clock) = face_at(WallTime::MIDNIGHT);
    let color = HexColor::rgb(255, 0, 0);
    let mut face = face.with_jewel(Some(Jewel {
        radius: 6.0,
        offset: 20.0,
        color,
    }));
    let mut renderer = RecordingRenderer::new();

    face.render(&mut renderer, 400, 400);

    assert!(renderer.ops.contains(&DrawOp::Circle {
        center: Point::new(200.0, 20.0),
        radius: 6.0,
        color,
    }));
}

#[test]
fn invisible_jewel_is_not_configured() {
    let config = JewelConfig {
        radius: 5.0,
        offset: 0.0,
        color:  HexColor::rgba(0, 0, 0, 0),
    };
    assert!(Jewel::from_config(&config).is_none());
    assert!(Jewel::from_config(&JewelConfig::default()).is_none());
}

#[test]
fn measure_scales_dial_to_constraints() {
    let (face, _clock) = face_at(WallTime::MIDNIGHT);

    let size = face.measure(MeasureSpec::AtMost(100), MeasureSpec::Unspecified);

    assert_eq!(size, Size::new(100, 100));
}

#[test]
fn from_config_applies_section() {
    let clock = Arc::new(FixedClockSource::new(WallTime::new(6, 0, 0)).with_zone("Plus2", 2));
    let config = AnalogClockConfig {
        time_zone: Some("Plus2".into()),
        show_seconds: false,
        ..AnalogClockConfig::default()
    };

    let face = ClockFace::from_config(clock, &config);

    assert_eq!(face.time_zone_id(), Some("Plus2"));
    assert!(!face.shows_seconds());
    assert_close(face.angles().hour, 240.0);
    assert_eq!(face.natural_size(), Size::new(368, 368));
}

#[tokio::test(start_paused = true)]
async fn attached_face_ticks_and_rearms() {
    let (ctx, bus) = module_context();
    let mut receiver = bus.receiver();
    let signals = ChannelSignalSource::default();
    let (mut face, clock) = face_at(WallTime::new(0, 0, 0));

    face.attach(&ctx, &signals);
    assert!(face.is_active());
    assert!(matches!(drain(&mut receiver).as_slice(), [BusEvent::Redraw]));

    for second in 1..=3 {
        yield_now().await;
        clock.set(WallTime::new(0, 0, second));
        advance(TICK_INTERVAL).await;
        yield_now().await;

        let events = drain(&mut receiver);
        assert_eq!(events.len(), 1, "one tick per interval");
        let message = clock_message(&events[0]).expect("clock message");
        assert!(matches!(message, Message::Tick { .. }));

        face.update(message);
        assert_close(face.angles().second, second as f32 * 6.0);
        assert!(matches!(drain(&mut receiver).as_slice(), [BusEvent::Redraw]));
    }

    face.detach();
}

#[tokio::test(start_paused = true)]
async fn stale_tick_after_detach_is_a_no_op() {
    let (ctx, bus) = module_context();
    let mut receiver = bus.receiver();
    let signals = ChannelSignalSource::default();
    let (mut face, clock) = face_at(WallTime::new(4, 0, 0));
    let mut renderer = RecordingRenderer::new();

    face.attach(&ctx, &signals);
    face.render(&mut renderer, 400, 400);
    drain(&mut receiver);
    yield_now().await;

    advance(TICK_INTERVAL).await;
    yield_now().await;
    let pending = drain(&mut receiver)
        .first()
        .and_then(clock_message)
        .expect("pending tick");

    face.detach();
    assert!(!face.is_active());

    let before = face.angles();
    clock.set(WallTime::new(9, 45, 30));
    face.update(pending);

    assert_eq!(face.angles(), before);
    assert!(!face.is_dirty());
    assert!(drain(&mut receiver).is_empty());

    advance(TICK_INTERVAL * 5).await;
    yield_now().await;
    assert!(drain(&mut receiver).is_empty());
    assert_eq!(signals.subscriber_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn tick_from_previous_attachment_is_ignored() {
    let (ctx, bus) = module_context();
    let mut receiver = bus.receiver();
    let signals = ChannelSignalSource::default();
    let (mut face, clock) = face_at(WallTime::new(4, 0, 0));

    face.attach(&ctx, &signals);
    yield_now().await;
    advance(TICK_INTERVAL).await;
    yield_now().await;
    let old_tick = drain(&mut receiver)
        .iter()
        .find_map(clock_message)
        .expect("tick");

    face.detach();
    face.attach(&ctx, &signals);
    drain(&mut receiver);

    let before = face.angles();
    clock.set(WallTime::new(8, 0, 0));
    face.update(old_tick);

    assert_eq!(face.angles(), before);
    assert!(drain(&mut receiver).is_empty());

    face.detach();
}

#[tokio::test(start_paused = true)]
async fn environment_signals_reach_the_face_through_the_bus() {
    let (ctx, bus) = module_context();
    let mut receiver = bus.receiver();
    let signals = ChannelSignalSource::default();
    let (mut face, _clock) = face_at(WallTime::new(1, 0, 0));

    face.attach(&ctx, &signals);
    yield_now().await;
    drain(&mut receiver);

    signals.publish(TimeSignal::TimeZoneChanged("Plus2".into()));
    yield_now().await;

    let message = drain(&mut receiver)
        .iter()
        .find_map(clock_message)
        .expect("signal message");
    face.update(message);

    assert_eq!(face.time_zone_id(), Some("Plus2"));
    assert_close(face.angles().hour, 90.0);
    assert!(matches!(drain(&mut receiver).as_slice(), [BusEvent::Redraw]));

    face.detach();
}
