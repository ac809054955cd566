//! Integration tests for detect → track → control → transmit.

use autorc::app::events::AppEvent;
use autorc::control::actuator::Direction;
use autorc::error::LinkError;
use autorc::tracking::TrackingUpdate;
use autorc::vision::contour::Contour;
use autorc::vision::{Blob, Point2D};
use autorc::Delivery;

use super::mock_link::{FORWARD_RIGHT, NEUTRAL, RecordingLink, blob, started};

#[test]
fn dead_center_sends_neutral_once() {
    let (mut app, mut link, mut sink) = started();

    let report = app.process_frame(&[blob(960.0, 540.0)], &mut link, &mut sink);
    assert_eq!(report.command.direction, Direction::Neutral);
    assert_eq!(report.command.steering, 0.0);
    assert_eq!(report.delivery, Delivery::Sent { writes: 1 });

    for _ in 0..5 {
        let report = app.process_frame(&[blob(960.0, 540.0)], &mut link, &mut sink);
        assert_eq!(report.delivery, Delivery::Unchanged);
    }
    assert_eq!(link.writes, vec![NEUTRAL.to_vec()]);
}

#[test]
fn drift_right_drives_forward_with_right_steer() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(960.0, 540.0)], &mut link, &mut sink);
    link.take();

    let report = app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(report.command.direction, Direction::Forward);
    assert!(report.command.steering > 0.0);
    assert_eq!(link.writes, vec![FORWARD_RIGHT.to_vec()]);
}

#[test]
fn small_contours_for_three_frames_send_neutral_once() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(link.take(), vec![FORWARD_RIGHT.to_vec()]);

    let small = [Blob::new(1200.0, 540.0, 1000.0)];
    let r1 = app.process_frame(&small, &mut link, &mut sink);
    let r2 = app.process_frame(&small, &mut link, &mut sink);
    assert_eq!(r1.update, Some(TrackingUpdate::Coasting { misses: 1 }));
    assert_eq!(r2.update, Some(TrackingUpdate::Coasting { misses: 2 }));
    assert_eq!(r2.command.direction, Direction::Forward, "command held while coasting");
    assert!(link.writes.is_empty());

    let r3 = app.process_frame(&small, &mut link, &mut sink);
    assert_eq!(r3.update, Some(TrackingUpdate::Lost));
    assert!(app.target().is_none());
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);

    for _ in 0..6 {
        app.process_frame(&small, &mut link, &mut sink);
    }
    assert!(link.writes.is_empty(), "neutral is not repeated while searching");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::TargetLost)), 1);
}

#[test]
fn single_frame_dropout_does_not_stop_the_car() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    let empty: [Blob; 0] = [];
    app.process_frame(&empty, &mut link, &mut sink);
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(link.writes, vec![FORWARD_RIGHT.to_vec()]);
}

#[test]
fn write_failure_is_retried_next_frame() {
    let (mut app, mut link, mut sink) = started();
    link.fail_write(0, LinkError::WriteFailed);

    let r1 = app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(r1.delivery, Delivery::Dropped(LinkError::WriteFailed));
    assert!(link.writes.is_empty());
    assert!(app.last_sent().is_none());

    let r2 = app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(r2.delivery, Delivery::Sent { writes: 1 });
    assert_eq!(link.writes, vec![FORWARD_RIGHT.to_vec()]);
    assert_eq!(app.telemetry().link_failures, 1);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::CommandDropped(LinkError::WriteFailed))),
        1
    );
}

#[test]
fn disconnected_link_drops_then_sends_current_command_on_connect() {
    let (mut app, _, mut sink) = started();
    let mut link = RecordingLink::disconnected();

    for _ in 0..3 {
        let r = app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
        assert_eq!(r.delivery, Delivery::Dropped(LinkError::Unavailable));
    }
    assert_eq!(app.telemetry().link_failures, 0, "unavailable is not a failure");

    link.ready = true;
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(link.writes, vec![FORWARD_RIGHT.to_vec()], "no backlog replayed");
}

#[test]
fn nan_regions_fail_safe_to_neutral() {
    let (mut app, mut link, mut sink) = started();
    let regions = [Blob::new(f64::NAN, f64::NAN, 9000.0)];
    let report = app.process_frame(&regions, &mut link, &mut sink);
    assert_eq!(report.update, Some(TrackingUpdate::Searching));
    assert_eq!(link.writes, vec![NEUTRAL.to_vec()]);
}

#[test]
fn observation_below_min_area_counts_as_miss() {
    let (mut app, mut link, mut sink) = started();
    let seen = autorc::vision::TargetObservation {
        center: Point2D::new(1200.0, 540.0),
        area: 4000.0,
    };
    app.process_observation(Some(seen), &mut link, &mut sink);
    let faint = autorc::vision::TargetObservation {
        area: 1500.0,
        ..seen
    };
    let r = app.process_observation(Some(faint), &mut link, &mut sink);
    assert_eq!(r.update, Some(TrackingUpdate::Coasting { misses: 1 }));
}

#[test]
fn contour_regions_drive_the_loop() {
    let (mut app, mut link, mut sink) = started();
    let square = |cx: f64, cy: f64, half: f64| {
        Contour::new(vec![
            Point2D::new(cx - half, cy - half),
            Point2D::new(cx + half, cy - half),
            Point2D::new(cx + half, cy + half),
            Point2D::new(cx - half, cy + half),
        ])
    };
    // 60x60 = 3600 px wins over 30x30 = 900 px.
    let regions = [square(300.0, 300.0, 15.0), square(1200.0, 540.0, 30.0)];
    let report = app.process_frame(&regions, &mut link, &mut sink);
    assert_eq!(report.command.direction, Direction::Forward);
    assert_eq!(link.writes, vec![FORWARD_RIGHT.to_vec()]);
}

#[test]
fn events_follow_target_lifecycle() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    let empty: [Blob; 0] = [];
    for _ in 0..3 {
        app.process_frame(&empty, &mut link, &mut sink);
    }

    let kinds: Vec<&AppEvent> = sink
        .events
        .iter()
        .filter(|e| !matches!(e, AppEvent::CommandSent { .. }))
        .collect();
    assert!(matches!(kinds[0], AppEvent::Started { width: 1920, height: 1080 }));
    assert!(matches!(kinds[1], AppEvent::TargetAcquired(_)));
    assert_eq!(
        kinds[2],
        &AppEvent::DirectionChanged {
            from: Direction::Neutral,
            to: Direction::Forward
        }
    );
    assert_eq!(kinds[3], &AppEvent::TargetLost);
    assert_eq!(
        kinds[4],
        &AppEvent::DirectionChanged {
            from: Direction::Forward,
            to: Direction::Neutral
        }
    );
}

#[test]
fn telemetry_counts_frames_and_payloads() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    app.process_frame(&[blob(1200.0, 900.0)], &mut link, &mut sink);

    let t = app.telemetry();
    assert!(t.session_active);
    assert_eq!(t.frames_processed, 3);
    assert_eq!(t.payloads_sent, 4, "one forward plus a primed reversal");
    assert_eq!(t.direction, Direction::Reverse);
    assert_eq!(t.miss_count, 0);
    assert_eq!(t.screen_center, Some(Point2D::new(960.0, 540.0)));
}
