//! Session start/stop, host commands and the queued link end to end.

use autorc::adapters::io_link::IoLink;
use autorc::adapters::queued_link::QueuedLink;
use autorc::app::commands::AppCommand;
use autorc::app::events::AppEvent;
use autorc::config::{TrackingColor, WireFormat};
use autorc::control::actuator::Direction;
use autorc::error::LinkError;
use autorc::link::channels::OutboundChannel;
use autorc::link::codec::decode;
use autorc::link::writer::run_writer;
use autorc::{ControlConfig, Delivery, Error, TrackerService};

use super::mock_link::{
    FORWARD_RIGHT, NEUTRAL, REVERSE_RIGHT, RecordingLink, RecordingSink, blob, started,
};

#[test]
fn stop_forces_final_neutral_and_deactivates() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    link.take();

    let delivery = app.stop(&mut link, &mut sink);
    assert_eq!(delivery, Delivery::Sent { writes: 1 });
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);
    assert!(!app.is_active());
    assert_eq!(app.direction(), Direction::Neutral);
    assert!(app.target().is_none());
    assert_eq!(sink.events.last(), Some(&AppEvent::Stopped));

    let report = app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(report.delivery, Delivery::Inactive);
    assert!(link.writes.is_empty());
}

#[test]
fn stop_sends_neutral_even_when_already_neutral() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(960.0, 540.0)], &mut link, &mut sink);
    link.take();
    app.stop(&mut link, &mut sink);
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);
}

#[test]
fn stop_on_disconnected_link_still_resets() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 900.0)], &mut link, &mut sink);
    let mut gone = RecordingLink::disconnected();
    assert_eq!(
        app.stop(&mut gone, &mut sink),
        Delivery::Dropped(LinkError::Unavailable)
    );
    assert!(!app.is_reversing());
}

#[test]
fn failed_final_neutral_is_reported_and_counted() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    link.fail_write(0, LinkError::WriteFailed);

    assert_eq!(
        app.stop(&mut link, &mut sink),
        Delivery::Dropped(LinkError::WriteFailed)
    );
    assert_eq!(link.take(), vec![FORWARD_RIGHT.to_vec()]);
    let t = app.telemetry();
    assert_eq!(t.link_failures, 1);
    assert_eq!(t.payloads_sent, 1);
    assert!(!t.session_active);
}

#[test]
fn restart_begins_clean() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 900.0)], &mut link, &mut sink);
    app.stop(&mut link, &mut sink);
    link.take();

    app.start(1920, 1080, &mut sink).unwrap();
    app.process_frame(&[blob(1200.0, 900.0)], &mut link, &mut sink);
    assert_eq!(
        link.take(),
        vec![REVERSE_RIGHT.to_vec(), NEUTRAL.to_vec(), REVERSE_RIGHT.to_vec()],
        "reversal primed again after restart"
    );
}

#[test]
fn emergency_stop_sends_neutral_and_drops_target() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    link.take();

    app.handle_command(AppCommand::EmergencyStop, &mut link, &mut sink);
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);
    assert!(app.target().is_none());
    assert!(sink.events.contains(&AppEvent::TargetLost));
    assert!(app.is_active(), "session keeps running");
}

#[test]
fn emergency_stop_without_session_still_sends_neutral() {
    let mut app = TrackerService::new(ControlConfig::default()).unwrap();
    let mut link = RecordingLink::new();
    let mut sink = RecordingSink::new();

    app.handle_command(AppCommand::EmergencyStop, &mut link, &mut sink);
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::CommandSent { primed: false, .. })),
        1
    );
    assert!(!app.is_active());
}

#[test]
fn emergency_stop_on_disconnected_link_reports_drop() {
    let (mut app, _, mut sink) = started();
    let mut gone = RecordingLink::disconnected();
    app.handle_command(AppCommand::EmergencyStop, &mut gone, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::CommandDropped(LinkError::Unavailable))
    );

    // Neutral goes out once the port comes back.
    let mut link = RecordingLink::new();
    let empty: [autorc::vision::Blob; 0] = [];
    app.process_frame(&empty, &mut link, &mut sink);
    assert_eq!(link.take(), vec![NEUTRAL.to_vec()]);
}

#[test]
fn invalid_config_update_is_rejected() {
    let (mut app, mut link, mut sink) = started();
    let bad = ControlConfig {
        forward_boundary_percent: -0.5,
        ..ControlConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(bad), &mut link, &mut sink);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::ConfigRejected(Error::Config(_)))
    ));
    assert_eq!(app.config(), &ControlConfig::default());
}

#[test]
fn wire_format_change_resends_current_command() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    assert_eq!(link.take(), vec![FORWARD_RIGHT.to_vec()]);

    let binary = ControlConfig {
        wire_format: WireFormat::PostcardCobs,
        ..ControlConfig::default()
    };
    app.handle_command(AppCommand::UpdateConfig(binary), &mut link, &mut sink);
    assert_eq!(sink.events.last(), Some(&AppEvent::ConfigApplied));

    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    let writes = link.take();
    assert_eq!(writes.len(), 1);
    let frame = decode(WireFormat::PostcardCobs, &writes[0]).unwrap();
    assert_eq!((frame.steering, frame.throttle), (1600, 1580));
}

#[test]
fn tracking_color_switch_keeps_control_state() {
    let (mut app, mut link, mut sink) = started();
    app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
    app.handle_command(
        AppCommand::SetTrackingColor(TrackingColor::Purple),
        &mut link,
        &mut sink,
    );
    assert_eq!(app.hsv_range().lower, [160, 50, 90]);
    assert_eq!(app.direction(), Direction::Forward);
}

#[test]
fn queued_link_delivers_priming_burst_through_writer() {
    let channel = OutboundChannel::new();

    let port = std::thread::scope(|s| {
        let writer = s.spawn(|| {
            let mut port = IoLink::new(Vec::new());
            run_writer(&channel, &mut port);
            port.disconnect().unwrap_or_default()
        });

        let (mut app, _, mut sink) = started();
        let mut link = QueuedLink::new(&channel);
        app.process_frame(&[blob(1200.0, 900.0)], &mut link, &mut sink);
        link.close();
        writer.join().unwrap()
    });

    let mut expected = Vec::new();
    expected.extend_from_slice(REVERSE_RIGHT);
    expected.extend_from_slice(NEUTRAL);
    expected.extend_from_slice(REVERSE_RIGHT);
    assert_eq!(port, expected);
}
