//! The full hosted arrangement: a capture thread gated by `FrameGate`,
//! the process-wide outbound channel and a writer thread on the port.

use autorc::adapters::io_link::IoLink;
use autorc::adapters::log_sink::LogEventSink;
use autorc::adapters::queued_link::QueuedLink;
use autorc::app::gate::FrameGate;
use autorc::link::channels::OUTBOUND_CHANNEL;
use autorc::link::writer::run_writer;
use autorc::{ControlConfig, TrackerService};

use super::mock_link::{FORWARD_RIGHT, NEUTRAL, blob};

#[test]
fn capture_loop_drives_serial_port_through_writer() {
    let gate = FrameGate::new();

    let (port, stats) = std::thread::scope(|s| {
        let writer = s.spawn(|| {
            let mut port = IoLink::new(Vec::new());
            let stats = run_writer(&OUTBOUND_CHANNEL, &mut port);
            (port.disconnect().unwrap_or_default(), stats)
        });

        let mut app = TrackerService::new(ControlConfig::default()).unwrap();
        let mut sink = LogEventSink::new();
        let mut link = QueuedLink::new(&OUTBOUND_CHANNEL);
        app.start(1920, 1080, &mut sink).unwrap();

        for _ in 0..5 {
            let Some(_guard) = gate.try_enter() else {
                continue;
            };
            app.process_frame(&[blob(1200.0, 540.0)], &mut link, &mut sink);
        }
        {
            let _held = gate.try_enter();
            // A frame arriving mid-pass is refused outright.
            assert!(gate.try_enter().is_none());
        }

        app.stop(&mut link, &mut sink);
        link.close();
        writer.join().unwrap()
    });

    let mut expected = FORWARD_RIGHT.to_vec();
    expected.extend_from_slice(NEUTRAL);
    assert_eq!(port, expected);
    assert_eq!(stats.written, 2);
    assert_eq!(gate.dropped(), 1);
}
