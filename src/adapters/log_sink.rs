//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (logcat on the phone host, stderr on a bench rig).
//! A UI overlay or telemetry socket would implement the same trait.

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }

    /// One-line rendering of a telemetry snapshot.
    pub fn log_telemetry(&self, t: &TelemetryData) {
        info!(
            "TELEM | active={} | target={} | miss={} | dir={:?} steer={:+.2} throttle={:+.2} | \
             frames={} skipped={} sent={} link_fail={}",
            t.session_active,
            t.target.map_or_else(
                || "none".to_owned(),
                |o| format!("({:.0},{:.0})/{:.0}", o.center.x, o.center.y, o.area)
            ),
            t.miss_count,
            t.direction,
            t.steering,
            t.throttle,
            t.frames_processed,
            t.frames_skipped,
            t.payloads_sent,
            t.link_failures,
        );
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { width, height } => {
                info!("START | frame={}x{}", width, height);
            }
            AppEvent::Stopped => {
                info!("STOP | neutral forced");
            }
            AppEvent::TargetAcquired(obs) => {
                info!(
                    "TARGET | acquired at ({:.0},{:.0}) area={:.0}",
                    obs.center.x, obs.center.y, obs.area
                );
            }
            AppEvent::TargetLost => {
                info!("TARGET | lost");
            }
            AppEvent::DirectionChanged { from, to } => {
                info!("DIR | {:?} -> {:?}", from, to);
            }
            AppEvent::CommandSent { frame, primed } => {
                info!(
                    "PWM | steering={}us throttle={}us{}",
                    frame.steering,
                    frame.throttle,
                    if *primed { " (neutral primed)" } else { "" }
                );
            }
            AppEvent::CommandDropped(e) => {
                warn!("PWM | dropped: {}", e);
            }
            AppEvent::EncodeFailed(e) => {
                warn!("PWM | not encoded: {}", e);
            }
            AppEvent::ConfigRejected(e) => {
                warn!("CONFIG | rejected: {}", e);
            }
            AppEvent::ConfigApplied => {
                info!("CONFIG | applied");
            }
        }
    }
}
