//! Outbound application events.
//!
//! The [`TrackerService`](super::service::TrackerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::control::actuator::Direction;
use crate::error::{Error, LinkError};
use crate::link::PwmFrame;
use crate::vision::{Point2D, TargetObservation};

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A capture session started with the given frame size.
    Started { width: u32, height: u32 },

    /// The capture session stopped; the car was put in neutral.
    Stopped,

    /// A target appeared after a period without one.
    TargetAcquired(TargetObservation),

    /// The target was missing for longer than the debounce window.
    TargetLost,

    /// The command direction changed.
    DirectionChanged { from: Direction, to: Direction },

    /// A command reached the link.  `primed` marks a neutral-primed
    /// reversal (payload, neutral, payload).
    CommandSent { frame: PwmFrame, primed: bool },

    /// A command could not be delivered; it will be re-evaluated next frame.
    CommandDropped(LinkError),

    /// A command could not be encoded; nothing was sent.
    EncodeFailed(Error),

    /// A configuration update failed validation and was ignored.
    ConfigRejected(Error),

    /// A configuration update was applied.
    ConfigApplied,
}

/// A point-in-time snapshot suitable for logging or an on-screen overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub session_active: bool,
    pub screen_center: Option<Point2D>,
    pub target: Option<TargetObservation>,
    pub miss_count: u32,
    pub direction: Direction,
    pub steering: f32,
    pub throttle: f32,
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub payloads_sent: u64,
    pub link_failures: u64,
}
