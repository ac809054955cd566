//! Inbound commands to the tracker service.
//!
//! These represent actions requested by the host (settings screen,
//! operator UI, watchdog) that the [`TrackerService`](super::service::TrackerService)
//! interprets and acts upon.

use crate::config::{ControlConfig, TrackingColor};

/// Commands that the host can send into the control core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Hot-swap the configuration.  Rejected if it fails validation.
    UpdateConfig(ControlConfig),

    /// Switch the colour profile handed to the upstream segmenter.
    SetTrackingColor(TrackingColor),

    /// Drop the target and put the car in neutral immediately.
    EmergencyStop,
}
