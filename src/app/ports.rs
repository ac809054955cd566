//! Port traits: the hexagonal boundary between the control loop and the host.
//!
//! ```text
//!   Host detector ──▶ TrackerService ──▶ ActuatorLink
//!                          │
//!                          ╰──▶ EventSink
//! ```
//!
//! The outbound transport port lives in [`crate::link::transport`]; this
//! module holds the observability port.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The control loop emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (log, UI overlay, telemetry socket).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &AppEvent) {
        (**self).emit(event);
    }
}
