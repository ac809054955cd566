//! Outbound command channel.
//!
//! Uses an `embassy-sync` bounded channel to bridge the frame-processing
//! loop and the serial writer thread without heap allocation.
//!
//! ```text
//! ┌──────────────┐   Outbound   ┌───────────────┐
//! │ Frame loop   │─────────────▶│ Writer thread │──▶ serial
//! │ (try_send)   │              │ (blocking)    │
//! └──────────────┘              └───────────────┘
//! ```
//!
//! The frame loop never waits on the channel: a full queue drops the
//! command, so a stalled port can never hold up frame capture.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use super::codec::Payload;

/// Message from the frame loop to the writer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Encoded command, ready to write to the transport.
    Command(Payload),
    /// Stop the writer after everything queued before it.
    Shutdown,
}

/// Channel depth.  Holds one neutral-priming burst (three payloads) plus
/// one follow-up command.
pub const OUTBOUND_DEPTH: usize = 4;

pub type OutboundChannel = Channel<CriticalSectionRawMutex, Outbound, OUTBOUND_DEPTH>;

/// Process-wide outbound channel for hosts with a single actuator board.
pub static OUTBOUND_CHANNEL: OutboundChannel = Channel::new();
