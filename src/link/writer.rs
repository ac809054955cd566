//! Serial writer task.
//!
//! Runs on a dedicated thread and drains the outbound channel into a
//! blocking [`ActuatorLink`].  Write failures and timeouts are logged and
//! the payload is dropped; the frame loop re-sends on its own if the
//! command is still current.

use futures_lite::future::block_on;
use log::{info, warn};

use super::channels::{Outbound, OutboundChannel};
use super::transport::ActuatorLink;

/// Counters reported when the writer exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub written: u32,
    pub failed: u32,
    pub dropped: u32,
}

/// Drain `channel` into `link` until [`Outbound::Shutdown`] arrives.
pub fn run_writer<L: ActuatorLink>(channel: &OutboundChannel, link: &mut L) -> WriterStats {
    let mut stats = WriterStats::default();
    info!("writer: started");

    loop {
        match block_on(channel.receive()) {
            Outbound::Command(payload) => {
                if !link.is_ready() {
                    stats.dropped += 1;
                    continue;
                }
                match link.write(&payload) {
                    Ok(()) => stats.written += 1,
                    Err(e) => {
                        stats.failed += 1;
                        warn!("writer: {} byte payload not delivered: {}", payload.len(), e);
                    }
                }
            }
            Outbound::Shutdown => break,
        }
    }

    info!(
        "writer: stopped (written={} failed={} dropped={})",
        stats.written, stats.failed, stats.dropped
    );
    stats
}
