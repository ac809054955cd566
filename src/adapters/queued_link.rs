//! Non-blocking link backed by the outbound channel.
//!
//! The frame loop writes into a bounded queue; a writer thread running
//! [`run_writer`](crate::link::writer::run_writer) owns the real port.
//! A stalled port fills the queue and further commands are dropped with
//! [`LinkError::QueueFull`] instead of blocking capture.

use futures_lite::future::block_on;
use log::{info, warn};

use crate::error::LinkError;
use crate::link::ActuatorLink;
use crate::link::Payload;
use crate::link::channels::{Outbound, OutboundChannel};

pub struct QueuedLink<'a> {
    channel: &'a OutboundChannel,
    open: bool,
}

impl<'a> QueuedLink<'a> {
    pub fn new(channel: &'a OutboundChannel) -> Self {
        Self {
            channel,
            open: true,
        }
    }

    /// Ask the writer to finish what is queued and exit.  Waits for room in
    /// the queue; call on teardown only.
    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            block_on(self.channel.send(Outbound::Shutdown));
            info!("link: outbound queue closed");
        }
    }
}

impl ActuatorLink for QueuedLink<'_> {
    fn is_ready(&self) -> bool {
        self.open
    }

    fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        if !self.open {
            return Err(LinkError::Unavailable);
        }
        let payload = Payload::from_slice(data).map_err(|_| LinkError::WriteFailed)?;
        self.channel
            .try_send(Outbound::Command(payload))
            .map_err(|_| {
                warn!("link: outbound queue full, dropping command");
                LinkError::QueueFull
            })
    }

    /// All or nothing: a burst that does not fit leaves the queue untouched.
    fn write_burst(&mut self, payloads: &[&[u8]]) -> Result<(), LinkError> {
        if !self.open {
            return Err(LinkError::Unavailable);
        }
        if self.channel.free_capacity() < payloads.len() {
            warn!(
                "link: {} free slots for a {} payload burst, dropping it",
                self.channel.free_capacity(),
                payloads.len()
            );
            return Err(LinkError::QueueFull);
        }
        payloads.iter().try_for_each(|p| self.write(p))
    }
}
