//! `std::io::Write` link adapter.
//!
//! Wraps a serial port (or anything else that implements `Write`).  The
//! port is optional: until the host has opened the device the link reports
//! not-ready and the control loop drops commands instead of queuing them.
//!
//! Serial ports should be opened with a short write timeout; a timed-out
//! write surfaces as [`LinkError::Timeout`] and the command is dropped.

use std::io::{ErrorKind, Write};

use log::{info, warn};

use crate::error::LinkError;
use crate::link::ActuatorLink;

pub struct IoLink<W: Write> {
    port: Option<W>,
}

impl<W: Write> IoLink<W> {
    /// A link with no device attached yet.
    pub fn disconnected() -> Self {
        Self { port: None }
    }

    pub fn new(port: W) -> Self {
        Self { port: Some(port) }
    }

    /// Attach a freshly opened device.
    pub fn connect(&mut self, port: W) {
        info!("link: device attached");
        self.port = Some(port);
    }

    /// Detach the device, returning it.
    pub fn disconnect(&mut self) -> Option<W> {
        info!("link: device detached");
        self.port.take()
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.port.as_ref()
    }
}

impl<W: Write> ActuatorLink for IoLink<W> {
    fn is_ready(&self) -> bool {
        self.port.is_some()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let port = self.port.as_mut().ok_or(LinkError::Unavailable)?;
        port.write_all(data)
            .and_then(|()| port.flush())
            .map_err(|e| {
                warn!("link: write of {} bytes failed: {}", data.len(), e);
                match e.kind() {
                    ErrorKind::TimedOut | ErrorKind::WouldBlock => LinkError::Timeout,
                    _ => LinkError::WriteFailed,
                }
            })
    }
}
