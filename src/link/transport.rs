//! Actuator link abstraction: any byte-oriented sink.
//!
//! Concrete implementations:
//! - [`IoLink`](crate::adapters::io_link::IoLink): USB/UART serial port or any `std::io::Write`
//! - [`QueuedLink`](crate::adapters::queued_link::QueuedLink): bounded channel drained by a
//!   writer thread
//! - [`NullLink`]: transport not connected
//!
//! The control loop is generic over `ActuatorLink`, so adding a new
//! transport requires zero changes to the control logic.

use crate::error::LinkError;

/// Byte-oriented outbound channel to the actuator board.
pub trait ActuatorLink {
    /// Whether the transport is connected.  Commands are dropped, not
    /// queued, while this is `false`.
    fn is_ready(&self) -> bool;

    /// Write one complete payload.  Partial writes are failures.
    fn write(&mut self, data: &[u8]) -> Result<(), LinkError>;

    /// Write several payloads back to back, stopping at the first failure.
    ///
    /// Links that can tell up front whether a whole burst fits override
    /// this to refuse it without writing any part of it.
    fn write_burst(&mut self, payloads: &[&[u8]]) -> Result<(), LinkError> {
        payloads.iter().try_for_each(|p| self.write(p))
    }
}

impl<L: ActuatorLink + ?Sized> ActuatorLink for &mut L {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), LinkError> {
        (**self).write(data)
    }

    fn write_burst(&mut self, payloads: &[&[u8]]) -> Result<(), LinkError> {
        (**self).write_burst(payloads)
    }
}

/// A link that is never connected.
/// Useful as a default before the serial device has been opened.
pub struct NullLink;

impl ActuatorLink for NullLink {
    fn is_ready(&self) -> bool {
        false
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), LinkError> {
        Err(LinkError::Unavailable)
    }
}
