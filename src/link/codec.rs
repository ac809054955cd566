//! Command frame codec.
//!
//! Wire format (`WireFormat::Json`, default):
//! ```text
//! {"steering":1600,"throttle":1580}\n
//! ```
//! Wire format (`WireFormat::PostcardCobs`):
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ COBS(postcard(u16, u16))     │ 0x00 │
//! └──────────────────────────────┴──────┘
//! ```
//!
//! Values are pulse widths in microseconds.  Quantising to whole
//! microseconds makes byte equality of two payloads a reliable "same
//! command" test, which the transmit sequencer relies on.

use serde::{Deserialize, Serialize};

use crate::config::{PwmCalibration, WireFormat};
use crate::control::actuator::ActuatorCommand;
use crate::error::EncodeError;

/// Largest encoded frame.
pub const MAX_PAYLOAD: usize = 64;

/// One encoded command, stack allocated.
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD>;

/// Pulse widths sent to the actuator board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwmFrame {
    pub steering: u16,
    pub throttle: u16,
}

/// Renders commands into wire payloads.
#[derive(Debug, Clone, Copy)]
pub struct CommandSerializer {
    calibration: PwmCalibration,
    format: WireFormat,
}

impl CommandSerializer {
    pub fn new(calibration: PwmCalibration, format: WireFormat) -> Self {
        Self {
            calibration,
            format,
        }
    }

    /// Pulse widths for `cmd`.
    pub fn frame(&self, cmd: &ActuatorCommand) -> PwmFrame {
        PwmFrame {
            steering: self
                .calibration
                .pulse(cmd.steering, self.calibration.steering_span_us),
            throttle: self
                .calibration
                .pulse(cmd.throttle, self.calibration.throttle_span_us),
        }
    }

    /// Encode `cmd` for the wire.
    pub fn encode(&self, cmd: &ActuatorCommand) -> Result<Payload, EncodeError> {
        self.encode_frame(&self.frame(cmd))
    }

    /// The fixed neutral payload, independent of controller state.
    pub fn neutral(&self) -> Result<Payload, EncodeError> {
        self.encode(&ActuatorCommand::NEUTRAL)
    }

    pub fn encode_frame(&self, frame: &PwmFrame) -> Result<Payload, EncodeError> {
        match self.format {
            WireFormat::Json => {
                let json = serde_json::to_vec(frame).map_err(|_| EncodeError::Serialize)?;
                let mut out = Payload::new();
                out.extend_from_slice(&json)
                    .map_err(|_| EncodeError::BufferOverflow)?;
                out.push(b'\n').map_err(|_| EncodeError::BufferOverflow)?;
                Ok(out)
            }
            WireFormat::PostcardCobs => {
                let mut buf = [0u8; MAX_PAYLOAD];
                let used = postcard::to_slice_cobs(frame, &mut buf).map_err(|e| match e {
                    postcard::Error::SerializeBufferFull => EncodeError::BufferOverflow,
                    _ => EncodeError::Serialize,
                })?;
                Payload::from_slice(used).map_err(|_| EncodeError::BufferOverflow)
            }
        }
    }
}

/// Decode a payload produced by [`CommandSerializer::encode`].
///
/// This is the board side of the protocol; the crate uses it for loopback
/// checks and tests.
pub fn decode(format: WireFormat, bytes: &[u8]) -> Option<PwmFrame> {
    match format {
        WireFormat::Json => {
            let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
            serde_json::from_slice(body).ok()
        }
        WireFormat::PostcardCobs => {
            let mut buf = Payload::from_slice(bytes).ok()?;
            postcard::from_bytes_cobs(&mut buf).ok()
        }
    }
}
