//! Outbound path to the actuator board.
//!
//! ```text
//! ActuatorCommand ──▶ codec ──▶ Payload ──▶ ActuatorLink ──▶ serial
//!                                         ╰─▶ channels ──▶ writer thread
//! ```
//!
//! The control loop only ever talks to an [`ActuatorLink`]; whether the
//! bytes go straight to a port or through the bounded outbound channel is
//! an adapter decision.

pub mod channels;
pub mod codec;
pub mod transport;
pub mod writer;

pub use codec::{CommandSerializer, MAX_PAYLOAD, Payload, PwmFrame};
pub use transport::{ActuatorLink, NullLink};
