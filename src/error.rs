//! Unified error types for the control core.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! per-frame loop's error handling uniform.  All variants are `Copy` so they
//! can be carried inside [`AppEvent`](crate::app::events::AppEvent)s and
//! frame reports without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The actuator link rejected or could not carry a payload.
    Link(LinkError),
    /// A command could not be rendered into a wire payload.
    Encode(EncodeError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

/// Failures on the serial transport boundary.  All of them are recoverable:
/// the command is not marked as sent and the next frame re-evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The transport is not connected yet; the command is dropped.
    Unavailable,
    /// The transport reported an I/O failure.
    WriteFailed,
    /// The write did not complete within the transport's deadline.
    Timeout,
    /// The outbound queue is full; the command is dropped.
    QueueFull,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "transport unavailable"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::Timeout => write!(f, "write timed out"),
            Self::QueueFull => write!(f, "outbound queue full"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Encode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The rendered payload does not fit the fixed payload buffer.
    BufferOverflow,
    /// The serializer rejected the frame.
    Serialize,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferOverflow => write!(f, "payload buffer overflow"),
            Self::Serialize => write!(f, "serialization failed"),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
