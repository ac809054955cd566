//! AutoRC control core.
//!
//! Turns colour-segmented camera frames into steering/throttle commands for
//! a serial motor board:
//!
//! ```text
//! regions ─▶ TargetDetector ─▶ TrackingState ─▶ ActuatorController
//!                                                     │
//!          ActuatorLink ◀─ Sequencer ◀─ CommandSerializer
//! ```
//!
//! Camera capture, colour segmentation and device enumeration belong to the
//! host; this crate consumes their output and an open byte sink.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod link;
pub mod tracking;
pub mod vision;

pub use app::service::{Delivery, FrameReport, TrackerService};
pub use config::ControlConfig;
pub use error::{Error, Result};
