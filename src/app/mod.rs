//! Application core: the per-frame control loop, zero I/O.
//!
//! This module contains the rules that turn detections into actuator
//! traffic: target tracking, command generation and transmission
//! sequencing.  All interaction with the outside world happens through
//! [`ActuatorLink`](crate::link::ActuatorLink) and the port traits in
//! [`ports`], keeping this layer fully testable without a serial device.

pub mod commands;
pub mod events;
pub mod gate;
pub mod ports;
pub mod sequencer;
pub mod service;
