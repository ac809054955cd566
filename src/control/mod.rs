//! Control laws.
//!
//! [`actuator`] maps the tracked target's position relative to the frame
//! centre onto normalised steering and throttle commands.

pub mod actuator;
