//! Target-position to PWM command mapping.
//!
//! The controller is a pure recompute: each update derives a fresh
//! [`ActuatorCommand`] from the screen centre, the target centre and the
//! two calibration lines.  The only state it keeps is the current command.
//!
//! ```text
//!          lateral offset ──▶ steering (proportional, clamped)
//!
//!   approach  ▲ -rev ─────────────  Forward
//!   (y down)  │ -fwd ┌─────────┐
//!             │      │  dead   │    Forward outside the box
//!             │ +fwd └─────────┘
//!             ▼ +rev ─────────────  Reverse below this line
//! ```
//!
//! Offsets are normalised by the frame dimension along each axis, so the
//! boundaries read as fractions of the frame.  A target low in the frame
//! (positive approach offset past the reverse line) is close to the camera
//! and the car backs away from it.

use log::debug;

use crate::config::{Boundaries, ControlConfig};
use crate::vision::{Point2D, ScreenCenter};

/// Throttle direction of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Forward,
    #[default]
    Neutral,
    Reverse,
}

/// One actuator command, values normalised to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand {
    /// Negative steers left, positive steers right.
    pub steering: f32,
    /// Positive drives forward, negative reverses.
    pub throttle: f32,
    pub direction: Direction,
}

impl ActuatorCommand {
    /// Wheels centred, motor stopped.
    pub const NEUTRAL: Self = Self {
        steering: 0.0,
        throttle: 0.0,
        direction: Direction::Neutral,
    };
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Target offset from the screen centre as a fraction of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    /// Horizontal, positive to the right.
    pub lateral: f64,
    /// Vertical, positive toward the bottom of the frame.
    pub approach: f64,
}

impl Offset {
    pub fn between(screen: &ScreenCenter, target: Point2D) -> Self {
        let center = screen.point();
        Self {
            lateral: (target.x - center.x) / screen.frame_width(),
            approach: (target.y - center.y) / screen.frame_height(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lateral.is_finite() && self.approach.is_finite()
    }

    /// Throttle direction for this offset.
    pub fn direction(&self, boundaries: Boundaries) -> Direction {
        let forward = boundaries.forward_percent.abs();
        let reverse = boundaries.reverse_percent.abs();
        if self.approach > reverse {
            Direction::Reverse
        } else if self.lateral.abs() <= forward && self.approach.abs() <= forward {
            Direction::Neutral
        } else {
            Direction::Forward
        }
    }
}

/// Gains and throttle magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerTuning {
    pub steering_gain: f32,
    pub forward_throttle: f32,
    pub reverse_throttle: f32,
    pub invert_steering_in_reverse: bool,
}

impl From<&ControlConfig> for ControllerTuning {
    fn from(config: &ControlConfig) -> Self {
        Self {
            steering_gain: config.steering_gain,
            forward_throttle: config.forward_throttle,
            reverse_throttle: config.reverse_throttle,
            invert_steering_in_reverse: config.invert_steering_in_reverse,
        }
    }
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self::from(&ControlConfig::default())
    }
}

/// Forward / Neutral / Reverse command generator.
pub struct ActuatorController {
    tuning: ControllerTuning,
    command: ActuatorCommand,
}

impl ActuatorController {
    pub fn new(tuning: ControllerTuning) -> Self {
        Self {
            tuning,
            command: ActuatorCommand::NEUTRAL,
        }
    }

    pub fn set_tuning(&mut self, tuning: ControllerTuning) {
        self.tuning = tuning;
    }

    /// Recompute the command from the current target.
    ///
    /// `None` or a non-finite target resets to neutral.
    pub fn update_target_pwm(
        &mut self,
        screen: &ScreenCenter,
        target: Option<Point2D>,
        boundaries: Boundaries,
    ) -> ActuatorCommand {
        let Some(offset) = target
            .map(|t| Offset::between(screen, t))
            .filter(Offset::is_finite)
        else {
            self.reset();
            return self.command;
        };

        let direction = offset.direction(boundaries);
        let mut steering = (offset.lateral as f32 * self.tuning.steering_gain).clamp(-1.0, 1.0);
        let throttle = match direction {
            Direction::Forward => self.tuning.forward_throttle,
            Direction::Neutral => 0.0,
            Direction::Reverse => {
                if self.tuning.invert_steering_in_reverse {
                    steering = -steering;
                }
                -self.tuning.reverse_throttle
            }
        };

        self.command = ActuatorCommand {
            steering,
            throttle,
            direction,
        };
        debug!(
            "controller: offset=({:.3}, {:.3}) -> {:?}",
            offset.lateral, offset.approach, self.command
        );
        self.command
    }

    /// Neutral, zero steering.  Idempotent.
    pub fn reset(&mut self) {
        self.command = ActuatorCommand::NEUTRAL;
    }

    pub fn command(&self) -> ActuatorCommand {
        self.command
    }

    pub fn direction(&self) -> Direction {
        self.command.direction
    }

    pub fn is_reversing(&self) -> bool {
        self.command.direction == Direction::Reverse
    }
}
