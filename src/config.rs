//! Control configuration parameters
//!
//! All tunable parameters for the vision-to-actuator loop.
//! The host supplies these at session start and may hot-swap them via
//! [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest and highest pulse width a hobby servo / ESC accepts (µs).
pub const SERVO_MIN_US: u16 = 500;
pub const SERVO_MAX_US: u16 = 2500;

/// Core control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    // --- Detection ---
    /// Contours at or below this pixel area are ignored
    pub min_contour_area: f64,
    /// Colour profile handed to the upstream segmenter
    pub tracking_color: TrackingColor,

    // --- Boundaries (fraction of frame dimension) ---
    /// Dead-zone / forward trigger line
    pub forward_boundary_percent: f64,
    /// Offset past which the target is too close and the car backs up
    pub reverse_boundary_percent: f64,

    // --- Debounce ---
    /// Consecutive misses tolerated before the target is dropped
    pub miss_count_threshold: u32,

    // --- Controller tuning ---
    /// Steering per unit of normalised horizontal offset
    pub steering_gain: f32,
    /// Throttle magnitude when driving forward (0-1]
    pub forward_throttle: f32,
    /// Throttle magnitude when reversing (0-1]
    pub reverse_throttle: f32,
    /// Counter-steer while reversing so the nose keeps swinging toward the target
    pub invert_steering_in_reverse: bool,

    // --- Output ---
    pub pwm: PwmCalibration,
    pub wire_format: WireFormat,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            // Detection
            min_contour_area: 1500.0,
            tracking_color: TrackingColor::Green,

            // Boundaries
            forward_boundary_percent: -0.03,
            reverse_boundary_percent: 0.20,

            // Debounce: current miss + 2 more
            miss_count_threshold: 2,

            // Controller
            steering_gain: 2.0,
            forward_throttle: 0.2,
            reverse_throttle: 0.2,
            invert_steering_in_reverse: true,

            // Output
            pwm: PwmCalibration::default(),
            wire_format: WireFormat::Json,
        }
    }
}

impl ControlConfig {
    /// Parse a JSON document and validate it.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.  Nothing is clamped: a bad calibration
    /// must never reach the actuator.
    pub fn validate(&self) -> Result<()> {
        if !self.min_contour_area.is_finite() || self.min_contour_area < 0.0 {
            return Err(Error::Config("min_contour_area must be a non-negative number"));
        }
        if !self.forward_boundary_percent.is_finite() || !self.reverse_boundary_percent.is_finite()
        {
            return Err(Error::Config("boundary percentages must be finite"));
        }
        if self.reverse_boundary_percent.abs() <= self.forward_boundary_percent.abs() {
            return Err(Error::Config(
                "reverse boundary must be larger in magnitude than forward boundary",
            ));
        }
        if self.reverse_boundary_percent.abs() >= 0.5 {
            return Err(Error::Config("reverse boundary must lie inside the frame"));
        }
        if !self.steering_gain.is_finite() || self.steering_gain <= 0.0 {
            return Err(Error::Config("steering_gain must be positive"));
        }
        for throttle in [self.forward_throttle, self.reverse_throttle] {
            if !throttle.is_finite() || throttle <= 0.0 || throttle > 1.0 {
                return Err(Error::Config("throttle magnitudes must lie in (0, 1]"));
            }
        }
        self.pwm.validate()
    }

    /// Boundary pair in the shape the controller consumes.
    pub fn boundaries(&self) -> Boundaries {
        Boundaries {
            forward_percent: self.forward_boundary_percent,
            reverse_percent: self.reverse_boundary_percent,
        }
    }
}

/// The two calibration lines, as fractions of the frame dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub forward_percent: f64,
    pub reverse_percent: f64,
}

// ---------------------------------------------------------------------------
// PWM calibration
// ---------------------------------------------------------------------------

/// Pulse widths in microseconds for the actuator board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PwmCalibration {
    /// Centred steering / stopped motor
    pub neutral_us: u16,
    /// Pulse delta at full steering lock
    pub steering_span_us: u16,
    /// Pulse delta at full throttle
    pub throttle_span_us: u16,
}

impl Default for PwmCalibration {
    fn default() -> Self {
        Self {
            neutral_us: 1500,
            steering_span_us: 400,
            throttle_span_us: 400,
        }
    }
}

impl PwmCalibration {
    pub fn validate(&self) -> Result<()> {
        if self.steering_span_us == 0 || self.throttle_span_us == 0 {
            return Err(Error::Config("PWM spans must be non-zero"));
        }
        let widest = self.steering_span_us.max(self.throttle_span_us);
        let low = self.neutral_us.checked_sub(widest);
        let high = self.neutral_us.checked_add(widest);
        match (low, high) {
            (Some(lo), Some(hi)) if lo >= SERVO_MIN_US && hi <= SERVO_MAX_US => Ok(()),
            _ => Err(Error::Config("PWM range exceeds the 500-2500us servo window")),
        }
    }

    /// Map a normalised value in [-1, 1] onto a pulse width.
    pub fn pulse(&self, value: f32, span_us: u16) -> u16 {
        let delta = (value.clamp(-1.0, 1.0) * f32::from(span_us)).round();
        (f32::from(self.neutral_us) + delta) as u16
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Encoding of outbound command frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WireFormat {
    /// Newline-terminated JSON object.
    #[default]
    Json,
    /// postcard-encoded frame wrapped in COBS, zero-terminated.
    PostcardCobs,
}

// ---------------------------------------------------------------------------
// Tracking colour profiles
// ---------------------------------------------------------------------------

/// HSV threshold bounds for the upstream colour segmenter (full-range hue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingColor {
    #[default]
    Green,
    Purple,
    Orange,
}

impl TrackingColor {
    /// Settings stores keep the profile as an integer; unknown values fall
    /// back to green.
    pub fn from_index(idx: u32) -> Self {
        match idx {
            1 => Self::Purple,
            2 => Self::Orange,
            _ => Self::Green,
        }
    }

    pub fn hsv_range(self) -> HsvRange {
        match self {
            Self::Green => HsvRange {
                lower: [60, 100, 30],
                upper: [130, 255, 255],
            },
            Self::Purple => HsvRange {
                lower: [160, 50, 90],
                upper: [255, 255, 255],
            },
            Self::Orange => HsvRange {
                lower: [1, 50, 150],
                upper: [60, 255, 255],
            },
        }
    }
}
