//! Vision-side data model.
//!
//! The colour segmenter runs upstream on the host and hands this crate a
//! set of candidate regions per frame.  Everything here is geometry on
//! those regions; no pixel data is touched.

pub mod contour;
pub mod detector;

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Fixed reference point of the session: the centre of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCenter(Point2D);

impl ScreenCenter {
    /// `None` for degenerate frame sizes.
    pub fn from_frame(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self(Point2D::new(
            f64::from(width) / 2.0,
            f64::from(height) / 2.0,
        )))
    }

    pub fn point(&self) -> Point2D {
        self.0
    }

    pub fn frame_width(&self) -> f64 {
        self.0.x * 2.0
    }

    pub fn frame_height(&self) -> f64 {
        self.0.y * 2.0
    }
}

/// The largest qualifying region of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetObservation {
    pub center: Point2D,
    /// Pixel area of the contour the center was taken from.
    pub area: f64,
}

impl TargetObservation {
    /// Usable as a steering input: finite coordinates and a finite area.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.area.is_finite()
    }
}

/// A candidate region produced by the upstream segmenter.
pub trait Region {
    /// Pixel area of the region.
    fn area(&self) -> f64;
    /// Point the controller should steer toward.
    fn center(&self) -> Point2D;
}

/// A pre-reduced region: the host already knows centre and area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub center: Point2D,
    pub area: f64,
}

impl Blob {
    pub const fn new(x: f64, y: f64, area: f64) -> Self {
        Self {
            center: Point2D::new(x, y),
            area,
        }
    }
}

impl Region for Blob {
    fn area(&self) -> f64 {
        self.area
    }

    fn center(&self) -> Point2D {
        self.center
    }
}
