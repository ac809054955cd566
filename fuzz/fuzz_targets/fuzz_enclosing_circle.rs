//! Fuzz target: `vision::contour::min_enclosing_circle`
//!
//! Interprets the input as little-endian `i16` coordinate pairs and checks
//! that the circle covers every point.
//!
//! cargo fuzz run fuzz_enclosing_circle

#![no_main]

use autorc::vision::Point2D;
use autorc::vision::contour::min_enclosing_circle;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let points: Vec<Point2D> = data
        .chunks_exact(4)
        .map(|c| {
            let x = i16::from_le_bytes([c[0], c[1]]);
            let y = i16::from_le_bytes([c[2], c[3]]);
            Point2D::new(f64::from(x), f64::from(y))
        })
        .collect();

    match min_enclosing_circle(&points) {
        None => assert!(points.is_empty()),
        Some(circle) => {
            let slack = 1e-6 * circle.radius.max(1.0);
            for p in &points {
                assert!(circle.center.distance(p) <= circle.radius + slack);
            }
        }
    }
});
