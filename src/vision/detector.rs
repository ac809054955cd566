//! Largest-region target selection.

use log::debug;

use super::{Region, TargetObservation};

/// Reduces a frame's candidate regions to the single tracked target.
#[derive(Debug, Clone, Copy)]
pub struct TargetDetector {
    min_area: f64,
}

impl TargetDetector {
    pub fn new(min_area: f64) -> Self {
        Self { min_area }
    }

    pub fn set_min_area(&mut self, min_area: f64) {
        self.min_area = min_area;
    }

    /// Pick the region with maximum area, provided it exceeds the minimum.
    ///
    /// Ties go to the region seen first.  Regions with non-finite geometry
    /// are skipped so a NaN can never become a steering input.
    pub fn detect<'a, R, I>(&self, regions: I) -> Option<TargetObservation>
    where
        R: Region + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut best: Option<TargetObservation> = None;
        let mut candidates = 0usize;

        for region in regions {
            candidates += 1;
            let area = region.area();
            if !area.is_finite() {
                continue;
            }
            if best.is_some_and(|b| area <= b.area) {
                continue;
            }
            let center = region.center();
            if !center.is_finite() {
                continue;
            }
            best = Some(TargetObservation { center, area });
        }

        let found = best.filter(|b| b.area > self.min_area);
        debug!(
            "detect: {} candidates, largest={:?}, accepted={}",
            candidates,
            best.map(|b| b.area),
            found.is_some()
        );
        found
    }
}
