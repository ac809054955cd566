//! Target tracking with loss debounce.
//!
//! Single-frame detection dropouts (motion blur, lighting flicker) are
//! common.  The tracker keeps the last observation through short gaps and
//! only declares the target lost once more than `miss_threshold`
//! consecutive frames came back empty.
//!
//! ## Lifecycle
//!
//! 1. A present observation is stored and the miss counter resets to 0.
//! 2. Each absent observation increments the counter; while it stays at or
//!    below the threshold the previous command is held ([`TrackingUpdate::Coasting`]).
//! 3. The miss that pushes the counter past the threshold clears the target
//!    and reports [`TrackingUpdate::Lost`] exactly once.
//! 4. Further misses with no target report [`TrackingUpdate::Searching`].

use log::{debug, info};

use crate::vision::TargetObservation;

/// Outcome of feeding one frame's observation to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingUpdate {
    /// A target was seen this frame.
    Tracking(TargetObservation),
    /// Target missing, still within the debounce window.
    Coasting { misses: u32 },
    /// Target dropped this frame; the controller must reset.
    Lost,
    /// No target held and none seen.
    Searching,
}

/// Latest target plus consecutive-miss counter.
#[derive(Debug, Clone)]
pub struct TrackingState {
    last_target: Option<TargetObservation>,
    miss_count: u32,
    miss_threshold: u32,
}

impl TrackingState {
    pub fn new(miss_threshold: u32) -> Self {
        Self {
            last_target: None,
            miss_count: 0,
            miss_threshold,
        }
    }

    pub fn set_miss_threshold(&mut self, miss_threshold: u32) {
        self.miss_threshold = miss_threshold;
    }

    /// Feed one frame's observation.  Non-finite observations count as misses.
    pub fn observe(&mut self, obs: Option<TargetObservation>) -> TrackingUpdate {
        if let Some(obs) = obs.filter(TargetObservation::is_valid) {
            if self.last_target.is_none() {
                info!(
                    "target acquired at ({:.0}, {:.0}) area={:.0}",
                    obs.center.x, obs.center.y, obs.area
                );
            }
            self.last_target = Some(obs);
            self.miss_count = 0;
            return TrackingUpdate::Tracking(obs);
        }

        if self.last_target.is_none() {
            return TrackingUpdate::Searching;
        }

        self.miss_count += 1;
        if self.miss_count > self.miss_threshold {
            info!("target lost after {} consecutive misses", self.miss_count);
            self.reset();
            TrackingUpdate::Lost
        } else {
            debug!("target missing ({}/{})", self.miss_count, self.miss_threshold);
            TrackingUpdate::Coasting {
                misses: self.miss_count,
            }
        }
    }

    /// Forget the target and the miss counter.
    pub fn reset(&mut self) {
        self.last_target = None;
        self.miss_count = 0;
    }

    pub fn last_target(&self) -> Option<TargetObservation> {
        self.last_target
    }

    pub fn miss_count(&self) -> u32 {
        self.miss_count
    }

    pub fn has_target(&self) -> bool {
        self.last_target.is_some()
    }
}
