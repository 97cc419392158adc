//! Distance and unlock state derived from walk progress.
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_DISTANCE_METERS, PROGRESS_MAX};
use crate::numbers::{clamp_progress, round_f64_to_u32};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Whole meters left to walk, never negative.
    pub distance_remaining: u32,
    pub reward_unlocked: bool,
}

#[must_use]
pub fn derive_metrics(progress: f64) -> DerivedMetrics {
    derive_metrics_with(progress, BASE_DISTANCE_METERS)
}

/// Same as [`derive_metrics`] for a configured base distance.
#[must_use]
pub fn derive_metrics_with(progress: f64, base_distance_m: f64) -> DerivedMetrics {
    let progress = clamp_progress(progress);
    let remaining = (base_distance_m * (1.0 - progress / PROGRESS_MAX)).max(0.0);
    DerivedMetrics {
        distance_remaining: round_f64_to_u32(remaining),
        reward_unlocked: progress >= PROGRESS_MAX,
    }
}
