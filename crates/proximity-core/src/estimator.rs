//! Face-width to distance conversion.
//!
//! Uses an inverse-proportion model: for a fixed focal length the face's
//! width in frame scales as `1 / distance`, so
//! `distance = reference_distance * baseline / raw`.

use screenguard_common::MonitorConfig;

/// Distance reported when the formula degenerates (`raw -> 0`, overflow,
/// NaN). Large enough to never be a real reading, small enough that a
/// smoothing window full of it still sums to a finite value.
pub const SATURATED_DISTANCE_CM: f64 = 1.0e300;

/// Stateless distance estimator.
#[derive(Debug, Clone, Copy)]
pub struct DistanceEstimator {
    reference_distance_cm: f64,
}

impl DistanceEstimator {
    pub fn new(reference_distance_cm: f64) -> Self {
        Self {
            reference_distance_cm,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.reference_distance_cm)
    }

    /// Estimate distance in centimeters.
    ///
    /// Ordinary inputs follow the formula exactly. A vanishing, negative or
    /// NaN face width, or a ratio that overflows past
    /// `SATURATED_DISTANCE_CM`, returns `SATURATED_DISTANCE_CM` instead of
    /// infinity or NaN, which would poison the moving average.
    pub fn estimate(&self, raw: f64, baseline: f64) -> f64 {
        if raw.is_nan() || raw <= 0.0 {
            return SATURATED_DISTANCE_CM;
        }

        let distance = self.reference_distance_cm * (baseline / raw);
        if distance.is_finite() && distance <= SATURATED_DISTANCE_CM {
            distance
        } else {
            SATURATED_DISTANCE_CM
        }
    }

    pub fn reference_distance_cm(&self) -> f64 {
        self.reference_distance_cm
    }
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}
