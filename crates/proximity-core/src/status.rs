//! Snapshot of the pipeline for status displays.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::alert::ProximityState;

/// Coarse description of where the user sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceZone {
    /// The alert state machine reports `TooClose`.
    TooClose,
    /// Safe, up to and including the comfortable distance.
    Acceptable,
    /// Beyond the comfortable distance.
    Comfortable,
}

impl DistanceZone {
    /// Zone for a smoothed distance. The too-close zone follows the alert
    /// state, so a hysteresis band never shows `TooClose` next to a safe zone.
    pub fn classify(distance_cm: f64, state: ProximityState, comfortable_cm: f64) -> Self {
        if state == ProximityState::TooClose {
            Self::TooClose
        } else if distance_cm <= comfortable_cm {
            Self::Acceptable
        } else {
            Self::Comfortable
        }
    }
}

/// What the pipeline can currently report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MonitorStatus {
    /// Baseline not established yet.
    Calibrating { collected: usize, needed: usize },
    /// Calibrated, but no distance has been smoothed yet.
    Calibrated { baseline: f64 },
    /// Live distance readings are available.
    Monitoring {
        distance_cm: f64,
        state: ProximityState,
        zone: DistanceZone,
    },
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calibrating { collected, needed } => {
                write!(f, "Calibrating ({collected}/{needed})")
            }
            Self::Calibrated { .. } => write!(f, "Distance: measuring..."),
            Self::Monitoring { distance_cm, .. } => write!(f, "Distance: {distance_cm:.1} cm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(
            DistanceZone::classify(49.9, ProximityState::TooClose, 80.0),
            DistanceZone::TooClose
        );
        assert_eq!(
            DistanceZone::classify(50.0, ProximityState::Safe, 80.0),
            DistanceZone::Acceptable
        );
        assert_eq!(
            DistanceZone::classify(80.0, ProximityState::Safe, 80.0),
            DistanceZone::Acceptable
        );
        assert_eq!(
            DistanceZone::classify(80.1, ProximityState::Safe, 80.0),
            DistanceZone::Comfortable
        );
    }

    #[test]
    fn test_zone_follows_state_inside_hysteresis_band() {
        assert_eq!(
            DistanceZone::classify(52.0, ProximityState::TooClose, 80.0),
            DistanceZone::TooClose
        );
    }

    #[test]
    fn test_status_line() {
        let calibrating = MonitorStatus::Calibrating {
            collected: 12,
            needed: 30,
        };
        assert_eq!(calibrating.to_string(), "Calibrating (12/30)");

        let monitoring = MonitorStatus::Monitoring {
            distance_cm: 43.21,
            state: ProximityState::TooClose,
            zone: DistanceZone::TooClose,
        };
        assert_eq!(monitoring.to_string(), "Distance: 43.2 cm");
    }
}
