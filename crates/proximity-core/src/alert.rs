//! Safe / TooClose alert state machine.
//!
//! The state is unknown until the first smoothed distance arrives. A first
//! reading at a safe distance seeds `Safe` silently; a first reading that is
//! already too close reports `BecameTooClose`, as if the user had started
//! out safe. After that, every update compares the new distance against the
//! thresholds and reports whether the state changed.
//!
//! With a single threshold (the default) entering and leaving `TooClose`
//! use the same cutoff: `TooClose` holds iff `distance < min_safe`. A noisy
//! signal sitting right at the cutoff will flap. Configuring a separate
//! exit threshold turns this into a hysteresis band: `TooClose` is entered
//! below `min_safe` and left only at or above `exit`.

use serde::{Deserialize, Serialize};

use screenguard_common::MonitorConfig;

/// Binary proximity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityState {
    Safe,
    TooClose,
}

/// Result of feeding one smoothed distance to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTransition {
    /// First value was safe; the state was initialized without a transition.
    Seeded(ProximityState),
    /// State did not change.
    Unchanged(ProximityState),
    /// Safe -> TooClose.
    BecameTooClose,
    /// TooClose -> Safe.
    BecameSafe,
}

impl AlertTransition {
    /// State after the update.
    pub fn state(&self) -> ProximityState {
        match self {
            Self::Seeded(state) | Self::Unchanged(state) => *state,
            Self::BecameTooClose => ProximityState::TooClose,
            Self::BecameSafe => ProximityState::Safe,
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, Self::BecameTooClose | Self::BecameSafe)
    }
}

/// Proximity state machine over smoothed distances.
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    enter_below_cm: f64,
    exit_at_or_above_cm: f64,
    state: Option<ProximityState>,
}

impl AlertStateMachine {
    /// Single-threshold machine.
    pub fn new(min_safe_distance_cm: f64) -> Self {
        Self::with_hysteresis(min_safe_distance_cm, min_safe_distance_cm)
    }

    /// Two-threshold machine. `exit_cm` below `enter_cm` is raised to `enter_cm`.
    pub fn with_hysteresis(enter_cm: f64, exit_cm: f64) -> Self {
        Self {
            enter_below_cm: enter_cm,
            exit_at_or_above_cm: exit_cm.max(enter_cm),
            state: None,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::with_hysteresis(config.min_safe_distance_cm, config.exit_threshold_cm())
    }

    /// Feed a smoothed distance.
    pub fn update(&mut self, distance_cm: f64) -> AlertTransition {
        let Some(previous) = self.state else {
            if distance_cm < self.enter_below_cm {
                self.state = Some(ProximityState::TooClose);
                return AlertTransition::BecameTooClose;
            }
            self.state = Some(ProximityState::Safe);
            return AlertTransition::Seeded(ProximityState::Safe);
        };

        let next = match previous {
            ProximityState::Safe if distance_cm < self.enter_below_cm => ProximityState::TooClose,
            ProximityState::TooClose if distance_cm >= self.exit_at_or_above_cm => {
                ProximityState::Safe
            }
            unchanged => unchanged,
        };
        self.state = Some(next);

        match (previous, next) {
            (ProximityState::Safe, ProximityState::TooClose) => AlertTransition::BecameTooClose,
            (ProximityState::TooClose, ProximityState::Safe) => AlertTransition::BecameSafe,
            _ => AlertTransition::Unchanged(next),
        }
    }

    /// Current state, `None` until the first update.
    pub fn state(&self) -> Option<ProximityState> {
        self.state
    }

    /// Forget the current state; the next update seeds again.
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn enter_threshold_cm(&self) -> f64 {
        self.enter_below_cm
    }

    pub fn exit_threshold_cm(&self) -> f64 {
        self.exit_at_or_above_cm
    }
}
