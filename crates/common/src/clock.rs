//! Clock utilities for stamping face-width observations.
//!
//! Observations are anchored to a monotonic epoch recorded when monitoring
//! starts. The pipeline only relies on arrival order; timestamps exist so
//! that traces can be replayed and order violations can be detected at the
//! input boundary.

use std::time::Instant;

/// A monitoring clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment monitoring started).
#[derive(Debug, Clone)]
pub struct ObservationClock {
    /// The instant monitoring started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl ObservationClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since monitoring start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at monitoring start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Tracks the last accepted timestamp and flags out-of-order arrivals.
#[derive(Debug, Default)]
pub struct OrderGuard {
    last_ns: Option<u64>,
}

impl OrderGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records the timestamp if it does not go backwards.
    /// Equal timestamps are accepted.
    pub fn admit(&mut self, timestamp_ns: u64) -> bool {
        match self.last_ns {
            Some(last) if timestamp_ns < last => false,
            _ => {
                self.last_ns = Some(timestamp_ns);
                true
            }
        }
    }

    /// Last admitted timestamp.
    pub fn last_ns(&self) -> Option<u64> {
        self.last_ns
    }
}
