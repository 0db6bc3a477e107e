//! Outbound events and the sinks that receive them.
//!
//! The pipeline produces typed events; delivering them onto a UI thread or
//! any other execution context is the consumer's job. A sink is handed to
//! each `process_into` call, so no callback is stored inside the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc::Sender;

/// Event emitted while processing an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProximityEvent {
    /// A calibration sample was accepted; the run is not finished yet.
    CalibrationProgress { collected: usize, needed: usize },

    /// Calibration finished on this sample with the given baseline width.
    CalibrationComplete { baseline: f64 },

    /// New smoothed distance, delivered for every post-calibration observation.
    DistanceUpdated { distance_cm: f64 },

    /// Smoothed distance dropped below the safe threshold.
    BecameTooClose { distance_cm: f64 },

    /// Smoothed distance recovered to a safe value.
    BecameSafe { distance_cm: f64 },
}

impl ProximityEvent {
    /// Smoothed distance carried by the event, if any.
    pub fn distance_cm(&self) -> Option<f64> {
        match self {
            Self::DistanceUpdated { distance_cm }
            | Self::BecameTooClose { distance_cm }
            | Self::BecameSafe { distance_cm } => Some(*distance_cm),
            _ => None,
        }
    }

    /// Whether the event marks a Safe/TooClose state change.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::BecameTooClose { .. } | Self::BecameSafe { .. })
    }
}

impl fmt::Display for ProximityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalibrationProgress { collected, needed } => {
                write!(f, "Calibrating ({collected}/{needed})")
            }
            Self::CalibrationComplete { baseline } => {
                write!(f, "Calibration complete. Baseline face size: {baseline:.4}")
            }
            Self::DistanceUpdated { distance_cm } => write!(f, "Distance: {distance_cm:.1} cm"),
            Self::BecameTooClose { distance_cm } => {
                write!(f, "Too close! {distance_cm:.1} cm, please move back")
            }
            Self::BecameSafe { distance_cm } => {
                write!(f, "Safe distance restored: {distance_cm:.1} cm")
            }
        }
    }
}

/// Receiver of pipeline events.
pub trait EventSink {
    fn deliver(&mut self, event: &ProximityEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&ProximityEvent),
{
    fn deliver(&mut self, event: &ProximityEvent) {
        self(event)
    }
}

impl EventSink for Vec<ProximityEvent> {
    fn deliver(&mut self, event: &ProximityEvent) {
        self.push(event.clone());
    }
}

/// Sending fails only once the receiver is gone; the event is dropped.
impl EventSink for Sender<ProximityEvent> {
    fn deliver(&mut self, event: &ProximityEvent) {
        if self.send(event.clone()).is_err() {
            tracing::trace!("Event receiver dropped, discarding {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format_is_tagged() {
        let json = serde_json::to_string(&ProximityEvent::BecameTooClose { distance_cm: 30.0 })
            .unwrap();
        assert!(json.contains("\"type\":\"became_too_close\""));
        assert!(json.contains("\"distance_cm\":30.0"));

        let json = serde_json::to_string(&ProximityEvent::CalibrationProgress {
            collected: 3,
            needed: 30,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"calibration_progress","collected":3,"needed":30}"#
        );
    }

    #[test]
    fn test_distance_extraction() {
        assert_eq!(
            ProximityEvent::DistanceUpdated { distance_cm: 42.0 }.distance_cm(),
            Some(42.0)
        );
        assert_eq!(
            ProximityEvent::CalibrationComplete { baseline: 0.2 }.distance_cm(),
            None
        );
    }

    #[test]
    fn test_transition_flag() {
        assert!(ProximityEvent::BecameSafe { distance_cm: 55.0 }.is_transition());
        assert!(!ProximityEvent::DistanceUpdated { distance_cm: 55.0 }.is_transition());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProximityEvent::DistanceUpdated { distance_cm: 61.24 }.to_string(),
            "Distance: 61.2 cm"
        );
        assert_eq!(
            ProximityEvent::BecameTooClose { distance_cm: 30.0 }.to_string(),
            "Too close! 30.0 cm, please move back"
        );
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = 0;
        {
            let mut sink = |_: &ProximityEvent| seen += 1;
            sink.deliver(&ProximityEvent::DistanceUpdated { distance_cm: 1.0 });
            sink.deliver(&ProximityEvent::DistanceUpdated { distance_cm: 2.0 });
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_channel_sink() {
        let (mut tx, rx) = std::sync::mpsc::channel();
        tx.deliver(&ProximityEvent::BecameSafe { distance_cm: 60.0 });
        assert_eq!(
            rx.recv().unwrap(),
            ProximityEvent::BecameSafe { distance_cm: 60.0 }
        );

        drop(rx);
        tx.deliver(&ProximityEvent::BecameSafe { distance_cm: 61.0 });
    }
}
