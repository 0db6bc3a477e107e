//! ScreenGuard Proximity Core
//!
//! Turns a noisy stream of normalized face-width observations into a
//! stable distance estimate and a debounced proximity alert:
//! - **Calibration:** Average an initial run of observations into a baseline
//! - **Estimation:** Inverse-proportion distance from baseline / current width
//! - **Smoothing:** Fixed-window moving average over distance estimates
//! - **Alerting:** Safe / TooClose state machine emitting transition events
//!
//! This crate is pure computation with no I/O. Observations go in,
//! events come out, deterministically.

pub mod alert;
pub mod calibration;
pub mod estimator;
pub mod event;
pub mod observation;
pub mod pipeline;
pub mod smoother;
pub mod status;
pub mod trace;

pub use alert::{AlertStateMachine, AlertTransition, ProximityState};
pub use calibration::{CalibrationStatus, Calibrator};
pub use estimator::DistanceEstimator;
pub use event::{EventSink, ProximityEvent};
pub use observation::Observation;
pub use pipeline::{PipelineStats, ProximityPipeline};
pub use smoother::MovingAverage;
pub use status::{DistanceZone, MonitorStatus};
pub use trace::TraceBuilder;
