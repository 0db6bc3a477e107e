//! The calibration → estimation → smoothing → alerting pipeline.
//!
//! `ProximityPipeline` owns every buffer the pipeline needs, so independent
//! instances never share state. It is a synchronous reducer: feeding the
//! same observations in the same order always yields the same events.
//! Callers must serialize access; observations are expected in temporal
//! order, one at a time.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use screenguard_common::{MonitorConfig, ScreenguardResult};

use crate::alert::{AlertStateMachine, AlertTransition, ProximityState};
use crate::calibration::{CalibrationStatus, Calibrator};
use crate::estimator::DistanceEstimator;
use crate::event::{EventSink, ProximityEvent};
use crate::observation::{validate_face_width, Observation};
use crate::smoother::MovingAverage;
use crate::status::{DistanceZone, MonitorStatus};

/// Counters describing what the pipeline has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Observations that passed validation and advanced the pipeline.
    pub accepted: u64,
    /// Observations rejected as invalid.
    pub rejected: u64,
    /// Frames reported without a face.
    pub no_face_frames: u64,
    /// Safe/TooClose transitions emitted.
    pub transitions: u64,
    /// Completed calibration runs.
    pub calibrations: u64,
}

/// Owned proximity pipeline.
#[derive(Debug, Clone)]
pub struct ProximityPipeline {
    config: MonitorConfig,
    calibrator: Calibrator,
    estimator: DistanceEstimator,
    smoother: MovingAverage,
    alert: AlertStateMachine,
    stats: PipelineStats,
}

impl ProximityPipeline {
    /// Create a pipeline after validating the configuration.
    pub fn new(config: MonitorConfig) -> ScreenguardResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create a pipeline with default configuration.
    pub fn with_defaults() -> Self {
        Self::build(MonitorConfig::default())
    }

    fn build(config: MonitorConfig) -> Self {
        Self {
            calibrator: Calibrator::new(config.calibration_sample_count),
            estimator: DistanceEstimator::from_config(&config),
            smoother: MovingAverage::new(config.smoothing_window_size),
            alert: AlertStateMachine::from_config(&config),
            stats: PipelineStats::default(),
            config,
        }
    }

    /// Process one raw face width and collect the resulting events.
    pub fn process(&mut self, raw: f64) -> ScreenguardResult<Vec<ProximityEvent>> {
        let mut events = Vec::with_capacity(2);
        self.process_into(raw, &mut events)?;
        Ok(events)
    }

    /// Process one raw face width, delivering events to `sink`.
    ///
    /// Invalid observations are rejected before any pipeline state changes.
    pub fn process_into<S>(&mut self, raw: f64, sink: &mut S) -> ScreenguardResult<()>
    where
        S: EventSink + ?Sized,
    {
        let raw = match validate_face_width(raw) {
            Ok(raw) => raw,
            Err(e) => {
                self.stats.rejected += 1;
                warn!("Rejected observation: {}", e);
                return Err(e);
            }
        };

        match self.calibrator.baseline() {
            Some(baseline) => self.track(raw, baseline, sink),
            None => self.calibrate(raw, sink)?,
        }

        self.stats.accepted += 1;
        Ok(())
    }

    /// Route a stamped observation; no-face frames do not advance anything.
    pub fn process_observation<S>(
        &mut self,
        observation: &Observation,
        sink: &mut S,
    ) -> ScreenguardResult<()>
    where
        S: EventSink + ?Sized,
    {
        match observation.face_width {
            Some(raw) => self.process_into(raw, sink),
            None => {
                self.on_no_face();
                Ok(())
            }
        }
    }

    /// A frame without a face. Calibration and smoothing state are kept.
    pub fn on_no_face(&mut self) {
        self.stats.no_face_frames += 1;
        trace!("No face in frame");
    }

    /// Discard the baseline and start a fresh calibration run.
    ///
    /// Smoothing history and proximity state belong to the old baseline and
    /// are cleared as well.
    pub fn recalibrate(&mut self) {
        self.calibrator = Calibrator::new(self.config.calibration_sample_count);
        self.smoother.reset();
        self.alert.reset();
        info!(
            "Recalibration requested; collecting {} samples",
            self.calibrator.needed()
        );
    }

    fn calibrate<S>(&mut self, raw: f64, sink: &mut S) -> ScreenguardResult<()>
    where
        S: EventSink + ?Sized,
    {
        match self.calibrator.observe(raw) {
            Ok(CalibrationStatus::Calibrating { collected, needed }) => {
                debug!("Calibration sample {}/{}: {:.4}", collected, needed, raw);
                sink.deliver(&ProximityEvent::CalibrationProgress { collected, needed });
            }
            Ok(CalibrationStatus::Complete { baseline }) => {
                self.stats.calibrations += 1;
                info!("Calibration complete. Baseline face size: {:.4}", baseline);
                sink.deliver(&ProximityEvent::CalibrationComplete { baseline });
            }
            Err(e) => {
                warn!("Calibration failed, restarting: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    fn track<S>(&mut self, raw: f64, baseline: f64, sink: &mut S)
    where
        S: EventSink + ?Sized,
    {
        let estimate = self.estimator.estimate(raw, baseline);
        let distance_cm = self.smoother.push(estimate);
        debug!(
            "Face width {:.4} -> estimate {:.1} cm, smoothed {:.1} cm",
            raw, estimate, distance_cm
        );

        sink.deliver(&ProximityEvent::DistanceUpdated { distance_cm });

        match self.alert.update(distance_cm) {
            AlertTransition::BecameTooClose => {
                self.stats.transitions += 1;
                warn!("User is too close: {:.1} cm", distance_cm);
                sink.deliver(&ProximityEvent::BecameTooClose { distance_cm });
            }
            AlertTransition::BecameSafe => {
                self.stats.transitions += 1;
                info!("User is at a safe distance: {:.1} cm", distance_cm);
                sink.deliver(&ProximityEvent::BecameSafe { distance_cm });
            }
            AlertTransition::Seeded(state) => {
                debug!("Proximity state seeded as {:?}", state);
            }
            AlertTransition::Unchanged(_) => {}
        }
    }

    /// Baseline face width, once calibrated.
    pub fn baseline(&self) -> Option<f64> {
        self.calibrator.baseline()
    }

    /// Latest smoothed distance, `None` before the first post-calibration sample.
    pub fn smoothed_distance(&self) -> Option<f64> {
        self.smoother.current()
    }

    /// Current proximity state, `None` until seeded.
    pub fn state(&self) -> Option<ProximityState> {
        self.alert.state()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_complete()
    }

    /// Snapshot for status displays.
    pub fn status(&self) -> MonitorStatus {
        let Some(baseline) = self.calibrator.baseline() else {
            return MonitorStatus::Calibrating {
                collected: self.calibrator.collected(),
                needed: self.calibrator.needed(),
            };
        };

        match (self.smoother.current(), self.alert.state()) {
            (Some(distance_cm), Some(state)) => MonitorStatus::Monitoring {
                distance_cm,
                state,
                zone: DistanceZone::classify(
                    distance_cm,
                    state,
                    self.config.comfortable_distance_cm,
                ),
            },
            _ => MonitorStatus::Calibrated { baseline },
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
