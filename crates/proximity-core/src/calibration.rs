//! Baseline calibration.
//!
//! Collects the first `sample_count` raw face widths and averages them into
//! the baseline: the face width observed while the user sits at the
//! reference distance. Calibration is one-shot; re-baselining means
//! building a new `Calibrator`.

use screenguard_common::{ScreenguardError, ScreenguardResult};

/// Outcome of feeding one sample to the calibrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    /// More samples are needed.
    Calibrating { collected: usize, needed: usize },
    /// The run finished; `baseline` is the mean of all samples.
    Complete { baseline: f64 },
}

/// Accumulates raw observations into a baseline face width.
#[derive(Debug, Clone)]
pub struct Calibrator {
    samples: Vec<f64>,
    sample_count: usize,
    baseline: Option<f64>,
}

impl Calibrator {
    /// Create a calibrator that averages `sample_count` observations.
    ///
    /// A count of zero is treated as one.
    pub fn new(sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        Self {
            samples: Vec::with_capacity(sample_count),
            sample_count,
            baseline: None,
        }
    }

    /// Feed one raw observation.
    ///
    /// Returns `Complete` exactly on the sample that fills the run. Once
    /// complete, further samples are ignored and the same `Complete` is
    /// returned. A mean that is not strictly positive fails with
    /// `DegenerateBaseline` and discards the run so calibration starts over.
    pub fn observe(&mut self, raw: f64) -> ScreenguardResult<CalibrationStatus> {
        if let Some(baseline) = self.baseline {
            return Ok(CalibrationStatus::Complete { baseline });
        }

        self.samples.push(raw);
        if self.samples.len() < self.sample_count {
            return Ok(CalibrationStatus::Calibrating {
                collected: self.samples.len(),
                needed: self.sample_count,
            });
        }

        let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        if !(mean.is_finite() && mean > 0.0) {
            self.samples.clear();
            return Err(ScreenguardError::degenerate_baseline(mean));
        }

        self.baseline = Some(mean);
        Ok(CalibrationStatus::Complete { baseline: mean })
    }

    /// Baseline once calibration is complete.
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    pub fn is_complete(&self) -> bool {
        self.baseline.is_some()
    }

    /// Samples accepted into the current run.
    pub fn collected(&self) -> usize {
        self.samples.len()
    }

    /// Samples required to finish a run.
    pub fn needed(&self) -> usize {
        self.sample_count
    }
}
