//! Synthetic observation traces.
//!
//! Builds deterministic face-width sequences for demos and regression tests:
//! a list of phases (hold, ramp, absent) sampled at a fixed frame interval,
//! with optional multiplicative jitter drawn from a fixed pattern so that
//! every run produces identical traces.

use crate::observation::Observation;

/// Relative jitter applied frame by frame, cycled.
const JITTER_PATTERN: [f64; 7] = [0.0, 0.6, -0.4, 1.0, -1.0, 0.3, -0.5];

/// One segment of a synthetic trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TracePhase {
    /// Constant face width.
    Hold { face_width: f64, frames: usize },
    /// Linear change of face width; both endpoints are included.
    Ramp { from: f64, to: f64, frames: usize },
    /// Frames without a detected face.
    Absent { frames: usize },
}

/// Builder for synthetic traces.
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    phases: Vec<TracePhase>,
    frame_interval_ns: u64,
    jitter: f64,
}

impl TraceBuilder {
    /// Start an empty trace sampled every `frame_interval_ns`.
    pub fn new(frame_interval_ns: u64) -> Self {
        Self {
            phases: Vec::new(),
            frame_interval_ns,
            jitter: 0.0,
        }
    }

    /// A user calibrating at `baseline`, leaning in to `close`, then
    /// returning. Widths are face-width fractions.
    pub fn approach_and_retreat(
        baseline: f64,
        close: f64,
        calibration_frames: usize,
        frame_interval_ns: u64,
    ) -> Self {
        Self::new(frame_interval_ns)
            .hold(baseline, calibration_frames)
            .hold(baseline, 10)
            .ramp(baseline, close, 15)
            .hold(close, 20)
            .absent(5)
            .ramp(close, baseline, 15)
            .hold(baseline, 20)
    }

    pub fn hold(mut self, face_width: f64, frames: usize) -> Self {
        self.phases.push(TracePhase::Hold { face_width, frames });
        self
    }

    pub fn ramp(mut self, from: f64, to: f64, frames: usize) -> Self {
        self.phases.push(TracePhase::Ramp { from, to, frames });
        self
    }

    pub fn absent(mut self, frames: usize) -> Self {
        self.phases.push(TracePhase::Absent { frames });
        self
    }

    /// Relative jitter amplitude, e.g. `0.02` for ±2%.
    pub fn jitter(mut self, amplitude: f64) -> Self {
        self.jitter = amplitude.max(0.0);
        self
    }

    /// Total number of frames.
    pub fn len(&self) -> usize {
        self.phases
            .iter()
            .map(|phase| match phase {
                TracePhase::Hold { frames, .. }
                | TracePhase::Ramp { frames, .. }
                | TracePhase::Absent { frames } => *frames,
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the trace. Widths are kept inside `(0, 1]`.
    pub fn build(&self) -> Vec<Observation> {
        let mut observations = Vec::with_capacity(self.len());

        for phase in &self.phases {
            match *phase {
                TracePhase::Hold { face_width, frames } => {
                    for _ in 0..frames {
                        self.push_face(&mut observations, face_width);
                    }
                }
                TracePhase::Ramp { from, to, frames } => {
                    for i in 0..frames {
                        let t = if frames > 1 {
                            i as f64 / (frames - 1) as f64
                        } else {
                            1.0
                        };
                        self.push_face(&mut observations, from + (to - from) * t);
                    }
                }
                TracePhase::Absent { frames } => {
                    for _ in 0..frames {
                        let timestamp_ns = self.timestamp_of(observations.len());
                        observations.push(Observation::no_face(timestamp_ns));
                    }
                }
            }
        }

        observations
    }

    fn push_face(&self, observations: &mut Vec<Observation>, face_width: f64) {
        let index = observations.len();
        let offset = JITTER_PATTERN[index % JITTER_PATTERN.len()];
        let width = (face_width * (1.0 + self.jitter * offset)).clamp(f64::MIN_POSITIVE, 1.0);
        observations.push(Observation::face(self.timestamp_of(index), width));
    }

    fn timestamp_of(&self, index: usize) -> u64 {
        index as u64 * self.frame_interval_ns
    }
}
