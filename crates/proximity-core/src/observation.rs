//! Face-width observations delivered by the detection collaborator.
//!
//! Observations are exchanged as JSON lines. Each line carries a monotonic
//! timestamp and, when exactly one face was found in the frame, the face's
//! width as a fraction of the frame width:
//!
//! ```text
//! {"t":33000000,"face_width":0.21}
//! {"t":66000000}
//! ```
//!
//! A missing or null `face_width` is a no-face frame. Bare numeric lines
//! (`0.21`) are accepted as well for hand-written traces.

use serde::{Deserialize, Serialize};

use screenguard_common::{ScreenguardError, ScreenguardResult};

/// Monotonic timestamp in nanoseconds since monitoring start.
pub type TimestampNs = u64;

/// A single frame's detection result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Monotonic nanoseconds since monitoring start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Face width as a fraction of frame width, `None` when no face was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_width: Option<f64>,
}

impl Observation {
    /// A frame in which one face was detected.
    pub fn face(timestamp_ns: TimestampNs, face_width: f64) -> Self {
        Self {
            timestamp_ns,
            face_width: Some(face_width),
        }
    }

    /// A frame without a usable face.
    pub fn no_face(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            face_width: None,
        }
    }
}

/// Check that a raw value is a finite fraction in `(0, 1]`.
pub fn validate_face_width(raw: f64) -> ScreenguardResult<f64> {
    if raw.is_finite() && raw > 0.0 && raw <= 1.0 {
        Ok(raw)
    } else {
        Err(ScreenguardError::invalid_observation(raw))
    }
}

/// Parse one line of an observation trace.
///
/// Returns `Ok(None)` for blank and `#` comment lines. Bare numeric lines
/// are stamped with `default_timestamp_ns`. Range is not checked here;
/// the pipeline rejects out-of-range values itself.
pub fn parse_observation_line(
    line: &str,
    default_timestamp_ns: TimestampNs,
) -> ScreenguardResult<Option<Observation>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        let observation: Observation = serde_json::from_str(line)?;
        return Ok(Some(observation));
    }

    let value: f64 = line.parse().map_err(|_| {
        ScreenguardError::processing(format!("Unparseable observation line: {line:?}"))
    })?;
    Ok(Some(Observation::face(default_timestamp_ns, value)))
}

/// Parse observations from trace content.
///
/// Bare numeric lines are stamped with their zero-based line index, or with
/// the previous observation's timestamp when that is later, so a bare line
/// never sorts before the JSON line above it.
pub fn parse_observations(content: &str) -> ScreenguardResult<Vec<Observation>> {
    let mut observations: Vec<Observation> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let index = index as TimestampNs;
        let stamp = observations
            .last()
            .map_or(index, |previous| previous.timestamp_ns.max(index));
        if let Some(observation) = parse_observation_line(line, stamp)? {
            observations.push(observation);
        }
    }
    Ok(observations)
}

/// Serialize observations to JSONL format.
pub fn serialize_observations(observations: &[Observation]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for observation in observations {
        output.push_str(&serde_json::to_string(observation)?);
        output.push('\n');
    }
    Ok(output)
}
