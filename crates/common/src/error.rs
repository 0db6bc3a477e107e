//! Error types shared across ScreenGuard crates.

use std::path::PathBuf;

/// Top-level error type for ScreenGuard operations.
#[derive(Debug, thiserror::Error)]
pub enum ScreenguardError {
    /// A raw face-width observation outside `(0, 1]` or not finite.
    #[error("Invalid observation: {value} is not a face-width fraction in (0, 1]")]
    InvalidObservation { value: f64 },

    /// Calibration produced a baseline that would blow up the estimator.
    #[error("Degenerate baseline: calibration mean {mean} is not positive")]
    DegenerateBaseline { mean: f64 },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ScreenguardError.
pub type ScreenguardResult<T> = Result<T, ScreenguardError>;

impl ScreenguardError {
    pub fn invalid_observation(value: f64) -> Self {
        Self::InvalidObservation { value }
    }

    pub fn degenerate_baseline(mean: f64) -> Self {
        Self::DegenerateBaseline { mean }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the error rejected an input without touching pipeline state.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidObservation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_observation_message_names_value() {
        let err = ScreenguardError::invalid_observation(1.5);
        assert!(err.to_string().contains("1.5"));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_degenerate_baseline_is_not_a_rejection() {
        let err = ScreenguardError::degenerate_baseline(0.0);
        assert!(!err.is_rejection());
        assert!(err.to_string().starts_with("Degenerate baseline"));
    }
}
