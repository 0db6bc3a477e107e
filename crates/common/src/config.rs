//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ScreenguardError, ScreenguardResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Proximity pipeline parameters.
    pub monitor: MonitorConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Parameters for calibration, estimation, smoothing, and alerting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Number of raw observations averaged into the baseline.
    pub calibration_sample_count: usize,

    /// Assumed distance (cm) at which calibration happens.
    pub reference_distance_cm: f64,

    /// Moving-average window over distance estimates.
    pub smoothing_window_size: usize,

    /// Smoothed distances strictly below this are "too close".
    pub min_safe_distance_cm: f64,

    /// Optional exit threshold for the too-close state.
    ///
    /// `None` uses `min_safe_distance_cm` for both directions, which flaps
    /// when the signal hovers at the cutoff. When set, leaving `TooClose`
    /// requires a smoothed distance at or above this value.
    pub safe_exit_distance_cm: Option<f64>,

    /// Upper bound of the "acceptable" zone; farther is comfortable.
    /// Informational only, never used for alerting.
    pub comfortable_distance_cm: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "screenguard=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            calibration_sample_count: 30,
            reference_distance_cm: 60.0,
            smoothing_window_size: 5,
            min_safe_distance_cm: 50.0,
            safe_exit_distance_cm: None,
            comfortable_distance_cm: 80.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl MonitorConfig {
    /// Check that every parameter is usable by the pipeline.
    pub fn validate(&self) -> ScreenguardResult<()> {
        if self.calibration_sample_count == 0 {
            return Err(ScreenguardError::config(
                "calibration_sample_count must be at least 1",
            ));
        }
        if self.smoothing_window_size == 0 {
            return Err(ScreenguardError::config(
                "smoothing_window_size must be at least 1",
            ));
        }

        let distances = [
            ("reference_distance_cm", self.reference_distance_cm),
            ("min_safe_distance_cm", self.min_safe_distance_cm),
            ("comfortable_distance_cm", self.comfortable_distance_cm),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScreenguardError::config(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }

        if let Some(exit) = self.safe_exit_distance_cm {
            if !exit.is_finite() || exit < self.min_safe_distance_cm {
                return Err(ScreenguardError::config(format!(
                    "safe_exit_distance_cm ({exit}) must be finite and >= min_safe_distance_cm ({})",
                    self.min_safe_distance_cm
                )));
            }
        }

        Ok(())
    }

    /// Distance at which `TooClose` is left.
    pub fn exit_threshold_cm(&self) -> f64 {
        self.safe_exit_distance_cm.unwrap_or(self.min_safe_distance_cm)
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> ScreenguardResult<Self> {
        if !path.exists() {
            return Err(ScreenguardError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.monitor.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> ScreenguardResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config as pretty JSON to an explicit path.
    pub fn save_to(&self, path: &Path) -> ScreenguardResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("screenguard").join("config.json")
}
