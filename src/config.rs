// Loop timing and steering tunables
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

// Control loop frequency
pub const LOOP_HZ: u64 = 50;

// Joystick input timeout for the watchdog
pub const INPUT_TIMEOUT: Duration = Duration::from_millis(250);

// Nominal tunable ranges; values outside clamp to the nearest bound
const MAX_SPEED_BOUNDS: (f64, f64) = (0.1, 1.0);
const SENSITIVITY_BOUNDS: (f64, f64) = (0.1, 2.0);
const DEAD_ZONE_BOUNDS: (f64, f64) = (0.0, 0.2);

const DEFAULT_MAX_SPEED: f64 = 1.0;
const DEFAULT_SENSITIVITY: f64 = 1.0;
const DEFAULT_DEAD_ZONE: f64 = 0.1;

/// Error loading tunables from a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Steering tunables, owned by the caller and re-read on every transform call
///
/// Construction clamps every field to its nominal range, so a config in hand
/// is always valid and the transform never has to check it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct SteeringConfig {
    max_speed_multiplier: f64,
    steering_sensitivity: f64,
    dead_zone: f64,
}

// On-disk shape; missing fields fall back to the defaults
#[derive(Deserialize)]
struct ConfigFile {
    max_speed_multiplier: Option<f64>,
    steering_sensitivity: Option<f64>,
    dead_zone: Option<f64>,
}

impl From<ConfigFile> for SteeringConfig {
    fn from(file: ConfigFile) -> Self {
        Self::new(
            file.max_speed_multiplier.unwrap_or(DEFAULT_MAX_SPEED),
            file.steering_sensitivity.unwrap_or(DEFAULT_SENSITIVITY),
            file.dead_zone.unwrap_or(DEFAULT_DEAD_ZONE),
        )
    }
}

impl SteeringConfig {
    pub fn new(max_speed_multiplier: f64, steering_sensitivity: f64, dead_zone: f64) -> Self {
        Self {
            max_speed_multiplier: clamp_tunable(
                max_speed_multiplier,
                DEFAULT_MAX_SPEED,
                MAX_SPEED_BOUNDS,
            ),
            steering_sensitivity: clamp_tunable(
                steering_sensitivity,
                DEFAULT_SENSITIVITY,
                SENSITIVITY_BOUNDS,
            ),
            dead_zone: clamp_tunable(dead_zone, DEFAULT_DEAD_ZONE, DEAD_ZONE_BOUNDS),
        }
    }

    /// Load tunables from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply optional per-field overrides, re-clamping each to its range
    pub fn with_overrides(
        self,
        max_speed_multiplier: Option<f64>,
        steering_sensitivity: Option<f64>,
        dead_zone: Option<f64>,
    ) -> Self {
        Self::new(
            max_speed_multiplier.unwrap_or(self.max_speed_multiplier),
            steering_sensitivity.unwrap_or(self.steering_sensitivity),
            dead_zone.unwrap_or(self.dead_zone),
        )
    }

    /// Global speed ceiling, 0.1..=1.0
    pub fn max_speed_multiplier(&self) -> f64 {
        self.max_speed_multiplier
    }

    /// Turn-rate gain, 0.1..=2.0
    pub fn steering_sensitivity(&self) -> f64 {
        self.steering_sensitivity
    }

    /// Minimum stick deflection before any output is produced, 0.0..=0.2
    pub fn dead_zone(&self) -> f64 {
        self.dead_zone
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed_multiplier: DEFAULT_MAX_SPEED,
            steering_sensitivity: DEFAULT_SENSITIVITY,
            dead_zone: DEFAULT_DEAD_ZONE,
        }
    }
}

// Non-finite values have no nearest bound, so they fall back to the default
fn clamp_tunable(value: f64, fallback: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}
