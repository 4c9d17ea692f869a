// Differential steering mix for a two-wheel base
// Converts a joystick deflection into left/right wheel speed commands.

use crate::config::SteeringConfig;
use crate::messages::JoystickSample;

/// Signed wheel speed pair, each in [-1.0, 1.0]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns speeds as array [left, right]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}

/// Convert a joystick sample to wheel speed commands
///
/// # Arguments
/// * `sample` - joystick deflection, axes pre-clamped to [-1, 1]
/// * `config` - caller-owned tunables, re-read on every call
///
/// # Returns
/// Wheel speeds with magnitudes bounded by `config.max_speed_multiplier()`.
/// Deflections below the dead zone are suppressed entirely, not attenuated.
pub fn compute_wheel_speeds(sample: &JoystickSample, config: &SteeringConfig) -> WheelSpeeds {
    let magnitude = sample.magnitude();

    // Deflections inside the dead zone are noise, not intent. The zero
    // check also keeps the radial rescale below free of a 0/0.
    if magnitude == 0.0 || magnitude < config.dead_zone() {
        return WheelSpeeds::zero();
    }

    // Rescale radially so dead_zone maps to 0 and full deflection stays
    // 1.0; direction is preserved, only the extent changes
    let scaled = (magnitude - config.dead_zone()) / (1.0 - config.dead_zone());
    let radial = scaled / magnitude;
    let x = sample.x() * radial;
    let y = sample.y() * radial;

    // Differential mix: forward axis plus/minus the turn component
    let turn = x * config.steering_sensitivity();
    let mut left = y + turn;
    let mut right = y - turn;

    // Rescale jointly if either wheel saturates, keeping their ratio
    let peak = left.abs().max(right.abs());
    if peak > 1.0 {
        left /= peak;
        right /= peak;
    }

    WheelSpeeds::new(
        left * config.max_speed_multiplier(),
        right * config.max_speed_multiplier(),
    )
}

/// All-stop speed pair, bypassing the transform entirely
///
/// Callers invoke this directly when a stop is commanded instead of
/// routing a centered sample through `compute_wheel_speeds`.
pub fn emergency_stop() -> WheelSpeeds {
    WheelSpeeds::zero()
}
