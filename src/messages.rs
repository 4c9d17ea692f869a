// Message types exchanged with the embedding application

use serde::{Deserialize, Serialize};

// One joystick reading from the operator's input surface.
// Axes are clamped at construction so everything downstream stays total;
// a garbage reading degrades to "centered" instead of aborting control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleWire")]
pub struct JoystickSample {
    x: f64,
    y: f64,
}

// On-the-wire shape; clamping is re-applied when deserializing
#[derive(Deserialize)]
struct SampleWire {
    x: f64,
    y: f64,
}

impl From<SampleWire> for JoystickSample {
    fn from(wire: SampleWire) -> Self {
        Self::new(wire.x, wire.y)
    }
}

impl JoystickSample {
    pub const CENTERED: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Turn axis: -1.0 (full left) to +1.0 (full right)
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Forward axis: -1.0 (full reverse) to +1.0 (full forward)
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Radial deflection, capped at 1.0 for corner positions
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt().min(1.0)
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Health status reported by the control loop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ControlHealth {
    Ok,
    InputStale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_clamped_at_construction() {
        let sample = JoystickSample::new(1.5, -3.0);
        assert_eq!(sample.x(), 1.0);
        assert_eq!(sample.y(), -1.0);
    }

    #[test]
    fn test_non_finite_axes_read_as_centered() {
        let sample = JoystickSample::new(f64::NAN, f64::INFINITY);
        assert_eq!(sample, JoystickSample::CENTERED);
        assert_eq!(sample.magnitude(), 0.0);
    }

    #[test]
    fn test_magnitude_capped_at_corner() {
        // Full diagonal deflection has raw length sqrt(2)
        let sample = JoystickSample::new(1.0, 1.0);
        assert_eq!(sample.magnitude(), 1.0);
    }

    #[test]
    fn test_magnitude_of_single_axis() {
        let sample = JoystickSample::new(0.0, 0.5);
        assert!((sample.magnitude() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_deserialized_sample_is_clamped() {
        let sample: JoystickSample = serde_json::from_str(r#"{"x": 2.0, "y": -0.5}"#).unwrap();
        assert_eq!(sample.x(), 1.0);
        assert_eq!(sample.y(), -0.5);
    }
}
