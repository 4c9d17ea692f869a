// Wire codec for the rover's motor characteristic
//
// Each wheel command travels as a fixed 4-byte frame:
// [wheel id, direction, magnitude, reserved]

use std::time::{Duration, Instant};

/// Frame length on the wire
pub const FRAME_LEN: usize = 4;

// Fourth byte carries no data yet; receivers expect 0x00
const RESERVED: u8 = 0x00;

/// Wheel identifiers as they appear in frame byte 0
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPosition {
    Left = 0x01,
    Right = 0x02,
}

impl WheelPosition {
    pub fn id(self) -> u8 {
        self as u8
    }

    fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::Left),
            0x02 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Direction codes as they appear in frame byte 1
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Stop = 0x00,
    Forward = 0x01,
    Reverse = 0x02,
}

impl Direction {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Stop),
            0x01 => Some(Self::Forward),
            0x02 => Some(Self::Reverse),
            _ => None,
        }
    }
}

/// Error types for frame validation
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("unknown wheel id 0x{id:02X}")]
    UnknownWheel { id: u8 },

    #[error("unknown direction code 0x{code:02X}")]
    UnknownDirection { code: u8 },

    #[error("stop frame carries magnitude {magnitude}")]
    StopWithMagnitude { magnitude: u8 },

    #[error("reserved byte must be 0x00, got 0x{value:02X}")]
    BadReserved { value: u8 },
}

/// One wheel's speed command for a single control tick
///
/// Immutable; a fresh command is built every time input changes. The
/// creation instant lets the caller drop commands that sat around too
/// long before reaching the wire.
#[derive(Debug, Clone, Copy)]
pub struct MotorCommand {
    wheel: WheelPosition,
    speed: f64,
    issued_at: Instant,
}

impl MotorCommand {
    /// Build a command, clamping speed to [-1, 1]
    pub fn new(wheel: WheelPosition, speed: f64) -> Self {
        let speed = if speed.is_finite() {
            speed.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            wheel,
            speed,
            issued_at: Instant::now(),
        }
    }

    /// Zero-speed command for one wheel
    pub fn stop(wheel: WheelPosition) -> Self {
        Self::new(wheel, 0.0)
    }

    pub fn wheel(&self) -> WheelPosition {
        self.wheel
    }

    /// Signed speed in [-1, 1]; negative is reverse
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Time since this command was built
    pub fn age(&self) -> Duration {
        self.issued_at.elapsed()
    }

    pub fn to_frame(&self) -> MotorFrame {
        MotorFrame::encode(self)
    }
}

/// Decoded form of the 4-byte wire frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorFrame {
    wheel: WheelPosition,
    direction: Direction,
    magnitude: u8,
}

impl MotorFrame {
    /// Serialize a command into its wire frame
    pub fn encode(command: &MotorCommand) -> Self {
        let speed = command.speed();
        let direction = if speed == 0.0 {
            Direction::Stop
        } else if speed > 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };

        Self {
            wheel: command.wheel(),
            direction,
            magnitude: magnitude_byte(speed),
        }
    }

    /// Validate and decode a received frame
    pub fn parse(bytes: [u8; FRAME_LEN]) -> Result<Self, FrameError> {
        let [id, code, magnitude, reserved] = bytes;

        let wheel = WheelPosition::from_id(id).ok_or(FrameError::UnknownWheel { id })?;
        let direction = Direction::from_code(code).ok_or(FrameError::UnknownDirection { code })?;
        if direction == Direction::Stop && magnitude != 0 {
            return Err(FrameError::StopWithMagnitude { magnitude });
        }
        if reserved != RESERVED {
            return Err(FrameError::BadReserved { value: reserved });
        }

        Ok(Self {
            wheel,
            direction,
            magnitude,
        })
    }

    /// The 4 bytes handed to the characteristic write
    pub fn to_bytes(&self) -> [u8; FRAME_LEN] {
        [
            self.wheel.id(),
            self.direction as u8,
            self.magnitude,
            RESERVED,
        ]
    }

    pub fn wheel(&self) -> WheelPosition {
        self.wheel
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Linear speed magnitude, 255 = full speed
    pub fn magnitude(&self) -> u8 {
        self.magnitude
    }
}

/// Scale |speed| onto the 0..=255 wire range
fn magnitude_byte(speed: f64) -> u8 {
    let scaled = (speed.abs() * 255.0).round();
    // Guards against floating-point overshoot at the boundary
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_frames_for_both_wheels() {
        let left = MotorCommand::stop(WheelPosition::Left).to_frame();
        let right = MotorCommand::stop(WheelPosition::Right).to_frame();
        assert_eq!(left.to_bytes(), [0x01, 0x00, 0x00, 0x00]);
        assert_eq!(right.to_bytes(), [0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_full_forward_left() {
        let frame = MotorCommand::new(WheelPosition::Left, 1.0).to_frame();
        assert_eq!(frame.to_bytes(), [0x01, 0x01, 255, 0x00]);
    }

    #[test]
    fn test_full_reverse_right() {
        let frame = MotorCommand::new(WheelPosition::Right, -1.0).to_frame();
        assert_eq!(frame.to_bytes(), [0x02, 0x02, 255, 0x00]);
    }

    #[test]
    fn test_half_speed_rounds_up() {
        // 0.5 * 255 = 127.5, rounds away from zero
        let frame = MotorCommand::new(WheelPosition::Left, 0.5).to_frame();
        assert_eq!(frame.magnitude(), 128);
        assert_eq!(frame.direction(), Direction::Forward);
    }

    #[test]
    fn test_magnitude_monotonic_and_saturating() {
        let mut previous = 0u8;
        for step in 0..=100 {
            let speed = step as f64 / 100.0;
            let frame = MotorCommand::new(WheelPosition::Left, speed).to_frame();
            assert!(
                frame.magnitude() >= previous,
                "magnitude decreased at speed {}",
                speed
            );
            previous = frame.magnitude();
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn test_speed_clamped_at_construction() {
        let command = MotorCommand::new(WheelPosition::Left, 2.5);
        assert_eq!(command.speed(), 1.0);
        assert_eq!(command.to_frame().magnitude(), 255);

        let command = MotorCommand::new(WheelPosition::Right, f64::NAN);
        assert_eq!(command.speed(), 0.0);
        assert_eq!(command.to_frame().direction(), Direction::Stop);
    }

    #[test]
    fn test_command_age_grows() {
        let command = MotorCommand::new(WheelPosition::Left, 0.5);
        std::thread::sleep(Duration::from_millis(5));
        assert!(command.age() >= Duration::from_millis(5));
    }

    #[test]
    fn test_tiny_reverse_keeps_direction() {
        // Direction reflects the sign even when the magnitude rounds to 0
        let frame = MotorCommand::new(WheelPosition::Left, -0.001).to_frame();
        assert_eq!(frame.direction(), Direction::Reverse);
        assert_eq!(frame.magnitude(), 0);
    }

    #[test]
    fn test_parse_accepts_encoded_frames() {
        let frame = MotorCommand::new(WheelPosition::Right, -0.75).to_frame();
        let parsed = MotorFrame::parse(frame.to_bytes()).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_parse_rejects_unknown_wheel() {
        let err = MotorFrame::parse([0x03, 0x01, 10, 0x00]).unwrap_err();
        assert_eq!(err, FrameError::UnknownWheel { id: 0x03 });
    }

    #[test]
    fn test_parse_rejects_unknown_direction() {
        let err = MotorFrame::parse([0x01, 0x04, 10, 0x00]).unwrap_err();
        assert_eq!(err, FrameError::UnknownDirection { code: 0x04 });
    }

    #[test]
    fn test_parse_rejects_stop_with_magnitude() {
        let err = MotorFrame::parse([0x01, 0x00, 10, 0x00]).unwrap_err();
        assert_eq!(err, FrameError::StopWithMagnitude { magnitude: 10 });
    }

    #[test]
    fn test_parse_rejects_bad_reserved_byte() {
        let err = MotorFrame::parse([0x01, 0x01, 10, 0x7F]).unwrap_err();
        assert_eq!(err, FrameError::BadReserved { value: 0x7F });
    }
}
