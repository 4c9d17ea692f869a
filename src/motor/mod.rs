// Motor control module for the two-wheel differential base
//
// Provides:
// - Differential steering mix (joystick sample -> wheel speeds)
// - Fixed 4-byte wire frame codec for the motor characteristic
// - High-level per-tick drive API

mod driver;
pub mod frame;
pub mod steering;

pub use driver::{command_frames, command_pair, stop_frames};
pub use frame::{Direction, FrameError, MotorCommand, MotorFrame, WheelPosition, FRAME_LEN};
pub use steering::{compute_wheel_speeds, emergency_stop, WheelSpeeds};
