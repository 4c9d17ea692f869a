// High-level drive API for the two-wheel base
//
// Combines the steering mix and the frame codec so the control loop only
// deals in joystick samples and ready-to-send frames.

use tracing::debug;

use super::frame::{MotorCommand, MotorFrame, WheelPosition};
use super::steering::compute_wheel_speeds;
use crate::config::SteeringConfig;
use crate::messages::JoystickSample;

/// Build the per-wheel command pair for one control tick, left first
pub fn command_pair(sample: &JoystickSample, config: &SteeringConfig) -> [MotorCommand; 2] {
    let speeds = compute_wheel_speeds(sample, config);
    debug!(
        "wheel speeds: left={:.3}, right={:.3}",
        speeds.left, speeds.right
    );

    [
        MotorCommand::new(WheelPosition::Left, speeds.left),
        MotorCommand::new(WheelPosition::Right, speeds.right),
    ]
}

/// Encode one wire frame per wheel for a joystick sample
pub fn command_frames(sample: &JoystickSample, config: &SteeringConfig) -> [MotorFrame; 2] {
    command_pair(sample, config).map(|command| command.to_frame())
}

/// Frame pair that halts both wheels
///
/// All-stop is just the zero-speed command encoded per wheel; there is no
/// special cased "both wheels" frame on the wire.
pub fn stop_frames() -> [MotorFrame; 2] {
    [
        MotorCommand::stop(WheelPosition::Left).to_frame(),
        MotorCommand::stop(WheelPosition::Right).to_frame(),
    ]
}
