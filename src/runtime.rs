// Fixed-rate control loop with an input watchdog
// If the operator input goes quiet the base must coast to a stop instead of
// replaying the last command forever.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::{INPUT_TIMEOUT, LOOP_HZ, SteeringConfig};
use crate::messages::{ControlHealth, JoystickSample};
use crate::motor::{MotorFrame, command_frames, stop_frames};

// Synthetic stick recenters once key repeats stop arriving
const KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(100);

/// Caller-side control state: the latest joystick sample plus the watchdog
/// deciding whether it is still trustworthy.
pub struct Controller {
    latest_sample: Option<JoystickSample>,
    sample_received_at: Instant,
    health: ControlHealth,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            latest_sample: None,
            sample_received_at: Instant::now(),
            health: ControlHealth::InputStale, // Start stale until first sample
        }
    }

    pub fn health(&self) -> ControlHealth {
        self.health
    }

    /// Process an incoming joystick sample
    pub fn on_sample(&mut self, sample: JoystickSample) {
        self.latest_sample = Some(sample);
        self.sample_received_at = Instant::now();
    }

    /// Compute this tick's frame pair, applying the watchdog
    pub fn compute_frames(&mut self, config: &SteeringConfig) -> [MotorFrame; 2] {
        let sample_age = self.sample_received_at.elapsed();

        if sample_age > INPUT_TIMEOUT {
            // Watchdog tripped - stop the base
            if self.health != ControlHealth::InputStale {
                warn!("input stale ({:?} old), stopping base", sample_age);
            }
            self.health = ControlHealth::InputStale;
            stop_frames()
        } else if let Some(ref sample) = self.latest_sample {
            self.health = ControlHealth::Ok;
            command_frames(sample, config)
        } else {
            // No sample ever received
            self.health = ControlHealth::InputStale;
            stop_frames()
        }
    }

    /// Drop the stored sample and halt both wheels immediately
    pub fn emergency_stop(&mut self) -> [MotorFrame; 2] {
        warn!("emergency stop commanded");
        self.latest_sample = None;
        self.health = ControlHealth::InputStale;
        stop_frames()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyboard teleop: WASD steer, SPACE emergency stop, Q quit
///
/// Synthesizes joystick samples from key presses and runs the control loop
/// against them. Frames are traced instead of written anywhere; the
/// transport owning the characteristic write lives in the embedding app.
pub async fn run(config: SteeringConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Controls: WASD=steer, SPACE=emergency stop, Q=quit");
    info!(
        "Control loop: {}Hz, {}ms input watchdog",
        LOOP_HZ,
        INPUT_TIMEOUT.as_millis()
    );
    info!("Steering config: {:?}", config);

    enable_raw_mode()?;
    let result = run_teleop(config).await;
    disable_raw_mode()?;
    result
}

async fn run_teleop(config: SteeringConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut controller = Controller::new();
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));

    // Persistent synthetic stick state
    let mut x = 0.0;
    let mut y = 0.0;
    let mut last_key = Instant::now();

    loop {
        tick.tick().await;

        // 1. Drain all pending key events (non-blocking)
        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;
                if !pressed {
                    continue;
                }

                match code {
                    KeyCode::Char('w') => {
                        y = 1.0;
                        last_key = Instant::now();
                    }
                    KeyCode::Char('s') => {
                        y = -1.0;
                        last_key = Instant::now();
                    }
                    KeyCode::Char('a') => {
                        x = -1.0;
                        last_key = Instant::now();
                    }
                    KeyCode::Char('d') => {
                        x = 1.0;
                        last_key = Instant::now();
                    }
                    KeyCode::Char(' ') => {
                        x = 0.0;
                        y = 0.0;
                        trace_frames(&controller.emergency_stop());
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                }
            }
        }

        // 2. Recenter the stick once movement keys stop repeating
        if last_key.elapsed() > KEY_RELEASE_TIMEOUT {
            x = 0.0;
            y = 0.0;
        }

        // 3. Feed the sample in and compute this tick's frames
        controller.on_sample(JoystickSample::new(x, y));
        trace_frames(&controller.compute_frames(&config));
    }
}

fn trace_frames(frames: &[MotorFrame; 2]) {
    for frame in frames {
        debug!("frame {:02X?}", frame.to_bytes());
    }
}
