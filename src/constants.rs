//! Application-wide constants: configuration defaults, validation limits and the
//! fixed angles that drive phase transitions.

use crate::cycle::color::Rgb;

// # Cycle geometry (degrees of accumulated rotation)

/// Above this angle the sun is below the horizon and visual rotation is no longer applied.
pub const HORIZON_ANGLE: f64 = 179.0;

/// Rotation past this angle during Day starts dusk.
pub const DUSK_ANGLE: f64 = 150.0;

/// A full turn; reaching it during Night re-triggers dawn.
pub const FULL_CYCLE_ANGLE: f64 = 360.0;

/// Speed multiplier is expressed per simulated minute.
pub const SPEED_DIVISOR: f64 = 60.0;

/// Degrees of rotation per simulated minute at day length 1 (360° over 1440 minutes).
pub const DEGREES_PER_MINUTE: f64 = 4.0;

// # Configuration defaults

pub const DEFAULT_DAWN_COLOR: Rgb = Rgb::new(1.0, 0.55, 0.35);
pub const DEFAULT_DAY_COLOR: Rgb = Rgb::new(1.0, 0.96, 0.9);
pub const DEFAULT_DUSK_COLOR: Rgb = Rgb::new(1.0, 0.38, 0.19);
pub const DEFAULT_DAY_INTENSITY: f64 = 1.0;
pub const DEFAULT_DAWN_HOUR: u32 = 6;
pub const DEFAULT_COLOR_TRANSITION_DURATION: f64 = 10.0;
pub const DEFAULT_INTENSITY_TRANSITION_DURATION: f64 = 10.0;
pub const DEFAULT_DAY_LENGTH: f64 = 1.0;
pub const DEFAULT_ROTATION_UPDATE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_TICK_INTERVAL: u64 = 50; // milliseconds
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 60.0;
pub const DEFAULT_PERSIST_STATE: bool = true;

// Simulation defaults for the `simulate` command
pub const DEFAULT_SIMULATE_DELTA: f64 = 1.0; // seconds per tick
pub const DEFAULT_START_TIME: &str = "06:00:00";

// # Validation limits

pub const MAXIMUM_DAWN_HOUR: u32 = 23;
pub const MINIMUM_TICK_INTERVAL: u64 = 1;
pub const MAXIMUM_TICK_INTERVAL: u64 = 1000;
pub const MINIMUM_COLOR_CHANNEL: f64 = 0.0;
pub const MAXIMUM_COLOR_CHANNEL: f64 = 1.0;

// # File names

pub const CONFIG_DIR_NAME: &str = "suncycle";
pub const CONFIG_FILE_NAME: &str = "suncycle.toml";
pub const STATE_FILE_NAME: &str = "cycle.json";
pub const STATE_LOCK_FILE_NAME: &str = "cycle.lock";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
