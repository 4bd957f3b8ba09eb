//! Configuration system for suncycle.
//!
//! Settings are read from `suncycle.toml` in `$XDG_CONFIG_HOME/suncycle/` (or the
//! directory passed with `--config`). A commented default file is generated on first
//! load. Every field is optional and falls back to the defaults in
//! [`crate::constants`].
//!
//! ```toml
//! #[Colors]
//! dawn_color = [1.0, 0.55, 0.35]    # Color at the start of dawn ([r, g, b] 0-1 or "#rrggbb")
//! day_color = [1.0, 0.96, 0.9]      # Color reached at the end of dawn
//! dusk_color = [1.0, 0.38, 0.19]    # Color reached at the end of dusk
//! day_intensity = 1.0               # Light intensity during the day (>= 0)
//!
//! #[Cycle]
//! dawn_hour = 6                     # Dawn ramps wait for this simulated hour (0-23)
//! color_transition_duration = 10.0  # Color ramp length in degrees of rotation (> 0)
//! intensity_transition_duration = 10.0
//! day_length = 1.0                  # Rotation speed multiplier (> 0)
//! rotation_update_threshold = 0.1   # Minimum degrees between rotation updates (>= 0)
//!
//! #[Runtime]
//! tick_interval = 50                # Milliseconds between ticks (1-1000)
//! speed_multiplier = 60.0           # Simulated seconds per real second (>= 0)
//! start_time = "06:00:00"           # Simulated time of day at startup (HH:MM:SS)
//! persist_state = true              # Save and restore the cycle across restarts
//! ```
//!
//! ## Validation
//!
//! Invalid values are fatal at startup. Nothing is clamped: ramp math divides by the
//! transition durations, so a zero or negative duration must never reach the cycle.

pub mod builder;
pub mod loading;
pub mod validation;

#[cfg(test)]
mod tests;

use anyhow::Result;
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::cycle::{CycleSettings, Rgb};
use crate::time_source::parse_time_of_day;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Color as written in the configuration file: `"#rrggbb"` or `[r, g, b]` in `0.0..=1.0`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSetting {
    Hex(String),
    Channels([f64; 3]),
}

impl ColorSetting {
    pub fn to_rgb(&self) -> Result<Rgb> {
        match self {
            ColorSetting::Hex(hex) => Rgb::from_hex(hex),
            ColorSetting::Channels(channels) => Ok(Rgb::from(*channels)),
        }
    }
}

/// Configuration structure for suncycle settings.
///
/// ## Configuration Categories
///
/// - **Colors**: `dawn_color`, `day_color`, `dusk_color`, `day_intensity`
/// - **Cycle**: `dawn_hour`, `color_transition_duration`, `intensity_transition_duration`,
///   `day_length`, `rotation_update_threshold`
/// - **Runtime**: `tick_interval`, `speed_multiplier`, `start_time`, `persist_state`
///   (only used by the `run` loop and the `simulate` command)
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub dawn_color: Option<ColorSetting>,
    pub day_color: Option<ColorSetting>,
    pub dusk_color: Option<ColorSetting>,
    pub day_intensity: Option<f64>,
    pub dawn_hour: Option<u32>,
    pub color_transition_duration: Option<f64>, // degrees of rotation
    pub intensity_transition_duration: Option<f64>, // degrees of rotation
    pub day_length: Option<f64>,
    pub rotation_update_threshold: Option<f64>, // degrees

    pub tick_interval: Option<u64>, // milliseconds
    pub speed_multiplier: Option<f64>,
    pub start_time: Option<String>, // HH:MM:SS, defaults to the local time
    pub persist_state: Option<bool>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    /// Resolve the cycle parameters, applying defaults and validating the result.
    pub fn cycle_settings(&self) -> Result<CycleSettings> {
        let color = |setting: &Option<ColorSetting>, default: Rgb| -> Result<Rgb> {
            setting.as_ref().map_or(Ok(default), ColorSetting::to_rgb)
        };

        let settings = CycleSettings {
            dawn_color: color(&self.dawn_color, DEFAULT_DAWN_COLOR)?,
            day_color: color(&self.day_color, DEFAULT_DAY_COLOR)?,
            dusk_color: color(&self.dusk_color, DEFAULT_DUSK_COLOR)?,
            day_intensity: self.day_intensity.unwrap_or(DEFAULT_DAY_INTENSITY),
            dawn_hour: self.dawn_hour.unwrap_or(DEFAULT_DAWN_HOUR),
            color_transition_duration: self
                .color_transition_duration
                .unwrap_or(DEFAULT_COLOR_TRANSITION_DURATION),
            intensity_transition_duration: self
                .intensity_transition_duration
                .unwrap_or(DEFAULT_INTENSITY_TRANSITION_DURATION),
            day_length: self.day_length.unwrap_or(DEFAULT_DAY_LENGTH),
            rotation_update_threshold: self
                .rotation_update_threshold
                .unwrap_or(DEFAULT_ROTATION_UPDATE_THRESHOLD),
        };

        validation::validate_settings(&settings)?;
        Ok(settings)
    }

    pub fn tick_interval(&self) -> u64 {
        self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier.unwrap_or(DEFAULT_SPEED_MULTIPLIER)
    }

    pub fn persist_state(&self) -> bool {
        self.persist_state.unwrap_or(DEFAULT_PERSIST_STATE)
    }

    /// Simulated start time of day; the local wall-clock time when unset.
    pub fn start_time(&self) -> Result<NaiveTime> {
        match self.start_time.as_deref() {
            Some(s) => parse_time_of_day(s),
            None => Ok(chrono::Local::now().time()),
        }
    }

    /// Log the effective configuration.
    pub fn log_config(&self, path: Option<&PathBuf>) {
        if let Some(path) = path {
            log_block_start!("Loaded configuration from {}", path.display());
        } else {
            log_block_start!("Using default configuration");
        }

        match self.cycle_settings() {
            Ok(settings) => {
                log_indented!(
                    "Colors: dawn {} → day {} → dusk {}",
                    settings.dawn_color,
                    settings.day_color,
                    settings.dusk_color
                );
                log_indented!("Day intensity: {:.2}", settings.day_intensity);
                log_indented!("Dawn hour: {:02}:00", settings.dawn_hour);
                log_indented!(
                    "Ramp durations: color {}°, intensity {}°",
                    settings.color_transition_duration,
                    settings.intensity_transition_duration
                );
                log_indented!(
                    "Day length: {}x, rotation threshold {}°",
                    settings.day_length,
                    settings.rotation_update_threshold
                );
            }
            Err(e) => log_warning!("Configuration is invalid: {e}"),
        }

        log_indented!(
            "Tick interval: {}ms at {}x speed",
            self.tick_interval(),
            self.speed_multiplier()
        );
    }
}
