//! Configuration validation functionality.
//!
//! Rejects configurations that would break the cycle math or describe impossible
//! lights. Invalid values are reported, never clamped.

use anyhow::{Context, Result};

use super::Config;
use crate::constants::*;
use crate::cycle::{CycleSettings, Rgb};
use crate::time_source::parse_time_of_day;

/// Validate a loaded configuration, including the runtime-only fields.
pub fn validate_config(config: &Config) -> Result<()> {
    config.cycle_settings()?;

    if let Some(interval_ms) = config.tick_interval
        && !(MINIMUM_TICK_INTERVAL..=MAXIMUM_TICK_INTERVAL).contains(&interval_ms)
    {
        anyhow::bail!(
            "tick_interval ({} ms) must be between {} and {} milliseconds",
            interval_ms,
            MINIMUM_TICK_INTERVAL,
            MAXIMUM_TICK_INTERVAL
        );
    }

    if let Some(speed) = config.speed_multiplier
        && !(speed.is_finite() && speed >= 0.0)
    {
        anyhow::bail!("speed_multiplier must be zero or positive (got {})", speed);
    }

    if let Some(ref start) = config.start_time {
        parse_time_of_day(start).context("Invalid start_time in config")?;
    }

    Ok(())
}

/// Validate resolved cycle parameters.
pub fn validate_settings(settings: &CycleSettings) -> Result<()> {
    validate_positive(
        settings.color_transition_duration,
        "color_transition_duration",
    )?;
    validate_positive(
        settings.intensity_transition_duration,
        "intensity_transition_duration",
    )?;
    validate_positive(settings.day_length, "day_length")?;

    if settings.dawn_hour > MAXIMUM_DAWN_HOUR {
        anyhow::bail!(
            "dawn_hour ({}) must be between 0 and {}",
            settings.dawn_hour,
            MAXIMUM_DAWN_HOUR
        );
    }

    if !(settings.rotation_update_threshold.is_finite()
        && settings.rotation_update_threshold >= 0.0)
    {
        anyhow::bail!(
            "rotation_update_threshold must be zero or positive (got {})",
            settings.rotation_update_threshold
        );
    }

    if !(settings.day_intensity.is_finite() && settings.day_intensity >= 0.0) {
        anyhow::bail!(
            "day_intensity must be zero or positive (got {})",
            settings.day_intensity
        );
    }

    validate_color(settings.dawn_color, "dawn_color")?;
    validate_color(settings.day_color, "day_color")?;
    validate_color(settings.dusk_color, "dusk_color")?;

    Ok(())
}

fn validate_positive(value: f64, name: &str) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        anyhow::bail!("{} must be greater than zero (got {})", name, value);
    }
    Ok(())
}

fn validate_color(color: Rgb, name: &str) -> Result<()> {
    let in_range = color
        .channels()
        .iter()
        .all(|c| (MINIMUM_COLOR_CHANNEL..=MAXIMUM_COLOR_CHANNEL).contains(c));
    if !in_range {
        anyhow::bail!(
            "{} channels must be between {} and {} (got [{}, {}, {}])",
            name,
            MINIMUM_COLOR_CHANNEL,
            MAXIMUM_COLOR_CHANNEL,
            color.r,
            color.g,
            color.b
        );
    }
    Ok(())
}
