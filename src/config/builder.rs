//! Default configuration file generation.
//!
//! The generated file lists every setting with its default value and an aligned
//! comment, grouped into sections.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::cycle::Rgb;

/// Create a default config file at `path`, creating parent directories as needed.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    log_block_start!("Created default configuration");
    log_indented!("{}", path.display());
    Ok(())
}

/// Render the default configuration file.
pub fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Colors")
        .add_setting(
            "dawn_color",
            &color_literal(DEFAULT_DAWN_COLOR),
            "Color at the start of dawn ([r, g, b] 0-1 or \"#rrggbb\")",
        )
        .add_setting(
            "day_color",
            &color_literal(DEFAULT_DAY_COLOR),
            "Color reached at the end of dawn",
        )
        .add_setting(
            "dusk_color",
            &color_literal(DEFAULT_DUSK_COLOR),
            "Color reached at the end of dusk",
        )
        .add_setting(
            "day_intensity",
            &format!("{DEFAULT_DAY_INTENSITY:?}"),
            "Light intensity during the day (>= 0)",
        )
        .add_section("Cycle")
        .add_setting(
            "dawn_hour",
            &DEFAULT_DAWN_HOUR.to_string(),
            "Dawn ramps wait for this simulated hour (0-23)",
        )
        .add_setting(
            "color_transition_duration",
            &format!("{DEFAULT_COLOR_TRANSITION_DURATION:?}"),
            "Color ramp length in degrees of rotation (> 0)",
        )
        .add_setting(
            "intensity_transition_duration",
            &format!("{DEFAULT_INTENSITY_TRANSITION_DURATION:?}"),
            "Intensity ramp length in degrees of rotation (> 0)",
        )
        .add_setting(
            "day_length",
            &format!("{DEFAULT_DAY_LENGTH:?}"),
            "Rotation speed multiplier (> 0)",
        )
        .add_setting(
            "rotation_update_threshold",
            &format!("{DEFAULT_ROTATION_UPDATE_THRESHOLD:?}"),
            "Minimum degrees between rotation updates (>= 0)",
        )
        .add_section("Runtime")
        .add_setting(
            "tick_interval",
            &DEFAULT_TICK_INTERVAL.to_string(),
            "Milliseconds between ticks (1-1000)",
        )
        .add_setting(
            "speed_multiplier",
            &format!("{DEFAULT_SPEED_MULTIPLIER:?}"),
            "Simulated seconds per real second (>= 0)",
        )
        .add_setting(
            "persist_state",
            &DEFAULT_PERSIST_STATE.to_string(),
            "Save and restore the cycle across restarts",
        )
        .build();
    content.push('\n');
    content
}

fn color_literal(color: Rgb) -> String {
    format!("[{:?}, {:?}, {:?}]", color.r, color.g, color.b)
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // Align all comments one space past the longest setting line
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
