use super::validation::{validate_config, validate_settings};
use super::*;
use crate::constants::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config.cycle_settings().unwrap(), CycleSettings::default());
    assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
    assert_eq!(config.speed_multiplier(), DEFAULT_SPEED_MULTIPLIER);
    assert!(config.persist_state());
}

#[test]
fn test_hex_and_channel_colors() {
    let config = parse(
        r##"
        dawn_color = "#ff8000"
        day_color = [1.0, 1.0, 1.0]
        dusk_color = [1, 0, 0]
        "##,
    )
    .unwrap();
    let settings = config.cycle_settings().unwrap();
    assert_eq!(settings.dawn_color.to_hex(), "#ff8000");
    assert_eq!(settings.day_color, Rgb::WHITE);
    assert_eq!(settings.dusk_color, Rgb::new(1.0, 0.0, 0.0));
}

#[test]
fn test_invalid_hex_color_is_rejected() {
    let result = parse(r#"dawn_color = "orange""#);
    assert!(result.is_err());
}

#[test]
fn test_color_channel_out_of_range_is_rejected() {
    let result = parse("day_color = [1.5, 1.0, 1.0]");
    let message = result.unwrap_err().to_string();
    assert!(message.contains("day_color"), "unexpected error: {message}");
}

#[test]
fn test_non_positive_durations_are_rejected() {
    for field in ["color_transition_duration", "intensity_transition_duration"] {
        for value in ["0.0", "-2.5"] {
            let result = parse(&format!("{field} = {value}"));
            let message = result.unwrap_err().to_string();
            assert!(
                message.contains(field),
                "{field} = {value} gave unexpected error: {message}"
            );
        }
    }
}

#[test]
fn test_dawn_hour_range() {
    assert!(parse("dawn_hour = 0").is_ok());
    assert!(parse("dawn_hour = 23").is_ok());
    let message = parse("dawn_hour = 24").unwrap_err().to_string();
    assert!(message.contains("dawn_hour"));
}

#[test]
fn test_day_length_must_be_positive() {
    assert!(parse("day_length = 0.0").is_err());
    assert!(parse("day_length = 2.0").is_ok());
}

#[test]
fn test_threshold_may_be_zero_but_not_negative() {
    assert!(parse("rotation_update_threshold = 0.0").is_ok());
    assert!(parse("rotation_update_threshold = -0.1").is_err());
}

#[test]
fn test_negative_day_intensity_is_rejected() {
    assert!(parse("day_intensity = -1.0").is_err());
}

#[test]
fn test_runtime_field_validation() {
    assert!(parse("tick_interval = 0").is_err());
    assert!(parse("tick_interval = 1001").is_err());
    assert!(parse("tick_interval = 16").is_ok());
    assert!(parse("speed_multiplier = -1.0").is_err());
    assert!(parse(r#"start_time = "6am""#).is_err());
    assert!(parse(r#"start_time = "05:30:00""#).is_ok());
}

#[test]
fn test_unknown_fields_are_rejected() {
    assert!(parse("sun_size = 3").is_err());
}

#[test]
fn test_validate_settings_rejects_nan_duration() {
    let settings = CycleSettings {
        color_transition_duration: f64::NAN,
        ..CycleSettings::default()
    };
    assert!(validate_settings(&settings).is_err());
}

#[test]
fn test_start_time_parsing() {
    let config = parse(r#"start_time = "05:30:00""#).unwrap();
    let start = config.start_time().unwrap();
    assert_eq!(start, NaiveTime::from_hms_opt(5, 30, 0).unwrap());
}

#[test]
fn test_load_from_missing_path_fails() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("missing.toml");
    assert!(load_from_path(&path).is_err());
}

#[test]
fn test_load_from_path_reads_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "dawn_hour = 5\nday_length = 2.0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    let settings = config.cycle_settings().unwrap();
    assert_eq!(settings.dawn_hour, 5);
    assert_eq!(settings.day_length, 2.0);
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    crate::logger::Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

    let original = std::env::var("XDG_CONFIG_HOME").ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    let result = Config::load();

    unsafe {
        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.cycle_settings().unwrap(), CycleSettings::default());
}
