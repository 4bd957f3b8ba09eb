//! Saving and restoring a running cycle through the XDG state directory.

use serial_test::serial;
use tempfile::tempdir;

use suncycle::commands::start_cycle;
use suncycle::logger::Log;
use suncycle::state::{StateStore, get_state_dir};
use suncycle::testing::{ManualClock, RecordingSink};
use suncycle::{CycleSettings, DayCycle, Phase};

struct StateHomeGuard {
    original: Option<String>,
}

impl StateHomeGuard {
    fn set(path: &std::path::Path) -> Self {
        let original = std::env::var("XDG_STATE_HOME").ok();
        unsafe {
            std::env::set_var("XDG_STATE_HOME", path);
        }
        Self { original }
    }
}

impl Drop for StateHomeGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => std::env::set_var("XDG_STATE_HOME", val),
                None => std::env::remove_var("XDG_STATE_HOME"),
            }
        }
    }
}

#[test]
#[serial]
fn interrupted_dawn_resumes_from_saved_values() {
    Log::set_enabled(false);
    let dir = tempdir().unwrap();
    let _guard = StateHomeGuard::set(dir.path());
    let store = StateStore::in_dir(get_state_dir(None).unwrap());
    assert!(store.path().starts_with(dir.path()));

    let mut cycle = DayCycle::new(CycleSettings::default()).unwrap();
    let mut clock = ManualClock::degrees_per_tick(1.0, 8);
    let mut sink = RecordingSink::new();
    // Release the gate, then four of the ten ramp degrees
    for _ in 0..5 {
        cycle.tick(&mut clock, &mut sink).unwrap();
    }
    let saved_intensity = cycle.intensity();
    assert!(saved_intensity > 0.0 && saved_intensity < 1.0);
    store.save(&cycle.persisted_state()).unwrap();

    let mut restored = start_cycle(CycleSettings::default(), Some(&store)).unwrap();
    assert_eq!(restored.phase(), Phase::Dawn);
    assert_eq!(restored.intensity(), saved_intensity);
    assert_eq!(restored.rotated_angle(), cycle.rotated_angle());
    assert!(restored.intensity_ramp().is_running());

    let mut previous = saved_intensity;
    for _ in 0..10 {
        restored.tick(&mut clock, &mut sink).unwrap();
        assert!(restored.intensity() >= previous);
        previous = restored.intensity();
    }
    assert_eq!(restored.phase(), Phase::Day);
    assert_eq!(restored.intensity(), 1.0);
}

#[test]
#[serial]
fn gated_dawn_stays_gated_after_restore() {
    Log::set_enabled(false);
    let dir = tempdir().unwrap();
    let store = StateStore::in_dir(dir.path());

    let mut cycle = DayCycle::new(CycleSettings::default()).unwrap();
    let mut clock = ManualClock::degrees_per_tick(1.0, 3);
    let mut sink = RecordingSink::new();
    cycle.tick(&mut clock, &mut sink).unwrap();
    store.save(&cycle.persisted_state()).unwrap();

    let mut restored = start_cycle(CycleSettings::default(), Some(&store)).unwrap();
    assert!(restored.is_awaiting_dawn_hour());
    assert!(!restored.color_ramp().is_running());

    restored.tick(&mut clock, &mut sink).unwrap();
    assert_eq!(restored.intensity(), 0.0);
    assert_eq!(restored.phase(), Phase::Dawn);
}

#[test]
#[serial]
fn uninitialized_state_on_disk_starts_fresh() {
    Log::set_enabled(false);
    let dir = tempdir().unwrap();
    let store = StateStore::in_dir(dir.path());

    let mut state = DayCycle::new(CycleSettings::default())
        .unwrap()
        .persisted_state();
    state.initialized = false;
    state.phase = Phase::Night;
    state.rotated_angle = 250.0;
    store.save(&state).unwrap();

    let cycle = start_cycle(CycleSettings::default(), Some(&store)).unwrap();
    assert_eq!(cycle.phase(), Phase::Dawn);
    assert_eq!(cycle.rotated_angle(), 0.0);
    assert!(cycle.is_awaiting_dawn_hour());
}

#[test]
#[serial]
fn corrupt_state_is_reported() {
    Log::set_enabled(false);
    let dir = tempdir().unwrap();
    let store = StateStore::in_dir(dir.path());
    std::fs::write(store.path(), r#"{"rotated_angle": -4.0}"#).unwrap();

    let result = start_cycle(CycleSettings::default(), Some(&store));
    assert!(result.is_err());
}
