//! Command-line command handlers for suncycle.
//!
//! Each command lives in its own submodule. The helpers here are shared by the
//! commands that build a cycle from configuration and saved state.

pub mod help;
pub mod reset;
pub mod run;
pub mod simulate;
pub mod status;

use anyhow::{Context, Result};

use crate::cycle::{CycleSettings, DayCycle};
use crate::state::StateStore;

/// Build the cycle to run: restored from `store` when it holds a saved state,
/// otherwise a fresh cycle starting at dawn.
pub fn start_cycle(settings: CycleSettings, store: Option<&StateStore>) -> Result<DayCycle> {
    let saved = match store {
        Some(store) => store.load().context("Failed to load saved cycle state")?,
        None => None,
    };

    match saved {
        Some(state) => DayCycle::restore(settings, &state),
        None => {
            log_block_start!("Starting a fresh cycle");
            DayCycle::new(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{PersistedState, Phase, Rgb};
    use crate::logger::Log;
    use tempfile::tempdir;

    #[test]
    fn test_start_cycle_without_store_is_fresh() {
        Log::set_enabled(false);
        let cycle = start_cycle(CycleSettings::default(), None).unwrap();
        assert_eq!(cycle.phase(), Phase::Dawn);
        assert!(cycle.is_awaiting_dawn_hour());
    }

    #[test]
    fn test_start_cycle_restores_saved_state() {
        Log::set_enabled(false);
        let dir = tempdir().unwrap();
        let store = StateStore::in_dir(dir.path());
        let saved = PersistedState {
            rotated_angle: 42.0,
            phase: Phase::Day,
            current_color: Rgb::WHITE,
            desired_color: Rgb::WHITE,
            current_intensity: 1.0,
            desired_intensity: 1.0,
            initialized: true,
            awaiting_dawn_hour: false,
        };
        store.save(&saved).unwrap();

        let cycle = start_cycle(CycleSettings::default(), Some(&store)).unwrap();
        assert_eq!(cycle.phase(), Phase::Day);
        assert_eq!(cycle.rotated_angle(), 42.0);
    }
}
