//! Implementation of the status command.
//!
//! Prints the saved cycle state for the active configuration directory.

use anyhow::Result;

use crate::cycle::PersistedState;
use crate::state::StateStore;

/// Handle the status command.
pub fn handle_status_command() -> Result<()> {
    let store = StateStore::for_current_config()?;
    log_version!();

    match store.load()? {
        Some(state) => display_state(&state),
        None => {
            log_block_start!("No saved cycle state");
            log_indented!("Expected at {}", store.path().display());
        }
    }

    log_end!();
    Ok(())
}

fn display_state(state: &PersistedState) {
    log_block_start!("Saved cycle state");
    log_indented!("Phase: {}{}", state.phase.symbol(), state.phase.display_name());
    log_indented!("Rotated angle: {:.2}°", state.rotated_angle);
    if state.phase.is_transitioning() {
        log_indented!(
            "Color: {} → {}",
            state.current_color,
            state.desired_color
        );
        log_indented!(
            "Intensity: {:.2} → {:.2}",
            state.current_intensity,
            state.desired_intensity
        );
    } else {
        log_indented!("Color: {}", state.current_color);
        log_indented!("Intensity: {:.2}", state.current_intensity);
    }
    if state.awaiting_dawn_hour {
        log_indented!("Waiting for the dawn hour");
    }
    if !state.initialized {
        log_warning!("State is uninitialized; the next run starts a fresh cycle");
    }
}
