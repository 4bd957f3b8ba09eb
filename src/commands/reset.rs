//! Implementation of the reset command: discard the saved cycle state.

use anyhow::Result;

use crate::state::StateStore;

/// Handle the reset command.
pub fn handle_reset_command() -> Result<()> {
    let store = StateStore::for_current_config()?;
    log_version!();

    if store.clear()? {
        log_block_start!("Removed saved cycle state");
        log_indented!("{}", store.path().display());
        log_indented!("The next run starts a fresh cycle at dawn");
    } else {
        log_block_start!("No saved cycle state to remove");
    }

    log_end!();
    Ok(())
}
