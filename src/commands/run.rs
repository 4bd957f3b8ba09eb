//! Real-time run loop.
//!
//! Ticks the cycle against the wall clock every `tick_interval` milliseconds until a
//! shutdown signal arrives, then saves the cycle state when persistence is enabled.

use anyhow::{Context, Result};
use std::thread;
use std::time::Duration;

use crate::config::{self, Config};
use crate::logger::Log;
use crate::signals::setup_signal_handler;
use crate::sink::ConsoleSink;
use crate::state::StateStore;
use crate::time_source::WallClock;

/// Run the cycle until interrupted. `fresh` discards any saved state first.
pub fn run_cycle(fresh: bool) -> Result<()> {
    log_version!();

    let shutdown = setup_signal_handler()?;

    let config = Config::load()?;
    config.log_config(config::get_config_path().ok().as_ref());
    let settings = config.cycle_settings()?;

    let store = if config.persist_state() {
        Some(StateStore::for_current_config()?)
    } else {
        None
    };

    if fresh
        && let Some(store) = &store
        && store.clear()?
    {
        log_block_start!("Discarded saved cycle state");
    }

    let mut cycle = super::start_cycle(settings, store.as_ref())?;
    let mut clock = WallClock::new(config.start_time()?, config.speed_multiplier());
    let mut sink = ConsoleSink::new();
    let interval = Duration::from_millis(config.tick_interval());

    log_block_start!(
        "Running from {} at {}x speed (Ctrl+C to stop)",
        clock.time_of_day().format("%H:%M:%S"),
        config.speed_multiplier()
    );

    let result = loop {
        if shutdown.is_raised() {
            break Ok(());
        }

        Log::set_simulated_time(Some(clock.time_of_day()));
        if let Err(e) = cycle.tick(&mut clock, &mut sink) {
            break Err(e);
        }

        thread::sleep(interval);
    };

    Log::set_simulated_time(None);
    log_block_start!("Stopping after {} frames", sink.frames());

    // Save even when the loop failed so the cycle resumes where it stopped
    if let Some(store) = &store {
        let saved = store
            .save(&cycle.persisted_state())
            .context("Failed to save cycle state");
        if saved.is_ok() {
            log_indented!("Saved cycle state to {}", store.path().display());
        }
        return merge_save_outcome(result, saved);
    }

    log_end!();
    result
}

/// Combine the loop outcome with the final save. A loop error is never replaced by
/// the save error; both are reported.
fn merge_save_outcome(result: Result<()>, saved: Result<()>) -> Result<()> {
    match (result, saved) {
        (Err(e), Err(save_err)) => {
            Err(e.context(format!("{save_err:#}, after the cycle stopped")))
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), Err(save_err)) => Err(save_err),
        (Ok(()), Ok(())) => {
            log_end!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_save_failure_keeps_loop_error() {
        Log::set_enabled(false);
        let result: Result<()> =
            Err(anyhow!("light sink unavailable")).context("Sink failed at tick 7");
        let saved: Result<()> = Err(anyhow!("disk full")).context("Failed to save cycle state");

        let message = format!("{:#}", merge_save_outcome(result, saved).unwrap_err());
        assert!(message.contains("Failed to save cycle state: disk full"), "{message}");
        assert!(message.contains("Sink failed at tick 7: light sink unavailable"), "{message}");
    }

    #[test]
    fn test_save_failure_alone_is_reported() {
        Log::set_enabled(false);
        let saved: Result<()> = Err(anyhow!("disk full")).context("Failed to save cycle state");
        let message = format!("{:#}", merge_save_outcome(Ok(()), saved).unwrap_err());
        assert_eq!(message, "Failed to save cycle state: disk full");
    }

    #[test]
    fn test_loop_error_survives_successful_save() {
        Log::set_enabled(false);
        let result = Err(anyhow!("light sink unavailable"));
        let message = format!("{:#}", merge_save_outcome(result, Ok(())).unwrap_err());
        assert_eq!(message, "light sink unavailable");
    }
}
