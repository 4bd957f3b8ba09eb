//! Shutdown signal handling for the run loop.
//!
//! SIGINT and SIGTERM flip a shared flag that the loop checks between ticks, so the
//! cycle always stops on a tick boundary and its state can be saved cleanly.

use anyhow::{Context, Result};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag raised once a shutdown signal has been received.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    raised: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register SIGINT, SIGTERM and SIGHUP to raise this flag.
    pub fn register(&self) -> Result<()> {
        for signal in [SIGINT, SIGTERM, SIGHUP] {
            signal_hook::flag::register(signal, Arc::clone(&self.raised))
                .with_context(|| format!("Failed to register handler for signal {signal}"))?;
        }
        Ok(())
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }
}

/// Create a flag wired to the process's shutdown signals.
pub fn setup_signal_handler() -> Result<ShutdownFlag> {
    let flag = ShutdownFlag::new();
    flag.register()?;
    log_debug!("Registered shutdown handlers for SIGINT, SIGTERM and SIGHUP");
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_shared_between_clones() {
        let flag = ShutdownFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_raised());
        flag.raise();
        assert!(observer.is_raised());
    }
}
