//! # Suncycle Library
//!
//! Day/night cycle driver for a celestial light source.
//!
//! This library exists to enable testing of the cycle internals and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Cycle**: `cycle` module with the phase state machine, rotation accumulator and
//!   color/intensity ramps. It is driven one tick at a time through injected
//!   collaborators and has no knowledge of real time or rendering.
//! - **Collaborators**: `time_source` (the [`time_source::ClockAdapter`] trait and its
//!   clocks) and `sink` (the [`sink::LightSink`] trait and its sinks)
//! - **Configuration**: `config` module for TOML-based settings
//! - **State**: `state` module saving and restoring the cycle across runs
//! - **Commands**: `commands` module for the run loop and CLI subcommands
//! - **Infrastructure**: argument parsing, signal handling and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod cycle;
pub mod signals;
pub mod sink;
pub mod state;
pub mod time_source;

#[cfg(any(test, feature = "testing-support"))]
pub mod testing;

pub use cycle::{CycleSettings, DayCycle, Phase, Rgb};
pub use sink::{LightFrame, LightSink};
pub use time_source::ClockAdapter;
